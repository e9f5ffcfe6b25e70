use anyhow::{Context, Result};
use beseda_analysis::{build_translator, RuleTagger, TextAnalyzer, ToneAnalyzer};
use beseda_core::config::LoggingConfig;
use beseda_core::{BesedaConfig, ConfigNote, LexiconScorer};
use beseda_reasoning::{is_exit_command, Dispatcher};
use beseda_skills::OpenWeatherClient;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long, env = "BESEDA_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for reply selection, makes answers repeatable
    #[arg(long, env = "BESEDA_SEED")]
    seed: Option<u64>,
}

/// `--config`, else `./beseda.toml`, else `<config dir>/beseda/config.toml`.
fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    let local = PathBuf::from("beseda.toml");
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("beseda").join("config.toml"))
        .unwrap_or(local)
}

/// Logs go to stderr (or a file) so they never interleave with the dialogue.
fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match &config.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn build_dispatcher(config: &BesedaConfig, seed: Option<u64>) -> Result<Dispatcher> {
    let translator = build_translator(&config.translation)?;
    let tone = ToneAnalyzer::new(translator, Arc::new(LexiconScorer::new())).with_config(config.tone);
    let text = TextAnalyzer::new(Arc::new(RuleTagger::new()));
    let weather = Arc::new(OpenWeatherClient::new(&config.weather)?);

    let dispatcher = Dispatcher::new(tone, text, weather);
    Ok(match seed {
        Some(seed) => dispatcher.with_rng(StdRng::seed_from_u64(seed)),
        None => dispatcher,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let (config, config_notes) = BesedaConfig::load_deferred(resolve_config_path(args.config));
    let _log_guard = init_logging(&config.logging)?;
    config_notes.iter().for_each(ConfigNote::emit);

    info!("Initializing Beseda...");
    let mut dispatcher = build_dispatcher(&config, args.seed)?;
    let mut editor = DefaultEditor::new()?;

    println!("Бот: Привет! Я бот с эмоциональным интеллектом. Напишите что-нибудь :)");

    loop {
        let line = match editor.readline("Вы: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\nБот: Завершаю работу...");
                break;
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                return Err(e.into());
            }
        };

        if is_exit_command(&line) {
            println!("Бот: До новых встреч! 👋");
            break;
        }
        if !line.trim().is_empty() {
            if let Err(e) = editor.add_history_entry(line.as_str()) {
                debug!("Failed to record history entry: {}", e);
            }
        }

        match dispatcher.respond(&line).await {
            Ok(turn) => println!("Бот: {}", turn.display()),
            Err(e) => {
                error!("Error handling message: {:#}", e);
                println!("Бот: Произошла ошибка: {}", e);
            }
        }
    }

    info!("Session closed");
    Ok(())
}
