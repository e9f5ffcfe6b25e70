use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BesedaConfig {
    pub weather: WeatherConfig,
    pub translation: TranslationConfig,
    pub tone: ToneConfig,
    pub logging: LoggingConfig,
}

impl BesedaConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (config, notes) = Self::load_file(path.as_ref())?;
        notes.iter().for_each(ConfigNote::emit);
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return defaults
    /// with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let (config, notes) = Self::load_deferred(path);
        notes.iter().for_each(ConfigNote::emit);
        config
    }

    /// Like [`load_or_default`](Self::load_or_default), but hands back what
    /// went wrong instead of logging it. For callers that configure logging
    /// from the result.
    pub fn load_deferred<P: AsRef<Path>>(path: P) -> (Self, Vec<ConfigNote>) {
        let path = path.as_ref();
        match Self::load_file(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                let first = if path.exists() {
                    ConfigNote::Invalid {
                        path: path.to_path_buf(),
                        reason: format!("{:#}", e),
                    }
                } else {
                    ConfigNote::Missing(path.to_path_buf())
                };
                let mut config = Self::default();
                let mut notes = vec![first];
                notes.extend(config.apply_env_overrides());
                (config, notes)
            }
        }
    }

    fn load_file(path: &Path) -> Result<(Self, Vec<ConfigNote>)> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: BesedaConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        let notes = config.apply_env_overrides();
        Ok((config, notes))
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) -> Vec<ConfigNote> {
        let mut notes = Vec::new();
        if let Ok(v) = std::env::var("OPENWEATHER_API_KEY") {
            self.weather.api_key = Some(v);
        }
        if let Ok(v) = std::env::var("OPENWEATHER_BASE_URL") {
            self.weather.base_url = v;
        }
        if let Ok(v) = std::env::var("TRANSLATION_PROVIDER") {
            match v.parse() {
                Ok(p) => self.translation.provider = p,
                Err(reason) => notes.push(ConfigNote::BadOverride {
                    var: "TRANSLATION_PROVIDER",
                    reason,
                }),
            }
        }
        if let Ok(v) = std::env::var("TRANSLATION_BASE_URL") {
            self.translation.base_url = v;
        }
        if let Ok(v) = std::env::var("BESEDA_LOG") {
            self.logging.level = v;
        }
        notes
    }
}

/// Something worth reporting about how the config was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNote {
    /// No file at the path; defaults are in use.
    Missing(PathBuf),
    /// The file exists but could not be read or parsed; defaults are in use.
    Invalid { path: PathBuf, reason: String },
    /// An environment override was ignored.
    BadOverride { var: &'static str, reason: String },
}

impl ConfigNote {
    /// Log through `tracing`. A missing file is routine, the rest are warnings.
    pub fn emit(&self) {
        match self {
            ConfigNote::Missing(_) => tracing::info!("{}", self),
            _ => tracing::warn!("{}", self),
        }
    }
}

impl std::fmt::Display for ConfigNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigNote::Missing(path) => {
                write!(f, "No config file at {}, using defaults", path.display())
            }
            ConfigNote::Invalid { path, reason } => write!(
                f,
                "Config file {} is invalid ({}), using defaults",
                path.display(),
                reason
            ),
            ConfigNote::BadOverride { var, reason } => write!(f, "Ignoring {}: {}", var, reason),
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    /// OpenWeatherMap `appid`. Usually supplied through `OPENWEATHER_API_KEY`.
    pub api_key: Option<String>,
    pub units: String,
    pub lang: String,
    /// Request timeout. `None` waits for the server indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            api_key: None,
            units: "metric".to_string(),
            lang: "ru".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationProvider {
    /// MyMemory public translation API.
    #[default]
    Mymemory,
    /// Skip translation and score the original text.
    None,
}

impl std::str::FromStr for TranslationProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mymemory" => Ok(Self::Mymemory),
            "none" | "off" => Ok(Self::None),
            other => Err(format!("unknown translation provider '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub provider: TranslationProvider,
    pub base_url: String,
    pub from_lang: String,
    pub to_lang: String,
    /// Contact address sent as `de=`; MyMemory grants a larger daily quota with it.
    pub email: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::Mymemory,
            base_url: "https://api.mymemory.translated.net".to_string(),
            from_lang: "ru".to_string(),
            to_lang: "en".to_string(),
            email: None,
            timeout_secs: None,
        }
    }
}

/// Tuning constants for the sentiment fallback.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub positive_threshold: f64,
    pub negative_threshold: f64,
    /// Multiplier applied to the raw `[-1, 1]` polarity.
    pub polarity_scale: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 30.0,
            negative_threshold: -30.0,
            polarity_scale: 100.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `beseda_reasoning=debug`.
    pub level: String,
    /// Write logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
