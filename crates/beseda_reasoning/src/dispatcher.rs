use crate::patterns::{standard_rules, Handler, ResponseSpec, Rule};
use anyhow::Result;
use beseda_analysis::{TextAnalyzer, ToneAnalyzer};
use beseda_core::{ToneBand, Turn};
use beseda_skills::{calculate, describe_weather, Clock, SystemClock, WeatherProvider};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

/// Typing this (any case) at the prompt ends the session.
pub const EXIT_KEYWORD: &str = "выход";

pub const FAREWELL: &str = "До свидания! Было приятно пообщаться. 👋";

const POSITIVE_TEMPLATES: &[&str] = &[
    "{emotion} Ваше сообщение звучит очень позитивно!",
    "Ваш настрой заразителен! {emotion}",
    "{emotion} Продолжайте в том же духе!",
];

const NEGATIVE_TEMPLATES: &[&str] = &[
    "{emotion} Если вам нужна помощь, я здесь.",
    "Я чувствую ваше расстройство. {emotion}",
    "{emotion} Хотите поговорить об этом?",
];

const NEUTRAL_TEMPLATES: &[&str] = &[
    "{emotion} Спасибо за сообщение.",
    "{emotion} Продолжайте, я вас слушаю.",
    "Интересно. {emotion}",
];

fn templates_for(band: ToneBand) -> &'static [&'static str] {
    match band {
        ToneBand::Positive => POSITIVE_TEMPLATES,
        ToneBand::Negative => NEGATIVE_TEMPLATES,
        ToneBand::Neutral => NEUTRAL_TEMPLATES,
    }
}

/// Exact-keyword check done by the loop before anything reaches the dispatcher.
pub fn is_exit_command(input: &str) -> bool {
    input.to_lowercase() == EXIT_KEYWORD
}

/// Which rule matched and what its groups captured.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub index: usize,
    pub name: &'static str,
    /// Groups 1..n; a group that did not participate is an empty string.
    pub captures: Vec<String>,
}

impl Route {
    fn group(&self, n: usize) -> &str {
        self.captures.get(n - 1).map(String::as_str).unwrap_or("")
    }
}

pub struct Dispatcher {
    rules: Vec<Rule>,
    tone: ToneAnalyzer,
    text: TextAnalyzer,
    weather: Arc<dyn WeatherProvider>,
    clock: Arc<dyn Clock>,
    rng: Box<dyn RngCore + Send>,
}

impl Dispatcher {
    pub fn new(tone: ToneAnalyzer, text: TextAnalyzer, weather: Arc<dyn WeatherProvider>) -> Self {
        Self {
            rules: standard_rules(),
            tone,
            text,
            weather,
            clock: Arc::new(SystemClock),
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Find the first rule matching an already-normalized message.
    pub fn route(&self, message: &str) -> Option<Route> {
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            rule.pattern.captures(message).map(|caps| Route {
                index,
                name: rule.name,
                captures: caps
                    .iter()
                    .skip(1)
                    .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
                    .collect(),
            })
        })
    }

    /// Answer one message.
    pub async fn respond(&mut self, raw: &str) -> Result<Turn> {
        let message = raw.trim().to_lowercase();

        let Some(route) = self.route(&message) else {
            tracing::debug!("No pattern matched, falling back to tone analysis");
            let (reply, score) = self.fallback(&message).await;
            return Ok(Turn {
                input: raw.to_string(),
                matched: None,
                reply,
                score: Some(score),
            });
        };

        tracing::debug!(rule = route.name, "Pattern matched");
        let response = self.rules[route.index].response;
        let reply = match response {
            ResponseSpec::FixedReplies(options) => self.pick(options).to_string(),
            ResponseSpec::Computed(render) => render(&self.clock.now()),
            ResponseSpec::Named(handler) => self.run_handler(handler, &route).await?,
        };

        Ok(Turn {
            input: raw.to_string(),
            matched: Some(route.name),
            reply,
            score: None,
        })
    }

    async fn run_handler(&mut self, handler: Handler, route: &Route) -> Result<String> {
        match handler {
            Handler::Calculate => Ok(calculate(route.group(1), route.group(2), route.group(3))),
            Handler::GetWeather => Ok(describe_weather(self.weather.as_ref(), route.group(1)).await),
            Handler::Exit => Ok(FAREWELL.to_string()),
            Handler::AnalyzeText => self.text.analyze_text(route.group(1)),
        }
    }

    async fn fallback(&mut self, message: &str) -> (String, f64) {
        let sentiment = self.tone.analyze_sentiment(message, &mut self.rng).await;
        let template = self.pick(templates_for(sentiment.band));
        let reply = template.replace("{emotion}", &sentiment.emotion);
        (reply, sentiment.score)
    }

    fn pick(&mut self, options: &'static [&'static str]) -> &'static str {
        options.choose(&mut self.rng).copied().unwrap_or_default()
    }
}
