pub mod config;
pub mod sentiment;

pub use config::{BesedaConfig, ConfigNote};
pub use sentiment::{LexiconScorer, PolarityScorer};

use serde::Serialize;

/// Which of the three score bands a sentiment score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneBand {
    Positive,
    Negative,
    Neutral,
}

impl ToneBand {
    /// Classify a scaled score. Strictly above `positive` is positive, strictly
    /// below `negative` is negative, everything else (including NaN) is neutral.
    pub fn classify(score: f64, positive: f64, negative: f64) -> Self {
        if score > positive {
            ToneBand::Positive
        } else if score < negative {
            ToneBand::Negative
        } else {
            ToneBand::Neutral
        }
    }
}

/// Result of running the tone analyzer over one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentiment {
    /// Polarity scaled to roughly [-100, 100].
    pub score: f64,
    pub band: ToneBand,
    /// Short emotional reaction picked from the band's candidates.
    pub emotion: String,
}

/// One processed message. Nothing here outlives the loop iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    pub input: String,
    /// Name of the pattern rule that handled the message, `None` for the
    /// sentiment fallback.
    pub matched: Option<&'static str>,
    pub reply: String,
    pub score: Option<f64>,
}

impl Turn {
    /// Render the reply the way the terminal shows it.
    pub fn display(&self) -> String {
        match self.score {
            Some(score) => format!("{} (Тональность: {:.1}%)", self.reply, score),
            None => self.reply.clone(),
        }
    }
}
