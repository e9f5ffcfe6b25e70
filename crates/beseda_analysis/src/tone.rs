//! Tone analysis: translate to the pivot language, score polarity, pick an emotion.

use crate::translate::Translator;
use beseda_core::config::ToneConfig;
use beseda_core::{PolarityScorer, Sentiment, ToneBand};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

pub const POSITIVE_EMOTIONS: &[&str] = &["Рад это слышать! 😊", "Это прекрасно! 🌟", "Замечательно! 👍"];

pub const NEGATIVE_EMOTIONS: &[&str] = &[
    "Мне жаль это слышать 😔",
    "Надеюсь, всё наладится 🤗",
    "Понимаю ваши чувства 🫂",
];

pub const NEUTRAL_EMOTIONS: &[&str] = &["Интересно 🤔", "Понятно 😐", "Я вас слушаю 👂"];

/// Candidate emotional reactions for a band.
pub fn emotions_for(band: ToneBand) -> &'static [&'static str] {
    match band {
        ToneBand::Positive => POSITIVE_EMOTIONS,
        ToneBand::Negative => NEGATIVE_EMOTIONS,
        ToneBand::Neutral => NEUTRAL_EMOTIONS,
    }
}

pub struct ToneAnalyzer {
    translator: Arc<dyn Translator>,
    scorer: Arc<dyn PolarityScorer>,
    config: ToneConfig,
}

impl ToneAnalyzer {
    pub fn new(translator: Arc<dyn Translator>, scorer: Arc<dyn PolarityScorer>) -> Self {
        Self {
            translator,
            scorer,
            config: ToneConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ToneConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ToneConfig {
        &self.config
    }

    /// Translate into the pivot language, lower-cased. A failed translation is
    /// logged and the original text is used instead.
    pub async fn translate(&self, text: &str) -> String {
        match self.translator.translate(text).await {
            Ok(translated) => translated.to_lowercase(),
            Err(e) => {
                tracing::warn!("Translation failed, scoring original text: {}", e);
                text.to_string()
            }
        }
    }

    /// Scaled polarity of `text`.
    pub async fn score(&self, text: &str) -> f64 {
        let pivot = self.translate(text).await;
        self.scorer.polarity(&pivot) * self.config.polarity_scale
    }

    pub fn band(&self, score: f64) -> ToneBand {
        ToneBand::classify(
            score,
            self.config.positive_threshold,
            self.config.negative_threshold,
        )
    }

    /// Score the message and choose an emotional reaction from its band.
    pub async fn analyze_sentiment<R>(&self, text: &str, rng: &mut R) -> Sentiment
    where
        R: Rng + ?Sized,
    {
        let score = self.score(text).await;
        let band = self.band(score);
        let emotion = emotions_for(band)
            .choose(rng)
            .copied()
            .unwrap_or_default()
            .to_string();

        tracing::debug!(score, ?band, "Sentiment analyzed");
        Sentiment {
            score,
            band,
            emotion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{PassthroughTranslator, TranslateError};
    use async_trait::async_trait;
    use beseda_core::LexiconScorer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FixedTranslator(&'static str);

    #[async_trait]
    impl Translator for FixedTranslator {
        async fn translate(&self, _text: &str) -> Result<String, TranslateError> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenTranslator;

    #[async_trait]
    impl Translator for BrokenTranslator {
        async fn translate(&self, _text: &str) -> Result<String, TranslateError> {
            Err(TranslateError::Empty)
        }
    }

    fn analyzer(translator: Arc<dyn Translator>) -> ToneAnalyzer {
        ToneAnalyzer::new(translator, Arc::new(LexiconScorer::new()))
    }

    #[tokio::test]
    async fn test_translate_lowercases() {
        let tone = analyzer(Arc::new(FixedTranslator("I Am HAPPY")));
        assert_eq!(tone.translate("я счастлив").await, "i am happy");
    }

    #[tokio::test]
    async fn test_translate_failure_passes_original() {
        let tone = analyzer(Arc::new(BrokenTranslator));
        assert_eq!(tone.translate("Всё плохо").await, "Всё плохо");
    }

    #[tokio::test]
    async fn test_positive_band() {
        let tone = analyzer(Arc::new(FixedTranslator("what a wonderful day")));
        let mut rng = StdRng::seed_from_u64(1);
        let s = tone.analyze_sentiment("какой чудесный день", &mut rng).await;
        assert!(s.score > 30.0);
        assert_eq!(s.band, ToneBand::Positive);
        assert!(POSITIVE_EMOTIONS.contains(&s.emotion.as_str()));
    }

    #[tokio::test]
    async fn test_negative_band() {
        let tone = analyzer(Arc::new(FixedTranslator("this is terrible")));
        let mut rng = StdRng::seed_from_u64(2);
        let s = tone.analyze_sentiment("это ужасно", &mut rng).await;
        assert!(s.score < -30.0);
        assert_eq!(s.band, ToneBand::Negative);
        assert!(NEGATIVE_EMOTIONS.contains(&s.emotion.as_str()));
    }

    #[tokio::test]
    async fn test_untranslated_text_is_neutral() {
        let tone = analyzer(Arc::new(PassthroughTranslator));
        let mut rng = StdRng::seed_from_u64(3);
        let s = tone.analyze_sentiment("стол стоит на кухне", &mut rng).await;
        assert_eq!(s.score, 0.0);
        assert_eq!(s.band, ToneBand::Neutral);
        assert!(NEUTRAL_EMOTIONS.contains(&s.emotion.as_str()));
    }

    #[tokio::test]
    async fn test_custom_scale_and_thresholds() {
        let tone = analyzer(Arc::new(FixedTranslator("good"))).with_config(ToneConfig {
            positive_threshold: 80.0,
            negative_threshold: -80.0,
            polarity_scale: 100.0,
        });
        // 0.7 * 100 = 70, below the raised threshold
        let mut rng = StdRng::seed_from_u64(4);
        let s = tone.analyze_sentiment("хорошо", &mut rng).await;
        assert!((s.score - 70.0).abs() < 1e-9);
        assert_eq!(s.band, ToneBand::Neutral);
    }

    #[tokio::test]
    async fn test_same_seed_same_emotion() {
        let tone = analyzer(Arc::new(FixedTranslator("great")));
        let a = tone
            .analyze_sentiment("x", &mut StdRng::seed_from_u64(42))
            .await;
        let b = tone
            .analyze_sentiment("x", &mut StdRng::seed_from_u64(42))
            .await;
        assert_eq!(a, b);
    }
}
