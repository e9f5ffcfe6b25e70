//! Lexicon-based English polarity scoring.
//!
//! Messages are translated to English before they get here, so the word lists
//! are English only. Each known word carries a polarity in `[-1.0, 1.0]`;
//! an intensifier scales the next scored word and a negator flips it at half
//! strength. The message polarity is the mean over scored words.

/// Something that can rate how positive or negative a piece of English text is.
pub trait PolarityScorer: Send + Sync {
    /// Polarity in `[-1.0, 1.0]`. Text with no scored words is `0.0`.
    fn polarity(&self, text: &str) -> f64;
}

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("wonderful", 1.0),
    ("awesome", 1.0),
    ("perfect", 1.0),
    ("best", 1.0),
    ("amazing", 0.6),
    ("fantastic", 0.4),
    ("beautiful", 0.85),
    ("lovely", 0.5),
    ("love", 0.5),
    ("like", 0.2),
    ("happy", 0.8),
    ("glad", 0.5),
    ("pleased", 0.5),
    ("delighted", 0.7),
    ("joy", 0.8),
    ("nice", 0.6),
    ("fine", 0.42),
    ("cool", 0.35),
    ("fun", 0.3),
    ("funny", 0.25),
    ("interesting", 0.5),
    ("cheerful", 0.6),
    ("calm", 0.3),
    ("kind", 0.6),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("success", 0.6),
    ("successful", 0.75),
    ("win", 0.8),
    ("better", 0.5),
    // negative
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("disgusting", -1.0),
    ("boring", -1.0),
    ("hate", -0.8),
    ("stupid", -0.8),
    ("annoying", -0.8),
    ("sick", -0.71),
    ("ugly", -0.7),
    ("painful", -0.7),
    ("sad", -0.5),
    ("angry", -0.5),
    ("unhappy", -0.6),
    ("depressed", -0.6),
    ("upset", -0.5),
    ("wrong", -0.5),
    ("difficult", -0.5),
    ("poor", -0.4),
    ("tired", -0.4),
    ("afraid", -0.6),
    ("scared", -0.6),
    ("lonely", -0.25),
    ("hard", -0.29),
    ("worse", -0.4),
    ("fail", -0.5),
    ("failed", -0.5),
    ("pain", -0.6),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("so", 1.3),
    ("really", 1.2),
    ("too", 1.2),
    ("super", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("absolutely", 1.4),
    ("totally", 1.2),
    ("quite", 1.1),
];

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "nobody", "neither", "nor"];

/// Look up a word's polarity.
fn word_polarity(word: &str) -> Option<f64> {
    LEXICON.iter().find(|(w, _)| *w == word).map(|(_, p)| *p)
}

fn intensity(word: &str) -> Option<f64> {
    INTENSIFIERS.iter().find(|(w, _)| *w == word).map(|(_, m)| *m)
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

/// Default scorer backed by the built-in word lists.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        polarity(text)
    }
}

/// Score English text in `[-1.0, 1.0]`.
pub fn polarity(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let words = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty());

    let mut scored = Vec::new();
    let mut negate = false;
    let mut multiplier = 1.0;

    for word in words {
        if is_negator(word) {
            negate = true;
            continue;
        }
        if let Some(m) = intensity(word) {
            multiplier *= m;
            continue;
        }
        if let Some(p) = word_polarity(word) {
            let mut value = (p * multiplier).clamp(-1.0, 1.0);
            if negate {
                value *= -0.5;
            }
            scored.push(value);
            negate = false;
            multiplier = 1.0;
        }
    }

    if scored.is_empty() {
        return 0.0;
    }
    let mean = scored.iter().sum::<f64>() / scored.len() as f64;
    mean.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        assert_eq!(polarity("the table is in the kitchen"), 0.0);
    }

    #[test]
    fn test_positive_text() {
        assert!(polarity("what a wonderful day") > 0.3);
    }

    #[test]
    fn test_negative_text() {
        assert!(polarity("this is terrible") < -0.3);
    }

    #[test]
    fn test_intensifier_strengthens() {
        assert!(polarity("very good") > polarity("good"));
        assert!(polarity("extremely happy") <= 1.0);
    }

    #[test]
    fn test_negation_flips_at_half_strength() {
        let p = polarity("i am not happy");
        assert!((p - (-0.4)).abs() < 1e-9);
        assert!(polarity("it isn't bad") > 0.0);
    }

    #[test]
    fn test_mean_over_scored_words() {
        let p = polarity("good and bad");
        assert!(p.abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(polarity("GREAT"), polarity("great"));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(polarity(""), 0.0);
        assert_eq!(LexiconScorer::new().polarity("   "), 0.0);
    }
}
