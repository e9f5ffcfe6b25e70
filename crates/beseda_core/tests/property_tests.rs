//! Property-based tests for beseda_core.

use beseda_core::sentiment::polarity;
use beseda_core::ToneBand;
use proptest::prelude::*;

proptest! {
    /// Exactly one band holds for every score, and it agrees with the
    /// threshold comparisons.
    #[test]
    fn banding_is_total_and_exclusive(score in -200.0f64..200.0) {
        let band = ToneBand::classify(score, 30.0, -30.0);
        let positive = score > 30.0;
        let negative = score < -30.0;
        let neutral = (-30.0..=30.0).contains(&score);
        prop_assert_eq!([positive, negative, neutral].iter().filter(|b| **b).count(), 1);
        match band {
            ToneBand::Positive => prop_assert!(positive),
            ToneBand::Negative => prop_assert!(negative),
            ToneBand::Neutral => prop_assert!(neutral),
        }
    }

    #[test]
    fn polarity_stays_in_range(text in "\\PC{0,80}") {
        let p = polarity(&text);
        prop_assert!((-1.0..=1.0).contains(&p));
    }

    #[test]
    fn polarity_of_lexicon_sentences_in_range(
        words in prop::collection::vec(
            prop::sample::select(vec![
                "very", "not", "good", "bad", "terrible", "happy", "sad", "extremely", "the",
            ]),
            0..20,
        )
    ) {
        let p = polarity(&words.join(" "));
        prop_assert!((-1.0..=1.0).contains(&p));
    }
}
