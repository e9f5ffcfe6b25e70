//! Grammatical breakdown of a sentence into five lexical categories.

use crate::tagger::{Pos, Tagger, Token};
use anyhow::Result;
use std::fmt;
use std::sync::Arc;

const NONE_PLACEHOLDER: &str = "Нет";

/// Deduplicated words per category, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextReport {
    pub nouns: Vec<String>,
    pub verbs: Vec<String>,
    pub adjectives: Vec<String>,
    pub subjects: Vec<String>,
    pub predicates: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, word: &str) {
    if !list.iter().any(|w| w == word) {
        list.push(word.to_string());
    }
}

impl TextReport {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut report = Self::default();
        for token in tokens {
            match token.pos {
                Pos::Noun => push_unique(&mut report.nouns, &token.text),
                Pos::Verb => push_unique(&mut report.verbs, &token.text),
                Pos::Adj => push_unique(&mut report.adjectives, &token.text),
                _ => {}
            }
            if token.dep.contains("subj") {
                push_unique(&mut report.subjects, &token.text);
            }
            if token.dep.contains("VERB") || token.dep.contains("ROOT") {
                push_unique(&mut report.predicates, &token.text);
            }
        }
        report
    }

    /// Labelled rows in display order.
    pub fn rows(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Существительные", self.nouns.as_slice()),
            ("Глаголы", self.verbs.as_slice()),
            ("Прилагательные", self.adjectives.as_slice()),
            ("Подлежащее", self.subjects.as_slice()),
            ("Сказуемое", self.predicates.as_slice()),
        ]
    }
}

impl fmt::Display for TextReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**Анализ текста:**")?;
        for (label, words) in self.rows() {
            if words.is_empty() {
                write!(f, "\n{}: {}", label, NONE_PLACEHOLDER)?;
            } else {
                write!(f, "\n{}: {}", label, words.join(", "))?;
            }
        }
        Ok(())
    }
}

pub struct TextAnalyzer {
    tagger: Arc<dyn Tagger>,
}

impl TextAnalyzer {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self { tagger }
    }

    pub fn analyze(&self, text: &str) -> Result<TextReport> {
        let tokens = self.tagger.tag(text)?;
        Ok(TextReport::from_tokens(&tokens))
    }

    /// Tag `text` and render the five-line report.
    pub fn analyze_text(&self, text: &str) -> Result<String> {
        Ok(self.analyze(text)?.to_string())
    }
}
