pub mod tagger;
pub mod text;
pub mod tone;
pub mod translate;

pub use tagger::{Pos, RuleTagger, Tagger, Token};
pub use text::{TextAnalyzer, TextReport};
pub use tone::ToneAnalyzer;
pub use translate::{
    build_translator, MyMemoryTranslator, PassthroughTranslator, TranslateError, Translator,
};
