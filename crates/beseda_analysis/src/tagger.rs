//! Part-of-speech tagging and dependency labelling.
//!
//! `RuleTagger` is a lightweight heuristic tagger for Russian: closed word
//! classes come from fixed lists, open classes are guessed from endings, and
//! a single pass picks the clause root and its subject. Tags follow Universal
//! Dependencies names so other taggers can be dropped in behind [`Tagger`].

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

/// Universal POS tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
    Pron,
    Adp,
    Cconj,
    Sconj,
    Part,
    Num,
    Punct,
}

impl Pos {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pos::Noun => "NOUN",
            Pos::Verb => "VERB",
            Pos::Adj => "ADJ",
            Pos::Adv => "ADV",
            Pos::Pron => "PRON",
            Pos::Adp => "ADP",
            Pos::Cconj => "CCONJ",
            Pos::Sconj => "SCONJ",
            Pos::Part => "PART",
            Pos::Num => "NUM",
            Pos::Punct => "PUNCT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub pos: Pos,
    /// Dependency relation label, e.g. `nsubj`, `ROOT`, `amod`.
    pub dep: String,
}

pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<Token>>;
}

static RE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+(?:-[\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]").unwrap());

const PRONOUNS: &[&str] = &[
    "я", "ты", "он", "она", "оно", "мы", "вы", "они", "меня", "тебя", "его", "её", "ее", "него",
    "неё", "нее", "нас", "вас", "их", "им", "ему", "ей", "мне", "тебе", "нам", "вам", "себя",
    "себе", "кто", "что", "это", "этот", "эта", "эти", "тот", "та", "те", "мой", "моя", "моё",
    "мое", "мои", "твой", "твоя", "твоё", "твое", "наш", "наша", "ваш", "ваша", "всё", "все",
    "весь", "вся", "сам", "сама", "свой", "своя",
];

/// Pronouns that can stand as a clause subject.
const SUBJECT_PRONOUNS: &[&str] = &[
    "я", "ты", "он", "она", "оно", "мы", "вы", "они", "кто", "что", "это", "всё", "все",
];

const ADPOSITIONS: &[&str] = &[
    "в", "во", "на", "с", "со", "к", "ко", "по", "о", "об", "обо", "от", "до", "из", "у", "за",
    "для", "без", "под", "над", "при", "про", "через", "между", "перед", "около", "после",
];

const COORDINATORS: &[&str] = &["и", "а", "но", "или", "да", "либо"];

const SUBORDINATORS: &[&str] = &["чтобы", "если", "когда", "потому", "хотя", "пока", "как"];

const PARTICLES: &[&str] = &[
    "не", "ни", "ли", "же", "бы", "вот", "даже", "только", "уже", "ещё", "еще", "лишь",
    "разве", "неужели",
];

const ADVERBS: &[&str] = &[
    "очень", "сейчас", "сегодня", "вчера", "завтра", "здесь", "там", "тут", "всегда", "никогда",
    "часто", "редко", "быстро", "медленно", "хорошо", "плохо", "много", "мало", "совсем",
    "потом", "теперь", "тоже", "также", "почти", "опять", "снова", "где", "куда", "зачем",
    "почему", "так", "когда-нибудь",
];

/// Irregular or short verb forms the ending rules miss.
const VERBS: &[&str] = &[
    "был", "была", "было", "были", "есть", "будет", "будут", "шёл", "шел", "шла", "шли", "идёт",
    "идет", "идут", "ест", "дал", "дала", "мог", "могла", "могли", "хочу", "хочет", "могу",
];

const VERB_INFINITIVE: &[&str] = &["ться", "тся", "ть", "ти", "чь", "сь", "ся"];

const VERB_PAST: &[&str] = &[
    "ала", "яла", "ила", "ела", "ыла", "ало", "яло", "ило", "ело", "ыло", "али", "яли", "или",
    "ели", "ыли", "ал", "ял", "ил", "ел", "ыл",
];

const VERB_PRESENT: &[&str] = &[
    "ешь", "ёшь", "ишь", "ете", "ёте", "ите", "ает", "яет", "еет", "ует", "ёт", "ит", "ят",
    "ают", "яют", "еют", "уют", "ут", "ют", "аю", "яю", "ею", "аем", "яем", "еем", "ём",
];

const ADJ_ENDINGS: &[&str] = &[
    "ыми", "ими", "ого", "его", "ому", "ему", "ый", "ий", "ой", "ая", "яя", "ое", "ее", "ые",
    "ие", "ым", "им", "ую", "юю", "ых", "их",
];

/// Noun endings that would otherwise look adjectival.
const NOUN_ENDINGS: &[&str] = &["ние", "тие", "ствие", "ция", "ость", "асть"];

fn ends_with_any(word: &str, endings: &[&str], min_len: usize) -> bool {
    word.chars().count() >= min_len && endings.iter().any(|e| word.ends_with(e))
}

/// Guess the POS of a lower-cased word.
fn classify(word: &str) -> Pos {
    if word.chars().all(|c| c.is_numeric()) {
        return Pos::Num;
    }
    if !word.chars().any(|c| c.is_alphabetic()) {
        return Pos::Punct;
    }
    if PRONOUNS.contains(&word) {
        return Pos::Pron;
    }
    if ADPOSITIONS.contains(&word) {
        return Pos::Adp;
    }
    if COORDINATORS.contains(&word) {
        return Pos::Cconj;
    }
    if SUBORDINATORS.contains(&word) {
        return Pos::Sconj;
    }
    if PARTICLES.contains(&word) {
        return Pos::Part;
    }
    if ADVERBS.contains(&word) {
        return Pos::Adv;
    }
    if VERBS.contains(&word) {
        return Pos::Verb;
    }
    if ends_with_any(word, NOUN_ENDINGS, 4) {
        return Pos::Noun;
    }
    if ends_with_any(word, VERB_INFINITIVE, 4) || ends_with_any(word, VERB_PAST, 5) {
        return Pos::Verb;
    }
    if ends_with_any(word, ADJ_ENDINGS, 4) {
        return Pos::Adj;
    }
    if ends_with_any(word, VERB_PRESENT, 4) {
        return Pos::Verb;
    }
    Pos::Noun
}

fn can_be_subject(token: &Token) -> bool {
    match token.pos {
        Pos::Noun => true,
        Pos::Pron => SUBJECT_PRONOUNS.contains(&token.text.to_lowercase().as_str()),
        _ => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    fn tokenize(text: &str) -> Vec<Token> {
        RE_TOKEN
            .find_iter(text)
            .map(|m| Token {
                text: m.as_str().to_string(),
                pos: classify(&m.as_str().to_lowercase()),
                dep: String::new(),
            })
            .collect()
    }

    /// Choose the root: the first verb, else the first noun, else the first word.
    fn find_root(tokens: &[Token]) -> Option<usize> {
        tokens
            .iter()
            .position(|t| t.pos == Pos::Verb)
            .or_else(|| tokens.iter().position(|t| t.pos == Pos::Noun))
            .or_else(|| tokens.iter().position(|t| t.pos != Pos::Punct))
    }

    /// Subject of a verbal root: nearest candidate before it, otherwise the
    /// first candidate after it that is not governed by a preposition.
    fn find_subject(tokens: &[Token], root: usize) -> Option<usize> {
        if tokens[root].pos != Pos::Verb {
            return None;
        }
        let before = (0..root).rev().find(|&i| can_be_subject(&tokens[i]));
        before.or_else(|| {
            (root + 1..tokens.len())
                .find(|&i| can_be_subject(&tokens[i]) && tokens[i - 1].pos != Pos::Adp)
        })
    }

    fn label(tokens: &mut [Token]) {
        let Some(root) = Self::find_root(tokens) else {
            return;
        };
        let subject = Self::find_subject(tokens, root);

        for i in 0..tokens.len() {
            let after_adp = i > 0 && tokens[i - 1].pos == Pos::Adp;
            let dep = if i == root {
                "ROOT"
            } else if Some(i) == subject {
                "nsubj"
            } else {
                match tokens[i].pos {
                    Pos::Adj => "amod",
                    Pos::Noun | Pos::Pron if after_adp => "obl",
                    Pos::Noun | Pos::Pron if i > root && tokens[root].pos == Pos::Verb => "obj",
                    Pos::Noun | Pos::Pron => "nmod",
                    Pos::Verb if i == root + 1 => "xcomp",
                    Pos::Verb => "conj",
                    Pos::Adv | Pos::Part => "advmod",
                    Pos::Adp => "case",
                    Pos::Cconj => "cc",
                    Pos::Sconj => "mark",
                    Pos::Num => "nummod",
                    Pos::Punct => "punct",
                }
            };
            tokens[i].dep = dep.to_string();
        }
    }
}

impl Tagger for RuleTagger {
    fn tag(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Self::tokenize(text);
        Self::label(&mut tokens);
        Ok(tokens)
    }
}
