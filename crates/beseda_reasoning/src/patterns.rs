//! The ordered pattern table. First match wins, so order is significant:
//! e.g. `разбери текст хорошо` is answered by the `ok` rule, not `analyze_text`.

use beseda_skills::clock::{current_date, current_time};
use chrono::NaiveDateTime;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Handlers that need more than a canned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Calculate,
    GetWeather,
    Exit,
    AnalyzeText,
}

#[derive(Clone, Copy)]
pub enum ResponseSpec {
    /// One of these, chosen at random.
    FixedReplies(&'static [&'static str]),
    /// Built from the current local time.
    Computed(fn(&NaiveDateTime) -> String),
    Named(Handler),
}

impl fmt::Debug for ResponseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSpec::FixedReplies(replies) => {
                f.debug_tuple("FixedReplies").field(replies).finish()
            }
            ResponseSpec::Computed(_) => f.write_str("Computed(..)"),
            ResponseSpec::Named(handler) => f.debug_tuple("Named").field(handler).finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: Regex,
    pub response: ResponseSpec,
}

impl Rule {
    pub fn new(
        name: &'static str,
        pattern: &str,
        response: ResponseSpec,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            response,
        })
    }
}

pub const GREETINGS: &[&str] = &["Добрый день!", "Привет!", "Здравствуйте!"];

pub const HOW_ARE_YOU: &[&str] = &["Отлично!", "Хорошо", "Всё в порядке", "Неплохо, а у вас?"];

pub const IDENTITY: &[&str] = &["Меня зовут Бот!", "Я просто чат-бот."];

pub const CAPABILITIES: &[&str] = &[
    "Я могу отвечать на приветствия, сообщать текущее время и дату.",
    "Я могу говорить о погоде, выполнять поиск в интернете, вычислять простые арифметические выражения и прощаться.",
    "Мои возможности пока ограничены, но я постоянно развиваюсь!",
];

pub const THANKS: &[&str] = &["Пожалуйста!", "Всегда рад помочь!", "Не за что."];

pub const OK: &[&str] = &["Отлично!"];

const TABLE: &[(&str, &str, ResponseSpec)] = &[
    ("greeting", r"привет", ResponseSpec::FixedReplies(GREETINGS)),
    ("how_are_you", r"как дела\??", ResponseSpec::FixedReplies(HOW_ARE_YOU)),
    (
        "identity",
        r"как тебя зовут\??|кто ты такой\??",
        ResponseSpec::FixedReplies(IDENTITY),
    ),
    ("time", r"сколько сейчас времени", ResponseSpec::Computed(current_time)),
    ("date", r"какое сегодня число", ResponseSpec::Computed(current_date)),
    (
        "weather",
        r"какая сейчас погода в городе\s+(.+?)\s*\??$",
        ResponseSpec::Named(Handler::GetWeather),
    ),
    (
        "arithmetic",
        r"(\d+)\s*([-+*/])\s*(\d+)",
        ResponseSpec::Named(Handler::Calculate),
    ),
    ("exit", r"выход", ResponseSpec::Named(Handler::Exit)),
    (
        "capabilities",
        r"что ты умеешь\??|какие у тебя функции\??|что ты можешь\??",
        ResponseSpec::FixedReplies(CAPABILITIES),
    ),
    ("thanks", r"спасибо", ResponseSpec::FixedReplies(THANKS)),
    ("ok", r"хорошо|нормально", ResponseSpec::FixedReplies(OK)),
    (
        "analyze_text",
        r"разбери текст (.+)",
        ResponseSpec::Named(Handler::AnalyzeText),
    ),
];

static STANDARD_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    TABLE
        .iter()
        .map(|&(name, pattern, response)| Rule::new(name, pattern, response).unwrap())
        .collect()
});

/// The bot's built-in pattern table, in match order.
pub fn standard_rules() -> Vec<Rule> {
    STANDARD_RULES.clone()
}
