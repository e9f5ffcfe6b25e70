use chrono::{Local, NaiveDateTime};

/// Source of "now" for the time and date replies.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// `HH:MM:SS`
pub fn current_time(now: &NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

/// `DD.MM.YYYY`
pub fn current_date(now: &NaiveDateTime) -> String {
    now.format("%d.%m.%Y").to_string()
}
