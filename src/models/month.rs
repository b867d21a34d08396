use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// A calendar month, always in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(1);
    pub const DECEMBER: Month = Month(12);

    pub fn new(number: u8) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    pub fn current() -> Self {
        let number = chrono::Local::now().month();
        // chrono guarantees 1..=12
        Self(number as u8)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Self {
        if self.0 == 12 {
            Self::JANUARY
        } else {
            Self(self.0 + 1)
        }
    }

    pub fn prev(self) -> Self {
        if self.0 == 1 {
            Self::DECEMBER
        } else {
            Self(self.0 - 1)
        }
    }

    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }

    pub fn name(self) -> &'static str {
        chrono::Month::try_from(self.0)
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }

    /// Accepts a month number (`"7"`, `"07"`) or an English name or
    /// three-letter abbreviation (`"july"`, `"Jul"`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Self::new(n);
        }
        let lower = s.to_lowercase();
        if lower.len() < 3 {
            return None;
        }
        Self::all().find(|m| m.name().to_lowercase().starts_with(&lower))
    }
}

impl TryFrom<u8> for Month {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("month out of range: {value}"))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> u8 {
        month.0
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02} {}", self.0, self.name())
    }
}
