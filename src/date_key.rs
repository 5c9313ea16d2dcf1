use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const KEY_FORMAT: &str = "%Y-%m-%d";
const STORAGE_PREFIX: &str = "foodTracker_";

/// A calendar day, the identity of a [`crate::models::DailyRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        normalize(&Local::now())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Key under which the day's record lives in the key-value store.
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_PREFIX}{self}")
    }

    pub fn previous(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    pub fn next(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn is_today(&self, today: DateKey) -> bool {
        *self == today
    }

    /// Human-readable heading, e.g. `Monday, Oct 19`.
    pub fn label(&self) -> String {
        self.0.format("%A, %b %-d").to_string()
    }
}

/// Strips the time of day, keeping the calendar day in the timestamp's own
/// timezone. Pass a `DateTime<Local>` to key by the user's local day.
pub fn normalize<Tz: TimeZone>(at: &DateTime<Tz>) -> DateKey {
    DateKey(at.date_naive())
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDateKeyError(String);

impl fmt::Display for ParseDateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid date '{}', expected YYYY-MM-DD", self.0)
    }
}

impl std::error::Error for ParseDateKeyError {}

impl FromStr for DateKey {
    type Err = ParseDateKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields, keys must stay canonical
        if value.len() != 10 {
            return Err(ParseDateKeyError(value.to_string()));
        }
        NaiveDate::parse_from_str(value, KEY_FORMAT)
            .map(Self)
            .map_err(|_| ParseDateKeyError(value.to_string()))
    }
}

impl TryFrom<String> for DateKey {
    type Error = ParseDateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}
