//! Minute-resolution wall-clock timestamps.
//!
//! Every post, message and notification is stamped with the local time at
//! creation. The only external representation is `DD/MM/YYYY HH:MM`, which
//! is also what the serde form uses.

use crate::error::TimestampError;
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Timestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Timestamp {
    /// Captures the current local time.
    pub fn now() -> Self {
        Self::from(Local::now().naive_local())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04} {:02}:{:02}",
            self.day, self.month, self.year, self.hour, self.minute
        )
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), FORMAT)
            .map(Self::from)
            .map_err(|_| TimestampError {
                input: s.to_string(),
            })
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timestamp {
        Timestamp {
            year: 2024,
            month: 3,
            day: 7,
            hour: 9,
            minute: 5,
        }
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(sample().to_string(), "07/03/2024 09:05");
    }

    #[test]
    fn test_parse_display_form() {
        let parsed: Timestamp = "07/03/2024 09:05".parse().unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        assert!("2024-03-07 09:05".parse::<Timestamp>().is_err());
        assert!("31/02/2024 10:00".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_serde_uses_display_form() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, "\"07/03/2024 09:05\"");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_now_is_plausible() {
        let now = Timestamp::now();
        assert!((1..=12).contains(&now.month));
        assert!(now.hour < 24 && now.minute < 60);
    }
}
