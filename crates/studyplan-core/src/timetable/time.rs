//! Wall-clock time of day with minute resolution.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimetableError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes since midnight, written as "H:MM" (24-hour clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build from hour and minute.
    ///
    /// Panics on out-of-range values, so only use it with literals.
    pub const fn at(hour: u8, minute: u8) -> Self {
        assert!(hour < 24 && minute < 60);
        Self(hour as u16 * 60 + minute as u16)
    }

    /// Truncate a clock time to the minute.
    pub fn from_time(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimetableError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;

        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        if hour >= 24 || minute >= 60 {
            return Err(invalid());
        }
        Ok(Self::at(hour, minute))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_and_double_digit_hours() {
        assert_eq!("7:50".parse::<TimeOfDay>().unwrap(), TimeOfDay::at(7, 50));
        assert_eq!("07:50".parse::<TimeOfDay>().unwrap(), TimeOfDay::at(7, 50));
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap().minutes(), 1439);
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "7", "7:5", "24:00", "12:60", "a:bc", "7:50:00", "-1:30", "123:00"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn displays_without_hour_padding() {
        assert_eq!(TimeOfDay::at(7, 5).to_string(), "7:05");
        assert_eq!(TimeOfDay::at(10, 50).to_string(), "10:50");
    }

    #[test]
    fn truncates_seconds_from_clock_time() {
        let t = NaiveTime::from_hms_opt(8, 10, 59).unwrap();
        assert_eq!(TimeOfDay::from_time(t), TimeOfDay::at(8, 10));
    }

    #[test]
    fn serializes_as_clock_string() {
        let json = serde_json::to_string(&TimeOfDay::at(8, 50)).unwrap();
        assert_eq!(json, "\"8:50\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TimeOfDay::at(8, 50));
    }
}
