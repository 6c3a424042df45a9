pub mod config;
pub mod exam;
pub mod lesson;
pub mod plan;
pub mod timetable;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use studyplan_core::storage::exam_db::parse_date;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

const AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// `--at "YYYY-MM-DD HH:MM"`, or local wall-clock time when absent.
pub fn resolve_now(at: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match at {
        Some(s) => NaiveDateTime::parse_from_str(s.trim(), AT_FORMAT)
            .map_err(|e| format!("invalid time '{s}' ({e}), expected \"YYYY-MM-DD HH:MM\"").into()),
        None => Ok(Local::now().naive_local()),
    }
}

/// `--date YYYY-MM-DD`, or today's local date when absent.
pub fn resolve_today(date: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_now_parses_explicit_time() {
        let now = resolve_now(Some("2024-09-16 08:10")).unwrap();
        assert_eq!(now.to_string(), "2024-09-16 08:10:00");
        assert!(resolve_now(Some("monday 8:10")).is_err());
    }

    #[test]
    fn resolve_today_parses_explicit_date() {
        let today = resolve_today(Some("2024-10-01")).unwrap();
        assert_eq!(today, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert!(resolve_today(Some("01/10/2024")).is_err());
    }
}
