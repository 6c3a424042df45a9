//! TOML timetable files.
//!
//! ```toml
//! slots = ["7:50", "8:50", "9:50", "10:50", "11:50"]
//!
//! [days.mon."7:50"]
//! subject = "Matematica"
//! room = "PP07-stem"
//! start = "7:50"
//! end = "8:50"
//! color = "blue"
//! ```
//!
//! Weekdays missing from `days` have no lessons.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Weekday;
use serde::Deserialize;

use super::{Lesson, TimeOfDay, Timetable};
use crate::error::{CoreError, TimetableError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimetableFile {
    #[serde(default = "default_slots")]
    slots: Vec<String>,
    #[serde(default)]
    days: BTreeMap<String, BTreeMap<String, LessonEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LessonEntry {
    subject: String,
    #[serde(default)]
    room: String,
    start: String,
    end: String,
    #[serde(default)]
    color: String,
}

fn default_slots() -> Vec<String> {
    ["7:50", "8:50", "9:50", "10:50", "11:50"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Timetable {
    /// Parse a timetable from TOML text.
    ///
    /// # Errors
    /// Returns an error on TOML syntax errors, bad times, unknown or repeated
    /// weekdays, lessons under undeclared slots, lessons keyed under a slot
    /// other than their start, or lessons that end before they start.
    pub fn from_toml_str(content: &str) -> Result<Self, TimetableError> {
        let file: TimetableFile = toml::from_str(content)?;

        let slots = file
            .slots
            .iter()
            .map(|s| s.parse::<TimeOfDay>())
            .collect::<Result<Vec<_>, _>>()?;
        let mut table = Timetable::new(slots)?;
        let mut seen: [Option<String>; 7] = Default::default();

        for (day_key, entries) in file.days {
            let weekday: Weekday = day_key
                .parse()
                .map_err(|_| TimetableError::UnknownWeekday(day_key.clone()))?;

            let earlier = &mut seen[weekday.num_days_from_monday() as usize];
            if let Some(first) = earlier.take() {
                return Err(TimetableError::DuplicateWeekday {
                    weekday: weekday.to_string(),
                    first,
                    second: day_key,
                });
            }
            *earlier = Some(day_key);

            for (slot_key, entry) in entries {
                let slot: TimeOfDay = slot_key.parse()?;
                let lesson = Lesson::new(
                    entry.subject,
                    entry.room,
                    entry.start.parse()?,
                    entry.end.parse()?,
                    entry.color,
                );
                table.set_lesson(weekday, slot, lesson)?;
            }
        }

        Ok(table)
    }

    /// Read and parse a timetable file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid timetable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            lessons = table.populated_slots(),
            "loaded timetable"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
slots = ["8:00", "9:00", "10:00"]

[days.monday."8:00"]
subject = "Fisica"
room = "B2"
start = "8:00"
end = "10:00"

[days.monday."10:00"]
subject = "Chimica"
start = "10:00"
end = "11:00"
color = "green"

[days.fri."9:00"]
subject = "Fisica"
room = "B2"
start = "9:00"
end = "10:00"
"#;

    #[test]
    fn parses_sample_file() {
        let table = Timetable::from_toml_str(SAMPLE).unwrap();
        assert_eq!(table.slots().len(), 3);

        let monday: Vec<_> = table.lessons_on(Weekday::Mon).collect();
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].subject, "Fisica");
        assert_eq!(monday[0].end, TimeOfDay::at(10, 0));
        assert_eq!(monday[1].room, "");
        assert!(table.day(Weekday::Mon)[1].is_none());
        assert_eq!(table.lessons_on(Weekday::Fri).count(), 1);
        assert!(table.lessons_on(Weekday::Tue).next().is_none());
    }

    #[test]
    fn default_slots_when_omitted() {
        let table = Timetable::from_toml_str("").unwrap();
        assert_eq!(table.slots(), Timetable::builtin().slots());
        assert!(table.is_empty());
    }

    #[test]
    fn rejects_unknown_weekday() {
        let err = Timetable::from_toml_str(
            "[days.funday.\"7:50\"]\nsubject = \"X\"\nstart = \"7:50\"\nend = \"8:50\"\n",
        )
        .unwrap_err();
        assert_eq!(err, TimetableError::UnknownWeekday("funday".into()));
    }

    #[test]
    fn rejects_undeclared_slot() {
        let err = Timetable::from_toml_str(
            "[days.mon.\"8:00\"]\nsubject = \"X\"\nstart = \"8:00\"\nend = \"9:00\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, TimetableError::UnknownSlot { .. }));
    }

    #[test]
    fn rejects_bad_time_and_reversed_interval() {
        let bad_time = Timetable::from_toml_str(
            "[days.mon.\"7:50\"]\nsubject = \"X\"\nstart = \"7:50\"\nend = \"8:5\"\n",
        )
        .unwrap_err();
        assert_eq!(bad_time, TimetableError::InvalidTime("8:5".into()));

        let reversed = Timetable::from_toml_str(
            "[days.mon.\"7:50\"]\nsubject = \"X\"\nstart = \"7:50\"\nend = \"7:50\"\n",
        )
        .unwrap_err();
        assert!(matches!(reversed, TimetableError::EmptyInterval { .. }));
    }

    #[test]
    fn rejects_lesson_keyed_under_another_slot() {
        let err = Timetable::from_toml_str(
            r#"
slots = ["8:00", "9:00"]

[days.mon."8:00"]
subject = "Late"
start = "10:00"
end = "11:00"

[days.mon."9:00"]
subject = "Early"
start = "9:00"
end = "9:30"
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TimetableError::StartMismatch { ref subject, ref slot, .. }
                if subject == "Late" && slot == "8:00"
        ));
    }

    #[test]
    fn rejects_weekday_spelled_twice() {
        let err = Timetable::from_toml_str(
            r#"
slots = ["8:00", "9:00"]

[days.mon."8:00"]
subject = "Fisica"
start = "8:00"
end = "9:00"

[days.monday."9:00"]
subject = "Chimica"
start = "9:00"
end = "10:00"
"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TimetableError::DuplicateWeekday {
                weekday: "Mon".into(),
                first: "mon".into(),
                second: "monday".into(),
            }
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Timetable::from_toml_str("slot = []").unwrap_err();
        assert!(matches!(err, TimetableError::Parse(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let table = Timetable::load(&path).unwrap();
        assert_eq!(table.populated_slots(), 3);

        let missing = Timetable::load(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(CoreError::Io(_))));
    }
}
