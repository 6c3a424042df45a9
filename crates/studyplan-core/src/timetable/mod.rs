//! Weekly school timetable.
//!
//! A [`Timetable`] is an ordered list of slot start times plus, for every
//! weekday, one optional [`Lesson`] per slot. An empty slot only means that
//! no lesson *starts* there: a double lesson is recorded once under its first
//! slot and leaves the following slot empty while it is still running.

mod builtin;
mod file;
mod resolver;
mod time;

pub use resolver::{LessonSnapshot, ScheduleResolver};
pub use time::{TimeOfDay, MINUTES_PER_DAY};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::TimetableError;

/// All weekdays, Monday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A single lesson in the weekly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub subject: String,
    pub room: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Presentation tag, not used for any computation.
    #[serde(default)]
    pub color: String,
}

impl Lesson {
    pub fn new(
        subject: impl Into<String>,
        room: impl Into<String>,
        start: TimeOfDay,
        end: TimeOfDay,
        color: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            room: room.into(),
            start,
            end,
            color: color.into(),
        }
    }

    /// Half-open `[start, end)` membership.
    pub fn contains(&self, at: TimeOfDay) -> bool {
        self.start <= at && at < self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }
}

/// Immutable weekly table: weekday -> slot -> optional lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    slots: Vec<TimeOfDay>,
    /// Indexed by `Weekday::num_days_from_monday`, each row as long as `slots`.
    days: [Vec<Option<Lesson>>; 7],
}

impl Timetable {
    /// Empty table over the given slots.
    ///
    /// # Errors
    /// Returns an error if the slots are not strictly ascending.
    pub fn new(slots: Vec<TimeOfDay>) -> Result<Self, TimetableError> {
        if let Some(pair) = slots.windows(2).find(|w| w[0] >= w[1]) {
            return Err(TimetableError::SlotsNotAscending(pair[1].to_string()));
        }
        let days = std::array::from_fn(|_| vec![None; slots.len()]);
        Ok(Self { slots, days })
    }

    /// Place a lesson under `slot` on `weekday`, replacing what was there.
    ///
    /// # Errors
    /// Returns an error if the slot is not declared, the lesson does not start
    /// at that slot, or the lesson does not end after it starts.
    pub fn set_lesson(
        &mut self,
        weekday: Weekday,
        slot: TimeOfDay,
        lesson: Lesson,
    ) -> Result<(), TimetableError> {
        let index = self
            .slots
            .iter()
            .position(|s| *s == slot)
            .ok_or_else(|| TimetableError::UnknownSlot {
                weekday: weekday.to_string(),
                slot: slot.to_string(),
            })?;

        // Slot order is chronological order only while lessons start on their slot.
        if lesson.start != slot {
            return Err(TimetableError::StartMismatch {
                weekday: weekday.to_string(),
                subject: lesson.subject,
                slot: slot.to_string(),
                start: lesson.start.to_string(),
            });
        }

        if lesson.end <= lesson.start {
            return Err(TimetableError::EmptyInterval {
                weekday: weekday.to_string(),
                subject: lesson.subject,
                start: lesson.start.to_string(),
                end: lesson.end.to_string(),
            });
        }

        self.days[weekday.num_days_from_monday() as usize][index] = Some(lesson);
        Ok(())
    }

    pub fn slots(&self) -> &[TimeOfDay] {
        &self.slots
    }

    /// Raw slot row for a weekday, empty slots included.
    pub fn day(&self, weekday: Weekday) -> &[Option<Lesson>] {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    /// Lessons of a weekday in slot order, empty slots skipped.
    pub fn lessons_on(&self, weekday: Weekday) -> impl Iterator<Item = &Lesson> + '_ {
        self.day(weekday).iter().flatten()
    }

    /// Every lesson of the week, Monday first.
    pub fn lessons(&self) -> impl Iterator<Item = (Weekday, &Lesson)> + '_ {
        WEEK.into_iter()
            .flat_map(move |day| self.lessons_on(day).map(move |lesson| (day, lesson)))
    }

    /// Number of populated slots in the whole week.
    pub fn populated_slots(&self) -> usize {
        self.days.iter().flatten().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.populated_slots() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(subject: &str, start: TimeOfDay, end: TimeOfDay) -> Lesson {
        Lesson::new(subject, "A1", start, end, "")
    }

    #[test]
    fn contains_is_half_open() {
        let l = lesson("Matematica", TimeOfDay::at(7, 50), TimeOfDay::at(8, 50));
        assert!(!l.contains(TimeOfDay::at(7, 49)));
        assert!(l.contains(TimeOfDay::at(7, 50)));
        assert!(l.contains(TimeOfDay::at(8, 49)));
        assert!(!l.contains(TimeOfDay::at(8, 50)));
    }

    #[test]
    fn new_rejects_unsorted_slots() {
        let err = Timetable::new(vec![TimeOfDay::at(8, 50), TimeOfDay::at(7, 50)]).unwrap_err();
        assert_eq!(err, TimetableError::SlotsNotAscending("7:50".into()));
    }

    #[test]
    fn set_lesson_checks_slot_and_interval() {
        let mut table = Timetable::new(vec![TimeOfDay::at(7, 50)]).unwrap();
        let ok = lesson("Storia", TimeOfDay::at(7, 50), TimeOfDay::at(8, 50));
        table.set_lesson(Weekday::Mon, TimeOfDay::at(7, 50), ok).unwrap();

        let wrong_slot = lesson("Storia", TimeOfDay::at(9, 0), TimeOfDay::at(10, 0));
        assert!(matches!(
            table.set_lesson(Weekday::Mon, TimeOfDay::at(9, 0), wrong_slot),
            Err(TimetableError::UnknownSlot { .. })
        ));

        let backwards = lesson("Storia", TimeOfDay::at(7, 50), TimeOfDay::at(7, 0));
        assert!(matches!(
            table.set_lesson(Weekday::Tue, TimeOfDay::at(7, 50), backwards),
            Err(TimetableError::EmptyInterval { .. })
        ));
        assert_eq!(table.populated_slots(), 1);
    }

    #[test]
    fn set_lesson_requires_start_on_slot() {
        let mut table = Timetable::new(vec![TimeOfDay::at(8, 0), TimeOfDay::at(9, 0)]).unwrap();
        let late = lesson("Late", TimeOfDay::at(10, 0), TimeOfDay::at(11, 0));
        assert_eq!(
            table.set_lesson(Weekday::Mon, TimeOfDay::at(8, 0), late),
            Err(TimetableError::StartMismatch {
                weekday: "Mon".into(),
                subject: "Late".into(),
                slot: "8:00".into(),
                start: "10:00".into(),
            })
        );
        assert!(table.is_empty());
    }

    #[test]
    fn lessons_on_skips_empty_slots() {
        let mut table =
            Timetable::new(vec![TimeOfDay::at(7, 50), TimeOfDay::at(8, 50), TimeOfDay::at(9, 50)])
                .unwrap();
        let double = lesson("Sistemi e Reti", TimeOfDay::at(7, 50), TimeOfDay::at(9, 50));
        let single = lesson("Inglese", TimeOfDay::at(9, 50), TimeOfDay::at(10, 50));
        table.set_lesson(Weekday::Thu, TimeOfDay::at(7, 50), double).unwrap();
        table.set_lesson(Weekday::Thu, TimeOfDay::at(9, 50), single).unwrap();

        let subjects: Vec<_> = table
            .lessons_on(Weekday::Thu)
            .map(|l| l.subject.as_str())
            .collect();
        assert_eq!(subjects, ["Sistemi e Reti", "Inglese"]);
        assert_eq!(table.day(Weekday::Thu).len(), 3);
        assert!(table.lessons_on(Weekday::Sun).next().is_none());
    }
}
