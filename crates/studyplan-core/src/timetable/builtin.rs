//! Built-in timetable used when no timetable file is configured.

use super::{Lesson, TimeOfDay, Timetable};

const SLOTS: [TimeOfDay; 5] = [
    TimeOfDay::at(7, 50),
    TimeOfDay::at(8, 50),
    TimeOfDay::at(9, 50),
    TimeOfDay::at(10, 50),
    TimeOfDay::at(11, 50),
];

fn lesson(subject: &str, room: &str, start: TimeOfDay, end: TimeOfDay, color: &str) -> Option<Lesson> {
    Some(Lesson::new(subject, room, start, end, color))
}

/// One hour starting at the given slot.
fn hour(subject: &str, room: &str, slot: usize, color: &str) -> Option<Lesson> {
    let start = SLOTS[slot];
    let end = TimeOfDay::at(start.hour() as u8 + 1, start.minute() as u8);
    lesson(subject, room, start, end, color)
}

/// Two hours starting at the given slot; the caller leaves the next slot empty.
fn double(subject: &str, room: &str, slot: usize, color: &str) -> Option<Lesson> {
    let start = SLOTS[slot];
    let end = TimeOfDay::at(start.hour() as u8 + 2, start.minute() as u8);
    lesson(subject, room, start, end, color)
}

impl Timetable {
    /// The default week: Monday to Saturday, Sunday free.
    pub fn builtin() -> Self {
        let mon = vec![
            hour("Matematica", "PP07-stem", 0, "blue"),
            hour("Italiano", "A12", 1, "red"),
            hour("Inglese", "A12", 2, "purple"),
            hour("Informatica", "LAB-INF2", 3, "green"),
            hour("Storia", "A12", 4, "orange"),
        ];
        let tue = vec![
            hour("Sistemi e Reti", "LAB-SIS", 0, "teal"),
            double("TPSIT", "LAB-INF1", 1, "cyan"),
            None,
            hour("Matematica", "PP07-stem", 3, "blue"),
            hour("Italiano", "A12", 4, "red"),
        ];
        let wed = vec![
            double("Scienze Motorie", "PALESTRA", 0, "yellow"),
            None,
            double("Informatica", "LAB-INF2", 2, "green"),
            None,
            hour("Inglese", "A12", 4, "purple"),
        ];
        let thu = vec![
            hour("Italiano", "A12", 0, "red"),
            double("Sistemi e Reti", "LAB-SIS", 1, "teal"),
            None,
            hour("Telecomunicazioni", "LAB-TLC", 3, "pink"),
            hour("Religione", "A12", 4, "gray"),
        ];
        let fri = vec![
            hour("Informatica", "LAB-INF2", 0, "green"),
            hour("Matematica", "PP07-stem", 1, "blue"),
            hour("Storia", "A12", 2, "orange"),
            hour("TPSIT", "LAB-INF1", 3, "cyan"),
            hour("Inglese", "A12", 4, "purple"),
        ];
        let sat = vec![
            hour("Telecomunicazioni", "LAB-TLC", 0, "pink"),
            hour("Italiano", "A12", 1, "red"),
            hour("GPOI", "A14", 2, "indigo"),
            hour("Sistemi e Reti", "LAB-SIS", 3, "teal"),
            hour("Informatica", "LAB-INF2", 4, "green"),
        ];
        let sun = vec![None; SLOTS.len()];

        Self {
            slots: SLOTS.to_vec(),
            days: [mon, tue, wed, thu, fri, sat, sun],
        }
    }
}

impl Default for Timetable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn rows_match_slot_count() {
        let table = Timetable::builtin();
        for day in super::super::WEEK {
            assert_eq!(table.day(day).len(), SLOTS.len(), "{day}");
        }
    }

    #[test]
    fn sunday_is_the_rest_day() {
        let table = Timetable::builtin();
        assert!(table.lessons_on(Weekday::Sun).next().is_none());
        assert!(table.lessons_on(Weekday::Sat).next().is_some());
    }

    #[test]
    fn lessons_start_on_their_slot_and_do_not_overlap() {
        let table = Timetable::builtin();
        for day in super::super::WEEK {
            let row = table.day(day);
            for (slot, lesson) in table.slots().iter().zip(row) {
                if let Some(lesson) = lesson {
                    assert_eq!(lesson.start, *slot);
                }
            }
            let lessons: Vec<_> = table.lessons_on(day).collect();
            for pair in lessons.windows(2) {
                assert!(pair[0].end <= pair[1].start, "{day}: overlap");
            }
        }
    }

    #[test]
    fn populated_slot_count() {
        assert_eq!(Timetable::builtin().populated_slots(), 26);
    }
}
