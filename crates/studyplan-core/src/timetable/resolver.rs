//! "What lesson is on now?" queries over a [`Timetable`].
//!
//! Every query recomputes from the given wall-clock time, so callers that
//! refresh on a timer simply call again with the new time.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::{Lesson, TimeOfDay, Timetable, MINUTES_PER_DAY};

/// Everything a "now" view needs, computed at a single instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSnapshot {
    pub at: NaiveDateTime,
    pub weekday: Weekday,
    pub current: Option<Lesson>,
    pub next: Option<Lesson>,
    pub today: Vec<Lesson>,
    /// Minutes until the current lesson ends.
    pub minutes_left: Option<u32>,
    /// Minutes until the next lesson starts, possibly on a later day.
    pub minutes_until_next: Option<u32>,
}

/// Answers current/next/today lesson queries against an injected timetable.
#[derive(Debug, Clone, Default)]
pub struct ScheduleResolver {
    timetable: Timetable,
}

impl ScheduleResolver {
    pub fn new(timetable: Timetable) -> Self {
        Self { timetable }
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// The lesson whose `[start, end)` contains `now`.
    ///
    /// Decided by the lesson interval rather than the slot, so the second
    /// hour of a double lesson still resolves. First match in slot order wins.
    pub fn current_lesson(&self, now: NaiveDateTime) -> Option<&Lesson> {
        let minute = TimeOfDay::from_time(now.time());
        self.timetable
            .lessons_on(now.weekday())
            .find(|lesson| lesson.contains(minute))
    }

    /// The first lesson starting strictly after `now`, looking up to a week ahead.
    pub fn next_lesson(&self, now: NaiveDateTime) -> Option<&Lesson> {
        self.next_lesson_with_offset(now).map(|(_, lesson)| lesson)
    }

    /// Lessons of `now`'s weekday in slot order.
    pub fn today_lessons(&self, now: NaiveDateTime) -> Vec<&Lesson> {
        self.timetable.lessons_on(now.weekday()).collect()
    }

    pub fn lessons_on(&self, weekday: Weekday) -> Vec<&Lesson> {
        self.timetable.lessons_on(weekday).collect()
    }

    /// Populated slots per subject across the week.
    ///
    /// A double lesson occupies one populated slot and counts once.
    pub fn weekly_hours_by_subject(&self) -> BTreeMap<String, u32> {
        let mut hours = BTreeMap::new();
        for (_, lesson) in self.timetable.lessons() {
            *hours.entry(lesson.subject.clone()).or_insert(0) += 1;
        }
        hours
    }

    /// Distinct subjects, sorted.
    pub fn subjects(&self) -> Vec<String> {
        self.weekly_hours_by_subject().into_keys().collect()
    }

    pub fn snapshot(&self, now: NaiveDateTime) -> LessonSnapshot {
        let minute = TimeOfDay::from_time(now.time());
        let current = self.current_lesson(now);
        let next = self.next_lesson_with_offset(now);

        let minutes_left = current.map(|lesson| lesson.end.minutes() - minute.minutes());
        let minutes_until_next = next.map(|(days_ahead, lesson)| {
            days_ahead * MINUTES_PER_DAY + lesson.start.minutes() - minute.minutes()
        });

        tracing::debug!(
            %now,
            current = current.map(|l| l.subject.as_str()),
            next = next.map(|(_, l)| l.subject.as_str()),
            "resolved lesson snapshot"
        );

        LessonSnapshot {
            at: now,
            weekday: now.weekday(),
            current: current.cloned(),
            next: next.map(|(_, lesson)| lesson.clone()),
            today: self.today_lessons(now).into_iter().cloned().collect(),
            minutes_left,
            minutes_until_next,
        }
    }

    /// Next lesson together with how many days ahead it falls (0 = today).
    fn next_lesson_with_offset(&self, now: NaiveDateTime) -> Option<(u32, &Lesson)> {
        let minute = TimeOfDay::from_time(now.time());
        let today = now.weekday();

        if let Some(lesson) = self
            .timetable
            .lessons_on(today)
            .find(|lesson| lesson.start > minute)
        {
            return Some((0, lesson));
        }

        // Roll forward over free days; the 7th step lands on the same weekday
        // next week.
        let mut day = today;
        for days_ahead in 1..=7 {
            day = day.succ();
            if let Some(lesson) = self.timetable.lessons_on(day).next() {
                return Some((days_ahead, lesson));
            }
        }
        None
    }
}
