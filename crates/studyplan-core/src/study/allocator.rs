//! Study-time allocation from weekly slots and exam proximity.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ExamReference;

/// Baseline study minutes per weekly classroom slot.
pub const MINUTES_PER_SLOT: u32 = 30;

/// Tunable allocation constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRules {
    #[serde(default = "default_minutes_per_slot")]
    pub minutes_per_slot: u32,
    /// Exams at most this many days away get `near_exam_bonus`.
    #[serde(default = "default_near_exam_days")]
    pub near_exam_days: i64,
    #[serde(default = "default_near_exam_bonus")]
    pub near_exam_bonus: u32,
    /// Exams at most this many days away (but past the near window) get `far_exam_bonus`.
    #[serde(default = "default_far_exam_days")]
    pub far_exam_days: i64,
    #[serde(default = "default_far_exam_bonus")]
    pub far_exam_bonus: u32,
}

fn default_minutes_per_slot() -> u32 {
    MINUTES_PER_SLOT
}
fn default_near_exam_days() -> i64 {
    7
}
fn default_near_exam_bonus() -> u32 {
    60
}
fn default_far_exam_days() -> i64 {
    14
}
fn default_far_exam_bonus() -> u32 {
    30
}

impl Default for AllocationRules {
    fn default() -> Self {
        Self {
            minutes_per_slot: default_minutes_per_slot(),
            near_exam_days: default_near_exam_days(),
            near_exam_bonus: default_near_exam_bonus(),
            far_exam_days: default_far_exam_days(),
            far_exam_bonus: default_far_exam_bonus(),
        }
    }
}

/// Per-subject breakdown of an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAllocation {
    pub subject: String,
    pub weekly_slots: u32,
    pub baseline_minutes: u32,
    pub exam_bonus_minutes: u32,
    /// Exams that contributed a bonus.
    pub boosted_exams: u32,
    pub total_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub today: NaiveDate,
    pub subjects: Vec<SubjectAllocation>,
    pub total_minutes: u32,
}

/// Suggests weekly study minutes per subject.
#[derive(Debug, Clone, Default)]
pub struct StudyAllocator {
    rules: AllocationRules,
}

impl StudyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: AllocationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AllocationRules {
        &self.rules
    }

    /// Slot count times the per-slot baseline, for every subject.
    ///
    /// All minute arithmetic saturates at `u32::MAX`.
    pub fn baseline_study_minutes(
        &self,
        weekly_hours: &BTreeMap<String, u32>,
    ) -> BTreeMap<String, u32> {
        weekly_hours
            .iter()
            .map(|(subject, slots)| (subject.clone(), self.baseline(*slots)))
            .collect()
    }

    fn baseline(&self, slots: u32) -> u32 {
        slots.saturating_mul(self.rules.minutes_per_slot)
    }

    /// Bonus minutes for one exam as seen from `today`.
    ///
    /// Past exams and exams beyond the far window contribute nothing.
    pub fn exam_bonus(&self, exam: &ExamReference, today: NaiveDate) -> u32 {
        let days = exam.days_until(today);
        if days < 0 {
            0
        } else if days <= self.rules.near_exam_days {
            self.rules.near_exam_bonus
        } else if days <= self.rules.far_exam_days {
            self.rules.far_exam_bonus
        } else {
            0
        }
    }

    /// Baseline plus exam bonuses per subject.
    ///
    /// Bonuses accumulate without a cap. Subjects that only appear through an
    /// exam are included with the bonus alone.
    pub fn allocate(
        &self,
        weekly_hours: &BTreeMap<String, u32>,
        exams: &[ExamReference],
        today: NaiveDate,
    ) -> BTreeMap<String, u32> {
        let mut minutes = self.baseline_study_minutes(weekly_hours);
        for (subject, (bonus, _)) in self.exam_bonuses(exams, today) {
            let total = minutes.entry(subject).or_insert(0);
            *total = total.saturating_add(bonus);
        }
        minutes
    }

    /// Same numbers as [`allocate`](Self::allocate), broken down per subject.
    pub fn report(
        &self,
        weekly_hours: &BTreeMap<String, u32>,
        exams: &[ExamReference],
        today: NaiveDate,
    ) -> AllocationReport {
        let bonuses = self.exam_bonuses(exams, today);

        let mut subjects: BTreeMap<&str, SubjectAllocation> = BTreeMap::new();
        for (subject, slots) in weekly_hours {
            let baseline = self.baseline(*slots);
            subjects.insert(
                subject.as_str(),
                SubjectAllocation {
                    subject: subject.clone(),
                    weekly_slots: *slots,
                    baseline_minutes: baseline,
                    exam_bonus_minutes: 0,
                    boosted_exams: 0,
                    total_minutes: baseline,
                },
            );
        }
        for (subject, (bonus, count)) in &bonuses {
            let entry = subjects
                .entry(subject.as_str())
                .or_insert_with(|| SubjectAllocation {
                    subject: subject.clone(),
                    weekly_slots: 0,
                    baseline_minutes: 0,
                    exam_bonus_minutes: 0,
                    boosted_exams: 0,
                    total_minutes: 0,
                });
            entry.exam_bonus_minutes = entry.exam_bonus_minutes.saturating_add(*bonus);
            entry.boosted_exams = entry.boosted_exams.saturating_add(*count);
            entry.total_minutes = entry.total_minutes.saturating_add(*bonus);
        }

        let subjects: Vec<_> = subjects.into_values().collect();
        let total_minutes = subjects
            .iter()
            .fold(0u32, |sum, s| sum.saturating_add(s.total_minutes));
        AllocationReport {
            today,
            subjects,
            total_minutes,
        }
    }

    /// Summed bonus and number of boosting exams per subject.
    fn exam_bonuses(
        &self,
        exams: &[ExamReference],
        today: NaiveDate,
    ) -> BTreeMap<String, (u32, u32)> {
        let mut bonuses: BTreeMap<String, (u32, u32)> = BTreeMap::new();
        for exam in exams {
            let bonus = self.exam_bonus(exam, today);
            tracing::debug!(
                subject = %exam.subject,
                date = %exam.date,
                days_until = exam.days_until(today),
                bonus,
                "exam bonus"
            );
            if bonus == 0 {
                continue;
            }
            let entry = bonuses.entry(exam.subject.clone()).or_insert((0, 0));
            entry.0 = entry.0.saturating_add(bonus);
            entry.1 = entry.1.saturating_add(1);
        }
        bonuses
    }
}
