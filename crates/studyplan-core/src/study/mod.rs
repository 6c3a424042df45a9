//! Weekly study-time planning.
//!
//! Turns classroom hours per subject plus upcoming exams into a suggested
//! number of study minutes per subject for the week.

mod allocator;

pub use allocator::{
    AllocationReport, AllocationRules, StudyAllocator, SubjectAllocation, MINUTES_PER_SLOT,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An exam the allocator should plan around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamReference {
    pub subject: String,
    pub date: NaiveDate,
}

impl ExamReference {
    pub fn new(subject: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            subject: subject.into(),
            date,
        }
    }

    /// Whole days from `today` to the exam; negative once it has passed.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }
}
