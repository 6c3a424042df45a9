//! # Studyplan Core Library
//!
//! Core logic for a personal study planner. All operations are available
//! through the `studyplan-cli` binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timetable**: immutable weekly table of lessons, built in or loaded
//!   from TOML, and a resolver answering "what lesson is on now / next / today"
//! - **Study**: weekly study-time allocation from classroom slots and exam
//!   proximity
//! - **Storage**: TOML configuration and a SQLite exam store
//!
//! ## Key Components
//!
//! - [`ScheduleResolver`]: current/next/today lesson queries
//! - [`StudyAllocator`]: per-subject study minutes
//! - [`ExamDb`]: exam persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod storage;
pub mod study;
pub mod timetable;

pub use error::{ConfigError, CoreError, DatabaseError, TimetableError, ValidationError};
pub use storage::{Config, ExamDb, ExamRecord};
pub use study::{AllocationReport, AllocationRules, ExamReference, StudyAllocator, SubjectAllocation};
pub use timetable::{Lesson, LessonSnapshot, ScheduleResolver, TimeOfDay, Timetable};
