use std::path::PathBuf;

use chrono::Weekday;
use clap::Subcommand;
use serde::Serialize;
use studyplan_core::timetable::WEEK;
use studyplan_core::{Config, Lesson, ScheduleResolver, Timetable};

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum TimetableAction {
    /// Show the configured week
    Show {
        /// Only this weekday (mon, tuesday, ...)
        #[arg(long)]
        day: Option<String>,
    },
    /// Weekly slot count per subject
    Hours,
    /// Validate a timetable file without installing it
    Check {
        /// Path to the timetable TOML file
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct DayView<'a> {
    weekday: Weekday,
    lessons: Vec<&'a Lesson>,
}

#[derive(Serialize)]
struct CheckReport {
    ok: bool,
    lessons: usize,
    subjects: Vec<String>,
}

pub fn run(action: TimetableAction) -> CliResult {
    match action {
        TimetableAction::Show { day } => {
            let resolver = Config::load_or_default().resolver()?;
            let days = match day {
                Some(day) => vec![day
                    .parse::<Weekday>()
                    .map_err(|_| format!("unknown weekday: {day}"))?],
                None => WEEK.to_vec(),
            };
            let week: Vec<_> = days
                .into_iter()
                .map(|weekday| DayView {
                    weekday,
                    lessons: resolver.lessons_on(weekday),
                })
                .collect();
            print_json(&week)?;
        }
        TimetableAction::Hours => {
            let resolver = Config::load_or_default().resolver()?;
            print_json(&resolver.weekly_hours_by_subject())?;
        }
        TimetableAction::Check { file } => {
            let resolver = ScheduleResolver::new(Timetable::load(&file)?);
            print_json(&CheckReport {
                ok: true,
                lessons: resolver.timetable().populated_slots(),
                subjects: resolver.subjects(),
            })?;
        }
    }
    Ok(())
}
