use std::time::Duration;

use chrono::Local;
use clap::{Args, Subcommand};
use studyplan_core::Config;

use super::{print_json, resolve_now, CliResult};

#[derive(Args)]
pub struct AtArgs {
    /// Evaluate at this local time ("YYYY-MM-DD HH:MM") instead of now
    #[arg(long)]
    at: Option<String>,
}

#[derive(Subcommand)]
pub enum LessonAction {
    /// Lesson in progress
    Now(AtArgs),
    /// Next lesson to start
    Next(AtArgs),
    /// All of today's lessons
    Today(AtArgs),
    /// Current, next and today's lessons in one object
    Snapshot(AtArgs),
    /// Print a fresh snapshot every refresh interval
    Watch {
        /// Stop after this many snapshots
        #[arg(long)]
        count: Option<u32>,
    },
}

pub fn run(action: LessonAction) -> CliResult {
    let config = Config::load_or_default();
    let resolver = config.resolver()?;

    match action {
        LessonAction::Now(args) => {
            let now = resolve_now(args.at.as_deref())?;
            print_json(&resolver.current_lesson(now))?;
        }
        LessonAction::Next(args) => {
            let now = resolve_now(args.at.as_deref())?;
            print_json(&resolver.next_lesson(now))?;
        }
        LessonAction::Today(args) => {
            let now = resolve_now(args.at.as_deref())?;
            print_json(&resolver.today_lessons(now))?;
        }
        LessonAction::Snapshot(args) => {
            let now = resolve_now(args.at.as_deref())?;
            print_json(&resolver.snapshot(now))?;
        }
        LessonAction::Watch { count } => {
            let interval = Duration::from_secs(config.refresh.interval_secs.max(1));
            let mut printed = 0u32;
            loop {
                let snapshot = resolver.snapshot(Local::now().naive_local());
                println!("{}", serde_json::to_string(&snapshot)?);
                printed += 1;
                if count.is_some_and(|limit| printed >= limit) {
                    break;
                }
                std::thread::sleep(interval);
            }
        }
    }
    Ok(())
}
