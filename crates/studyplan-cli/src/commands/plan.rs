use clap::Args;
use studyplan_core::{Config, ExamDb};

use super::{print_json, resolve_today, CliResult};

#[derive(Args)]
pub struct PlanArgs {
    /// Plan as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    date: Option<String>,
    /// Per-subject breakdown instead of totals only
    #[arg(long)]
    report: bool,
}

pub fn run(args: PlanArgs) -> CliResult {
    let today = resolve_today(args.date.as_deref())?;
    let config = Config::load_or_default();
    let hours = config.resolver()?.weekly_hours_by_subject();
    let exams = ExamDb::open()?.references()?;
    let allocator = config.allocator();
    tracing::debug!(%today, exams = exams.len(), subjects = hours.len(), "planning week");

    if args.report {
        print_json(&allocator.report(&hours, &exams, today))?;
    } else {
        print_json(&allocator.allocate(&hours, &exams, today))?;
    }
    Ok(())
}
