use clap::Subcommand;
use studyplan_core::storage::exam_db::parse_date;
use studyplan_core::ExamDb;

use super::{print_json, resolve_today, CliResult};

#[derive(Subcommand)]
pub enum ExamAction {
    /// Record an exam
    Add {
        /// Subject name as it appears in the timetable
        subject: String,
        /// Exam date (YYYY-MM-DD)
        date: String,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },
    /// List exams
    List {
        /// Only exams from today on
        #[arg(long)]
        upcoming: bool,
    },
    /// Delete an exam
    Remove {
        /// Exam ID
        id: i64,
    },
}

pub fn run(action: ExamAction) -> CliResult {
    let db = ExamDb::open()?;

    match action {
        ExamAction::Add {
            subject,
            date,
            note,
        } => {
            let date = parse_date(&date)?;
            let id = db.add_exam(&subject, date, note.as_deref())?;
            println!("Exam added: {id}");
        }
        ExamAction::List { upcoming } => {
            let exams = if upcoming {
                db.upcoming(resolve_today(None)?)?
            } else {
                db.list_exams()?
            };
            print_json(&exams)?;
        }
        ExamAction::Remove { id } => {
            if !db.remove_exam(id)? {
                return Err(format!("exam not found: {id}").into());
            }
            println!("Exam removed: {id}");
        }
    }
    Ok(())
}
