use chrono::Utc;
use clap::Subcommand;
use serde_json::json;

use voidhabit_core::books::completed_count;
use voidhabit_core::stats::compute_streaks;
use voidhabit_core::storage::Database;

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Current and best activity streaks
    Streak,
    /// Totals across logs and the bookshelf
    Summary,
}

pub fn run(action: StatsAction) -> CliResult {
    let db = Database::open()?;

    match action {
        StatsAction::Streak => {
            let dates = db.activity_dates()?;
            let streaks = compute_streaks(&dates, Utc::now().date_naive());
            print_json(&streaks)?;
        }
        StatsAction::Summary => {
            let workouts = db.list_workout_logs()?;
            let meditations = db.list_meditation_logs()?;
            let books = db.list_books()?;
            let meditation_minutes: u32 = meditations.iter().map(|m| m.duration_minutes).sum();
            let dates = db.activity_dates()?;
            let streaks = compute_streaks(&dates, Utc::now().date_naive());
            print_json(&json!({
                "workouts_logged": workouts.len(),
                "meditations_logged": meditations.len(),
                "meditation_minutes": meditation_minutes,
                "meditations_goal_met": meditations.iter().filter(|m| m.goal_met).count(),
                "books_total": books.len(),
                "books_completed": completed_count(&books),
                "streak": streaks,
            }))?;
        }
    }
    Ok(())
}
