use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Subcommand;
use serde_json::json;

use voidhabit_core::storage::{Database, Profile};
use voidhabit_core::task::{
    infer_pillar, missing_daily_habits, partition_by_type, routine_tasks_for_date,
    tasks_for_date, Recurrence, Task, TaskType,
};
use voidhabit_core::Event;

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the routine
    Add {
        title: String,
        /// Optional tasks disappear from the list once completed
        #[arg(long)]
        optional: bool,
        /// Due date (YYYY-MM-DD); defaults to today for one-off tasks
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Time-of-day hint (HH:MM)
        #[arg(long)]
        time: Option<String>,
        /// Repeat every day instead of a single date
        #[arg(long)]
        daily: bool,
    },
    /// List the routine for a date (default: today)
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Show every stored task instead of one day's view
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Dashboard view: today's tasks grouped by life pillar
    Today,
    /// Toggle a task between pending and completed
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
    /// Seed the daily habit tasks derived from profile goals
    EnsureHabits,
}

pub fn run(action: TaskAction) -> CliResult {
    let db = Database::open()?;

    match action {
        TaskAction::Add {
            title,
            optional,
            date,
            time,
            daily,
        } => {
            if title.trim().is_empty() {
                return Err("task title must not be empty".into());
            }
            let mut task = Task::new(title);
            if optional {
                task.task_type = TaskType::Optional;
            }
            if daily {
                task.recurrence = Some(Recurrence::Daily);
            } else {
                task.due_date = Some(date.unwrap_or_else(|| Utc::now().date_naive()));
            }
            if let Some(t) = time {
                task.due_time = Some(NaiveTime::parse_from_str(&t, "%H:%M")?);
            }
            db.insert_task(&task)?;
            print_json(&task)?;
        }
        TaskAction::List { date, all, json } => {
            let tasks = db.list_tasks()?;
            if all {
                return print_json(&tasks);
            }
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let visible = routine_tasks_for_date(&tasks, date);
            if json {
                return print_json(&visible);
            }
            let (non_negotiable, optional) = partition_by_type(&visible);
            println!("Rotina de {date}");
            for t in non_negotiable {
                println!(
                    "  [{}] {}  {} ({})",
                    if t.is_completed() { "x" } else { " " },
                    t.title,
                    t.due_time.map(|h| h.format("%H:%M").to_string()).unwrap_or_default(),
                    t.id,
                );
            }
            for t in optional {
                println!("  [ ] {} (opcional) ({})", t.title, t.id);
            }
        }
        TaskAction::Today => {
            let tasks = db.list_tasks()?;
            let today = Utc::now().date_naive();
            let view: Vec<_> = tasks_for_date(&tasks, today)
                .into_iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "title": t.title,
                        "completed": t.is_completed(),
                        "pillar": infer_pillar(&t.title),
                    })
                })
                .collect();
            print_json(&view)?;
        }
        TaskAction::Toggle { id } => {
            let mut task = db.get_task(&id)?;
            let completed = task.toggle();
            db.set_task_status(&id, completed)?;
            print_json(&Event::TaskToggled {
                task_id: id,
                completed,
                at: Utc::now(),
            })?;
        }
        TaskAction::Delete { id } => {
            db.delete_task(&id)?;
            println!("deleted {id}");
        }
        TaskAction::EnsureHabits => {
            let profile = Profile::load()?;
            let existing = db.list_tasks()?;
            let habits = missing_daily_habits(&profile, &existing);
            for habit in &habits {
                db.insert_task(habit)?;
            }
            print_json(&habits)?;
        }
    }
    Ok(())
}
