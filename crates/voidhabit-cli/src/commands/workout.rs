use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use serde_json::json;

use voidhabit_core::storage::{Database, Profile};
use voidhabit_core::workout::{
    current_month, plan_for_day, plans_locked, CompletionReport, Exercise, WorkoutForm,
    WorkoutPlan, WorkoutSession,
};
use voidhabit_core::Event;

use super::{print_json, CliResult};

const SESSION_KEY: &str = "workout_session";
/// Logged duration until real session timing exists.
const DEFAULT_WORKOUT_MINUTES: u32 = 45;

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Create or update the plan for a day of the week
    Save {
        #[arg(long)]
        name: String,
        /// Day-of-week id, e.g. "seg"
        #[arg(long)]
        day: String,
        #[arg(long)]
        video: Option<String>,
        /// Exercise as "name:sets:reps"; repeat for each exercise
        #[arg(long = "exercise", value_parser = parse_exercise, required = true)]
        exercises: Vec<Exercise>,
    },
    /// List stored plans and the lock state
    List,
    /// Start a session for a day's plan
    Start {
        #[arg(long)]
        day: String,
        /// Follow the plan's video instead of the guided loop
        #[arg(long)]
        video: bool,
    },
    /// Show the in-flight guided session
    Status,
    /// Rest timer control for the current exercise
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },
    /// Complete the current exercise and advance
    Done,
    /// Skip the current exercise (does not count as complete)
    Skip,
    /// Abandon the session, logging partial progress
    Quit,
}

#[derive(Subcommand)]
pub enum TimerAction {
    Start,
    Stop,
    Reset,
}

/// In-flight session persisted between invocations, with a wall-clock
/// anchor so elapsed whole seconds can be replayed as individual ticks.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    plan_id: String,
    session: WorkoutSession,
    timer_anchor: Option<DateTime<Utc>>,
}

impl StoredSession {
    /// Replay the seconds that passed since the anchor as ticks, then
    /// re-anchor (or drop the anchor once the timer stops itself).
    fn catch_up(&mut self) {
        let Some(anchor) = self.timer_anchor else {
            return;
        };
        if !self.session.timer().is_running() {
            self.timer_anchor = None;
            return;
        }
        let now = Utc::now();
        let secs = (now - anchor).num_seconds().max(0) as u64;
        for _ in 0..secs {
            if self.session.timer_mut().tick() {
                break;
            }
        }
        self.timer_anchor = self.session.timer().is_running().then_some(now);
    }
}

fn parse_exercise(raw: &str) -> Result<Exercise, String> {
    let mut parts = raw.splitn(3, ':');
    let name = parts
        .next()
        .filter(|n| !n.trim().is_empty())
        .ok_or("expected \"name:sets:reps\"")?;
    let sets: u32 = parts
        .next()
        .unwrap_or("3")
        .trim()
        .parse()
        .map_err(|_| format!("invalid sets in '{raw}'"))?;
    let reps = parts.next().unwrap_or("10").trim();
    Ok(Exercise::new(name.trim(), sets, reps))
}

fn load_session(db: &Database) -> CliResult<StoredSession> {
    let raw = db
        .kv_get(SESSION_KEY)?
        .ok_or("no workout session in progress (run `workout start` first)")?;
    Ok(serde_json::from_str(&raw)?)
}

fn save_session(db: &Database, stored: &StoredSession) -> CliResult {
    db.kv_set(SESSION_KEY, &serde_json::to_string(stored)?)?;
    Ok(())
}

/// Log the final report, drop the persisted session, emit the event.
fn finish_session(db: &Database, plan_id: &str, report: CompletionReport) -> CliResult {
    db.record_workout(
        plan_id,
        Utc::now().date_naive(),
        DEFAULT_WORKOUT_MINUTES,
        &report,
    )?;
    db.kv_delete(SESSION_KEY)?;
    print_json(&Event::WorkoutFinished {
        completed_count: report.completed_count,
        total_count: report.total_count,
        at: Utc::now(),
    })
}

fn snapshot(stored: &StoredSession) -> Event {
    let session = &stored.session;
    Event::SessionSnapshot {
        phase: session.phase(),
        exercise_index: session.current_index(),
        exercise_name: session.current_exercise().map(|e| e.name.clone()),
        completed_count: session.completed_count(),
        total_count: session.exercises().len(),
        timer_secs: session.timer().seconds(),
        timer_running: session.timer().is_running(),
        at: Utc::now(),
    }
}

pub fn run(action: WorkoutAction) -> CliResult {
    let db = Database::open()?;

    match action {
        WorkoutAction::Save {
            name,
            day,
            video,
            exercises,
        } => {
            let profile = Profile::load()?;
            let plans = db.list_plans()?;
            let month = current_month(Utc::now());
            if plans_locked(&plans, profile.training_days_goal, &month) {
                return Err(
                    "plan edits are locked until next month (training goal reached)".into(),
                );
            }
            let form = WorkoutForm {
                name,
                day_of_week: day,
                video_url: video,
                exercises,
            };
            form.validate()?;
            let plan = match plans.into_iter().find(|p| p.day_of_week == form.day_of_week) {
                Some(mut existing) => {
                    existing.apply_edit(form);
                    existing
                }
                None => WorkoutPlan::new(form),
            };
            db.save_plan(&plan)?;
            print_json(&plan)?;
        }
        WorkoutAction::List => {
            let profile = Profile::load()?;
            let plans = db.list_plans()?;
            let month = current_month(Utc::now());
            let locked = plans_locked(&plans, profile.training_days_goal, &month);
            print_json(&json!({ "locked": locked, "plans": plans }))?;
        }
        WorkoutAction::Start { day, video } => {
            if db.kv_get(SESSION_KEY)?.is_some() {
                return Err("a workout session is already in progress".into());
            }
            let plans = db.list_plans()?;
            let plan = plan_for_day(&plans, &day)
                .ok_or_else(|| format!("no plan stored for day '{day}'"))?;

            let mut session = WorkoutSession::new(plan);
            if video {
                session.choose_video()?;
                println!("{}", session.video_url().unwrap_or_default());
                return Ok(());
            }

            session.choose_guided()?;
            if let Some(report) = session.begin_guided()? {
                // Zero-exercise plan: finished before it started.
                return finish_session(&db, &plan.id, report);
            }
            let stored = StoredSession {
                plan_id: plan.id.clone(),
                session,
                timer_anchor: None,
            };
            save_session(&db, &stored)?;
            print_json(&Event::WorkoutStarted {
                plan_name: stored.session.plan_name().to_string(),
                total_exercises: stored.session.exercises().len(),
                at: Utc::now(),
            })?;
            print_json(&snapshot(&stored))?;
        }
        WorkoutAction::Status => {
            let mut stored = load_session(&db)?;
            stored.catch_up();
            save_session(&db, &stored)?;
            print_json(&snapshot(&stored))?;
        }
        WorkoutAction::Timer { action } => {
            let mut stored = load_session(&db)?;
            stored.catch_up();
            match action {
                TimerAction::Start => {
                    if stored.session.timer_mut().start() {
                        stored.timer_anchor = Some(Utc::now());
                    }
                }
                TimerAction::Stop => {
                    stored.session.timer_mut().stop();
                    stored.timer_anchor = None;
                }
                TimerAction::Reset => {
                    stored.session.timer_mut().reset();
                    stored.timer_anchor = None;
                }
            }
            save_session(&db, &stored)?;
            print_json(&snapshot(&stored))?;
        }
        WorkoutAction::Done => advance(&db, true)?,
        WorkoutAction::Skip => advance(&db, false)?,
        WorkoutAction::Quit => {
            let mut stored = load_session(&db)?;
            let report = stored.session.close_early();
            finish_session(&db, &stored.plan_id, report)?;
        }
    }
    Ok(())
}

fn advance(db: &Database, complete: bool) -> CliResult {
    let mut stored = load_session(db)?;
    stored.catch_up();

    let index = stored.session.current_index();
    let name = stored
        .session
        .current_exercise()
        .map(|e| e.name.clone())
        .unwrap_or_default();
    let outcome = if complete {
        stored.session.complete_current()?
    } else {
        stored.session.skip_current()?
    };

    print_json(&Event::ExerciseAdvanced {
        index,
        name,
        completed: complete,
        at: Utc::now(),
    })?;

    match outcome {
        Some(report) => finish_session(db, &stored.plan_id, report),
        None => {
            // Advancing reset the rest timer; any previous anchor is stale.
            stored.timer_anchor = None;
            save_session(db, &stored)?;
            print_json(&snapshot(&stored))
        }
    }
}
