use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use serde_json::json;

use voidhabit_core::meditation::{MeditationReport, MeditationSession};
use voidhabit_core::storage::{Database, Profile};
use voidhabit_core::timer::format_mmss;
use voidhabit_core::Event;

use super::{print_json, CliResult};

const SESSION_KEY: &str = "meditation_session";

#[derive(Subcommand)]
pub enum MeditateAction {
    /// Start (or resume) a meditation session
    Start {
        /// Override the profile's meditation goal for this session
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// Show the running session's progress
    Status,
    /// Stop the session and log the result
    Stop,
    /// Toggle the focus-mode display flag
    Focus {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
}

#[derive(Serialize, Deserialize)]
struct StoredMeditation {
    session: MeditationSession,
    timer_anchor: Option<DateTime<Utc>>,
}

impl StoredMeditation {
    /// Replay wall-clock seconds since the anchor as ticks. Returns the
    /// auto-complete report if the goal was reached during the replay.
    fn catch_up(&mut self) -> Option<MeditationReport> {
        let anchor = self.timer_anchor?;
        if !self.session.is_running() {
            self.timer_anchor = None;
            return None;
        }
        let now = Utc::now();
        let secs = (now - anchor).num_seconds().max(0) as u64;
        for _ in 0..secs {
            if let Some(report) = self.session.tick() {
                self.timer_anchor = None;
                return Some(report);
            }
        }
        self.timer_anchor = Some(now);
        None
    }
}

fn load(db: &Database) -> CliResult<Option<StoredMeditation>> {
    match db.kv_get(SESSION_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

fn save(db: &Database, stored: &StoredMeditation) -> CliResult {
    db.kv_set(SESSION_KEY, &serde_json::to_string(stored)?)?;
    Ok(())
}

fn log_report(db: &Database, report: &MeditationReport) -> CliResult {
    db.record_meditation(report)?;
    print_json(&Event::MeditationStopped {
        date: report.date,
        duration_minutes: report.duration_minutes,
        goal_met: report.goal_met,
        at: Utc::now(),
    })
}

fn status_view(stored: &StoredMeditation) -> serde_json::Value {
    let s = &stored.session;
    json!({
        "running": s.is_running(),
        "elapsed": format_mmss(s.elapsed_secs()),
        "remaining": format_mmss(s.time_left_secs()),
        "goal_minutes": s.goal_minutes(),
        "percentage": s.percentage(),
        "goal_met": s.goal_met(),
        "focus_mode": s.focus_mode(),
    })
}

pub fn run(action: MeditateAction) -> CliResult {
    let db = Database::open()?;

    match action {
        MeditateAction::Start { minutes } => {
            let mut stored = match load(&db)? {
                // Resume a paused session rather than discarding its
                // elapsed time.
                Some(existing) => {
                    if minutes.is_some() {
                        return Err("a meditation session is already in progress; \
                             stop it before changing the goal"
                            .into());
                    }
                    existing
                }
                None => {
                    let goal = match minutes {
                        Some(m) => m,
                        None => Profile::load()?.meditation_goal_minutes,
                    };
                    StoredMeditation {
                        session: MeditationSession::new(goal),
                        timer_anchor: None,
                    }
                }
            };
            if let Some(report) = stored.catch_up() {
                db.kv_delete(SESSION_KEY)?;
                return log_report(&db, &report);
            }
            if !stored.session.is_running() {
                if !stored.session.start() {
                    return Err("meditation goal is zero; set one with \
                         `config set meditation_goal_minutes <n>`"
                        .into());
                }
                stored.timer_anchor = Some(Utc::now());
            }
            save(&db, &stored)?;
            print_json(&Event::MeditationStarted {
                goal_secs: stored.session.goal_secs(),
                at: Utc::now(),
            })?;
        }
        MeditateAction::Status => {
            let Some(mut stored) = load(&db)? else {
                return Err("no meditation session in progress".into());
            };
            if let Some(report) = stored.catch_up() {
                db.kv_delete(SESSION_KEY)?;
                return log_report(&db, &report);
            }
            save(&db, &stored)?;
            print_json(&status_view(&stored))?;
        }
        MeditateAction::Stop => {
            let Some(mut stored) = load(&db)? else {
                return Err("no meditation session in progress".into());
            };
            if let Some(report) = stored.catch_up() {
                db.kv_delete(SESSION_KEY)?;
                return log_report(&db, &report);
            }
            let report = stored.session.stop();
            stored.timer_anchor = None;
            if report.goal_met {
                db.kv_delete(SESSION_KEY)?;
            } else {
                // Unmet stop keeps the elapsed time around for a resume.
                save(&db, &stored)?;
            }
            log_report(&db, &report)?;
        }
        MeditateAction::Focus { state } => {
            let Some(mut stored) = load(&db)? else {
                return Err("no meditation session in progress".into());
            };
            stored.session.set_focus_mode(state == "on");
            save(&db, &stored)?;
            print_json(&status_view(&stored))?;
        }
    }
    Ok(())
}
