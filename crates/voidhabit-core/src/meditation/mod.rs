//! Meditation session state machine.
//!
//! ```text
//! Idle -> Running -> Idle (manual stop, elapsed kept unless goal met)
//!                 -> auto-complete at goal (report emitted, fresh Idle)
//! ```
//!
//! The session embeds an elapsed-mode [`TimerEngine`] ticked once per second
//! by the caller. Reaching the goal auto-stops and reports on that same
//! tick. A session counts as successful once 60% of the goal has elapsed,
//! whether it ends by auto-complete or by a manual stop.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerEngine;

/// Percentage of the goal that must elapse for a session to count.
pub const GOAL_MET_THRESHOLD_PCT: u32 = 60;

/// Record emitted once per stop or auto-complete, consumed by the
/// meditation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeditationReport {
    pub date: NaiveDate,
    pub duration_minutes: u32,
    pub goal_met: bool,
    pub focus_mode: bool,
    pub note: String,
}

/// Ephemeral meditation session against a configured goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeditationSession {
    goal_secs: u64,
    /// Display-only flag, carried into the report unchanged.
    focus_mode: bool,
    timer: TimerEngine,
}

impl MeditationSession {
    pub fn new(goal_minutes: u32) -> Self {
        let goal_secs = u64::from(goal_minutes) * 60;
        Self {
            goal_secs,
            focus_mode: true,
            timer: TimerEngine::elapsed(goal_secs),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn goal_minutes(&self) -> u32 {
        (self.goal_secs / 60) as u32
    }

    pub fn goal_secs(&self) -> u64 {
        self.goal_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.seconds()
    }

    pub fn time_left_secs(&self) -> u64 {
        self.goal_secs.saturating_sub(self.timer.seconds())
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn focus_mode(&self) -> bool {
        self.focus_mode
    }

    pub fn set_focus_mode(&mut self, on: bool) {
        self.focus_mode = on;
    }

    /// Progress toward the goal, rounded, clamped to 100.
    pub fn percentage(&self) -> u32 {
        if self.goal_secs == 0 {
            return 0;
        }
        let pct = (self.timer.seconds() as f64 / self.goal_secs as f64) * 100.0;
        (pct.round() as u32).min(100)
    }

    pub fn goal_met(&self) -> bool {
        self.percentage() >= GOAL_MET_THRESHOLD_PCT
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting. A non-positive goal has no meaningful session to
    /// run, so this is a guarded no-op; returns whether counting started.
    pub fn start(&mut self) -> bool {
        if self.goal_secs == 0 {
            return false;
        }
        self.timer.start()
    }

    /// One-second tick. Returns the auto-complete report on the tick that
    /// reaches the goal: the timer stops itself, the report carries the
    /// full goal duration, and the session resets to a fresh Idle.
    pub fn tick(&mut self) -> Option<MeditationReport> {
        if !self.timer.tick() {
            return None;
        }
        let report = MeditationReport {
            date: Utc::now().date_naive(),
            duration_minutes: self.goal_minutes(),
            goal_met: true,
            focus_mode: self.focus_mode,
            note: "Objetivo completo (100%)".into(),
        };
        self.timer.reset();
        Some(report)
    }

    /// Manual stop before the goal. Reports whole elapsed minutes and the
    /// 60%-threshold verdict; elapsed time is kept for a later resume
    /// unless the goal was already met.
    pub fn stop(&mut self) -> MeditationReport {
        self.timer.stop();
        let pct = self.percentage();
        let met = self.goal_met();
        let report = MeditationReport {
            date: Utc::now().date_naive(),
            duration_minutes: (self.timer.seconds() / 60) as u32,
            goal_met: met,
            focus_mode: self.focus_mode,
            note: if met {
                format!("Objetivo completo ({pct}%)")
            } else {
                format!("Sessão pausada ({pct}%)")
            },
        };
        if met {
            self.timer.reset();
        }
        report
    }
}
