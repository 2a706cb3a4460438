//! Countdown/elapsed timer engine.
//!
//! The timer is a second-granularity state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` once per second
//! while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Idle | Finished)
//! ```
//!
//! Two modes share the same engine:
//! - `Countdown`: counts `seconds` down to 0 (exercise rest timer)
//! - `Elapsed`: counts `seconds` up to `target_secs` (meditation goal)
//!
//! Reaching the terminal value stops the engine on that same tick and
//! reports it to the owner, so the counter never runs past the terminal by
//! more than the one-second tick granularity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Countdown,
    Elapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Finished,
}

/// Caller-driven one-second tick engine.
///
/// There is exactly one owner per timer (the session that embeds it); every
/// path that leaves an active session must call `stop()` before discarding
/// the timer so no stale tick can mutate a torn-down session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEngine {
    mode: TimerMode,
    /// Countdown: the starting value `reset()` returns to.
    /// Elapsed: the goal at which the count stops itself.
    target_secs: u64,
    /// Remaining seconds (countdown) or elapsed seconds (elapsed).
    seconds: u64,
    state: TimerState,
}

impl TimerEngine {
    /// Create a countdown timer holding `secs`, not running.
    pub fn countdown(secs: u64) -> Self {
        Self {
            mode: TimerMode::Countdown,
            target_secs: secs,
            seconds: secs,
            state: TimerState::Idle,
        }
    }

    /// Create an elapsed (count-up) timer with a stop goal, not running.
    pub fn elapsed(goal_secs: u64) -> Self {
        Self {
            mode: TimerMode::Elapsed,
            target_secs: goal_secs,
            seconds: 0,
            state: TimerState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Remaining seconds (countdown) or elapsed seconds (elapsed).
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn target_secs(&self) -> u64 {
        self.target_secs
    }

    /// Seconds left until the terminal condition, in either mode.
    pub fn secs_to_terminal(&self) -> u64 {
        match self.mode {
            TimerMode::Countdown => self.seconds,
            TimerMode::Elapsed => self.target_secs.saturating_sub(self.seconds),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin running. Returns `false` without side effects when already
    /// running or already finished, so a double `start()` cannot produce
    /// double-speed ticking.
    pub fn start(&mut self) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// Halt without resetting the counter. Idempotent.
    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Idle;
        }
    }

    /// Stop and restore the configured starting value (full duration for
    /// countdown, zero for elapsed).
    pub fn reset(&mut self) {
        let start_value = match self.mode {
            TimerMode::Countdown => self.target_secs,
            TimerMode::Elapsed => 0,
        };
        self.seconds = start_value;
        self.state = TimerState::Idle;
    }

    /// Stop and load a new countdown value. Also rebases the value that
    /// later `reset()` calls return to.
    pub fn reset_to(&mut self, secs: u64) {
        self.mode = TimerMode::Countdown;
        self.target_secs = secs;
        self.seconds = secs;
        self.state = TimerState::Idle;
    }

    /// Advance by exactly one second. Only has an effect while running.
    ///
    /// Returns `true` on the tick that reaches the terminal condition; the
    /// engine stops itself at that point and further ticks are no-ops until
    /// it is reset.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        match self.mode {
            TimerMode::Countdown => {
                self.seconds = self.seconds.saturating_sub(1);
                if self.seconds == 0 {
                    self.state = TimerState::Finished;
                    return true;
                }
            }
            TimerMode::Elapsed => {
                self.seconds = self.seconds.saturating_add(1);
                if self.seconds >= self.target_secs {
                    self.state = TimerState::Finished;
                    return true;
                }
            }
        }
        false
    }
}

/// Render seconds as `m:ss` for display.
pub fn format_mmss(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_runs_to_zero_and_finishes() {
        let mut t = TimerEngine::countdown(3);
        assert!(t.start());
        assert!(!t.tick());
        assert!(!t.tick());
        assert!(t.tick());
        assert_eq!(t.seconds(), 0);
        assert_eq!(t.state(), TimerState::Finished);
    }

    #[test]
    fn finished_timer_ignores_further_ticks() {
        let mut t = TimerEngine::countdown(1);
        t.start();
        assert!(t.tick());
        assert!(!t.tick());
        assert_eq!(t.seconds(), 0);
    }

    #[test]
    fn double_start_is_a_no_op() {
        let mut t = TimerEngine::countdown(10);
        assert!(t.start());
        assert!(!t.start());
        t.tick();
        assert_eq!(t.seconds(), 9);
    }

    #[test]
    fn stop_is_idempotent_and_keeps_counter() {
        let mut t = TimerEngine::countdown(10);
        t.start();
        t.tick();
        t.stop();
        t.stop();
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.seconds(), 9);
        // Not running: ticks do nothing.
        assert!(!t.tick());
        assert_eq!(t.seconds(), 9);
    }

    #[test]
    fn reset_restores_starting_value() {
        let mut t = TimerEngine::countdown(60);
        t.start();
        t.tick();
        t.tick();
        t.reset();
        assert_eq!(t.seconds(), 60);
        assert_eq!(t.state(), TimerState::Idle);
    }

    #[test]
    fn reset_to_rebases_the_duration() {
        let mut t = TimerEngine::countdown(60);
        t.reset_to(90);
        assert_eq!(t.seconds(), 90);
        t.start();
        t.tick();
        t.reset();
        assert_eq!(t.seconds(), 90);
    }

    #[test]
    fn elapsed_counts_up_and_stops_at_goal() {
        let mut t = TimerEngine::elapsed(3);
        t.start();
        assert!(!t.tick());
        assert!(!t.tick());
        assert!(t.tick());
        assert_eq!(t.seconds(), 3);
        assert_eq!(t.state(), TimerState::Finished);
        // Elapsed never exceeds the goal by more than the tick granularity.
        assert!(!t.tick());
        assert_eq!(t.seconds(), 3);
    }

    #[test]
    fn elapsed_reset_returns_to_zero() {
        let mut t = TimerEngine::elapsed(600);
        t.start();
        t.tick();
        t.tick();
        assert_eq!(t.seconds(), 2);
        t.reset();
        assert_eq!(t.seconds(), 0);
        assert_eq!(t.state(), TimerState::Idle);
    }

    #[test]
    fn format_display() {
        assert_eq!(format_mmss(0), "0:00");
        assert_eq!(format_mmss(60), "1:00");
        assert_eq!(format_mmss(605), "10:05");
    }
}
