//! Guided workout session state machine.
//!
//! ## State Transitions
//!
//! ```text
//! ModeSelection -> Video -> ModeSelection
//! ModeSelection -> GuidedPreview -> GuidedActive -> Finished
//! ```
//!
//! The active phase owns a 60-second rest timer that is reset whenever the
//! current exercise changes. The completed-index set is the single source of
//! truth for the completion report: completing the last exercise inserts its
//! index before finishing (so it counts exactly once), skipping never
//! inserts, and closing early reports the set as-is.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::plan::{Exercise, WorkoutPlan};
use crate::error::ValidationError;
use crate::timer::TimerEngine;

/// Default rest timer per exercise, in seconds.
pub const EXERCISE_TIMER_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Initial phase; the user picks video or guided mode.
    ModeSelection,
    /// Following the plan's video; no exercise tracking.
    Video,
    /// Full exercise list shown before the guided loop starts.
    GuidedPreview,
    /// Working through exercises one at a time.
    GuidedActive,
    /// Terminal; the completion report has been produced.
    Finished,
}

/// What a session reports when it ends, however it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub completed_count: usize,
    pub total_count: usize,
}

impl CompletionReport {
    /// Fraction completed, 0.0 for an empty plan.
    pub fn completion_rate(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.completed_count as f64 / self.total_count as f64
        }
    }

    /// Rounded percentage for log notes.
    pub fn percentage(&self) -> u32 {
        (self.completion_rate() * 100.0).round() as u32
    }
}

/// Ephemeral guided workout session over a fixed exercise list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    plan_name: String,
    exercises: Vec<Exercise>,
    video_url: Option<String>,
    phase: SessionPhase,
    current_index: usize,
    completed: BTreeSet<usize>,
    timer: TimerEngine,
}

impl WorkoutSession {
    /// Create a session from a plan. The exercise list is fixed for the
    /// session's lifetime.
    pub fn new(plan: &WorkoutPlan) -> Self {
        Self {
            plan_name: plan.name.clone(),
            exercises: plan.exercises.clone(),
            video_url: plan.video_url.clone(),
            phase: SessionPhase::ModeSelection,
            current_index: 0,
            completed: BTreeSet::new(),
            timer: TimerEngine::countdown(EXERCISE_TIMER_SECS),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn plan_name(&self) -> &str {
        &self.plan_name
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        if self.phase == SessionPhase::GuidedActive {
            self.exercises.get(self.current_index)
        } else {
            None
        }
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut TimerEngine {
        &mut self.timer
    }

    /// Snapshot of the report the session would produce right now.
    pub fn report(&self) -> CompletionReport {
        CompletionReport {
            completed_count: self.completed.len(),
            total_count: self.exercises.len(),
        }
    }

    // ── Mode selection ───────────────────────────────────────────────

    /// Enter video mode. Only offered when the plan carries a video
    /// reference.
    pub fn choose_video(&mut self) -> Result<(), ValidationError> {
        if self.phase != SessionPhase::ModeSelection {
            return Err(invalid_phase("choose_video", self.phase));
        }
        if self.video_url.is_none() {
            return Err(ValidationError::InvalidState {
                operation: "choose_video".into(),
                message: "plan has no video reference".into(),
            });
        }
        self.phase = SessionPhase::Video;
        Ok(())
    }

    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    pub fn choose_guided(&mut self) -> Result<(), ValidationError> {
        if self.phase != SessionPhase::ModeSelection {
            return Err(invalid_phase("choose_guided", self.phase));
        }
        self.phase = SessionPhase::GuidedPreview;
        Ok(())
    }

    /// Return to mode selection from video mode or the preview. Any running
    /// timer is stopped first.
    pub fn back_to_selection(&mut self) -> Result<(), ValidationError> {
        match self.phase {
            SessionPhase::Video | SessionPhase::GuidedPreview => {
                self.timer.stop();
                self.phase = SessionPhase::ModeSelection;
                Ok(())
            }
            other => Err(invalid_phase("back_to_selection", other)),
        }
    }

    // ── Guided loop ──────────────────────────────────────────────────

    /// Start the guided loop. A zero-exercise plan finishes immediately
    /// with a 0/0 report instead of entering the active phase.
    pub fn begin_guided(&mut self) -> Result<Option<CompletionReport>, ValidationError> {
        if self.phase != SessionPhase::GuidedPreview {
            return Err(invalid_phase("begin_guided", self.phase));
        }
        if self.exercises.is_empty() {
            self.phase = SessionPhase::Finished;
            return Ok(Some(self.report()));
        }
        self.phase = SessionPhase::GuidedActive;
        self.current_index = 0;
        self.timer.reset_to(EXERCISE_TIMER_SECS);
        Ok(None)
    }

    /// Mark the current exercise complete and advance. Returns the final
    /// report when this was the last exercise.
    pub fn complete_current(&mut self) -> Result<Option<CompletionReport>, ValidationError> {
        if self.phase != SessionPhase::GuidedActive {
            return Err(invalid_phase("complete_current", self.phase));
        }
        // BTreeSet insert is idempotent; completing twice cannot inflate
        // the count.
        self.completed.insert(self.current_index);
        Ok(self.advance())
    }

    /// Advance without marking the current exercise complete.
    pub fn skip_current(&mut self) -> Result<Option<CompletionReport>, ValidationError> {
        if self.phase != SessionPhase::GuidedActive {
            return Err(invalid_phase("skip_current", self.phase));
        }
        Ok(self.advance())
    }

    /// Abandon the session from any phase. Stops the timer, reports the
    /// completed count as it stands.
    pub fn close_early(&mut self) -> CompletionReport {
        self.timer.stop();
        self.phase = SessionPhase::Finished;
        self.report()
    }

    fn advance(&mut self) -> Option<CompletionReport> {
        if self.current_index + 1 < self.exercises.len() {
            self.current_index += 1;
            self.timer.reset_to(EXERCISE_TIMER_SECS);
            None
        } else {
            self.timer.stop();
            self.phase = SessionPhase::Finished;
            Some(self.report())
        }
    }
}

fn invalid_phase(operation: &str, phase: SessionPhase) -> ValidationError {
    ValidationError::InvalidState {
        operation: operation.into(),
        message: format!("not allowed in phase {phase:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::plan::WorkoutForm;
    use proptest::prelude::*;

    fn plan_with(n: usize, video: bool) -> WorkoutPlan {
        WorkoutPlan::new(WorkoutForm {
            name: "Treino A".into(),
            day_of_week: "seg".into(),
            video_url: video.then(|| "https://youtu.be/abc".into()),
            exercises: (0..n)
                .map(|i| Exercise::new(format!("Exercício {}", i + 1), 3, "10"))
                .collect(),
        })
    }

    fn active_session(n: usize) -> WorkoutSession {
        let plan = plan_with(n, false);
        let mut s = WorkoutSession::new(&plan);
        s.choose_guided().unwrap();
        assert!(s.begin_guided().unwrap().is_none());
        s
    }

    #[test]
    fn completing_all_exercises_counts_all() {
        for n in 1..=5 {
            let mut s = active_session(n);
            let mut report = None;
            for _ in 0..n {
                report = s.complete_current().unwrap();
            }
            let report = report.expect("last advance finishes the session");
            assert_eq!(s.phase(), SessionPhase::Finished);
            assert_eq!(report.completed_count, n);
            assert_eq!(report.total_count, n);
        }
    }

    #[test]
    fn skipping_all_exercises_counts_none() {
        for n in 1..=5 {
            let mut s = active_session(n);
            let mut report = None;
            for _ in 0..n {
                report = s.skip_current().unwrap();
            }
            let report = report.unwrap();
            assert_eq!(report.completed_count, 0);
            assert_eq!(report.total_count, n);
        }
    }

    #[test]
    fn skipping_the_last_exercise_does_not_count_it() {
        // Uniform rule: only explicit completes enter the report, even at
        // the final index.
        let mut s = active_session(3);
        s.complete_current().unwrap();
        s.complete_current().unwrap();
        let report = s.skip_current().unwrap().unwrap();
        assert_eq!(report.completed_count, 2);
        assert_eq!(report.total_count, 3);
    }

    #[test]
    fn completing_the_last_exercise_counts_it_once() {
        let mut s = active_session(2);
        s.skip_current().unwrap();
        let report = s.complete_current().unwrap().unwrap();
        assert_eq!(report.completed_count, 1);
        assert_eq!(report.total_count, 2);
    }

    #[test]
    fn close_early_reports_current_count() {
        let mut s = active_session(4);
        s.complete_current().unwrap();
        s.skip_current().unwrap();
        s.complete_current().unwrap();
        let report = s.close_early();
        assert_eq!(report.completed_count, 2);
        assert_eq!(report.total_count, 4);
        assert_eq!(s.phase(), SessionPhase::Finished);
        assert!(!s.timer().is_running());
    }

    #[test]
    fn close_early_from_mode_selection_reports_zero() {
        let plan = plan_with(3, false);
        let mut s = WorkoutSession::new(&plan);
        let report = s.close_early();
        assert_eq!(report.completed_count, 0);
        assert_eq!(report.total_count, 3);
    }

    #[test]
    fn empty_plan_finishes_immediately() {
        let plan = plan_with(0, false);
        let mut s = WorkoutSession::new(&plan);
        s.choose_guided().unwrap();
        let report = s.begin_guided().unwrap().expect("finishes right away");
        assert_eq!(s.phase(), SessionPhase::Finished);
        assert_eq!(report.completed_count, 0);
        assert_eq!(report.total_count, 0);
        assert_eq!(report.completion_rate(), 0.0);
    }

    #[test]
    fn video_mode_requires_a_video_reference() {
        let plan = plan_with(2, false);
        let mut s = WorkoutSession::new(&plan);
        assert!(s.choose_video().is_err());

        let plan = plan_with(2, true);
        let mut s = WorkoutSession::new(&plan);
        s.choose_video().unwrap();
        assert_eq!(s.phase(), SessionPhase::Video);
        s.back_to_selection().unwrap();
        assert_eq!(s.phase(), SessionPhase::ModeSelection);
    }

    #[test]
    fn advancing_resets_the_rest_timer() {
        let mut s = active_session(3);
        s.timer_mut().start();
        s.timer_mut().tick();
        s.timer_mut().tick();
        assert_eq!(s.timer().seconds(), EXERCISE_TIMER_SECS - 2);
        s.complete_current().unwrap();
        assert_eq!(s.timer().seconds(), EXERCISE_TIMER_SECS);
        assert!(!s.timer().is_running());
    }

    #[test]
    fn guided_ops_rejected_outside_active_phase() {
        let plan = plan_with(2, false);
        let mut s = WorkoutSession::new(&plan);
        assert!(s.complete_current().is_err());
        assert!(s.skip_current().is_err());
        assert!(s.begin_guided().is_err());
    }

    #[test]
    fn current_exercise_only_in_active_phase() {
        let plan = plan_with(2, false);
        let mut s = WorkoutSession::new(&plan);
        assert!(s.current_exercise().is_none());
        s.choose_guided().unwrap();
        s.begin_guided().unwrap();
        assert_eq!(s.current_exercise().unwrap().name, "Exercício 1");
    }

    #[test]
    fn completion_report_percentage() {
        let r = CompletionReport {
            completed_count: 2,
            total_count: 3,
        };
        assert_eq!(r.percentage(), 67);
        let empty = CompletionReport {
            completed_count: 0,
            total_count: 0,
        };
        assert_eq!(empty.percentage(), 0);
    }

    proptest! {
        /// For any mix of complete/skip decisions, the report counts
        /// exactly the completes.
        #[test]
        fn completed_count_equals_number_of_completes(
            decisions in prop::collection::vec(any::<bool>(), 1..20)
        ) {
            let mut s = active_session(decisions.len());
            let mut report = None;
            for &complete in &decisions {
                report = if complete {
                    s.complete_current().unwrap()
                } else {
                    s.skip_current().unwrap()
                };
            }
            let report = report.unwrap();
            let completes = decisions.iter().filter(|&&d| d).count();
            prop_assert_eq!(report.completed_count, completes);
            prop_assert_eq!(report.total_count, decisions.len());
        }
    }
}
