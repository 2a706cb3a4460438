//! Boundary events emitted as JSON by the CLI.
//!
//! Every user-visible state change produces one of these; callers persist
//! or display them, the core never blocks on the outcome.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workout::SessionPhase;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    WorkoutStarted {
        plan_name: String,
        total_exercises: usize,
        at: DateTime<Utc>,
    },
    ExerciseAdvanced {
        index: usize,
        name: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    WorkoutFinished {
        completed_count: usize,
        total_count: usize,
        at: DateTime<Utc>,
    },
    MeditationStarted {
        goal_secs: u64,
        at: DateTime<Utc>,
    },
    MeditationStopped {
        date: NaiveDate,
        duration_minutes: u32,
        goal_met: bool,
        at: DateTime<Utc>,
    },
    TaskToggled {
        task_id: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    /// Snapshot of an in-flight workout session for `status` output.
    SessionSnapshot {
        phase: SessionPhase,
        exercise_index: usize,
        exercise_name: Option<String>,
        completed_count: usize,
        total_count: usize,
        timer_secs: u64,
        timer_running: bool,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_a_type_tag() {
        let e = Event::TaskToggled {
            task_id: "task-1".into(),
            completed: true,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "task_toggled");
        assert_eq!(json["completed"], true);
    }
}
