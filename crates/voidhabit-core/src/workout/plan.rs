//! Workout plans and the monthly edit lock.
//!
//! A plan is a named, ordered exercise list bound to a day of the week.
//! Once the user has created as many plans as their weekly training-days
//! goal and edited any of them in the current calendar month, further edits
//! are locked until the month rolls over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One exercise within a plan. Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Number of sets, at least 1.
    pub sets: u32,
    /// Free-form rep prescription, e.g. "10" or "8-12".
    pub reps: String,
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: u32, reps: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: sets.max(1),
            reps: reps.into(),
        }
    }
}

/// A stored workout plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: String,
    pub name: String,
    /// Day-of-week id the plan is assigned to (e.g. "seg", "ter").
    pub day_of_week: String,
    pub exercises: Vec<Exercise>,
    pub video_url: Option<String>,
    pub last_edited_at: DateTime<Utc>,
    /// `YYYY-MM` of the last edit; drives the monthly lock window.
    pub last_edited_month: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WorkoutPlan {
    pub fn new(form: WorkoutForm) -> Self {
        let now = Utc::now();
        Self {
            id: format!("plan-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            name: form.name,
            day_of_week: form.day_of_week,
            exercises: form.exercises,
            video_url: form.video_url,
            last_edited_at: now,
            last_edited_month: Some(current_month(now)),
            created_at: now,
        }
    }

    /// Apply an edit, stamping the current month into the lock window.
    pub fn apply_edit(&mut self, form: WorkoutForm) {
        let now = Utc::now();
        self.name = form.name;
        self.day_of_week = form.day_of_week;
        self.exercises = form.exercises;
        self.video_url = form.video_url;
        self.last_edited_at = now;
        self.last_edited_month = Some(current_month(now));
    }
}

/// User input for creating or editing a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutForm {
    pub name: String,
    pub day_of_week: String,
    pub video_url: Option<String>,
    pub exercises: Vec<Exercise>,
}

impl WorkoutForm {
    /// A plan needs a name, a day, and at least one named exercise.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "plan name must not be empty".into(),
            });
        }
        if self.day_of_week.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "day_of_week".into(),
                message: "day of week must not be empty".into(),
            });
        }
        match self.exercises.first() {
            None => Err(ValidationError::EmptyCollection("exercises".into())),
            Some(first) if first.name.trim().is_empty() => {
                Err(ValidationError::InvalidValue {
                    field: "exercises".into(),
                    message: "first exercise must have a name".into(),
                })
            }
            Some(_) => Ok(()),
        }
    }
}

/// Format a timestamp as the `YYYY-MM` lock month.
pub fn current_month(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

/// Monthly lock window: editing is locked once the plan count has reached
/// the training-days goal and any plan was already edited this month.
pub fn plans_locked(plans: &[WorkoutPlan], training_days_goal: u32, month: &str) -> bool {
    if training_days_goal == 0 || plans.len() < training_days_goal as usize {
        return false;
    }
    plans
        .iter()
        .any(|p| p.last_edited_month.as_deref() == Some(month))
}

/// Find the plan assigned to a given day-of-week id.
pub fn plan_for_day<'a>(plans: &'a [WorkoutPlan], day: &str) -> Option<&'a WorkoutPlan> {
    plans.iter().find(|p| p.day_of_week == day)
}
