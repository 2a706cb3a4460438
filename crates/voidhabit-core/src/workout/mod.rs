mod plan;
mod session;

pub use plan::{
    current_month, plan_for_day, plans_locked, Exercise, WorkoutForm, WorkoutPlan,
};
pub use session::{
    CompletionReport, SessionPhase, WorkoutSession, EXERCISE_TIMER_SECS,
};
