//! # Voidhabit Core Library
//!
//! Core business logic for voidhabit, a personal habit tracker covering
//! workouts, meditation, reading and a daily routine. All operations are
//! available through the standalone CLI binary; any GUI would be a thin
//! layer over this same library.
//!
//! ## Architecture
//!
//! - **Timer**: a second-granularity tick engine with countdown and
//!   elapsed modes; the caller invokes `tick()` once per second
//! - **Sessions**: the guided workout and meditation state machines that
//!   embed a timer and end in a completion report
//! - **Tasks**: the routine/dashboard task model with pure date filtering
//!   and life-pillar inference
//! - **Storage**: SQLite for tasks, books, plans and logs; TOML for the
//!   user profile
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: shared countdown/elapsed tick engine
//! - [`WorkoutSession`]: mode selection, guided exercise loop, completion
//! - [`MeditationSession`]: goal-driven elapsed session with auto-stop
//! - [`Database`]: local persistence
//! - [`Profile`]: user goals and preferences

pub mod books;
pub mod error;
pub mod events;
pub mod meditation;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;
pub mod workout;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use meditation::{MeditationReport, MeditationSession, GOAL_MET_THRESHOLD_PCT};
pub use storage::{Database, Profile};
pub use task::{infer_pillar, tasks_for_date, Pillar, Task, TaskStatus, TaskType};
pub use timer::{TimerEngine, TimerMode, TimerState};
pub use workout::{
    CompletionReport, SessionPhase, WorkoutPlan, WorkoutSession, EXERCISE_TIMER_SECS,
};
