mod engine;

pub use engine::{format_mmss, TimerEngine, TimerMode, TimerState};
