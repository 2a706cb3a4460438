mod streak;

pub use streak::{compute_streaks, StreakStats};
