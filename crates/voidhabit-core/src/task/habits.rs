//! Seeding of the recurring habit tasks derived from profile goals.

use super::{Recurrence, Task, TaskType};
use crate::storage::Profile;

/// Daily habit tasks the profile asks for but the task list is missing.
///
/// A meditation habit is created when the profile has a positive meditation
/// goal and no existing daily task mentions "Meditar"; the reading habit
/// works the same way with "Ler". Callers persist the returned tasks.
pub fn missing_daily_habits(profile: &Profile, existing: &[Task]) -> Vec<Task> {
    let daily: Vec<&Task> = existing.iter().filter(|t| t.is_daily()).collect();
    let has_habit = |kw: &str| daily.iter().any(|t| t.title.contains(kw));

    let mut out = Vec::new();
    if profile.meditation_goal_minutes > 0 && !has_habit("Meditar") {
        out.push(habit(format!(
            "Meditar {} min",
            profile.meditation_goal_minutes
        )));
    }
    if profile.reading_goal_pages > 0 && !has_habit("Ler") {
        out.push(habit(format!("Ler {} páginas", profile.reading_goal_pages)));
    }
    out
}

fn habit(title: String) -> Task {
    let mut t = Task::new(title);
    t.task_type = TaskType::NonNegotiable;
    t.recurrence = Some(Recurrence::Daily);
    t
}
