//! Pure task-list materialization for a reference date.
//!
//! The same predicate backs the dashboard "today" list and the routine
//! calendar annotation, so both views always agree on what belongs to a
//! given day.

use chrono::NaiveDate;

use super::{Task, TaskType};

/// Synthetic rows the workout scheduler writes into the task table; the
/// routine view hides them.
const HIDDEN_TITLES: [&str; 2] = ["Treino do Dia", "Dia de Descanso (Rest Day)"];

/// Tasks that belong to `date`: every daily-recurring task plus tasks
/// explicitly due that day, in the collection's original order.
pub fn tasks_for_date<'a>(tasks: &'a [Task], date: NaiveDate) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.is_daily() || t.due_date == Some(date))
        .collect()
}

/// The routine view's variant of [`tasks_for_date`]: same predicate, minus
/// the synthetic workout rows.
pub fn routine_tasks_for_date<'a>(tasks: &'a [Task], date: NaiveDate) -> Vec<&'a Task> {
    tasks_for_date(tasks, date)
        .into_iter()
        .filter(|t| !HIDDEN_TITLES.contains(&t.title.as_str()))
        .collect()
}

/// Split a visible list into non-negotiable tasks and still-pending
/// optional tasks (completed optional tasks disappear).
pub fn partition_by_type<'a>(tasks: &[&'a Task]) -> (Vec<&'a Task>, Vec<&'a Task>) {
    let non_negotiable = tasks
        .iter()
        .copied()
        .filter(|t| t.task_type == TaskType::NonNegotiable)
        .collect();
    let optional = tasks
        .iter()
        .copied()
        .filter(|t| t.task_type == TaskType::Optional && !t.is_completed())
        .collect();
    (non_negotiable, optional)
}
