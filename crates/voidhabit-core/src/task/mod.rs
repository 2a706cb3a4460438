//! Task model shared by the dashboard and routine views.

mod filter;
mod habits;
mod pillar;

pub use filter::{partition_by_type, routine_tasks_for_date, tasks_for_date};
pub use habits::missing_daily_habits;
pub use pillar::{infer_pillar, Pillar};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// How a task behaves on the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    /// Stays on the list until explicitly completed or deleted.
    #[serde(rename = "non-negotiable")]
    NonNegotiable,
    /// Disappears from the visible list once marked complete.
    #[serde(rename = "optional")]
    Optional,
}

impl Default for TaskType {
    fn default() -> Self {
        TaskType::NonNegotiable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Recurrence pattern. Only daily recurrence exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    /// Time-of-day hint, display only.
    pub due_time: Option<NaiveTime>,
    pub recurrence: Option<Recurrence>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("task-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            task_type: TaskType::NonNegotiable,
            status: TaskStatus::Pending,
            due_date: None,
            due_time: None,
            recurrence: None,
            created_at: now,
        }
    }

    pub fn is_daily(&self) -> bool {
        self.recurrence == Some(Recurrence::Daily)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Flip between pending and completed; returns the new completed state.
    pub fn toggle(&mut self) -> bool {
        self.status = match self.status {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        };
        self.is_completed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults() {
        let t = Task::new("Ler 20 páginas");
        assert_eq!(t.task_type, TaskType::NonNegotiable);
        assert_eq!(t.status, TaskStatus::Pending);
        assert!(!t.is_daily());
        assert!(t.id.starts_with("task-"));
    }

    #[test]
    fn toggle_flips_status() {
        let mut t = Task::new("Meditar");
        assert!(t.toggle());
        assert!(t.is_completed());
        assert!(!t.toggle());
        assert_eq!(t.status, TaskStatus::Pending);
    }

    #[test]
    fn task_type_serde_names() {
        let json = serde_json::to_string(&TaskType::NonNegotiable).unwrap();
        assert_eq!(json, "\"non-negotiable\"");
        let back: TaskType = serde_json::from_str("\"optional\"").unwrap();
        assert_eq!(back, TaskType::Optional);
    }

    #[test]
    fn task_roundtrip() {
        let mut t = Task::new("Estudar");
        t.task_type = TaskType::Optional;
        t.due_date = "2026-02-16".parse().ok();
        t.due_time = "07:30:00".parse().ok();
        t.recurrence = Some(Recurrence::Daily);

        let json = serde_json::to_string(&t).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, "Estudar");
        assert_eq!(back.task_type, TaskType::Optional);
        assert!(back.is_daily());
        assert_eq!(back.due_date, t.due_date);
    }
}
