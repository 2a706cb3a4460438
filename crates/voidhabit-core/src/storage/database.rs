//! SQLite-backed local store.
//!
//! Holds the tables the hosted backend owned in the original client:
//! tasks, books, workout_plans, workout_logs, meditation_logs, plus a
//! key-value table used to persist in-flight session state between CLI
//! invocations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::data_dir;
use crate::books::{Book, BookStatus};
use crate::error::{DatabaseError, Result};
use crate::meditation::MeditationReport;
use crate::task::{Recurrence, Task, TaskStatus, TaskType};
use crate::workout::{CompletionReport, WorkoutPlan};

/// One row of the workout log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLogRecord {
    pub id: i64,
    pub plan_id: String,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    pub notes: String,
}

/// One row of the meditation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeditationLogRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    pub goal_met: bool,
    pub is_focus_mode: bool,
    pub notes: String,
}

/// SQLite database at `~/.config/voidhabit/voidhabit.db`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (and migrate) the default database.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("voidhabit.db");
        Self::open_at(&path)
    }

    /// Open (and migrate) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// In-memory database for unit tests.
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id                 TEXT PRIMARY KEY,
                    title              TEXT NOT NULL,
                    type               TEXT NOT NULL,
                    status             TEXT NOT NULL DEFAULT 'pending',
                    due_date           TEXT,
                    due_time           TEXT,
                    recurrence_pattern TEXT,
                    created_at         TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS books (
                    id             TEXT PRIMARY KEY,
                    title          TEXT NOT NULL,
                    author         TEXT NOT NULL,
                    status         TEXT NOT NULL,
                    start_date     TEXT,
                    finish_date    TEXT,
                    color_gradient TEXT NOT NULL DEFAULT '',
                    created_at     TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS workout_plans (
                    id                TEXT PRIMARY KEY,
                    name              TEXT NOT NULL,
                    day_of_week       TEXT NOT NULL,
                    exercises         TEXT NOT NULL,
                    video_url         TEXT,
                    last_edited_at    TEXT NOT NULL,
                    last_edited_month TEXT,
                    created_at        TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS workout_logs (
                    id               INTEGER PRIMARY KEY AUTOINCREMENT,
                    plan_id          TEXT NOT NULL,
                    date             TEXT NOT NULL,
                    duration_minutes INTEGER NOT NULL,
                    notes            TEXT NOT NULL DEFAULT ''
                );

                CREATE TABLE IF NOT EXISTS meditation_logs (
                    id               INTEGER PRIMARY KEY AUTOINCREMENT,
                    date             TEXT NOT NULL,
                    duration_minutes INTEGER NOT NULL,
                    goal_met         INTEGER NOT NULL,
                    is_focus_mode    INTEGER NOT NULL,
                    notes            TEXT NOT NULL DEFAULT ''
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at);
                CREATE INDEX IF NOT EXISTS idx_workout_logs_date ON workout_logs(date);
                CREATE INDEX IF NOT EXISTS idx_meditation_logs_date ON meditation_logs(date);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn insert_task(&self, task: &Task) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO tasks (id, title, type, status, due_date, due_time, recurrence_pattern, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.id,
                task.title,
                type_str(task.task_type),
                status_str(task.status),
                task.due_date.map(|d| d.to_string()),
                task.due_time.map(|t| t.format("%H:%M:%S").to_string()),
                task.recurrence.map(|_| "daily"),
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All tasks in creation order, the order the filter functions
    /// preserve.
    pub fn list_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, type, status, due_date, due_time, recurrence_pattern, created_at
             FROM tasks ORDER BY created_at ASC, id ASC",
        )?;
        let rows = stmt.query_map([], task_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn get_task(&self, id: &str) -> Result<Task, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, title, type, status, due_date, due_time, recurrence_pattern, created_at
                 FROM tasks WHERE id = ?1",
                params![id],
                task_from_row,
            )
            .optional()?
            .ok_or_else(|| DatabaseError::NotFound {
                entity: "task".into(),
                id: id.into(),
            })
    }

    /// Persist a toggle. Returns the new completed state.
    pub fn set_task_status(&self, id: &str, completed: bool) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2",
            params![if completed { "completed" } else { "pending" }, id],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "task".into(),
                id: id.into(),
            });
        }
        Ok(())
    }

    pub fn delete_task(&self, id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Books ────────────────────────────────────────────────────────

    pub fn insert_book(&self, book: &Book) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO books (id, title, author, status, start_date, finish_date, color_gradient, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                book.id,
                book.title,
                book.author,
                book.status.to_string(),
                book.start_date.map(|d| d.to_string()),
                book.finish_date.map(|d| d.to_string()),
                book.color_gradient,
                book.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Newest first, mirroring the bookshelf view.
    pub fn list_books(&self) -> Result<Vec<Book>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, author, status, start_date, finish_date, color_gradient, created_at
             FROM books ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Book {
                id: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                status: parse_book_status(&row.get::<_, String>(3)?),
                start_date: parse_date(row.get::<_, Option<String>>(4)?),
                finish_date: parse_date(row.get::<_, Option<String>>(5)?),
                color_gradient: row.get(6)?,
                created_at: parse_ts(&row.get::<_, String>(7)?),
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn set_book_status(
        &self,
        id: &str,
        status: BookStatus,
        finish_date: Option<NaiveDate>,
    ) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE books SET status = ?1, finish_date = ?2 WHERE id = ?3",
            params![status.to_string(), finish_date.map(|d| d.to_string()), id],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "book".into(),
                id: id.into(),
            });
        }
        Ok(())
    }

    pub fn delete_book(&self, id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Workout plans ────────────────────────────────────────────────

    /// Insert or overwrite a plan (the exercise list is stored as JSON, as
    /// the original schema did).
    pub fn save_plan(&self, plan: &WorkoutPlan) -> Result<()> {
        let exercises = serde_json::to_string(&plan.exercises)?;
        self.conn.execute(
            "INSERT INTO workout_plans
                 (id, name, day_of_week, exercises, video_url, last_edited_at, last_edited_month, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 day_of_week = excluded.day_of_week,
                 exercises = excluded.exercises,
                 video_url = excluded.video_url,
                 last_edited_at = excluded.last_edited_at,
                 last_edited_month = excluded.last_edited_month",
            params![
                plan.id,
                plan.name,
                plan.day_of_week,
                exercises,
                plan.video_url,
                plan.last_edited_at.to_rfc3339(),
                plan.last_edited_month,
                plan.created_at.to_rfc3339(),
            ],
        ).map_err(DatabaseError::from)?;
        Ok(())
    }

    pub fn list_plans(&self) -> Result<Vec<WorkoutPlan>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, day_of_week, exercises, video_url, last_edited_at, last_edited_month, created_at
                 FROM workout_plans ORDER BY created_at ASC",
            )
            .map_err(DatabaseError::from)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, Option<String>>(6)?,
                    row.get::<_, String>(7)?,
                ))
            })
            .map_err(DatabaseError::from)?;

        let mut plans = Vec::new();
        for row in rows {
            let (id, name, day_of_week, exercises, video_url, edited_at, edited_month, created_at) =
                row.map_err(DatabaseError::from)?;
            plans.push(WorkoutPlan {
                id,
                name,
                day_of_week,
                exercises: serde_json::from_str(&exercises)?,
                video_url,
                last_edited_at: parse_ts(&edited_at),
                last_edited_month: edited_month,
                created_at: parse_ts(&created_at),
            });
        }
        Ok(plans)
    }

    pub fn delete_plan(&self, id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM workout_plans WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Logs ─────────────────────────────────────────────────────────

    /// Record a finished workout session. Best-effort from the session's
    /// point of view: the session has already transitioned when this runs.
    pub fn record_workout(
        &self,
        plan_id: &str,
        date: NaiveDate,
        duration_minutes: u32,
        report: &CompletionReport,
    ) -> Result<i64, DatabaseError> {
        let notes = format!(
            "Completou {}/{} exercícios ({}%)",
            report.completed_count,
            report.total_count,
            report.percentage()
        );
        self.conn.execute(
            "INSERT INTO workout_logs (plan_id, date, duration_minutes, notes)
             VALUES (?1, ?2, ?3, ?4)",
            params![plan_id, date.to_string(), duration_minutes, notes],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn record_meditation(&self, report: &MeditationReport) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO meditation_logs (date, duration_minutes, goal_met, is_focus_mode, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                report.date.to_string(),
                report.duration_minutes,
                report.goal_met,
                report.focus_mode,
                report.note,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_workout_logs(&self) -> Result<Vec<WorkoutLogRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, plan_id, date, duration_minutes, notes
             FROM workout_logs ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(WorkoutLogRecord {
                id: row.get(0)?,
                plan_id: row.get(1)?,
                date: parse_date(Some(row.get::<_, String>(2)?)).unwrap_or_default(),
                duration_minutes: row.get(3)?,
                notes: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn list_meditation_logs(&self) -> Result<Vec<MeditationLogRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, duration_minutes, goal_met, is_focus_mode, notes
             FROM meditation_logs ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(MeditationLogRecord {
                id: row.get(0)?,
                date: parse_date(Some(row.get::<_, String>(1)?)).unwrap_or_default(),
                duration_minutes: row.get(2)?,
                goal_met: row.get(3)?,
                is_focus_mode: row.get(4)?,
                notes: row.get(5)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Union of workout and meditation log dates, for streak computation.
    pub fn activity_dates(&self) -> Result<Vec<NaiveDate>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT date FROM workout_logs UNION SELECT date FROM meditation_logs",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut dates = Vec::new();
        for row in rows {
            if let Some(d) = parse_date(Some(row?)) {
                dates.push(d);
            }
        }
        Ok(dates)
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        task_type: parse_type(&row.get::<_, String>(2)?),
        status: parse_status(&row.get::<_, String>(3)?),
        due_date: parse_date(row.get::<_, Option<String>>(4)?),
        due_time: parse_time(row.get::<_, Option<String>>(5)?),
        recurrence: row
            .get::<_, Option<String>>(6)?
            .filter(|p| p == "daily")
            .map(|_| Recurrence::Daily),
        created_at: parse_ts(&row.get::<_, String>(7)?),
    })
}

fn type_str(t: TaskType) -> &'static str {
    match t {
        TaskType::NonNegotiable => "non-negotiable",
        TaskType::Optional => "optional",
    }
}

fn parse_type(s: &str) -> TaskType {
    match s {
        "optional" => TaskType::Optional,
        _ => TaskType::NonNegotiable,
    }
}

fn status_str(s: TaskStatus) -> &'static str {
    match s {
        TaskStatus::Pending => "pending",
        TaskStatus::Completed => "completed",
    }
}

fn parse_status(s: &str) -> TaskStatus {
    match s {
        "completed" => TaskStatus::Completed,
        _ => TaskStatus::Pending,
    }
}

fn parse_book_status(s: &str) -> BookStatus {
    match s {
        "reading" => BookStatus::Reading,
        "completed" => BookStatus::Completed,
        _ => BookStatus::Wishlist,
    }
}

fn parse_date(s: Option<String>) -> Option<NaiveDate> {
    s.and_then(|s| s.parse().ok())
}

fn parse_time(s: Option<String>) -> Option<NaiveTime> {
    s.and_then(|s| NaiveTime::parse_from_str(&s, "%H:%M:%S").ok())
}

fn parse_ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
