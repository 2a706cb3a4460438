//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway home directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command with HOME pointed at `home`; returns (stdout, stderr,
/// exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_voidhabit"))
        .args(args)
        .env("HOME", home)
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn json(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).expect("CLI output should be JSON")
}

#[test]
fn task_add_and_list() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["task", "add", "Estudar Rust"]);
    assert_eq!(code, 0);
    let task = json(&stdout);
    assert_eq!(task["title"], "Estudar Rust");
    assert_eq!(task["type"], "non-negotiable");

    let (stdout, _, code) = run_cli(home.path(), &["task", "list", "--json"]);
    assert_eq!(code, 0);
    let tasks = json(&stdout);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
}

#[test]
fn task_toggle_flips_completed() {
    let home = TempDir::new().unwrap();
    let (stdout, _, _) = run_cli(home.path(), &["task", "add", "Meditar", "--daily"]);
    let id = json(&stdout)["id"].as_str().unwrap().to_string();

    let (stdout, _, code) = run_cli(home.path(), &["task", "toggle", &id]);
    assert_eq!(code, 0);
    let event = json(&stdout);
    assert_eq!(event["type"], "task_toggled");
    assert_eq!(event["completed"], true);

    let (stdout, _, _) = run_cli(home.path(), &["task", "toggle", &id]);
    assert_eq!(json(&stdout)["completed"], false);
}

#[test]
fn daily_task_appears_on_any_date() {
    let home = TempDir::new().unwrap();
    run_cli(home.path(), &["task", "add", "Meditar", "--daily"]);
    run_cli(
        home.path(),
        &["task", "add", "Dentista", "--date", "2026-01-05"],
    );

    let (stdout, _, code) = run_cli(
        home.path(),
        &["task", "list", "--date", "2030-06-01", "--json"],
    );
    assert_eq!(code, 0);
    let tasks = json(&stdout);
    let titles: Vec<_> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Meditar"]);
}

#[test]
fn guided_workout_full_session() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &[
            "workout",
            "save",
            "--name",
            "Treino A",
            "--day",
            "seg",
            "--exercise",
            "Supino:3:10",
            "--exercise",
            "Remada:3:12",
        ],
    );
    assert_eq!(code, 0, "save failed: {stderr}");

    let (stdout, _, code) = run_cli(home.path(), &["workout", "start", "--day", "seg"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("workout_started"));

    let (stdout, _, code) = run_cli(home.path(), &["workout", "done"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("exercise_advanced"));

    // Skipping the last exercise finishes without counting it.
    let (stdout, _, code) = run_cli(home.path(), &["workout", "skip"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("workout_finished"));
    assert!(stdout.contains("\"completed_count\": 1"));
    assert!(stdout.contains("\"total_count\": 2"));

    // Session is gone afterwards.
    let (_, _, code) = run_cli(home.path(), &["workout", "status"]);
    assert_ne!(code, 0);
}

#[test]
fn workout_quit_logs_partial_progress() {
    let home = TempDir::new().unwrap();
    run_cli(
        home.path(),
        &[
            "workout", "save", "--name", "Treino B", "--day", "ter", "--exercise",
            "Agachamento:4:8",
            "--exercise", "Leg press:3:12",
            "--exercise", "Panturrilha:4:15",
        ],
    );
    run_cli(home.path(), &["workout", "start", "--day", "ter"]);
    run_cli(home.path(), &["workout", "done"]);

    let (stdout, _, code) = run_cli(home.path(), &["workout", "quit"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("workout_finished"));
    assert!(stdout.contains("\"completed_count\": 1"));
    assert!(stdout.contains("\"total_count\": 3"));

    // The log feeds the streak.
    let (stdout, _, code) = run_cli(home.path(), &["stats", "streak"]);
    assert_eq!(code, 0);
    let streak = json(&stdout);
    assert_eq!(streak["current"], 1);
}

#[test]
fn workout_start_requires_a_plan() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["workout", "start", "--day", "dom"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no plan stored"));
}

#[test]
fn meditate_stop_logs_a_paused_session() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["meditate", "start"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("meditation_started"));

    let (stdout, _, code) = run_cli(home.path(), &["meditate", "stop"]);
    assert_eq!(code, 0);
    let event = json(&stdout);
    assert_eq!(event["type"], "meditation_stopped");
    assert_eq!(event["goal_met"], false);
}

#[test]
fn meditate_start_with_minutes_does_not_clobber_a_running_session() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["meditate", "start"]);
    assert_eq!(code, 0);

    let (_, stderr, code) = run_cli(home.path(), &["meditate", "start", "--minutes", "5"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already in progress"));

    // The original session is still there.
    let (stdout, _, code) = run_cli(home.path(), &["meditate", "status"]);
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["goal_minutes"], 10);
}

#[test]
fn meditate_with_zero_goal_is_rejected() {
    let home = TempDir::new().unwrap();
    run_cli(
        home.path(),
        &["config", "set", "meditation_goal_minutes", "0"],
    );
    let (_, stderr, code) = run_cli(home.path(), &["meditate", "start"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("goal is zero"));
}

#[test]
fn config_set_and_show_roundtrip() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["config", "set", "training_days_goal", "5"],
    );
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["training_days_goal"], 5);

    let (stdout, _, code) = run_cli(home.path(), &["config", "show"]);
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["training_days_goal"], 5);
}

#[test]
fn config_set_rejects_unknown_keys() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "nope", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("nope"));
}

#[test]
fn book_shelf_lifecycle() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["book", "add", "O Alquimista", "Paulo Coelho"],
    );
    assert_eq!(code, 0);
    let book = json(&stdout);
    assert_eq!(book["status"], "wishlist");
    let id = book["id"].as_str().unwrap().to_string();

    let (stdout, _, code) = run_cli(home.path(), &["book", "set-status", &id, "completed"]);
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["status"], "completed");

    let (stdout, _, code) = run_cli(home.path(), &["stats", "summary"]);
    assert_eq!(code, 0);
    let summary = json(&stdout);
    assert_eq!(summary["books_total"], 1);
    assert_eq!(summary["books_completed"], 1);
}

#[test]
fn ensure_habits_seeds_profile_goals() {
    let home = TempDir::new().unwrap();
    run_cli(
        home.path(),
        &["config", "set", "reading_goal_pages", "20"],
    );
    let (stdout, _, code) = run_cli(home.path(), &["task", "ensure-habits"]);
    assert_eq!(code, 0);
    let habits = json(&stdout);
    let titles: Vec<_> = habits
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();
    assert!(titles.contains(&"Meditar 10 min".to_string()));
    assert!(titles.contains(&"Ler 20 páginas".to_string()));

    // Idempotent: running again seeds nothing new.
    let (stdout, _, _) = run_cli(home.path(), &["task", "ensure-habits"]);
    assert!(json(&stdout).as_array().unwrap().is_empty());
}
