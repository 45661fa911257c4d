//! Integration tests for the fitlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Logging each entry type
//! - Profile and BMI reporting
//! - Dashboard, progress and nutrition views
//! - Export and clear operations
//! - Reading and writing settings

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fitlog"))
}

fn read_json(path: &Path) -> serde_json::Value {
    let contents = fs::read_to_string(path).expect("Failed to read JSON file");
    serde_json::from_str(&contents).expect("Invalid JSON")
}

fn log_workout(data_dir: &Path, date: &str, minutes: &str, extra: &[&str]) {
    cli()
        .args(["log", "workout", "--date", date, "--time", "07:00"])
        .args(["--minutes", minutes])
        .args(extra)
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personal fitness tracker for workouts, lifts and nutrition",
        ));
}

#[test]
fn test_log_strength_workout() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["log", "workout", "--date", "2024-01-15", "--time", "18:30"])
        .args(["--minutes", "45", "--category", "strength", "--intensity", "high"])
        .args(["--muscle", "chest=20", "--muscle", "triceps=15"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout logged! 45 minutes of Strength"));

    let workouts = read_json(&data_dir.join("workouts.json"));
    let workout = &workouts[0];
    assert_eq!(workout["date"], "2024-01-15");
    assert_eq!(workout["time"], "18:30:00");
    assert_eq!(workout["category"], "Strength");
    assert_eq!(workout["intensity"], "High");
    assert_eq!(workout["muscles"]["Chest"], 20);
    assert_eq!(workout["muscles"]["Triceps"], 15);
}

#[test]
fn test_muscle_minutes_exceeding_duration_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["log", "workout", "--minutes", "30", "--category", "Strength"])
        .args(["--muscle", "legs=25", "--muscle", "abs=10"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceed"));

    assert!(!data_dir.join("workouts.json").exists());
}

#[test]
fn test_cardio_map_on_strength_rejected() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["log", "workout", "--category", "Strength", "--cardio", "cycling=10"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cardio minutes only apply"));
}

#[test]
fn test_log_strength_entry_and_history() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for (date, weight) in [("2024-01-03", "60"), ("2024-01-10", "62.5")] {
        cli()
            .args(["log", "strength", "--exercise", "Bench Press"])
            .args(["--muscle-group", "chest", "--weight", weight])
            .args(["--reps", "8", "--sets", "3", "--rpe", "8", "--date", date])
            .arg("--data-dir")
            .arg(data_dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Strength log saved: Bench Press"));
    }

    let logs = read_json(&data_dir.join("strength_logs.json"));
    assert_eq!(logs.as_array().unwrap().len(), 2);
    assert_eq!(logs[1]["weight"], 62.5);
    assert_eq!(logs[1]["muscle_group"], "Chest");

    cli()
        .args(["strength", "--muscle-group", "Chest", "--exercise", "bench press"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press"))
        .stdout(predicate::str::contains("62.5 kg"))
        .stdout(predicate::str::contains("bench press progress"));
}

#[test]
fn test_strength_rpe_out_of_range() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["log", "strength", "--exercise", "Squat", "--muscle-group", "legs"])
        .args(["--rpe", "11"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("RPE must be 1-10"));
}

#[test]
fn test_unknown_muscle_group() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["log", "strength", "--exercise", "Curl", "--muscle-group", "forearms"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown muscle group"));
}

#[test]
fn test_log_meal_and_nutrition_report() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["log", "meal", "--meal-type", "lunch", "--food", "Chicken Rice"])
        .args(["--calories", "650", "--protein", "50", "--carbs", "100", "--fats", "20"])
        .args(["--date", "2024-02-01"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Meal logged: Chicken Rice (650 kcal)"));

    cli()
        .args(["profile", "set", "--height", "170", "--weight", "70", "--age", "30"])
        .args(["--goal", "weight loss", "--daily-goal", "2000"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args(["nutrition", "--date", "2024-02-01"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Calories: 650 kcal"))
        .stdout(predicate::str::contains("(200 kcal)"))
        .stdout(predicate::str::contains("(400 kcal)"))
        .stdout(predicate::str::contains("(180 kcal)"))
        .stdout(predicate::str::contains("1350 kcal remaining"));
}

#[test]
fn test_meal_calories_out_of_range() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["log", "meal", "--meal-type", "Dinner", "--food", "Feast"])
        .args(["--calories", "6000"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("calorie intake"));
}

#[test]
fn test_profile_set_and_show() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["profile", "set", "--height", "160", "--weight", "90", "--age", "40"])
        .args(["--goal", "Endurance"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI: 35.16 (Obese)"));

    let profile = read_json(&data_dir.join("user_data.json"));
    assert_eq!(profile["goal"], "Endurance");
    assert_eq!(profile["daily_goal_cal"], 2000);

    cli()
        .args(["profile", "show"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Endurance"))
        .stdout(predicate::str::contains("Obese"));
}

#[test]
fn test_profile_show_without_profile() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["profile", "show"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No profile saved yet"));
}

#[test]
fn test_dashboard_summary() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    log_workout(data_dir, "2024-01-31", "30", &["--category", "Sports"]);
    log_workout(data_dir, "2024-01-31", "20", &["--category", "Flexibility"]);
    log_workout(data_dir, "2024-01-29", "60", &["--category", "Cardio"]);

    cli()
        .args(["dashboard", "--date", "2024-01-31"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workouts:        2 sessions"))
        .stdout(predicate::str::contains("Minutes trained: 50 min"))
        .stdout(predicate::str::contains("BMI:             No data"))
        .stdout(predicate::str::contains("Recent workouts"));
}

#[test]
fn test_default_command_is_dashboard() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("FITNESS DASHBOARD"))
        .stdout(predicate::str::contains("No workouts logged yet"));
}

#[test]
fn test_progress_report() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    log_workout(
        data_dir,
        "2024-01-30",
        "40",
        &["--category", "Strength", "--muscle", "back=25"],
    );
    log_workout(data_dir, "2024-01-24", "30", &["--category", "Sports"]);

    cli()
        .args(["progress", "--date", "2024-01-31"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01"))
        .stdout(predicate::str::contains("Jan 29 - Feb 04"))
        .stdout(predicate::str::contains("Back"))
        .stdout(predicate::str::contains("Weekly report"));
}

#[test]
fn test_export_writes_dated_document() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    let out_dir = temp_dir.path().join("out");

    log_workout(&data_dir, "2024-01-31", "30", &["--category", "Sports"]);

    cli()
        .arg("export")
        .arg("--out")
        .arg(&out_dir)
        .arg("--csv")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported all data"));

    let exports: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();

    let json_name = exports
        .iter()
        .find(|n| n.starts_with("fitness_data_") && n.ends_with(".json"))
        .expect("JSON export missing");
    assert_eq!(json_name.len(), "fitness_data_YYYYMMDD.json".len());
    assert!(exports.iter().any(|n| n.starts_with("workouts_") && n.ends_with(".csv")));

    let document = read_json(&out_dir.join(json_name));
    assert_eq!(document["workouts"].as_array().unwrap().len(), 1);
    assert!(document["strength_logs"].as_array().unwrap().is_empty());
    assert!(document["calories"].as_array().unwrap().is_empty());
    assert_eq!(document["user_data"], serde_json::json!({}));
}

#[test]
fn test_clear_collection() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    log_workout(data_dir, "2024-01-31", "30", &["--category", "Sports"]);
    cli()
        .args(["log", "meal", "--meal-type", "Snack", "--food", "Apple"])
        .args(["--calories", "95"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args(["clear", "workouts"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("All workouts data cleared"));

    let workouts = read_json(&data_dir.join("workouts.json"));
    assert!(workouts.as_array().unwrap().is_empty());
    let calories = read_json(&data_dir.join("calories.json"));
    assert_eq!(calories.as_array().unwrap().len(), 1);
}

#[test]
fn test_clear_unknown_collection() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["clear", "everything"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown collection"));
}

#[test]
fn test_entries_accumulate_across_runs() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for day in ["2024-01-01", "2024-01-03", "2024-01-02", "2024-01-05", "2024-01-04"] {
        log_workout(data_dir, day, "25", &["--category", "Flexibility"]);
    }

    let workouts = read_json(&data_dir.join("workouts.json"));
    let dates: Vec<&str> = workouts
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["date"].as_str().unwrap())
        .collect();

    // Insertion order is preserved on disk
    assert_eq!(
        dates,
        vec!["2024-01-01", "2024-01-03", "2024-01-02", "2024-01-05", "2024-01-04"]
    );
}

#[test]
fn test_config_set_and_show() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("settings").join("config.toml");
    let data_dir = temp_dir.path().join("tracked");

    cli()
        .args(["config", "set", "--weeks-back", "2", "--recent-limit", "3"])
        .arg("--default-data-dir")
        .arg(&data_dir)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    let contents = fs::read_to_string(&config_path).expect("config written");
    assert!(contents.contains("weeks_back = 2"));
    assert!(contents.contains("recent_limit = 3"));

    cli()
        .args(["config", "show"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("weeks_back:   2"))
        .stdout(predicate::str::contains("meal_limit:   10"))
        .stdout(predicate::str::contains(data_dir.display().to_string()));
}

#[test]
fn test_config_weeks_back_controls_progress_report() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    let data_dir = temp_dir.path().join("data");

    cli()
        .args(["config", "set", "--weeks-back", "2"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    cli()
        .args(["progress", "--date", "2024-01-31"])
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan 29 - Feb 04"))
        .stdout(predicate::str::contains("Jan 22 - Jan 28"))
        .stdout(predicate::str::contains("Jan 15 - Jan 21").not());
}

#[test]
fn test_config_rejects_out_of_range_weeks() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");

    cli()
        .args(["config", "set", "--weeks-back", "0"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("weeks_back must be 1-520"));

    assert!(!config_path.exists());
}
