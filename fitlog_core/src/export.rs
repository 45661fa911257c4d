//! Export and reset utilities.
//!
//! The JSON export bundles every collection into one document; the CSV
//! export writes a single collection as a flat table.

use crate::store::write_atomic;
use crate::{
    CalorieEntry, CollectionKind, Error, RecordStore, Result, Snapshot, StrengthLogEntry,
    UserProfile, WorkoutEntry, WorkoutKind,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Serialize the whole snapshot as a pretty-printed JSON document
///
/// Top-level keys: `workouts`, `strength_logs`, `calories`, `user_data`.
pub fn export_all(snapshot: &Snapshot<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// `fitness_data_YYYYMMDD.json` for the day the export is taken
pub fn export_file_name(date: NaiveDate) -> String {
    format!("fitness_data_{}.json", date.format("%Y%m%d"))
}

/// Write the JSON export into `dir`, returning the file's path
pub fn write_export(snapshot: &Snapshot<'_>, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let document = export_all(snapshot)?;
    let path = dir.join(export_file_name(date));

    write_atomic(&path, document.as_bytes()).map_err(|source| Error::StorageWrite {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Exported all data to {:?}", path);
    Ok(path)
}

/// Empty one collection in the store and persist the change
pub fn clear_collection(store: &mut RecordStore, kind: CollectionKind) -> Result<()> {
    store.clear(kind)
}

/// A row in the workouts table
#[derive(Debug, serde::Serialize)]
struct WorkoutRow {
    date: String,
    time: String,
    minutes: u32,
    intensity: String,
    category: String,
    breakdown: String,
    notes: String,
}

/// `Chest:20;Triceps:10`, skipping zero entries
fn format_breakdown<K: Display>(map: &BTreeMap<K, u32>) -> String {
    map.iter()
        .filter(|(_, minutes)| **minutes > 0)
        .map(|(name, minutes)| format!("{}:{}", name, minutes))
        .collect::<Vec<_>>()
        .join(";")
}

impl From<&WorkoutEntry> for WorkoutRow {
    fn from(workout: &WorkoutEntry) -> Self {
        let breakdown = match &workout.kind {
            WorkoutKind::Strength { muscles } => format_breakdown(muscles),
            WorkoutKind::Cardio { cardio } => format_breakdown(cardio),
            WorkoutKind::Flexibility | WorkoutKind::Sports => String::new(),
        };

        WorkoutRow {
            date: workout.date.to_string(),
            time: workout.time.format("%H:%M:%S").to_string(),
            minutes: workout.minutes,
            intensity: workout.intensity.to_string(),
            category: workout.category().to_string(),
            breakdown,
            notes: workout.notes.clone(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct StrengthRow {
    date: String,
    exercise: String,
    muscle_group: String,
    weight: f64,
    reps: u32,
    sets: u32,
    rpe: u8,
    volume: f64,
    notes: String,
}

impl From<&StrengthLogEntry> for StrengthRow {
    fn from(entry: &StrengthLogEntry) -> Self {
        StrengthRow {
            date: entry.date.to_string(),
            exercise: entry.exercise.clone(),
            muscle_group: entry.muscle_group.to_string(),
            weight: entry.weight,
            reps: entry.reps,
            sets: entry.sets,
            rpe: entry.rpe,
            volume: entry.volume(),
            notes: entry.notes.clone(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct CalorieRow {
    date: String,
    meal_type: String,
    food: String,
    intake: u32,
    protein: f64,
    carbs: f64,
    fats: f64,
    notes: String,
}

impl From<&CalorieEntry> for CalorieRow {
    fn from(entry: &CalorieEntry) -> Self {
        CalorieRow {
            date: entry.date.to_string(),
            meal_type: entry.meal_type.to_string(),
            food: entry.food.clone(),
            intake: entry.intake,
            protein: entry.protein,
            carbs: entry.carbs,
            fats: entry.fats,
            notes: entry.notes.clone(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct ProfileRow {
    height: f64,
    weight: f64,
    age: u32,
    goal: String,
    daily_goal_cal: u32,
    bmi: f64,
}

impl From<&UserProfile> for ProfileRow {
    fn from(profile: &UserProfile) -> Self {
        ProfileRow {
            height: profile.height,
            weight: profile.weight,
            age: profile.age,
            goal: profile.goal.to_string(),
            daily_goal_cal: profile.daily_goal_cal,
            bmi: profile.bmi,
        }
    }
}

fn serialize_rows<R, I>(rows: I) -> Result<Vec<u8>>
where
    R: serde::Serialize,
    I: IntoIterator<Item = R>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))
}

/// Write one collection to `path` as a CSV table with headers
///
/// Returns the number of data rows written. An empty collection produces
/// an empty file.
pub fn export_csv(snapshot: &Snapshot<'_>, kind: CollectionKind, path: &Path) -> Result<usize> {
    let (bytes, count) = match kind {
        CollectionKind::Workouts => (
            serialize_rows(snapshot.workouts.iter().map(WorkoutRow::from))?,
            snapshot.workouts.len(),
        ),
        CollectionKind::StrengthLogs => (
            serialize_rows(snapshot.strength_logs.iter().map(StrengthRow::from))?,
            snapshot.strength_logs.len(),
        ),
        CollectionKind::Calories => (
            serialize_rows(snapshot.calories.iter().map(CalorieRow::from))?,
            snapshot.calories.len(),
        ),
        CollectionKind::Profile => (
            serialize_rows(snapshot.profile.into_iter().map(ProfileRow::from))?,
            usize::from(snapshot.profile.is_some()),
        ),
    };

    write_atomic(path, &bytes).map_err(|source| Error::StorageWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} {} rows to {:?}", count, kind, path);
    Ok(count)
}

/// Default CSV file name for a collection, e.g. `workouts_20240131.csv`
pub fn csv_file_name(kind: CollectionKind, date: NaiveDate) -> String {
    let stem = kind.file_name().trim_end_matches(".json");
    format!("{}_{}.csv", stem, date.format("%Y%m%d"))
}
