//! Core domain types for fitlog.
//!
//! This module defines the records kept by the store:
//! - Workouts, with per-category detail
//! - Strength-training log entries
//! - Calorie/nutrition entries
//! - The singleton user profile
//!
//! Serialized field names and enum values match the on-disk JSON files.

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Lowercase and drop separators so "weight_loss", "Weight Loss" and
/// "weightloss" all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Vocabulary Enums
// ============================================================================

/// Perceived intensity of a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Intensity {
    Light,
    Moderate,
    High,
    Extreme,
}

impl Intensity {
    pub const ALL: [Intensity; 4] = [
        Intensity::Light,
        Intensity::Moderate,
        Intensity::High,
        Intensity::Extreme,
    ];
}

/// Broad workout type
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkoutCategory {
    Strength,
    Cardio,
    Flexibility,
    Sports,
}

impl WorkoutCategory {
    pub const ALL: [WorkoutCategory; 4] = [
        WorkoutCategory::Strength,
        WorkoutCategory::Cardio,
        WorkoutCategory::Flexibility,
        WorkoutCategory::Sports,
    ];
}

/// Fixed muscle-group vocabulary shared by workouts and strength logs
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MuscleGroup {
    Chest,
    Shoulders,
    Triceps,
    Back,
    Biceps,
    Legs,
    Abs,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Shoulders,
        MuscleGroup::Triceps,
        MuscleGroup::Back,
        MuscleGroup::Biceps,
        MuscleGroup::Legs,
        MuscleGroup::Abs,
    ];
}

/// Cardio machine or activity
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardioType {
    Cycling,
    Treadmill,
    Elliptical,
}

impl CardioType {
    pub const ALL: [CardioType; 3] = [
        CardioType::Cycling,
        CardioType::Treadmill,
        CardioType::Elliptical,
    ];
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FitnessGoal {
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    #[serde(rename = "General Fitness")]
    GeneralFitness,
    Endurance,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 4] = [
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::GeneralFitness,
        FitnessGoal::Endurance,
    ];
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}

impl fmt::Display for WorkoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}

impl fmt::Display for CardioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::GeneralFitness => "General Fitness",
            FitnessGoal::Endurance => "Endurance",
        };
        f.pad(name)
    }
}

/// Parse by matching the normalized input against each variant's display name
fn parse_variant<T: Copy + fmt::Display>(s: &str, all: &[T], what: &str) -> Result<T> {
    let wanted = normalize(s);
    all.iter()
        .copied()
        .find(|v| normalize(&v.to_string()) == wanted)
        .ok_or_else(|| {
            let options: Vec<String> = all.iter().map(|v| v.to_string()).collect();
            Error::Validation(format!(
                "unknown {} '{}' (expected one of: {})",
                what,
                s,
                options.join(", ")
            ))
        })
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_variant(s, &Self::ALL, "intensity")
    }
}

impl FromStr for WorkoutCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_variant(s, &Self::ALL, "workout category")
    }
}

impl FromStr for MuscleGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_variant(s, &Self::ALL, "muscle group")
    }
}

impl FromStr for CardioType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_variant(s, &Self::ALL, "cardio type")
    }
}

impl FromStr for MealType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_variant(s, &Self::ALL, "meal type")
    }
}

impl FromStr for FitnessGoal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_variant(s, &Self::ALL, "fitness goal")
    }
}

// ============================================================================
// Workout Types
// ============================================================================

/// Category-specific workout detail.
///
/// Only Strength workouts carry a muscle map and only Cardio workouts carry
/// a cardio map; the variant makes that explicit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "category")]
pub enum WorkoutKind {
    Strength {
        #[serde(default)]
        muscles: BTreeMap<MuscleGroup, u32>,
    },
    Cardio {
        #[serde(default)]
        cardio: BTreeMap<CardioType, u32>,
    },
    Flexibility,
    Sports,
}

impl WorkoutKind {
    pub fn category(&self) -> WorkoutCategory {
        match self {
            WorkoutKind::Strength { .. } => WorkoutCategory::Strength,
            WorkoutKind::Cardio { .. } => WorkoutCategory::Cardio,
            WorkoutKind::Flexibility => WorkoutCategory::Flexibility,
            WorkoutKind::Sports => WorkoutCategory::Sports,
        }
    }

    /// Build the detail for a category from optional sub-category maps
    ///
    /// Supplying a map that doesn't belong to the category is a validation
    /// error rather than being silently dropped.
    pub fn from_parts(
        category: WorkoutCategory,
        muscles: BTreeMap<MuscleGroup, u32>,
        cardio: BTreeMap<CardioType, u32>,
    ) -> Result<Self> {
        if category != WorkoutCategory::Strength && !muscles.is_empty() {
            return Err(Error::Validation(format!(
                "muscle minutes only apply to Strength workouts, not {}",
                category
            )));
        }
        if category != WorkoutCategory::Cardio && !cardio.is_empty() {
            return Err(Error::Validation(format!(
                "cardio minutes only apply to Cardio workouts, not {}",
                category
            )));
        }

        Ok(match category {
            WorkoutCategory::Strength => WorkoutKind::Strength { muscles },
            WorkoutCategory::Cardio => WorkoutKind::Cardio { cardio },
            WorkoutCategory::Flexibility => WorkoutKind::Flexibility,
            WorkoutCategory::Sports => WorkoutKind::Sports,
        })
    }

    /// Sum of the minutes assigned to sub-categories
    pub fn allocated_minutes(&self) -> u32 {
        match self {
            WorkoutKind::Strength { muscles } => saturating_sum(muscles.values()),
            WorkoutKind::Cardio { cardio } => saturating_sum(cardio.values()),
            WorkoutKind::Flexibility | WorkoutKind::Sports => 0,
        }
    }
}

fn saturating_sum<'a>(minutes: impl Iterator<Item = &'a u32>) -> u32 {
    minutes.fold(0, |acc, m| acc.saturating_add(*m))
}

/// A logged workout session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub minutes: u32,
    pub intensity: Intensity,
    #[serde(flatten)]
    pub kind: WorkoutKind,
    #[serde(default)]
    pub notes: String,
}

pub const MAX_WORKOUT_MINUTES: u32 = 480;

impl WorkoutEntry {
    pub fn category(&self) -> WorkoutCategory {
        self.kind.category()
    }

    /// Check input ranges before the entry is handed to the store
    ///
    /// Sub-category minutes may not add up to more than the session itself.
    pub fn validate(&self) -> Result<()> {
        if self.minutes == 0 || self.minutes > MAX_WORKOUT_MINUTES {
            return Err(Error::Validation(format!(
                "workout duration must be 1-{} minutes, got {}",
                MAX_WORKOUT_MINUTES, self.minutes
            )));
        }

        let allocated = self.kind.allocated_minutes();
        if allocated > self.minutes {
            return Err(Error::Validation(format!(
                "{} sub-category minutes exceed the {} minute workout",
                allocated, self.minutes
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Strength and Nutrition Types
// ============================================================================

/// One exercise performed in a strength session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StrengthLogEntry {
    pub date: NaiveDate,
    pub exercise: String,
    pub muscle_group: MuscleGroup,
    /// Load in kg
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub rpe: u8,
    #[serde(default)]
    pub notes: String,
}

impl StrengthLogEntry {
    pub fn validate(&self) -> Result<()> {
        if self.exercise.trim().is_empty() {
            return Err(Error::Validation("exercise name must not be empty".into()));
        }
        if self.weight.is_nan() || self.weight < 0.0 {
            return Err(Error::Validation(format!(
                "weight must be non-negative, got {}",
                self.weight
            )));
        }
        check_range("reps", self.reps, 1, 100)?;
        check_range("sets", self.sets, 1, 10)?;
        check_range("RPE", u32::from(self.rpe), 1, 10)?;
        Ok(())
    }

    /// Total load moved: weight x reps x sets
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps) * f64::from(self.sets)
    }
}

/// One logged meal or snack
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalorieEntry {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub food: String,
    /// Energy in kcal
    pub intake: u32,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub notes: String,
}

pub const MAX_MEAL_CALORIES: u32 = 5000;

impl CalorieEntry {
    pub fn validate(&self) -> Result<()> {
        if self.intake > MAX_MEAL_CALORIES {
            return Err(Error::Validation(format!(
                "calorie intake must be 0-{} kcal, got {}",
                MAX_MEAL_CALORIES, self.intake
            )));
        }
        for (name, grams) in [
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fats", self.fats),
        ] {
            if grams.is_nan() || grams < 0.0 {
                return Err(Error::Validation(format!(
                    "{} must be non-negative, got {}",
                    name, grams
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Body measurements and goals; a singleton overwritten on each save
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    pub age: u32,
    pub goal: FitnessGoal,
    pub daily_goal_cal: u32,
    /// BMI computed when the profile was saved
    pub bmi: f64,
}

impl UserProfile {
    /// Build a profile, computing its BMI from height and weight
    pub fn new(height: f64, weight: f64, age: u32, goal: FitnessGoal, daily_goal_cal: u32) -> Self {
        Self {
            height,
            weight,
            age,
            goal,
            daily_goal_cal,
            bmi: crate::metrics::bmi(height, weight),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(100.0..=250.0).contains(&self.height) {
            return Err(Error::Validation(format!(
                "height must be 100-250 cm, got {}",
                self.height
            )));
        }
        if !(30.0..=200.0).contains(&self.weight) {
            return Err(Error::Validation(format!(
                "weight must be 30-200 kg, got {}",
                self.weight
            )));
        }
        check_range("age", self.age, 1, 120)?;
        check_range("daily calorie goal", self.daily_goal_cal, 1000, 5000)?;
        Ok(())
    }
}

fn check_range(name: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(Error::Validation(format!(
            "{} must be {}-{}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

// ============================================================================
// Collections
// ============================================================================

/// Entries that belong to a calendar day
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for WorkoutEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for StrengthLogEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for CalorieEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// An entry that can be appended to one of the store's collections
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Workout(WorkoutEntry),
    Strength(StrengthLogEntry),
    Calorie(CalorieEntry),
}

impl Record {
    pub fn kind(&self) -> CollectionKind {
        match self {
            Record::Workout(_) => CollectionKind::Workouts,
            Record::Strength(_) => CollectionKind::StrengthLogs,
            Record::Calorie(_) => CollectionKind::Calories,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Record::Workout(w) => w.validate(),
            Record::Strength(s) => s.validate(),
            Record::Calorie(c) => c.validate(),
        }
    }
}

impl From<WorkoutEntry> for Record {
    fn from(entry: WorkoutEntry) -> Self {
        Record::Workout(entry)
    }
}

impl From<StrengthLogEntry> for Record {
    fn from(entry: StrengthLogEntry) -> Self {
        Record::Strength(entry)
    }
}

impl From<CalorieEntry> for Record {
    fn from(entry: CalorieEntry) -> Self {
        Record::Calorie(entry)
    }
}

/// The four independently persisted collections
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Workouts,
    StrengthLogs,
    Calories,
    Profile,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Workouts,
        CollectionKind::StrengthLogs,
        CollectionKind::Calories,
        CollectionKind::Profile,
    ];

    /// File name of the collection inside the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            CollectionKind::Workouts => "workouts.json",
            CollectionKind::StrengthLogs => "strength_logs.json",
            CollectionKind::Calories => "calories.json",
            CollectionKind::Profile => "user_data.json",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionKind::Workouts => "workouts",
            CollectionKind::StrengthLogs => "strength logs",
            CollectionKind::Calories => "calories",
            CollectionKind::Profile => "profile",
        };
        f.pad(name)
    }
}

impl FromStr for CollectionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "workouts" | "workout" => Ok(CollectionKind::Workouts),
            "strength" | "strengthlogs" => Ok(CollectionKind::StrengthLogs),
            "calories" | "meals" | "nutrition" => Ok(CollectionKind::Calories),
            "profile" | "userdata" => Ok(CollectionKind::Profile),
            _ => Err(Error::Validation(format!(
                "unknown collection '{}' (expected workouts, strength, calories or profile)",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn strength_workout(minutes: u32, chest: u32, back: u32) -> WorkoutEntry {
        let mut muscles = BTreeMap::new();
        muscles.insert(MuscleGroup::Chest, chest);
        muscles.insert(MuscleGroup::Back, back);
        WorkoutEntry {
            date: date("2024-01-15"),
            time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            minutes,
            intensity: Intensity::High,
            kind: WorkoutKind::Strength { muscles },
            notes: String::new(),
        }
    }

    #[test]
    fn test_workout_json_uses_flat_category_field() {
        let workout = strength_workout(45, 20, 15);
        let value = serde_json::to_value(&workout).unwrap();

        assert_eq!(value["category"], "Strength");
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["time"], "07:30:00");
        assert_eq!(value["intensity"], "High");
        assert_eq!(value["muscles"]["Chest"], 20);
        assert!(value.get("cardio").is_none());
    }

    #[test]
    fn test_parse_legacy_cardio_workout() {
        let json = r#"{
            "date": "2024-02-01",
            "time": "18:05:00",
            "minutes": 40,
            "intensity": "Moderate",
            "category": "Cardio",
            "cardio": {"Cycling": 20, "Treadmill": 10, "Elliptical": 0},
            "notes": "easy spin"
        }"#;

        let workout: WorkoutEntry = serde_json::from_str(json).unwrap();
        assert_eq!(workout.category(), WorkoutCategory::Cardio);
        match &workout.kind {
            WorkoutKind::Cardio { cardio } => {
                assert_eq!(cardio[&CardioType::Cycling], 20);
                assert_eq!(cardio.len(), 3);
            }
            other => panic!("Expected Cardio variant, got {:?}", other),
        }
        assert_eq!(workout.notes, "easy spin");
    }

    #[test]
    fn test_parse_plain_category_workout() {
        let json = r#"{"date":"2024-02-01","time":"06:00:00","minutes":30,
            "intensity":"Light","category":"Flexibility","notes":""}"#;
        let workout: WorkoutEntry = serde_json::from_str(json).unwrap();
        assert_eq!(workout.kind, WorkoutKind::Flexibility);
    }

    #[test]
    fn test_workout_validation() {
        assert!(strength_workout(45, 20, 15).validate().is_ok());

        let over = strength_workout(30, 20, 15);
        assert!(matches!(over.validate(), Err(Error::Validation(_))));

        let mut zero = strength_workout(30, 0, 0);
        zero.minutes = 0;
        assert!(zero.validate().is_err());

        let mut long = strength_workout(30, 0, 0);
        long.minutes = MAX_WORKOUT_MINUTES + 1;
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_allocated_minutes_saturate() {
        let huge = strength_workout(60, u32::MAX, u32::MAX);
        assert_eq!(huge.kind.allocated_minutes(), u32::MAX);
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_kind_from_parts_rejects_mismatched_maps() {
        let mut muscles = BTreeMap::new();
        muscles.insert(MuscleGroup::Legs, 10);

        let err = WorkoutKind::from_parts(WorkoutCategory::Cardio, muscles.clone(), BTreeMap::new());
        assert!(err.is_err());

        let kind =
            WorkoutKind::from_parts(WorkoutCategory::Strength, muscles, BTreeMap::new()).unwrap();
        assert_eq!(kind.allocated_minutes(), 10);

        let kind = WorkoutKind::from_parts(WorkoutCategory::Sports, BTreeMap::new(), BTreeMap::new())
            .unwrap();
        assert_eq!(kind, WorkoutKind::Sports);
    }

    #[test]
    fn test_strength_validation_ranges() {
        let mut entry = StrengthLogEntry {
            date: date("2024-01-10"),
            exercise: "Bench Press".into(),
            muscle_group: MuscleGroup::Chest,
            weight: 60.0,
            reps: 8,
            sets: 3,
            rpe: 8,
            notes: String::new(),
        };
        assert!(entry.validate().is_ok());
        assert_eq!(entry.volume(), 1440.0);

        entry.reps = 101;
        assert!(entry.validate().is_err());
        entry.reps = 8;
        entry.sets = 11;
        assert!(entry.validate().is_err());
        entry.sets = 3;
        entry.rpe = 0;
        assert!(entry.validate().is_err());
        entry.rpe = 7;
        entry.weight = -2.5;
        assert!(entry.validate().is_err());
        entry.weight = 0.0;
        entry.exercise = "  ".into();
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_calorie_validation() {
        let mut entry = CalorieEntry {
            date: date("2024-01-10"),
            meal_type: MealType::Lunch,
            food: "Chicken Rice".into(),
            intake: 650,
            protein: 35.0,
            carbs: 80.0,
            fats: 18.0,
            notes: String::new(),
        };
        assert!(entry.validate().is_ok());

        entry.intake = MAX_MEAL_CALORIES + 1;
        assert!(entry.validate().is_err());
        entry.intake = 0;
        assert!(entry.validate().is_ok());
        entry.fats = -1.0;
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_profile_new_computes_bmi() {
        let profile = UserProfile::new(170.0, 70.0, 30, FitnessGoal::GeneralFitness, 2200);
        assert!((profile.bmi - 24.22).abs() < 0.01);
        assert!(profile.validate().is_ok());

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["goal"], "General Fitness");

        let short = UserProfile::new(90.0, 70.0, 30, FitnessGoal::Endurance, 2200);
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_enum_parsing_is_lenient() {
        assert_eq!("chest".parse::<MuscleGroup>().unwrap(), MuscleGroup::Chest);
        assert_eq!("EXTREME".parse::<Intensity>().unwrap(), Intensity::Extreme);
        assert_eq!(
            "weight_loss".parse::<FitnessGoal>().unwrap(),
            FitnessGoal::WeightLoss
        );
        assert_eq!(
            "Muscle Gain".parse::<FitnessGoal>().unwrap(),
            FitnessGoal::MuscleGain
        );
        assert_eq!("snack".parse::<MealType>().unwrap(), MealType::Snack);
        assert_eq!(
            "strength".parse::<CollectionKind>().unwrap(),
            CollectionKind::StrengthLogs
        );

        match "Quads".parse::<MuscleGroup>() {
            Err(Error::Validation(msg)) => assert!(msg.contains("Chest")),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_record_kind() {
        let record: Record = strength_workout(30, 0, 0).into();
        assert_eq!(record.kind(), CollectionKind::Workouts);
        assert_eq!(CollectionKind::Profile.file_name(), "user_data.json");
    }
}
