//! Derived views over a store snapshot.
//!
//! Everything here is a pure function of its inputs: no I/O, no clock
//! reads. Callers pass "today" explicitly. Empty collections produce zero
//! or empty results.

use crate::{
    CalorieEntry, Dated, MuscleGroup, Snapshot, StrengthLogEntry, UserProfile, WorkoutCategory,
    WorkoutEntry, WorkoutKind,
};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// Body metrics
// ============================================================================

/// Body Mass Index: weight (kg) / height (m)^2
///
/// Returns 0.0 for a non-positive height.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

// ============================================================================
// Date aggregates
// ============================================================================

/// Sum `field` over entries dated `date`
pub fn daily_total<T, F>(entries: &[T], date: NaiveDate, field: F) -> f64
where
    T: Dated,
    F: Fn(&T) -> f64,
{
    entries
        .iter()
        .filter(|e| e.date() == date)
        .map(field)
        .sum()
}

/// Sum `field` over entries dated within `start..=end`
pub fn range_total<T, F>(entries: &[T], start: NaiveDate, end: NaiveDate, field: F) -> f64
where
    T: Dated,
    F: Fn(&T) -> f64,
{
    entries
        .iter()
        .filter(|e| (start..=end).contains(&e.date()))
        .map(field)
        .sum()
}

/// Workout activity within one Monday-to-Sunday week
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeekBucket {
    pub label: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub count: usize,
    pub total_minutes: u32,
    pub avg_duration: f64,
}

/// Per-week workout totals for the week containing `reference` and the
/// `weeks_back - 1` weeks before it, most recent first
///
/// Weeks that would start before the earliest representable date are
/// dropped; the last week is cut short at the latest one.
pub fn weekly_buckets(
    workouts: &[WorkoutEntry],
    reference: NaiveDate,
    weeks_back: u32,
) -> Vec<WeekBucket> {
    let offset = u64::from(reference.weekday().num_days_from_monday());
    let Some(current_monday) = reference.checked_sub_days(Days::new(offset)) else {
        return Vec::new();
    };

    (0..weeks_back)
        .map_while(|k| current_monday.checked_sub_days(Days::new(7 * u64::from(k))))
        .map(|week_start| {
            let week_end = week_start
                .checked_add_days(Days::new(6))
                .unwrap_or(NaiveDate::MAX);

            let (count, total_minutes) = workouts
                .iter()
                .filter(|w| (week_start..=week_end).contains(&w.date))
                .fold((0usize, 0u32), |(n, m), w| (n + 1, m.saturating_add(w.minutes)));

            let avg_duration = if count == 0 {
                0.0
            } else {
                f64::from(total_minutes) / count as f64
            };

            WeekBucket {
                label: format!(
                    "{} - {}",
                    week_start.format("%b %d"),
                    week_end.format("%b %d")
                ),
                week_start,
                week_end,
                count,
                total_minutes,
                avg_duration,
            }
        })
        .collect()
}

/// Minutes trained on one day
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayMinutes {
    pub date: NaiveDate,
    /// Abbreviated weekday, e.g. "Mon"
    pub label: String,
    pub minutes: u32,
}

/// Workout minutes for each of the `days` days ending on `today`, oldest first
pub fn daily_minutes(workouts: &[WorkoutEntry], today: NaiveDate, days: u32) -> Vec<DayMinutes> {
    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| DayMinutes {
            date,
            label: date.format("%a").to_string(),
            minutes: daily_total(workouts, date, |w| f64::from(w.minutes)) as u32,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthVolume {
    /// "YYYY-MM"
    pub label: String,
    pub total_minutes: u32,
}

/// Workout minutes grouped by calendar month, oldest month first
pub fn monthly_volume(workouts: &[WorkoutEntry]) -> Vec<MonthVolume> {
    let mut months: BTreeMap<(i32, u32), u32> = BTreeMap::new();
    for workout in workouts {
        let total = months
            .entry((workout.date.year(), workout.date.month()))
            .or_insert(0);
        *total = total.saturating_add(workout.minutes);
    }

    months
        .into_iter()
        .map(|((year, month), total_minutes)| MonthVolume {
            label: format!("{:04}-{:02}", year, month),
            total_minutes,
        })
        .collect()
}

// ============================================================================
// Workout breakdowns
// ============================================================================

/// Minutes per muscle group across all Strength workouts
///
/// Every group is present, zero when untrained.
pub fn muscle_group_totals(workouts: &[WorkoutEntry]) -> BTreeMap<MuscleGroup, u32> {
    let mut totals: BTreeMap<MuscleGroup, u32> =
        MuscleGroup::ALL.iter().map(|m| (*m, 0)).collect();

    for workout in workouts {
        if let WorkoutKind::Strength { muscles } = &workout.kind {
            for (muscle, minutes) in muscles {
                let total = totals.entry(*muscle).or_insert(0);
                *total = total.saturating_add(*minutes);
            }
        }
    }

    totals
}

/// Minutes per workout category; categories with no workouts are omitted
pub fn category_distribution(workouts: &[WorkoutEntry]) -> BTreeMap<WorkoutCategory, u32> {
    let mut totals = BTreeMap::new();
    for workout in workouts {
        let total = totals.entry(workout.category()).or_insert(0u32);
        *total = total.saturating_add(workout.minutes);
    }
    totals
}

// ============================================================================
// Nutrition
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MacroCalories {
    pub protein_kcal: f64,
    pub carbs_kcal: f64,
    pub fats_kcal: f64,
}

impl MacroCalories {
    pub fn total(&self) -> f64 {
        self.protein_kcal + self.carbs_kcal + self.fats_kcal
    }
}

/// Energy from macronutrients: 4 kcal/g protein and carbs, 9 kcal/g fat
pub fn macro_calories(protein_g: f64, carbs_g: f64, fats_g: f64) -> MacroCalories {
    MacroCalories {
        protein_kcal: protein_g * 4.0,
        carbs_kcal: carbs_g * 4.0,
        fats_kcal: fats_g * 9.0,
    }
}

/// Nutrition totals for one day
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    pub intake: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroTotals {
    pub fn calories(&self) -> MacroCalories {
        macro_calories(self.protein, self.carbs, self.fats)
    }
}

pub fn daily_macros(calories: &[CalorieEntry], date: NaiveDate) -> MacroTotals {
    calories
        .iter()
        .filter(|c| c.date == date)
        .fold(MacroTotals::default(), |acc, c| MacroTotals {
            intake: acc.intake.saturating_add(c.intake),
            protein: acc.protein + c.protein,
            carbs: acc.carbs + c.carbs,
            fats: acc.fats + c.fats,
        })
}

/// Total intake per logged date, oldest first
pub fn daily_calories(calories: &[CalorieEntry]) -> Vec<(NaiveDate, u32)> {
    let mut days: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for entry in calories {
        let total = days.entry(entry.date).or_insert(0);
        *total = total.saturating_add(entry.intake);
    }
    days.into_iter().collect()
}

/// How a day's intake compares with the profile's goal
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal: u32,
    pub consumed: u32,
    /// Negative when over the goal
    pub remaining: i64,
    pub percent: f64,
}

pub fn calorie_goal_progress(profile: &UserProfile, consumed: u32) -> GoalProgress {
    let goal = profile.daily_goal_cal;
    let percent = if goal == 0 {
        0.0
    } else {
        f64::from(consumed) / f64::from(goal) * 100.0
    };
    GoalProgress {
        goal,
        consumed,
        remaining: i64::from(goal) - i64::from(consumed),
        percent,
    }
}

// ============================================================================
// Listings
// ============================================================================

/// The `n` most recently dated entries, newest first
///
/// Entries sharing a date keep their insertion order.
pub fn top_recent<T: Dated>(entries: &[T], n: usize) -> Vec<&T> {
    let mut sorted: Vec<&T> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted.truncate(n);
    sorted
}

/// Strength entries for one muscle group, in insertion order
pub fn filter_by_muscle(logs: &[StrengthLogEntry], group: MuscleGroup) -> Vec<&StrengthLogEntry> {
    logs.iter().filter(|l| l.muscle_group == group).collect()
}

/// One exercise's entries ordered by date, oldest first
///
/// Exercise names compare case-insensitively.
pub fn exercise_progress<'a>(
    logs: &'a [StrengthLogEntry],
    exercise: &str,
) -> Vec<&'a StrengthLogEntry> {
    let wanted = exercise.trim().to_lowercase();
    let mut entries: Vec<&StrengthLogEntry> = logs
        .iter()
        .filter(|l| l.exercise.trim().to_lowercase() == wanted)
        .collect();
    entries.sort_by_key(|l| l.date);
    entries
}

// ============================================================================
// Dashboard
// ============================================================================

/// Headline numbers for one day
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub workouts: usize,
    pub minutes: u32,
    pub calories: u32,
    /// Stored profile BMI, if a profile exists
    pub bmi: Option<f64>,
}

pub fn today_summary(snapshot: &Snapshot<'_>, date: NaiveDate) -> DaySummary {
    let todays: Vec<&WorkoutEntry> = snapshot
        .workouts
        .iter()
        .filter(|w| w.date == date)
        .collect();

    DaySummary {
        date,
        workouts: todays.len(),
        minutes: todays
            .iter()
            .fold(0u32, |acc, w| acc.saturating_add(w.minutes)),
        calories: daily_total(snapshot.calories, date, |c| f64::from(c.intake)) as u32,
        bmi: snapshot.profile.map(|p| p.bmi),
    }
}
