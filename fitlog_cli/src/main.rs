use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use clap::{Parser, Subcommand};
use fitlog_core::metrics::{self, calorie_goal_progress, BmiCategory};
use fitlog_core::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Personal fitness tracker for workouts, lifts and nutrition", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout, strength set or meal
    Log {
        #[command(subcommand)]
        entry: LogCommand,
    },

    /// Set or show the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Today's summary, this week's activity and recent workouts (default)
    Dashboard {
        /// Day to report on (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Muscle group, monthly volume and weekly reports
    Progress {
        /// Reference day for the weekly report (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Macro breakdown and calorie goal for a day
    Nutrition {
        /// Day to report on (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Strength training history
    Strength {
        /// Only show one muscle group
        #[arg(long)]
        muscle_group: Option<String>,

        /// Show weight progression for one exercise
        #[arg(long)]
        exercise: Option<String>,
    },

    /// Export all data as JSON
    Export {
        /// Output directory (default from config)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write one CSV table per collection
        #[arg(long)]
        csv: bool,
    },

    /// Delete every entry in one collection (workouts, strength, calories, profile)
    Clear { collection: String },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the config file path and effective settings
    Show,

    /// Update settings and save them to the config file
    Set {
        /// Data directory used when --data-dir is not given
        #[arg(long)]
        default_data_dir: Option<PathBuf>,

        /// Export directory used when export --out is not given
        #[arg(long)]
        default_export_dir: Option<PathBuf>,

        /// Weeks in the progress report
        #[arg(long)]
        weeks_back: Option<u32>,

        /// Workouts listed on the dashboard
        #[arg(long)]
        recent_limit: Option<usize>,

        /// Meals listed in the nutrition view
        #[arg(long)]
        meal_limit: Option<usize>,
    },
}

#[derive(Subcommand)]
enum LogCommand {
    /// Log a workout session
    Workout {
        /// Duration in minutes
        #[arg(long, default_value_t = 30)]
        minutes: u32,

        /// Strength, Cardio, Flexibility or Sports
        #[arg(long)]
        category: String,

        /// Light, Moderate, High or Extreme
        #[arg(long, default_value = "Moderate")]
        intensity: String,

        /// Minutes per muscle group for Strength workouts, e.g. --muscle chest=20
        #[arg(long = "muscle")]
        muscles: Vec<String>,

        /// Minutes per cardio type for Cardio workouts, e.g. --cardio cycling=15
        #[arg(long = "cardio")]
        cardio: Vec<String>,

        /// YYYY-MM-DD (default today)
        #[arg(long)]
        date: Option<String>,

        /// HH:MM or HH:MM:SS (default now)
        #[arg(long)]
        time: Option<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Log a strength exercise
    Strength {
        #[arg(long)]
        exercise: String,

        #[arg(long)]
        muscle_group: String,

        /// Load in kg
        #[arg(long, default_value_t = 0.0)]
        weight: f64,

        #[arg(long, default_value_t = 10)]
        reps: u32,

        #[arg(long, default_value_t = 3)]
        sets: u32,

        /// Rate of perceived exertion (1-10)
        #[arg(long, default_value_t = 7)]
        rpe: u8,

        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Log a meal
    Meal {
        /// Breakfast, Lunch, Dinner or Snack
        #[arg(long)]
        meal_type: String,

        #[arg(long)]
        food: String,

        /// Energy in kcal
        #[arg(long)]
        calories: u32,

        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        #[arg(long, default_value_t = 0.0)]
        fats: f64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Save body measurements and goals
    Set {
        /// Height in cm
        #[arg(long)]
        height: f64,

        /// Weight in kg
        #[arg(long)]
        weight: f64,

        #[arg(long)]
        age: u32,

        /// Weight Loss, Muscle Gain, General Fitness or Endurance
        #[arg(long)]
        goal: String,

        /// Daily calorie goal in kcal
        #[arg(long, default_value_t = 2000)]
        daily_goal: u32,
    },

    /// Print the saved profile
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    fitlog_core::logging::init(cli.verbose);

    let config_path = cli.config.unwrap_or_else(Config::default_config_path);
    let config = Config::load_or_default(&config_path)?;

    // Determine data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Some(Commands::Log { entry }) => cmd_log(&data_dir, entry),
        Some(Commands::Profile { action }) => cmd_profile(&data_dir, action),
        Some(Commands::Dashboard { date }) => cmd_dashboard(&data_dir, date, &config),
        Some(Commands::Progress { date }) => cmd_progress(&data_dir, date, &config),
        Some(Commands::Nutrition { date }) => cmd_nutrition(&data_dir, date, &config),
        Some(Commands::Strength {
            muscle_group,
            exercise,
        }) => cmd_strength(&data_dir, muscle_group, exercise),
        Some(Commands::Export { out, csv }) => cmd_export(&data_dir, out, csv, &config),
        Some(Commands::Clear { collection }) => cmd_clear(&data_dir, &collection),
        Some(Commands::Config { action }) => cmd_config(&config_path, config, action),
        None => cmd_dashboard(&data_dir, None, &config),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(date: Option<String>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| Error::Validation(format!("invalid date '{}', expected YYYY-MM-DD", s))),
        None => Ok(today()),
    }
}

fn parse_time(time: Option<String>) -> Result<NaiveTime> {
    match time {
        Some(s) => NaiveTime::parse_from_str(s.trim(), "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s.trim(), "%H:%M"))
            .map_err(|_| Error::Validation(format!("invalid time '{}', expected HH:MM", s))),
        None => {
            let now = Local::now().time();
            Ok(NaiveTime::from_hms_opt(now.hour(), now.minute(), now.second()).unwrap_or(now))
        }
    }
}

/// Parse `name=minutes` pairs into a map
fn parse_minutes<K: FromStr<Err = Error> + Ord>(pairs: &[String]) -> Result<BTreeMap<K, u32>> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let (name, minutes) = pair.split_once('=').ok_or_else(|| {
            Error::Validation(format!("expected name=minutes, got '{}'", pair))
        })?;
        let minutes: u32 = minutes.trim().parse().map_err(|_| {
            Error::Validation(format!("invalid minutes '{}' in '{}'", minutes, pair))
        })?;
        *map.entry(name.trim().parse::<K>()?).or_insert(0) += minutes;
    }
    Ok(map)
}

fn cmd_log(data_dir: &Path, entry: LogCommand) -> Result<()> {
    let record: Record = match entry {
        LogCommand::Workout {
            minutes,
            category,
            intensity,
            muscles,
            cardio,
            date,
            time,
            notes,
        } => {
            let category: WorkoutCategory = category.parse()?;
            let kind = WorkoutKind::from_parts(
                category,
                parse_minutes(&muscles)?,
                parse_minutes(&cardio)?,
            )?;
            WorkoutEntry {
                date: parse_date(date)?,
                time: parse_time(time)?,
                minutes,
                intensity: intensity.parse()?,
                kind,
                notes,
            }
            .into()
        }
        LogCommand::Strength {
            exercise,
            muscle_group,
            weight,
            reps,
            sets,
            rpe,
            date,
            notes,
        } => StrengthLogEntry {
            date: parse_date(date)?,
            exercise: exercise.trim().to_string(),
            muscle_group: muscle_group.parse()?,
            weight,
            reps,
            sets,
            rpe,
            notes,
        }
        .into(),
        LogCommand::Meal {
            meal_type,
            food,
            calories,
            protein,
            carbs,
            fats,
            date,
            notes,
        } => CalorieEntry {
            date: parse_date(date)?,
            meal_type: meal_type.parse()?,
            food: food.trim().to_string(),
            intake: calories,
            protein,
            carbs,
            fats,
            notes,
        }
        .into(),
    };

    record.validate()?;

    let message = match &record {
        Record::Workout(w) => format!("Workout logged! {} minutes of {}", w.minutes, w.category()),
        Record::Strength(s) => format!("Strength log saved: {}", s.exercise),
        Record::Calorie(c) => format!("Meal logged: {} ({} kcal)", c.food, c.intake),
    };

    let mut store = RecordStore::open(data_dir);
    store.append(record)?;
    tracing::info!("{}", message);

    println!("✓ {}", message);
    Ok(())
}

fn cmd_profile(data_dir: &Path, action: ProfileCommand) -> Result<()> {
    let mut store = RecordStore::open(data_dir);

    match action {
        ProfileCommand::Set {
            height,
            weight,
            age,
            goal,
            daily_goal,
        } => {
            let profile = UserProfile::new(height, weight, age, goal.parse()?, daily_goal);
            profile.validate()?;
            let bmi = profile.bmi;
            store.set_profile(profile)?;

            println!("✓ Profile saved successfully!");
            println!(
                "  BMI: {:.2} ({})",
                bmi,
                BmiCategory::from_bmi(bmi).label()
            );
        }
        ProfileCommand::Show => match store.snapshot().profile {
            Some(profile) => {
                println!("  Height:     {:.1} cm", profile.height);
                println!("  Weight:     {:.1} kg", profile.weight);
                println!("  Age:        {}", profile.age);
                println!("  Goal:       {}", profile.goal);
                println!("  Daily goal: {} kcal", profile.daily_goal_cal);
                println!(
                    "  BMI:        {:.2} ({})",
                    profile.bmi,
                    BmiCategory::from_bmi(profile.bmi).label()
                );
            }
            None => println!("No profile saved yet. Use `fitlog profile set`."),
        },
    }

    Ok(())
}

fn print_header(title: &str) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
}

fn cmd_dashboard(data_dir: &Path, date: Option<String>, config: &Config) -> Result<()> {
    let date = parse_date(date)?;
    let store = RecordStore::open(data_dir);
    let snapshot = store.snapshot();
    let summary = metrics::today_summary(&snapshot, date);

    print_header(&format!("FITNESS DASHBOARD  {}", date));
    println!();
    println!("  Workouts:        {} sessions", summary.workouts);
    println!("  Minutes trained: {} min", summary.minutes);
    match summary.bmi {
        Some(bmi) => println!(
            "  BMI:             {:.1} ({})",
            bmi,
            BmiCategory::from_bmi(bmi).label()
        ),
        None => println!("  BMI:             No data"),
    }
    println!("  Calories logged: {} kcal", summary.calories);

    println!("\n  This week's activity");
    for day in metrics::daily_minutes(snapshot.workouts, date, 7) {
        println!("    {}  {:>4} min", day.label, day.minutes);
    }

    println!("\n  Recent workouts");
    let recent = metrics::top_recent(snapshot.workouts, config.dashboard.recent_limit);
    if recent.is_empty() {
        println!("    No workouts logged yet. Start tracking!");
    }
    for workout in recent {
        println!(
            "    {}  {:<12} {:>4} min  {}",
            workout.date,
            workout.category(),
            workout.minutes,
            workout.intensity
        );
    }
    println!();

    Ok(())
}

fn cmd_progress(data_dir: &Path, date: Option<String>, config: &Config) -> Result<()> {
    let date = parse_date(date)?;
    let store = RecordStore::open(data_dir);
    let snapshot = store.snapshot();

    print_header("PROGRESS");

    println!("\n  Minutes by muscle group");
    for (muscle, minutes) in metrics::muscle_group_totals(snapshot.workouts) {
        println!("    {:<10} {:>5} min", muscle, minutes);
    }

    println!("\n  Monthly training volume");
    let months = metrics::monthly_volume(snapshot.workouts);
    if months.is_empty() {
        println!("    No workout data yet");
    }
    for month in months {
        println!("    {}  {:>5} min", month.label, month.total_minutes);
    }

    println!("\n  Workout type distribution");
    for (category, minutes) in metrics::category_distribution(snapshot.workouts) {
        println!("    {:<12} {:>5} min", category, minutes);
    }

    println!("\n  Weekly report");
    println!(
        "    {:<17} {:>8} {:>13} {:>12}",
        "Week", "Workouts", "Total Minutes", "Avg Duration"
    );
    for week in metrics::weekly_buckets(snapshot.workouts, date, config.dashboard.weeks_back) {
        println!(
            "    {:<17} {:>8} {:>13} {:>12.1}",
            week.label, week.count, week.total_minutes, week.avg_duration
        );
    }
    println!();

    Ok(())
}

fn cmd_nutrition(data_dir: &Path, date: Option<String>, config: &Config) -> Result<()> {
    let date = parse_date(date)?;
    let store = RecordStore::open(data_dir);
    let snapshot = store.snapshot();

    print_header(&format!("NUTRITION  {}", date));

    if snapshot.calories.is_empty() {
        println!("\n  No meals logged yet. Start tracking your nutrition!\n");
        return Ok(());
    }

    let totals = metrics::daily_macros(snapshot.calories, date);
    let kcal = totals.calories();

    println!();
    println!("  Calories: {} kcal", totals.intake);
    println!("  Protein:  {:.1} g ({:.0} kcal)", totals.protein, kcal.protein_kcal);
    println!("  Carbs:    {:.1} g ({:.0} kcal)", totals.carbs, kcal.carbs_kcal);
    println!("  Fats:     {:.1} g ({:.0} kcal)", totals.fats, kcal.fats_kcal);

    if let Some(profile) = snapshot.profile {
        let progress = calorie_goal_progress(profile, totals.intake);
        if progress.remaining >= 0 {
            println!(
                "  Goal:     {} kcal ({:.0}%), {} kcal remaining",
                progress.goal, progress.percent, progress.remaining
            );
        } else {
            println!(
                "  Goal:     {} kcal ({:.0}%), {} kcal over",
                progress.goal,
                progress.percent,
                -progress.remaining
            );
        }
    }

    println!("\n  Daily intake");
    for (day, intake) in metrics::daily_calories(snapshot.calories) {
        println!("    {}  {:>5} kcal", day, intake);
    }

    println!("\n  Recent meals");
    for meal in metrics::top_recent(snapshot.calories, config.dashboard.meal_limit) {
        println!(
            "    {}  {:<10} {:<24} {:>5} kcal",
            meal.date, meal.meal_type, meal.food, meal.intake
        );
    }
    println!();

    Ok(())
}

fn cmd_strength(
    data_dir: &Path,
    muscle_group: Option<String>,
    exercise: Option<String>,
) -> Result<()> {
    let store = RecordStore::open(data_dir);
    let snapshot = store.snapshot();

    print_header("STRENGTH TRAINING HISTORY");

    if snapshot.strength_logs.is_empty() {
        println!("\n  No strength logs yet. Start tracking your lifts!\n");
        return Ok(());
    }

    let mut logs: Vec<&StrengthLogEntry> = match muscle_group {
        Some(group) => metrics::filter_by_muscle(snapshot.strength_logs, group.parse()?),
        None => snapshot.strength_logs.iter().collect(),
    };
    logs.sort_by(|a, b| b.date.cmp(&a.date));

    println!();
    for log in &logs {
        println!(
            "  {}  {:<20} {:<10} {:>6.1} kg  {}x{}  RPE {}",
            log.date, log.exercise, log.muscle_group, log.weight, log.sets, log.reps, log.rpe
        );
    }

    if let Some(exercise) = exercise {
        let progress = metrics::exercise_progress(snapshot.strength_logs, &exercise);
        println!("\n  {} progress", exercise);
        if progress.is_empty() {
            println!("    No entries for {}", exercise);
        }
        for entry in progress {
            println!(
                "    {}  {:>6.1} kg  volume {:.0}",
                entry.date,
                entry.weight,
                entry.volume()
            );
        }
    }
    println!();

    Ok(())
}

fn cmd_export(data_dir: &Path, out: Option<PathBuf>, csv: bool, config: &Config) -> Result<()> {
    let store = RecordStore::open(data_dir);
    let snapshot = store.snapshot();
    let out_dir = out.unwrap_or_else(|| config.export_dir(data_dir));
    let date = today();

    let path = write_export(&snapshot, &out_dir, date)?;
    println!("✓ Exported all data to {}", path.display());

    if csv {
        for kind in CollectionKind::ALL {
            let csv_path = out_dir.join(export::csv_file_name(kind, date));
            let count = export_csv(&snapshot, kind, &csv_path)?;
            println!("  {} rows → {}", count, csv_path.display());
        }
    }

    Ok(())
}

fn cmd_clear(data_dir: &Path, collection: &str) -> Result<()> {
    let kind: CollectionKind = collection.parse()?;
    let mut store = RecordStore::open(data_dir);
    clear_collection(&mut store, kind)?;

    println!("✓ All {} data cleared!", kind);
    Ok(())
}

fn cmd_config(path: &Path, mut config: Config, action: ConfigCommand) -> Result<()> {
    match action {
        ConfigCommand::Show => {
            println!("Config file: {}", path.display());
            println!("  data_dir:     {}", config.data.data_dir.display());
            println!(
                "  export_dir:   {}",
                config.export_dir(&config.data.data_dir).display()
            );
            println!("  weeks_back:   {}", config.dashboard.weeks_back);
            println!("  recent_limit: {}", config.dashboard.recent_limit);
            println!("  meal_limit:   {}", config.dashboard.meal_limit);
        }
        ConfigCommand::Set {
            default_data_dir,
            default_export_dir,
            weeks_back,
            recent_limit,
            meal_limit,
        } => {
            if let Some(dir) = default_data_dir {
                config.data.data_dir = dir;
            }
            if let Some(dir) = default_export_dir {
                config.export.export_dir = Some(dir);
            }
            if let Some(weeks) = weeks_back {
                config.dashboard.weeks_back = weeks;
            }
            if let Some(limit) = recent_limit {
                config.dashboard.recent_limit = limit;
            }
            if let Some(limit) = meal_limit {
                config.dashboard.meal_limit = limit;
            }

            config.save_to(path)?;
            println!("✓ Settings saved to {}", path.display());
        }
    }

    Ok(())
}
