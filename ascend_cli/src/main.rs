use ascend_core::events::LogSubscriber;
use ascend_core::progression::progress_to_next_level;
use ascend_core::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ascend")]
#[command(about = "Level up your character by lifting real weights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show character level, tier and stats (default)
    Status,

    /// Generate a workout and log it when done
    Workout {
        /// Workout day
        #[arg(long, value_enum)]
        day: DayArg,

        /// Fitness level (defaults to the saved one)
        #[arg(long, value_enum)]
        level: Option<LevelArg>,

        /// Load used for every set of equipment-based exercises
        #[arg(long)]
        weight: Option<f64>,

        /// Show the workout without logging it
        #[arg(long)]
        dry_run: bool,

        /// Mark every set done at its target reps (for testing)
        #[arg(long)]
        auto_complete: bool,
    },

    /// Grant experience or raise a stat directly
    Grant {
        #[arg(value_enum)]
        kind: GrantArg,

        amount: u32,
    },

    /// List or toggle available equipment
    Equipment {
        #[command(subcommand)]
        action: Option<EquipmentAction>,
    },

    /// Show recent workouts
    History {
        /// How many days back to look
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=36_500))]
        days: u32,
    },

    /// Roll up WAL sessions to CSV
    Rollup {
        /// Clean up processed WAL files after rollup
        #[arg(long)]
        cleanup: bool,
    },

    /// Delete all progress and history
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum EquipmentAction {
    /// Show every piece of equipment
    List,
    /// Flip availability of one piece
    Toggle {
        #[arg(value_enum)]
        kind: EquipmentArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DayArg {
    UpperPush,
    LowerPower,
    UpperPull,
    FullBody,
}

impl From<DayArg> for WorkoutDay {
    fn from(arg: DayArg) -> Self {
        match arg {
            DayArg::UpperPush => WorkoutDay::UpperPush,
            DayArg::LowerPower => WorkoutDay::LowerPower,
            DayArg::UpperPull => WorkoutDay::UpperPull,
            DayArg::FullBody => WorkoutDay::FullBody,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<LevelArg> for FitnessLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Beginner => FitnessLevel::Beginner,
            LevelArg::Intermediate => FitnessLevel::Intermediate,
            LevelArg::Advanced => FitnessLevel::Advanced,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GrantArg {
    Xp,
    Strength,
    Endurance,
}

#[derive(Clone, Copy, ValueEnum)]
enum EquipmentArg {
    Barbell,
    Dumbbells,
    Kettlebell,
    PullUpBar,
    ResistanceBands,
    CableMachine,
    Bench,
}

impl From<EquipmentArg> for EquipmentKind {
    fn from(arg: EquipmentArg) -> Self {
        match arg {
            EquipmentArg::Barbell => EquipmentKind::Barbell,
            EquipmentArg::Dumbbells => EquipmentKind::Dumbbells,
            EquipmentArg::Kettlebell => EquipmentKind::Kettlebell,
            EquipmentArg::PullUpBar => EquipmentKind::PullUpBar,
            EquipmentArg::ResistanceBands => EquipmentKind::ResistanceBands,
            EquipmentArg::CableMachine => EquipmentKind::CableMachine,
            EquipmentArg::Bench => EquipmentKind::Bench,
        }
    }
}

/// Files under the data directory
struct DataPaths {
    wal_dir: PathBuf,
    state: PathBuf,
    wal: PathBuf,
    csv: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        let wal_dir = data_dir.join("wal");
        Self {
            state: wal_dir.join("state.json"),
            wal: wal_dir.join("workout_sessions.wal"),
            csv: data_dir.join("sessions.csv"),
            wal_dir,
        }
    }
}

fn main() -> Result<()> {
    ascend_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);
    tracing::debug!("Using data directory {:?}", data_dir);

    let catalog_errors = get_default_catalog().validate();
    if !catalog_errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in catalog_errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        None | Some(Commands::Status) => cmd_status(&paths, &config),
        Some(Commands::Workout {
            day,
            level,
            weight,
            dry_run,
            auto_complete,
        }) => cmd_workout(
            &paths,
            &config,
            day.into(),
            level.map(Into::into),
            weight,
            dry_run,
            auto_complete,
        ),
        Some(Commands::Grant { kind, amount }) => cmd_grant(&paths, &config, kind, amount),
        Some(Commands::Equipment { action }) => cmd_equipment(&paths, &config, action),
        Some(Commands::History { days }) => cmd_history(&paths, days),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(&paths, cleanup),
        Some(Commands::Reset { yes }) => cmd_reset(&paths, &config, yes),
    }
}

fn open_tracker(paths: &DataPaths, config: &Config) -> Result<Tracker<JsonFileStore>> {
    let mut bus = EventBus::new();
    bus.subscribe(Box::new(LogSubscriber));

    Tracker::open_or_else(
        JsonFileStore::new(&paths.state),
        bus,
        config.progression.clone(),
        || UserState::from_config(config),
    )
}

fn cmd_status(paths: &DataPaths, config: &Config) -> Result<()> {
    let tracker = open_tracker(paths, config)?;
    let state = tracker.state();
    let character = &state.character;
    let (into_level, level_span) = progress_to_next_level(character);

    println!("\n╭─────────────────────────────────────────╮");
    println!(
        "│  {} · Level {}",
        character.tier().display_name().to_uppercase(),
        character.level
    );
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Experience:    {} ({}/{} to next level)",
        character.experience, into_level, level_span
    );
    println!("  Strength:      {}", character.strength);
    println!("  Endurance:     {}", character.endurance);
    println!("  Total lifted:  {:.1}", character.total_weight_lifted);
    println!("  Fitness level: {:?}", state.fitness_level);
    println!();

    Ok(())
}

fn cmd_workout(
    paths: &DataPaths,
    config: &Config,
    day: WorkoutDay,
    level: Option<FitnessLevel>,
    weight: Option<f64>,
    dry_run: bool,
    auto_complete: bool,
) -> Result<()> {
    if let Some(w) = weight {
        ascend_core::types::validate_weight(w)?;
    }

    let mut tracker = open_tracker(paths, config)?;
    let level = level.unwrap_or(tracker.state().fitness_level);
    let equipment = tracker.state().equipment.available_kinds();

    let mut exercises = generate_exercises(day, &equipment, level);
    display_workout(day, level, &exercises);

    if dry_run {
        println!("\n[Dry run - not logging session]");
        return Ok(());
    }

    if !auto_complete && !prompt_completion()? {
        println!("\nWorkout abandoned.");
        return Ok(());
    }

    // Every set done as prescribed
    for exercise in exercises.iter_mut() {
        let load = if exercise.is_bodyweight() { None } else { weight };
        for index in 0..exercise.sets.len() {
            let reps = exercise.sets[index].target_reps;
            exercise.record_set(index, reps, load)?;
        }
    }

    let session = WorkoutSession::new(day, level, exercises);
    let mut sink = JsonlSink::new(&paths.wal);
    let (session, events) = tracker.complete_workout(session, &mut sink)?;

    println!("\n✓ Workout logged! +{} XP", session.xp_awarded);
    display_events(&events);

    Ok(())
}

fn cmd_grant(paths: &DataPaths, config: &Config, kind: GrantArg, amount: u32) -> Result<()> {
    let mut tracker = open_tracker(paths, config)?;

    let events = match kind {
        GrantArg::Xp => tracker.apply_experience(u64::from(amount))?,
        GrantArg::Strength => tracker.apply_strength(amount)?,
        GrantArg::Endurance => tracker.apply_endurance(amount)?,
    };

    let character = tracker.character();
    println!(
        "✓ Level {} · {} XP · STR {} · END {}",
        character.level, character.experience, character.strength, character.endurance
    );
    display_events(&events);

    tracker.close()?;
    Ok(())
}

fn cmd_equipment(
    paths: &DataPaths,
    config: &Config,
    action: Option<EquipmentAction>,
) -> Result<()> {
    let mut tracker = open_tracker(paths, config)?;

    if let Some(EquipmentAction::Toggle { kind }) = action {
        let mut state = tracker.state().clone();
        let kind: EquipmentKind = kind.into();
        let now = state.equipment.toggle(kind)?;
        tracker.replace_state(state)?;
        println!(
            "✓ {} is now {}",
            kind.display_name(),
            if now { "available" } else { "unavailable" }
        );
        return Ok(());
    }

    for item in &tracker.state().equipment.items {
        let mark = if item.available { "✓" } else { " " };
        println!("  [{}] {} ({:?})", mark, item.name, item.category);
    }

    Ok(())
}

fn cmd_history(paths: &DataPaths, days: u32) -> Result<()> {
    let summaries = load_recent_summaries(&paths.wal, &paths.csv, days)?;

    if summaries.is_empty() {
        println!("No workouts in the last {} days.", days);
        return Ok(());
    }

    for summary in &summaries {
        println!(
            "  {}  {:<17} {:<12} {} exercises  {:>8.1} lifted  +{} XP",
            summary.performed_at.format("%Y-%m-%d %H:%M"),
            summary.day.display_name(),
            format!("{:?}", summary.level),
            summary.exercise_count,
            summary.total_weight,
            summary.xp_awarded
        );
    }

    Ok(())
}

fn cmd_rollup(paths: &DataPaths, cleanup: bool) -> Result<()> {
    if !paths.wal.exists() {
        println!("No WAL file found - nothing to roll up.");
        return Ok(());
    }

    let count = ascend_core::csv_rollup::wal_to_csv_and_archive(&paths.wal, &paths.csv)?;

    println!("✓ Rolled up {} sessions to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let cleaned = ascend_core::csv_rollup::cleanup_processed_wals(&paths.wal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed WAL files", cleaned);
        }
    }

    Ok(())
}

fn cmd_reset(paths: &DataPaths, config: &Config, yes: bool) -> Result<()> {
    if !yes {
        eprintln!("Reset deletes your character and workout history. Re-run with --yes.");
        return Err(Error::Other("reset not confirmed".into()));
    }

    let mut tracker = open_tracker(paths, config)?;
    tracker.reset(UserState::from_config(config))?;

    if paths.wal.exists() {
        std::fs::remove_file(&paths.wal)?;
    }
    if paths.csv.exists() {
        std::fs::remove_file(&paths.csv)?;
    }
    ascend_core::csv_rollup::cleanup_processed_wals(&paths.wal_dir)?;
    tracing::info!("Removed workout history under {:?}", paths.wal_dir);

    println!("✓ All progress reset.");
    Ok(())
}

fn display_workout(day: WorkoutDay, level: FitnessLevel, exercises: &[Exercise]) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} ({:?})", day.display_name().to_uppercase(), level);
    println!("╰─────────────────────────────────────────╯");

    for (i, exercise) in exercises.iter().enumerate() {
        let equipment: Vec<_> = exercise.equipment.iter().map(|e| e.display_name()).collect();
        println!();
        println!("  {}. {} [{}]", i + 1, exercise.name, equipment.join(", "));
        if let Some(set) = exercise.sets.first() {
            println!(
                "     {} sets × {} reps, {}s rest",
                exercise.sets.len(),
                set.target_reps,
                set.rest_seconds
            );
        }
        println!("     {}", exercise.instructions);
    }

    println!();
}

fn display_events(events: &[ProgressEvent]) {
    for event in events {
        match event {
            ProgressEvent::LevelUp { from, to } => {
                println!("  ⬆ LEVEL UP! {} → {}", from, to);
            }
            ProgressEvent::TierChanged { to, .. } => {
                println!("  ★ New rank: {}", to.display_name());
            }
            _ => {}
        }
    }
}

fn prompt_completion() -> Result<bool> {
    println!("─────────────────────────────────────────");
    println!("Press Enter when done");
    println!("  'q' + Enter to abandon");
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() != "q")
}
