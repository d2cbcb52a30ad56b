use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use lift_core::*;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Progressive overload workout assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every weight achievable with the available plates
    Plates {
        /// Plate entries as WEIGHTxCOUNT (e.g. 45x2), overriding the config
        #[arg(long = "plate", value_name = "WEIGHTxCOUNT")]
        plates: Vec<String>,
    },

    /// Apply one set outcome and show the adjusted exercise state
    Next {
        /// Current working weight
        #[arg(long)]
        weight: f64,

        /// Outcome of the session: success (s) or failure (f)
        #[arg(long)]
        outcome: String,

        /// Consecutive successes carried into this outcome
        #[arg(long, default_value_t = 0)]
        successes: u32,

        /// Consecutive failures carried into this outcome
        #[arg(long, default_value_t = 0)]
        failures: u32,

        /// Plate entries as WEIGHTxCOUNT, overriding the config
        #[arg(long = "plate", value_name = "WEIGHTxCOUNT")]
        plates: Vec<String>,

        /// Emit the updated state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a sequence of outcomes and print the weight trajectory
    Simulate {
        /// Starting weight
        #[arg(long)]
        weight: f64,

        /// One letter per session: s = success, f = failure (e.g. ssfss)
        outcomes: String,

        /// Plate entries as WEIGHTxCOUNT, overriding the config
        #[arg(long = "plate", value_name = "WEIGHTxCOUNT")]
        plates: Vec<String>,
    },

    /// Apply a whole session of exercises and sets from a JSON document
    Session {
        /// Input file, or - for stdin
        input: PathBuf,
    },

    /// Summarize a JSON document of session results
    Summary {
        /// Input file of session results
        input: PathBuf,

        /// Window: today, week, month, year, all
        #[arg(long, default_value = "all")]
        window: String,

        /// Narrow the volume figure to one exercise
        #[arg(long)]
        exercise: Option<String>,
    },
}

fn main() -> Result<()> {
    lift_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Plates { plates } => cmd_plates(plates, &config),
        Commands::Next {
            weight,
            outcome,
            successes,
            failures,
            plates,
            json,
        } => cmd_next(weight, &outcome, successes, failures, plates, json, &config),
        Commands::Simulate {
            weight,
            outcomes,
            plates,
        } => cmd_simulate(weight, &outcomes, plates, &config),
        Commands::Session { input } => cmd_session(&input, &config),
        Commands::Summary {
            input,
            window,
            exercise,
        } => cmd_summary(&input, &window, exercise.as_deref()),
    }
}

fn cmd_plates(plate_args: Vec<String>, config: &Config) -> Result<()> {
    let inventory = match resolve_inventory(&plate_args, config)? {
        Some(inventory) => inventory,
        None => {
            println!("No plates configured; showing the standard plate set.");
            standard_inventory().clone()
        }
    };

    let sums = inventory.reachable_sums();
    println!(
        "{} achievable weights from {} plates:",
        sums.len(),
        inventory.unit_count()
    );
    for weight in sums.weights() {
        println!("  {weight}");
    }
    Ok(())
}

fn cmd_next(
    weight: f64,
    outcome: &str,
    successes: u32,
    failures: u32,
    plate_args: Vec<String>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let outcome = parse_outcome(outcome)?;

    let mut state = ExerciseState {
        current_weight: weight,
        consecutive_successes: successes,
        consecutive_failures: failures,
        inventory: resolve_inventory(&plate_args, config)?,
    };

    let adjustment = apply(&mut state, outcome, &config.adjustment)?;

    if json {
        let applied = AppliedOutcome { state, adjustment };
        println!("{}", serde_json::to_string_pretty(&applied)?);
        return Ok(());
    }

    match adjustment.trigger {
        Some(trigger) if adjustment.fallback => {
            println!(
                "{trigger:?} fired, but no achievable weight qualified - staying at {}",
                adjustment.new_weight
            );
        }
        Some(trigger) => {
            println!(
                "{trigger:?}: {} -> {}",
                adjustment.previous_weight, adjustment.new_weight
            );
        }
        None => {
            println!(
                "No change at {} (streak: {} successes, {} failures)",
                state.current_weight, state.consecutive_successes, state.consecutive_failures
            );
        }
    }
    Ok(())
}

fn cmd_simulate(
    weight: f64,
    outcomes: &str,
    plate_args: Vec<String>,
    config: &Config,
) -> Result<()> {
    let mut state = ExerciseState {
        current_weight: weight,
        consecutive_successes: 0,
        consecutive_failures: 0,
        inventory: resolve_inventory(&plate_args, config)?,
    };

    println!("Start: {weight}");
    for (i, c) in outcomes.chars().enumerate() {
        let outcome = parse_outcome(&c.to_string())?;
        let adjustment = apply(&mut state, outcome, &config.adjustment)?;

        let label = if outcome.succeeded { "success" } else { "failure" };
        let note = match adjustment.trigger {
            Some(_) if adjustment.fallback => " (no achievable weight)",
            Some(_) => "",
            None => " (streak building)",
        };
        println!(
            "  #{}: {} -> {}{}",
            i + 1,
            label,
            adjustment.new_weight,
            note
        );
    }
    println!("Final: {}", state.current_weight);
    Ok(())
}

/// One exercise with its logged sets, as read from the session document
#[derive(Deserialize)]
struct SessionEntry {
    exercise: Exercise,
    sets: Vec<SetState>,
}

#[derive(Deserialize)]
struct SessionInput {
    #[serde(default)]
    performed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    total_seconds: f64,
    exercises: Vec<SessionEntry>,
}

#[derive(Serialize)]
struct UpdatedExercise {
    exercise: Exercise,
    adjustment: Adjustment,
}

#[derive(Serialize)]
struct SessionOutput {
    session: SessionResult,
    exercises: Vec<UpdatedExercise>,
}

fn cmd_session(input: &Path, config: &Config) -> Result<()> {
    let contents = read_input(input)?;
    let session: SessionInput = serde_json::from_str(&contents)?;

    // Snapshot results at the performed weights before anything moves
    let results: Vec<ExerciseResult> = session
        .exercises
        .iter()
        .map(|entry| sets::result_for(&entry.exercise, &entry.sets))
        .collect();

    let pairs: Vec<(ExerciseState, SetOutcome)> = session
        .exercises
        .iter()
        .map(|entry| {
            (
                entry.exercise.state.clone(),
                sets::outcome_from_sets(&entry.sets),
            )
        })
        .collect();

    let applied = apply_batch(pairs, &config.adjustment)?;

    let exercises = session
        .exercises
        .into_iter()
        .zip(applied)
        .map(|(entry, applied)| {
            let mut exercise = entry.exercise;
            exercise.state = applied.state;
            UpdatedExercise {
                exercise,
                adjustment: applied.adjustment,
            }
        })
        .collect();

    let output = SessionOutput {
        session: sets::session_result(
            results,
            session.performed_at.unwrap_or_else(Utc::now),
            session.total_seconds,
        ),
        exercises,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_summary(input: &Path, window: &str, exercise: Option<&str>) -> Result<()> {
    let contents = read_input(input)?;
    let results: Vec<SessionResult> = serde_json::from_str(&contents)?;

    let window = parse_window(window);
    let summary = summarize(&results, window, exercise, Utc::now());

    println!("Sessions: {}", summary.session_count);
    println!("Total time: {:.0}s", summary.total_seconds);
    println!("Average time: {:.0}s", summary.average_seconds);
    println!("Total volume: {}", summary.total_volume);
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin().read_to_string(&mut contents)?;
        Ok(contents)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Inventory precedence: command-line plates, then config, then none
fn resolve_inventory(plate_args: &[String], config: &Config) -> Result<Option<Inventory>> {
    if !plate_args.is_empty() {
        let specs = plate_args
            .iter()
            .map(|arg| parse_plate(arg))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!("Using {} plate entries from the command line", specs.len());
        return Inventory::new(specs).map(Some);
    }
    config.plates.inventory()
}

fn parse_plate(arg: &str) -> Result<PlateSpec> {
    let (weight, count) = arg.split_once(['x', 'X']).ok_or_else(|| {
        Error::Config(format!(
            "Invalid plate '{arg}' (expected WEIGHTxCOUNT, e.g. 45x2)"
        ))
    })?;

    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid plate weight in '{arg}'")))?;
    let count: u32 = count
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid plate count in '{arg}'")))?;

    PlateSpec::new(weight, count)
}

fn parse_outcome(s: &str) -> Result<SetOutcome> {
    match s.to_lowercase().as_str() {
        "s" | "success" => Ok(SetOutcome::success()),
        "f" | "failure" => Ok(SetOutcome::failure()),
        other => Err(Error::Config(format!(
            "Unknown outcome '{other}' (expected success or failure)"
        ))),
    }
}

fn parse_window(s: &str) -> HistoryWindow {
    match s.to_lowercase().as_str() {
        "today" => HistoryWindow::Today,
        "week" => HistoryWindow::Week,
        "month" => HistoryWindow::Month,
        "year" => HistoryWindow::Year,
        "all" => HistoryWindow::All,
        other => {
            eprintln!("Unknown window: {other}. Using all time.");
            HistoryWindow::All
        }
    }
}
