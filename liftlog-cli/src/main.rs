mod dashboard;
mod display;

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::LevelFilter;

use liftlog::analytics::{
    DateRange, EntryFilter, Summary, daily_volume, top_exercises, volume_in_range,
};
use liftlog::db::DEFAULT_DB_PATH;
use liftlog::logging::init_logger;
use liftlog::{LoggedSet, Store};

use display::{TABLE_HEADER, format_volume, table_row};

#[derive(Parser, Debug)]
#[command(version, about = "LiftLog - workout log and volume dashboard", long_about = None)]
struct Args {
    /// SQLite file holding the workout log
    #[arg(long, global = true, env = "DATABASE_URL", default_value = DEFAULT_DB_PATH)]
    db: String,
    /// off, error, warn, info, debug or trace
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Only include this exercise (repeat for several)
    #[arg(short, long = "exercise")]
    exercises: Vec<String>,
    /// Only include entries on or after this date (YYYY-MM-DD)
    #[arg(long)]
    since: Option<NaiveDate>,
}

impl FilterArgs {
    fn to_filter(&self) -> EntryFilter {
        let filter = EntryFilter::new().with_exercises(self.exercises.iter().cloned());
        match self.since {
            Some(since) => filter.since(since),
            None => filter,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the workout_logs table if it does not exist
    Init,
    /// Log a set
    Add {
        #[arg(short, long)]
        exercise: String,
        /// Defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long, default_value_t = 3)]
        sets: u32,
        #[arg(short, long, default_value_t = 8)]
        reps: u32,
        /// lbs or kg; use 0 for bodyweight movements
        #[arg(short, long, default_value_t = 135.0)]
        weight: f64,
    },
    /// Delete a log entry by id
    Delete { id: i64 },
    /// Print logged sets ordered by date
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Print metrics, daily volume and volume by exercise
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        /// How many exercises to show
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Interactive dashboard
    Dashboard,
}

fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    init_logger(args.log_level.as_deref(), default_log_level(&args.command))?;

    let mut store = Store::open(&args.db)?;
    store.initialize()?;

    match args.command {
        Commands::Init => {
            println!("Workout log ready at {}", args.db);
            Ok(())
        }
        Commands::Add {
            exercise,
            date,
            sets,
            reps,
            weight,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let id = store.add(date, &exercise, sets, reps, weight)?;
            println!("Added log #{}: {} {} x {} @ {}", id, exercise.trim(), sets, reps, weight);
            Ok(())
        }
        Commands::Delete { id } => {
            if id < 1 {
                bail!("Enter a valid log id (non-zero).");
            }
            store.delete(id)?;
            println!("Deleted log id {}", id);
            Ok(())
        }
        Commands::List { filter, json } => {
            let entries = filter.to_filter().apply(&store.list_all()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_table(&entries);
            }
            Ok(())
        }
        Commands::Summary { filter, top } => {
            let entries = store.list_all()?;
            print_summary(&entries, &filter.to_filter(), top, Local::now().date_naive());
            Ok(())
        }
        Commands::Dashboard => {
            let terminal = ratatui::init();
            let result = dashboard::run(terminal, store);
            ratatui::restore();
            result
        }
    }
}

// Anything written to the terminal would tear the dashboard.
fn default_log_level(command: &Commands) -> LevelFilter {
    match command {
        Commands::Dashboard => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}

fn print_table(entries: &[LoggedSet]) {
    if entries.is_empty() {
        println!("No workouts yet. Add one with `liftlog add --exercise <NAME>`.");
        return;
    }
    println!("{}", TABLE_HEADER);
    for entry in entries {
        println!("{}", table_row(entry));
    }
}

/// Headline metrics cover every entry; the breakdowns respect `filter`.
fn print_summary(entries: &[LoggedSet], filter: &EntryFilter, top: usize, today: NaiveDate) {
    if entries.is_empty() {
        println!("No workouts yet. Add one with `liftlog add --exercise <NAME>`.");
        return;
    }

    let summary = Summary::from_entries(entries);
    let most_recent = summary
        .most_recent
        .map(|d| d.to_string())
        .unwrap_or_default();

    println!("Total volume (all time):    {}", format_volume(summary.total_volume));
    println!("Training days logged:       {}", summary.training_days);
    println!("Total logged sets:          {}", summary.entry_count);
    println!("Most recent log date:       {}", most_recent);
    println!(
        "Volume today:               {}",
        format_volume(volume_in_range(entries, DateRange::single(today)))
    );
    println!(
        "Volume last 7 days:         {}",
        format_volume(volume_in_range(entries, DateRange::last_days(today, 7)))
    );

    let filtered = filter.apply(entries);
    if !filter.is_empty() {
        println!("\n{} of {} entries match the filter", filtered.len(), entries.len());
    }

    println!("\nDaily volume");
    for day in daily_volume(&filtered) {
        println!("  {}  {:>12}", day.date, format_volume(day.total_volume));
    }

    println!("\nVolume by exercise");
    for exercise in top_exercises(&filtered, top) {
        println!(
            "  {:<24}{:>12}",
            exercise.exercise,
            format_volume(exercise.total_volume)
        );
    }
}
