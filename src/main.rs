//! Growth Tracker CLI
//!
//! Command-line interface for configuring a projection, recording actual
//! values and reviewing the schedule

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use growth_tracker::storage::DEFAULT_STORE_DIR;
use growth_tracker::{GrowthEngine, SettingsPatch, Store};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "growth-tracker", version, about = "Daily compound growth tracker")]
struct Cli {
    /// Directory holding saved settings and records
    #[arg(long, global = true, env = "GROWTH_TRACKER_STORE", default_value = DEFAULT_STORE_DIR)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Set any of the projection settings
    Configure {
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        start_value: Option<f64>,
        /// Daily growth in percent (3.5 = 3.5%/day)
        #[arg(long)]
        growth_rate: Option<f64>,
        #[arg(long)]
        target_value: Option<f64>,
    },
    /// Print the horizon and the day-by-day schedule
    Show {
        /// Only print the first N days
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Record the actual value observed on a day
    Record {
        #[arg(long)]
        day: u32,
        #[arg(long)]
        value: f64,
    },
    /// Print return statistics for the recorded values
    Stats,
    /// Write settings and records to a JSON bundle
    Export {
        #[arg(long)]
        out: PathBuf,
    },
    /// Load settings and records from a JSON bundle
    Import {
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete all saved settings and records
    Reset,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let store = Store::open(&cli.store)
        .with_context(|| format!("Unable to open store at {}", cli.store.display()))?;
    let mut engine = store.load_engine().context("Failed to load saved data")?;

    match cli.command {
        Command::Configure {
            start_date,
            start_value,
            growth_rate,
            target_value,
        } => {
            let patch = SettingsPatch {
                start_date,
                start_value,
                growth_rate,
                target_value,
            };
            if patch.is_empty() {
                bail!("Nothing to configure; pass at least one setting");
            }

            let validation = engine.update_settings(patch);
            store.save_engine(&engine).context("Failed to save settings")?;

            if validation.is_valid {
                println!("Settings saved. {} days to target.", engine.days_to_target());
            } else {
                println!("Settings saved, but not usable yet:");
                for message in validation.messages() {
                    println!("  - {}", message);
                }
            }
        }
        Command::Show { limit } => print_schedule(&engine, limit),
        Command::Record { day, value } => {
            engine
                .try_record_actual(day, value)
                .with_context(|| format!("Cannot record {} for day {}", value, day))?;
            store.save_engine(&engine).context("Failed to save records")?;
            println!("Recorded day {}: {:.2}", day, value);
        }
        Command::Stats => print_statistics(&engine),
        Command::Export { out } => {
            store
                .export_to(&out, serde_json::Value::Object(Default::default()))
                .with_context(|| format!("Failed to export to {}", out.display()))?;
            println!("Exported to {}", out.display());
        }
        Command::Import { file } => {
            store
                .import_from(&file)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            let engine = store.load_engine()?;
            println!(
                "Imported {} records. {} days to target.",
                engine.records().len(),
                engine.days_to_target()
            );
        }
        Command::Reset => {
            store.clear().context("Failed to clear store")?;
            engine.reset();
            println!("All data deleted.");
        }
    }

    Ok(())
}

fn print_schedule(engine: &GrowthEngine, limit: Option<usize>) {
    let validation = engine.validate();
    if !validation.is_valid {
        println!("No schedule: settings are incomplete.");
        for message in validation.messages() {
            println!("  - {}", message);
        }
        return;
    }

    println!("Days to target: {}", engine.days_to_target());
    println!("Daily increase: {:.2}", engine.daily_increase());
    println!();

    println!(
        "{:>5} {:>10} {:>16} {:>16} {:>16} {:>9}",
        "Day", "Date", "Start", "Expected", "Actual", "Return"
    );
    println!("{}", "-".repeat(77));

    let schedule = engine.schedule();
    let shown = limit.unwrap_or(schedule.len());
    for row in schedule.rows.iter().take(shown) {
        println!(
            "{:>5} {:>10} {:>16} {:>16.2} {:>16} {:>9}",
            row.day,
            row.date,
            format_value(row.start_value),
            row.expected_value,
            format_value(row.actual_value),
            format_return_rate(row.return_rate),
        );
    }

    if schedule.len() > shown {
        println!("... ({} more days)", schedule.len() - shown);
    }
}

fn print_statistics(engine: &GrowthEngine) {
    let stats = engine.statistics();
    println!("Statistics:");
    println!("  Total Days: {}", stats.total_days);
    println!("  Days With Data: {}", stats.days_with_data);
    println!("  Average Daily Return: {}", format_return_rate(Some(stats.average_return)));
    println!("  Total Return: {}", format_return_rate(Some(stats.total_return)));
    println!("  Current Value: {:.2}", stats.current_value);
    println!("  Target Progress: {:.2}%", stats.target_progress);
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => "-".to_string(),
    }
}

fn format_return_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) if r.is_finite() => format!("{:+.2}%", r),
        _ => "-".to_string(),
    }
}
