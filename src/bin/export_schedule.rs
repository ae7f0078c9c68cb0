//! Write the current schedule to CSV
//!
//! Usage: cargo run --bin export_schedule [-- OUTPUT.csv]
//!
//! Reads saved data from GROWTH_TRACKER_STORE (default .growth_tracker).
//! Empty cells mark unknown baselines, missing actuals and missing returns.

use anyhow::{Context, Result};
use growth_tracker::storage::DEFAULT_STORE_DIR;
use growth_tracker::Store;
use log::info;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let store_dir = env::var("GROWTH_TRACKER_STORE").unwrap_or_else(|_| DEFAULT_STORE_DIR.to_string());
    let output_path = env::args().nth(1).unwrap_or_else(|| "schedule_output.csv".to_string());

    let store = Store::open(&store_dir)?;
    let engine = store.load_engine().context("Failed to load saved data")?;

    let validation = engine.validate();
    if !validation.is_valid {
        anyhow::bail!("Settings are incomplete: {}", validation.messages().join(" "));
    }

    let schedule = engine.schedule();
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Unable to create {}", output_path))?;
    for row in &schedule.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Wrote {} rows", schedule.len());
    println!("Schedule ({} days) written to: {}", schedule.len(), output_path);

    Ok(())
}
