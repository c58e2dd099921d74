//! Command line interface.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{command, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

pub mod command;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect the historical series into a CSV file
    Collect(CollectArgs),
    /// Check an existing CSV for calendar coverage gaps
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct CollectArgs {
    /// Latitude of the point to collect (default: Muizenberg)
    #[arg(long, default_value_t = -34.0899)]
    pub lat: f64,

    /// Longitude of the point to collect
    #[arg(long, default_value_t = 18.4959)]
    pub lng: f64,

    /// Collect this many years back from today (ignored if --start/--end given)
    #[arg(long, default_value_t = 3)]
    pub years: i32,

    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// API request budget for the whole range
    #[arg(long, default_value_t = 200)]
    pub max_requests: usize,

    /// UTC hour of day to keep
    #[arg(long, default_value_t = 8)]
    pub hour: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 300)]
    pub timeout: u64,

    /// File holding the Storm Glass API key
    #[arg(long, default_value = "apiKey.txt")]
    pub key_file: PathBuf,

    /// Output CSV path (default: dated file in the home directory)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// CSV file to check
    #[arg(long)]
    pub file: PathBuf,

    /// First day of the expected range (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day of the expected range (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}
