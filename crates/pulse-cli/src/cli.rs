//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Report which organization members have been active in each repository.
///
/// Organizations, the access token, and the inactivity threshold come from
/// the environment (or a `.env` file): GITHUB_TOKEN, ORG_NAMES,
/// DAYS_INACTIVE_THRESHOLD.
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(author, version = env!("PULSE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Directory the CSV reports are written to
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,
}
