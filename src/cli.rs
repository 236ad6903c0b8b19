use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Quotation map filter engine (replay and grouping tools)
#[derive(Parser, Debug)]
#[command(name = "quotemap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Engine configuration file (JSON)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded gesture script against a record set
    Replay(ReplayArgs),

    /// Group records into location clusters
    Group(GroupArgs),
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Records file: JSON array of quotation sites
    #[arg(value_hint = ValueHint::FilePath)]
    pub records: PathBuf,

    /// Script file: JSON array of steps ({"op": "down", "lat": .., "lng": ..}, ...)
    #[arg(value_hint = ValueHint::FilePath)]
    pub script: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Records file: JSON array of quotation sites
    #[arg(value_hint = ValueHint::FilePath)]
    pub records: PathBuf,

    /// Rounding precision (decimal places); overrides the config file
    #[arg(long)]
    pub precision: Option<u32>,

    /// Write the clusters here instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
