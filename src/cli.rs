use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snaplog")]
#[command(about = "Disk usage snapshot history in JSON or JSON Lines")]
#[command(version)]
pub struct Cli {
    /// History file, .json or .jsonl (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON instead of table
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Show debug logging on stderr
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan a directory and append the snapshot to history
    Scan(ScanArgs),

    /// Show the snapshot count with the first and last snapshots
    Report,

    /// Show the two most recent snapshots side by side
    Diff,

    /// Show advice for the recorded history
    Advise,
}

#[derive(Parser)]
pub struct ScanArgs {
    /// Directory to scan (defaults to home directory)
    pub root: Option<PathBuf>,

    /// How many directory levels below the root to break out
    #[arg(long)]
    pub depth: Option<usize>,
}
