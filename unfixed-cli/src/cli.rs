use std::path::PathBuf;

use clap::Parser;

/// Reconcile vendor vulnerability advisories against a host inventory
#[derive(Parser)]
#[command(name = "unfixed", version)]
pub struct Cli {
    /// Path to the host inventory JSON (release, packages, prior findings)
    #[arg(short, long)]
    pub inventory: PathBuf,

    /// Base URL of the remote advisory service
    #[arg(long, env = "UNFIXED_SERVER", conflicts_with = "db")]
    pub server: Option<String>,

    /// Path to a local JSON advisory store
    #[arg(long, conflicts_with = "server")]
    pub db: Option<PathBuf>,

    /// Print the ledger as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity,
}
