mod cli;

use std::fs;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use cli::Cli;
use unfixed::{AdvisorySource, HostScan, JsonFileStore, LocalSource, RemoteSource, output};

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    let raw = fs::read_to_string(&args.inventory)
        .with_context(|| format!("failed to read inventory {}", args.inventory.display()))?;
    let mut scan: HostScan = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse inventory {}", args.inventory.display()))?;

    let source: Box<dyn AdvisorySource> = match (&args.server, &args.db) {
        (Some(url), None) => Box::new(RemoteSource::new(url.clone())),
        (None, Some(path)) => {
            let store = JsonFileStore::load(path)?;
            Box::new(LocalSource::new(Some(Arc::new(store))))
        }
        _ => bail!("exactly one of --server or --db must be given"),
    };

    info!(
        release = %scan.release,
        packages = scan.packages.len(),
        "reconciling advisories"
    );
    unfixed::fill_ledger(&mut scan, source.as_ref()).await?;

    let mut stdout = std::io::stdout().lock();
    output::formatter(args.json).write_ledger(&scan.findings, &mut stdout)?;
    Ok(())
}
