//! CLI entry point for the sequential numbered-file downloader.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sndl::download::constants::CONNECT_TIMEOUT_SECS;
use sndl::{Connection, FetchDriver, ReconnectPolicy, parse_target};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose flag
    // Priority: RUST_LOG env var > verbose flag > default (info)
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    // Parse the target before touching the filesystem so a bad URL fails
    // without side effects.
    let target = parse_target(&args.target_url)?;

    std::fs::create_dir_all(&args.output).with_context(|| {
        format!(
            "failed to create output directory {}",
            args.output.display()
        )
    })?;

    println!("Output directory: {}", args.output.display());
    println!(
        "Connection: {}://{}:{}/",
        target.scheme(),
        target.host(),
        target.effective_port()
    );

    let connection = Connection::open(&target, CONNECT_TIMEOUT_SECS, args.timeout)?;
    let policy = ReconnectPolicy::new(Duration::from_secs(args.wait));
    let mut driver = FetchDriver::new(connection, policy, args.output.clone());

    let stats = driver.run(&target).await?;

    info!(
        completed = stats.completed(),
        failed = stats.failed(),
        reconnects = stats.reconnects(),
        total = stats.total(),
        "Download complete"
    );

    Ok(())
}
