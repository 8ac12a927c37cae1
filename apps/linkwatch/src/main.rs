#![warn(clippy::all)]

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use linkwatch::config::Config;
use linkwatch::{AppError, LinkMonitor};

/// Probe a set of links forever and report which ones are up.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML config file, created with defaults if missing
    #[arg(short, long, env = "LINKWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logger::init();

    let config = match &cli.config {
        Some(path) => Config::from_config(path)?,
        None => Config::default(),
    };

    let monitor_config = config.validated_monitor_config()?;

    if cli.print_config {
        print!("{config}");
        return Ok(());
    }

    let monitor = LinkMonitor::new(monitor_config)?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut run = std::pin::pin!(monitor.run(shutdown_rx));

    tokio::select! {
        _ = &mut run => {}
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Received Ctrl-C");
            let _ = shutdown_tx.send(true);
            run.await;
        }
    }

    Ok(())
}
