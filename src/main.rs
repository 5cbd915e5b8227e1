//! blackhole - DNS blocklist aggregator
//!
//! Builds a single hostname blocklist from the lists indexed by a masterlist.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use blackhole::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.silent {
        Level::ERROR
    } else {
        Level::INFO
    };

    // stdout carries the generated list
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Build {
            selection,
            adjustments,
            format,
            output,
        } => {
            blackhole::commands::build::run(&cli.config, selection, adjustments, format, output)
                .await
        }
        Commands::Sources { selection } => {
            blackhole::commands::sources::run(selection, &cli.config).await
        }
        Commands::Check { host, adjustments } => {
            blackhole::commands::check::run(&host, adjustments, &cli.config).await
        }
        Commands::Init { force } => blackhole::commands::init::run(force, &cli.config).await,
        Commands::Version => {
            println!("blackhole {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
