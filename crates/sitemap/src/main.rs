//! `sitemap` command line tool.
//!
//! `sitemap build` writes sitemap files (splitting oversized collections
//! into chunks plus an index), `sitemap serve` renders them on request.

mod commands;
mod error;
mod input;
mod output;
mod server;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Generate and partition sitemaps.
#[derive(Parser)]
#[command(name = "sitemap", version, about)]
struct Cli {
    /// Log progress at INFO level (otherwise RUST_LOG applies).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write sitemap files to disk.
    Build(BuildArgs),
    /// Serve sitemaps over HTTP.
    Serve(ServeArgs),
}

impl Commands {
    fn run(self) -> Result<(), CliError> {
        match self {
            Self::Build(args) => args.execute(),
            Self::Serve(args) => tokio::runtime::Runtime::new()?.block_on(args.execute()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Output::new().error(&format!("error: {err}"));
            ExitCode::FAILURE
        }
    }
}
