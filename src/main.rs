use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use extractive_qa::cli::{args::normalize_args, Cli};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the session.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("extractive_qa=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    cli.run()
}
