//! The rollup validator operator CLI.

use clap::Parser;
use rollup_validator::{commands, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(err) = commands::run(Cli::parse().command).await {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
