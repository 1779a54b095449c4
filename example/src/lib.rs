//! Scripted navigation demo for tessera-nav.
//!
//! Each positional argument is one step: `back`, `#<n>` to activate the
//! n-th action on the current screen, or a path such as `detail/2`.

mod app;
mod config;
mod screens;

use std::{io, path::PathBuf};

use clap::Parser;

pub use crate::{
    app::{Step, build_host, run},
    config::AppConfig,
    screens::{Screen, ScreenAction},
};

#[derive(Debug, Parser)]
#[command(name = "example", about = "Walk a scripted path through the demo screens")]
struct Cli {
    /// TOML file with `start` and `[nav]` options.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the start destination.
    #[arg(long)]
    start: Option<String>,
    /// Steps to apply in order.
    steps: Vec<String>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("off,tessera_nav=info"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn desktop_main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(start) = cli.start {
        config.start = start;
    }

    let mut host = build_host(&config)?;
    let steps: Vec<_> = cli.steps.iter().map(|s| Step::parse(s)).collect();
    run(&mut host, &steps, &mut io::stdout().lock())
}
