//! cli
//!
//! Command-line interface layer for convoy.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Set up logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds the real
//! collaborators and hands them to [`crate::engine`]. Diagnostics go to
//! stderr through `tracing`; results go to stdout through [`crate::ui::output`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::core::config::Config;
use crate::engine;
use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let config = Config::load().context("load convoy configuration")?;
    if let Some(path) = config.path() {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(config.interactive()),
    };

    commands::dispatch(cli.command, &ctx, &config)
}

/// Install the stderr subscriber. `RUST_LOG` directives are honored on top
/// of the level picked by `--debug`.
fn init_logging(debug: bool) {
    let default_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
