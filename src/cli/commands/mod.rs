//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds the collaborators the engine needs from config and context
//! 2. Calls the engine
//! 3. Formats and displays output

mod completion;
mod pipeline_init;

pub use completion::completion;
pub use pipeline_init::pipeline_init;

use super::args::{Command, PipelineCommand};
use crate::core::config::Config;
use crate::engine::{Context, InitOptions};
use anyhow::Result;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context, config: &Config) -> Result<()> {
    match command {
        Command::Pipeline(PipelineCommand::Init {
            app,
            url,
            git_branch,
            environments,
            github_access_token,
        }) => pipeline_init(
            ctx,
            config,
            InitOptions {
                app,
                url,
                branch: git_branch,
                environments,
                github_token: github_access_token,
            },
        ),
        Command::Completion { shell } => completion(shell),
    }
}
