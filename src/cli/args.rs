//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Convoy - bootstrap continuous-delivery pipelines from source repositories
#[derive(Parser, Debug)]
#[command(name = "convoy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if convoy was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(
        long = "interactive",
        global = true,
        conflicts_with = "no_interactive"
    )]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set, the config allows
    ///   prompts, AND stdin is a TTY
    pub fn interactive(&self, config_default: bool) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            config_default && std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage continuous-delivery pipelines
    #[command(subcommand)]
    Pipeline(PipelineCommand),

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for convoy commands.",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    convoy completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    convoy completion zsh >> ~/.zshrc

    # Fish
    convoy completion fish > ~/.config/fish/completions/convoy.fish

    # PowerShell
    convoy completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Pipeline subcommands.
#[derive(Subcommand, Debug)]
pub enum PipelineCommand {
    /// Create pipeline files for a source repository
    #[command(
        name = "init",
        long_about = "Create a pipeline manifest and buildspec for a source repository.\n\n\
            The repository must be hosted on GitHub, CodeCommit or Bitbucket. When \
            --url is omitted the local git remotes are scanned; a single supported \
            remote is used directly, several are offered as a choice. Existing \
            pipeline files are never overwritten, so the command is safe to re-run.",
        after_help = "\
EXAMPLES:
    # Use the only remote, prompt for environments
    convoy pipeline init

    # Fully specified
    convoy pipeline init --url https://github.com/badgoose/goose \\
        -e test -e prod --git-branch release

    # CodeCommit (must be in the session region)
    convoy pipeline init --url codecommit::us-west-2://repo-man -e test"
    )]
    Init {
        /// Name of the application
        #[arg(short, long)]
        app: Option<String>,

        /// URL of the source repository
        #[arg(long)]
        url: Option<String>,

        /// Branch to track; defaults to the checked-out branch, then "main"
        #[arg(long = "git-branch", short = 'b')]
        git_branch: Option<String>,

        /// Environments to deploy to, in order
        #[arg(short, long = "environments", value_delimiter = ',')]
        environments: Vec<String>,

        /// GitHub personal access token for the repository
        #[arg(long, env = "CONVOY_GITHUB_ACCESS_TOKEN", hide_env_values = true)]
        github_access_token: Option<String>,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_pipeline_init() {
        let cli = Cli::try_parse_from([
            "convoy",
            "pipeline",
            "init",
            "--url",
            "https://github.com/badgoose/goose",
            "-e",
            "test",
            "--environments",
            "prod,staging",
            "--git-branch",
            "release",
        ])
        .unwrap();

        match cli.command {
            Command::Pipeline(PipelineCommand::Init {
                url,
                environments,
                git_branch,
                app,
                ..
            }) => {
                assert_eq!(url.as_deref(), Some("https://github.com/badgoose/goose"));
                assert_eq!(environments, vec!["test", "prod", "staging"]);
                assert_eq!(git_branch.as_deref(), Some("release"));
                assert!(app.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["convoy", "pipeline", "init", "--debug", "-q"]).unwrap();
        assert!(cli.debug);
        assert!(cli.quiet);
        assert!(!cli.interactive(true));
    }

    #[test]
    fn interactive_flags_conflict() {
        assert!(Cli::try_parse_from([
            "convoy",
            "--interactive",
            "--no-interactive",
            "completion",
            "bash"
        ])
        .is_err());
    }

    #[test]
    fn explicit_interactive_wins() {
        let cli = Cli::try_parse_from(["convoy", "--interactive", "completion", "zsh"]).unwrap();
        assert!(cli.interactive(false));
    }

    #[test]
    fn powershell_value() {
        let cli = Cli::try_parse_from(["convoy", "completion", "powershell"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Completion {
                shell: Shell::PowerShell
            }
        ));
    }
}
