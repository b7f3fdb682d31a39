// Command-line surface and dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands::{self, Context};

#[derive(Parser, Debug)]
#[command(name = "switchyard")]
#[command(bin_name = "switchyard")]
#[command(about = "Pick the healthiest AI provider and open a terminal wired to it")]
#[command(
    long_about = "Switchyard keeps a list of Anthropic-compatible AI providers, probes them \
concurrently, ranks the healthy ones by priority and latency, exports the winner as \
ANTHROPIC_* environment variables and opens a terminal session with that environment."
)]
#[command(version)]
#[command(author = "Switchyard Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/switchyard/providers.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Probe every provider and print its health
    Check,

    /// Probe, rank healthy providers and recommend the best one
    Best {
        /// Activate the recommended provider
        #[arg(long)]
        activate: bool,
    },

    /// Export a provider's variables and write the activation transcript
    Activate {
        /// Provider name
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Print the ANTHROPIC_* variables of this process
    Env,

    /// Activate a provider and open a terminal with its environment
    Launch(LaunchArgs),

    /// Show the detected desktop and the terminals that would be tried
    Terminals,

    /// Manage named project directories
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct LaunchArgs {
    /// Provider to activate
    #[arg(long, conflicts_with = "best")]
    pub provider: Option<String>,

    /// Probe first and activate the best provider
    #[arg(long)]
    pub best: bool,

    /// Working directory for the new session
    #[arg(long, value_name = "PATH", conflicts_with = "project")]
    pub dir: Option<PathBuf>,

    /// Named project directory for the new session
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Command to run before the interactive shell
    #[arg(long, value_name = "CMD")]
    pub command: Option<String>,

    /// Start the target tool automatically
    #[arg(long)]
    pub auto: bool,

    /// Launch with the environment as it is, without activating
    #[arg(long, conflicts_with_all = ["provider", "best"])]
    pub no_env: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectAction {
    /// List project directories
    List,

    /// Add a project directory
    Add {
        name: String,
        path: PathBuf,
        #[arg(long, default_value = "")]
        description: String,
    },
}

/// Routes a parsed command line to its handler
pub struct CommandRouter;

impl CommandRouter {
    pub async fn execute(cli: Cli) -> Result<()> {
        // `env` and `terminals` work without a configuration file
        let command = match cli.command {
            Commands::Env => return commands::env::run(),
            Commands::Terminals => return commands::terminals::run(),
            command => command,
        };

        let mut ctx = Context::load(cli.config).await?;
        match command {
            Commands::Check => commands::check::run(&ctx).await,
            Commands::Best { activate } => commands::best::run(&mut ctx, activate).await,
            Commands::Activate { name } => commands::activate::run(&mut ctx, &name),
            Commands::Launch(args) => commands::launch::run(&mut ctx, &args).await,
            Commands::Project { action } => commands::project::run(&mut ctx, action),
            Commands::Env | Commands::Terminals => Ok(()),
        }
    }
}
