mod check;
mod completions;
mod generate;
mod info;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use info::InfoCommand;

use crate::project::{Overrides, Project};

/// Extension trait for exiting on code model errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for javagen_codemodel::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Location of the settings file and the code model.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to javagen.toml (defaults to ./javagen.toml)
    #[arg(short, long, default_value = "javagen.toml")]
    pub config: PathBuf,

    /// Code model file (overrides javagen.toml setting)
    #[arg(short = 'm', long)]
    pub code_model: Option<PathBuf>,
}

impl ProjectArgs {
    /// Open the project, exiting with a rendered diagnostic on failure.
    pub fn open(&self, mut overrides: Overrides) -> Project {
        overrides.code_model = self.code_model.clone();
        Project::open(&self.config, &overrides).unwrap_or_exit()
    }
}

#[derive(Parser)]
#[command(name = "javagen")]
#[command(version)]
#[command(about = "Generate Java client libraries from a service code model")]
pub(crate) struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Info(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Java library from the code model
    Generate(GenerateCommand),

    /// Validate the code model without generating code
    Check(CheckCommand),

    /// Show a summary of the code model
    Info(InfoCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
