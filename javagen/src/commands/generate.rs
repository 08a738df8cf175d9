use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use javagen_codemodel::{Flavor, Mode};

use super::ProjectArgs;
use crate::{
    ops::{self, GenerateOptions},
    project::Overrides,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output directory (overrides javagen.toml setting)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot of every pipeline phase under .javagen/debug
    #[arg(long)]
    pub visualize: bool,

    /// Client runtime: azure or unbranded (overrides javagen.toml setting)
    #[arg(long)]
    pub flavor: Option<Flavor>,

    /// Library mode: data-plane or management (overrides javagen.toml setting)
    #[arg(long)]
    pub mode: Option<Mode>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let project = self.project.open(Overrides {
            code_model: None,
            output: self.output.clone(),
            flavor: self.flavor,
            mode: self.mode,
        });

        let report = ops::generate(
            project,
            GenerateOptions {
                dry_run: self.dry_run,
                visualize: self.visualize,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
