use clap::Args;
use eyre::Result;

use super::ProjectArgs;
use crate::{
    ops,
    project::Overrides,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct InfoCommand {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl InfoCommand {
    pub fn run(&self) -> Result<()> {
        let project = self.project.open(Overrides::default());

        let report = ops::info(&project);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
