use eyre::Result;

use super::CompilationContext;

/// Observer of the pipeline, called around every phase.
///
/// Both hooks default to doing nothing; an error from either aborts the run.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called once `phase` has completed without a fatal error.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
