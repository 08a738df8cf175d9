use eyre::Result;

use super::CompilationContext;

/// One step from code model to client model.
///
/// The built-in phases run in this order: validate, transform, map, analyze.
/// A phase reads what earlier phases left in the context and records
/// recoverable problems as diagnostics rather than failing.
pub trait Phase: Send + Sync {
    /// Short lowercase name; also names the phase's snapshot file.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
