//! Validate phase - runs lints on the code model.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::Lint;
pub use lints::{
    DiscriminatorLint, DuplicateModelLint, DuplicateOperationLint, EmptyDescriptionLint,
    PagingItemLint, UnbrandedLroLint, UnresolvedReferenceLint,
};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the code model using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(DuplicateModelLint),
                Box::new(DuplicateOperationLint),
                Box::new(UnresolvedReferenceLint),
                Box::new(DiscriminatorLint),
                Box::new(EmptyDescriptionLint),
                Box::new(PagingItemLint),
                Box::new(UnbrandedLroLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Name and description of every lint, in run order.
    pub fn lints(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.lints.iter().map(|l| (l.name(), l.description()))
    }

    /// Run every lint and record diagnostics without failing.
    pub fn collect(&self, ctx: &mut CompilationContext) {
        for lint in &self.lints {
            let before = ctx.diagnostics.len();
            lint.check(&ctx.code_model, &ctx.settings, &mut ctx.diagnostics);
            tracing::trace!(
                lint = lint.name(),
                found = ctx.diagnostics.len() - before,
                "ran lint"
            );
        }
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check code model integrity and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        self.collect(ctx);

        // Fail if there are any errors (warnings are allowed)
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}
