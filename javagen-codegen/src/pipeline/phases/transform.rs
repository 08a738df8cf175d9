//! Transform phase - reshapes the code model for management libraries.

use eyre::{Result, WrapErr};

use crate::{
    fluent,
    pipeline::{CompilationContext, Phase},
};

/// Phase that applies the management transforms to a copy of the code model.
///
/// Data-plane generation leaves the context untouched; mappers then read the
/// code model as loaded.
pub struct TransformPhase;

impl Phase for TransformPhase {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn description(&self) -> &'static str {
        "Apply management transforms to the code model"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        if !ctx.settings.is_management() {
            return Ok(());
        }

        let transformed = fluent::transform(&ctx.code_model, &ctx.settings)
            .wrap_err("failed to transform management code model")?;
        ctx.transformed = Some(transformed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use javagen_codemodel::{CodeModel, Mode, Settings};

    use super::*;

    const SRC: &str = r#"
schemas:
  objects:
    - name: Widget
    - name: Orphan
operation-groups:
  - name: Widgets
    operations:
      - name: get
        request:
          method: get
          path: /widgets
        responses:
          - status-codes: [200]
            schema: Widget
"#;

    fn make_context(mode: Mode) -> CompilationContext {
        let mut settings = Settings::for_namespace("com.contoso.widgets");
        settings.generator.mode = mode;
        CompilationContext::new(CodeModel::from_str(SRC).unwrap(), settings)
    }

    #[test]
    fn test_data_plane_is_untouched() {
        let mut ctx = make_context(Mode::DataPlane);
        TransformPhase.run(&mut ctx).unwrap();
        assert!(ctx.transformed.is_none());
    }

    #[test]
    fn test_management_transforms_a_copy() {
        let mut ctx = make_context(Mode::Management);
        TransformPhase.run(&mut ctx).unwrap();

        assert!(ctx.code_model.object("Orphan").is_some());
        assert!(ctx.effective_code_model().object("Orphan").is_none());
    }
}
