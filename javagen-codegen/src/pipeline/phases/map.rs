//! Map phase - maps the code model to the client model.

use eyre::{Result, WrapErr};

use crate::{
    mappers::map_client_models,
    pipeline::{CompilationContext, Phase},
};

/// Phase that maps the code model to the client model generators consume.
///
/// Reads the transformed code model when `TransformPhase` produced one.
pub struct MapPhase;

impl Phase for MapPhase {
    fn name(&self) -> &'static str {
        "map"
    }

    fn description(&self) -> &'static str {
        "Map the code model to the client model"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let (client_models, diagnostics) =
            map_client_models(ctx.effective_code_model(), &ctx.settings)
                .wrap_err("failed to map code model")?;

        ctx.diagnostics.extend(diagnostics);
        ctx.client_models = Some(client_models);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use javagen_codemodel::{CodeModel, Flavor, Settings};

    use super::*;
    use crate::pipeline::Severity;

    const SRC: &str = r#"
info:
  title: PetStore
schemas:
  objects:
    - name: Pet
      properties:
        - name: name
          schema: string
operation-groups:
  - name: Pets
    operations:
      - name: get
        request:
          method: get
          path: /pets/{name}
        responses:
          - status-codes: [200]
            schema: Pet
clients:
  - name: PetStoreClient
    security:
      kind: oauth2
      scopes: ["https://petstore/.default"]
"#;

    fn make_context(flavor: Flavor) -> CompilationContext {
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.flavor = flavor;
        CompilationContext::new(CodeModel::from_str(SRC).unwrap(), settings)
    }

    #[test]
    fn test_map_phase() {
        let mut ctx = make_context(Flavor::Azure);
        MapPhase.run(&mut ctx).unwrap();

        let client_models = ctx.client_models.as_ref().unwrap();
        assert!(client_models.model("Pet").is_some());
        assert_eq!(client_models.service_clients[0].name, "PetStoreClient");
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_mapper_warnings_are_recorded() {
        let mut ctx = make_context(Flavor::Unbranded);
        MapPhase.run(&mut ctx).unwrap();

        assert!(ctx.has_warnings());
        assert!(
            ctx.diagnostics
                .iter()
                .all(|d| d.phase == "map" && d.severity == Severity::Warning)
        );
    }
}
