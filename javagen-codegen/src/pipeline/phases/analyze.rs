//! Analyze phase - computes package and summary data from the client model.

use eyre::{Result, eyre};
use javagen_ir::ClientModels;

use crate::pipeline::{Analysis, CompilationContext, Phase};

/// Phase that computes package and summary data from the client model.
///
/// This phase must run after `MapPhase` as it requires the client model to be
/// populated.
pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Compute package and summary data from the client model"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let client_models = ctx
            .client_models
            .as_ref()
            .ok_or_else(|| eyre!("client model not set - AnalyzePhase must run after MapPhase"))?;

        ctx.analysis = Some(analyze(client_models));
        Ok(())
    }
}

fn analyze(client_models: &ClientModels) -> Analysis {
    let mut packages: Vec<String> = client_models
        .packages
        .iter()
        .map(|p| p.name.clone())
        .collect();
    packages.sort();
    packages.dedup();

    let exported_packages = packages
        .iter()
        .filter(|p| !p.contains(".implementation"))
        .cloned()
        .collect();
    // Models are serialized reflectively by the runtime.
    let opened_packages = packages
        .iter()
        .filter(|p| p.ends_with(".models"))
        .cloned()
        .collect();

    Analysis {
        exported_packages,
        opened_packages,
        merge_patch_models: client_models.merge_patch_models.clone(),
        model_count: client_models.generated_models().count(),
        enum_count: client_models.enums.len(),
        client_count: client_models.service_clients.len(),
        method_count: client_models
            .service_clients
            .iter()
            .map(|c| c.all_client_methods().count())
            .sum(),
        packages,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use javagen_codemodel::{CodeModel, Settings};

    use super::*;
    use crate::pipeline::phases::MapPhase;

    const SRC: &str = r#"
schemas:
  objects:
    - name: Pet
      usage: [output]
    - name: PetPatch
      usage: [input, json-merge-patch]
operation-groups:
  - name: Pets
    operations:
      - name: get
        request:
          method: get
          path: /pets
        responses:
          - status-codes: [200]
            schema: Pet
clients:
  - name: PetStoreClient
"#;

    fn make_context() -> CompilationContext {
        CompilationContext::new(
            CodeModel::from_str(SRC).expect("code model should parse"),
            Settings::for_namespace("com.petstore"),
        )
    }

    #[test]
    fn test_analyze_phase() {
        let mut ctx = make_context();
        MapPhase.run(&mut ctx).expect("map should succeed");
        AnalyzePhase.run(&mut ctx).expect("analyze should succeed");

        let analysis = ctx.analysis.as_ref().unwrap();
        assert_eq!(
            analysis.packages,
            vec![
                "com.petstore",
                "com.petstore.implementation",
                "com.petstore.models"
            ]
        );
        assert_eq!(analysis.exported_packages, vec!["com.petstore", "com.petstore.models"]);
        assert_eq!(analysis.opened_packages, vec!["com.petstore.models"]);
        assert_eq!(analysis.merge_patch_models, vec!["PetPatch"]);
        assert_eq!(analysis.model_count, 2);
        assert_eq!(analysis.client_count, 1);
        assert_eq!(analysis.method_count, 2);
    }

    #[test]
    fn test_analyze_phase_requires_client_model() {
        let mut ctx = make_context();
        let result = AnalyzePhase.run(&mut ctx);
        assert!(result.is_err());
    }
}
