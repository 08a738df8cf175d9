use std::path::Path;

use eyre::{Result, WrapErr, eyre};
use javagen_codegen::{
    CompilationContext,
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    pipeline::Analysis,
};
use javagen_codemodel::Settings;
use javagen_core::{File, GeneratedFile, WriteResult};
use javagen_ir::ClientModels;

use crate::{
    ast::JavaFile,
    postprocess::prune_imports,
    templates::{
        ClientBuilderTemplate, ClientTemplate, EnumTemplate, FluentInterfacesTemplate,
        FluentManagerTemplate, JsonMergePatchHelperTemplate, MethodGroupTemplate, ModelTemplate,
        ModuleInfoTemplate, MultipartFormDataHelperTemplate, PackageInfoTemplate, PomTemplate,
        ServiceClientTemplate, ServiceVersionTemplate, needs_multipart_helper,
    },
};

/// Java code generator rendering a mapped client model.
pub struct Generator<'a> {
    settings: &'a Settings,
    models: &'a ClientModels,
    analysis: &'a Analysis,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "java"
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        Ok(self
            .files()?
            .into_iter()
            .map(|file| PreviewFile {
                path: file.path().display().to_string(),
                content: file.content().to_string(),
            })
            .collect())
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();
        for file in self.files()? {
            let path = file.path().display().to_string();
            match file
                .write_to(output_dir)
                .wrap_err_with(|| format!("failed to write {path}"))?
            {
                WriteResult::Written => result.written.push(path),
                WriteResult::Skipped => result.skipped.push(path),
            }
        }
        tracing::info!(
            written = result.written.len(),
            skipped = result.skipped.len(),
            output = %output_dir.display(),
            "generated java sources"
        );
        Ok(result)
    }
}

impl<'a> Generator<'a> {
    pub fn new(settings: &'a Settings, models: &'a ClientModels, analysis: &'a Analysis) -> Self {
        Self {
            settings,
            models,
            analysis,
        }
    }

    /// Generator for the outcome of a pipeline run.
    pub fn from_context(ctx: &'a CompilationContext) -> Result<Self> {
        let models = ctx
            .client_models
            .as_ref()
            .ok_or_else(|| eyre!("client model not set - run the map phase first"))?;
        let analysis = ctx
            .analysis
            .as_ref()
            .ok_or_else(|| eyre!("analysis not set - run the analyze phase first"))?;
        Ok(Self::new(&ctx.settings, models, analysis))
    }

    /// Every output file, Java sources already cleaned up.
    pub fn files(&self) -> Result<Vec<File>> {
        let mut java = self.java_files()?;
        let mut files: Vec<File> = java
            .drain(..)
            .map(|file| File::new(file.path(), prune_imports(&file.render())))
            .collect();

        if self.settings.generator.generate_pom {
            let pom = PomTemplate::new(self.settings, self.library_title());
            files.push(
                File::new(pom.path(Path::new("")), pom.render()).with_rules(pom.rules()),
            );
        }

        tracing::debug!(files = files.len(), "rendered client model");
        Ok(files)
    }

    fn library_title(&self) -> String {
        self.settings
            .generator
            .service_name
            .clone()
            .or_else(|| {
                self.models
                    .service_clients
                    .first()
                    .map(|c| c.service_name.clone())
            })
            .unwrap_or_else(|| self.settings.namespace().to_string())
    }

    fn java_files(&self) -> Result<Vec<JavaFile>> {
        let settings = self.settings;
        let models = self.models;
        let mut files = Vec::new();

        for model in models.generated_models() {
            files.push(ModelTemplate::new(settings, models, model).render());
        }
        for enum_type in &models.enums {
            files.push(EnumTemplate::new(settings, enum_type).render());
        }

        for client in &models.service_clients {
            let span = tracing::debug_span!("client", name = %client.name);
            let _guard = span.enter();

            files.push(ServiceClientTemplate::new(settings, client).render()?);
            for group in &client.method_groups {
                files.push(MethodGroupTemplate::new(settings, client, group).render()?);
            }
            for facade in &client.clients {
                files.push(
                    ClientTemplate::new(settings, client, facade)
                        .render()
                        .wrap_err_with(|| format!("failed to render {}", facade.class_name))?,
                );
            }
            files.push(ClientBuilderTemplate::new(settings, client).render());
            if let Some(version) = &client.service_version {
                files.push(ServiceVersionTemplate::new(settings, version).render()?);
            }
            if settings.is_management() {
                files.extend(FluentInterfacesTemplate::new(settings, client).render());
            }
        }

        if let Some(manager) = &models.manager {
            let client = models
                .service_clients
                .first()
                .ok_or_else(|| eyre!("{} has no service client to wrap", manager.name))?;
            files.push(FluentManagerTemplate::new(settings, manager, client).render());
        }

        let helper = JsonMergePatchHelperTemplate::new(settings, models);
        if !helper.accessor_models().is_empty() {
            files.push(helper.render());
        }
        if needs_multipart_helper(models) {
            files.push(MultipartFormDataHelperTemplate::new(settings).render());
        }

        for package in &models.packages {
            files.push(PackageInfoTemplate::new(settings, package).render());
        }
        if settings.generator.generate_module_info {
            files.push(
                ModuleInfoTemplate::new(
                    settings,
                    &self.analysis.exported_packages,
                    &self.analysis.opened_packages,
                )
                .render(),
            );
        }

        Ok(files)
    }
}
