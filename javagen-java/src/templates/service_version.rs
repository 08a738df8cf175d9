//! Service version enums.

use eyre::{Result, eyre};
use javagen_codegen::RuntimeClass;
use javagen_codemodel::Settings;
use javagen_ir::ServiceVersion;

use crate::ast::{
    JavaAnnotation, JavaBlock, JavaClass, JavaContext, JavaEnumConstant, JavaField, JavaFile,
    JavaJavadoc, JavaMethod, JavaModifiers,
};

pub struct ServiceVersionTemplate<'a> {
    settings: &'a Settings,
    version: &'a ServiceVersion,
}

impl<'a> ServiceVersionTemplate<'a> {
    pub fn new(settings: &'a Settings, version: &'a ServiceVersion) -> Self {
        Self { settings, version }
    }

    pub fn render(&self) -> Result<JavaFile> {
        let version = self.version;
        let latest = version
            .latest()
            .ok_or_else(|| eyre!("service version '{}' declares no versions", version.class_name))?;
        let mut ctx = JavaContext::new(self.settings, &version.package);
        let service_version = ctx.runtime_class(RuntimeClass::ServiceVersion);

        let mut class = JavaClass::enumeration(JavaModifiers::PUBLIC, &version.class_name)
            .javadoc(JavaJavadoc::new(format!(
                "Service version of {}.",
                version.service_name
            )))
            .implements(service_version);
        for entry in &version.versions {
            class = class.constant(JavaEnumConstant {
                javadoc: Some(JavaJavadoc::new(format!(
                    "Enum value {}.",
                    entry.value
                ))),
                annotations: Vec::new(),
                text: format!("{}(\"{}\")", entry.constant, entry.value),
            });
        }

        class = class
            .field(JavaField::new(
                JavaModifiers::PRIVATE | JavaModifiers::FINAL,
                "String",
                "version",
            ))
            .method(
                JavaMethod::constructor(JavaModifiers::NONE, &version.class_name)
                    .param("String version")
                    .body(JavaBlock::new().line("this.version = version;")),
            )
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC, "String", "getVersion")
                    .javadoc(JavaJavadoc::new("{@inheritDoc}"))
                    .annotate(JavaAnnotation::overrides())
                    .body(JavaBlock::new().line("return this.version;")),
            )
            .method(
                JavaMethod::new(
                    JavaModifiers::PUBLIC | JavaModifiers::STATIC,
                    &version.class_name,
                    "getLatest",
                )
                .javadoc(
                    JavaJavadoc::new("Gets the latest service version supported by this client library.")
                        .returns(format!("The latest {{@link {}}}.", version.class_name)),
                )
                .body(JavaBlock::new().line(format!("return {};", latest.constant))),
            );

        Ok(ctx.into_file(&version.class_name).add(class))
    }
}

#[cfg(test)]
mod tests {
    use javagen_codemodel::Flavor;
    use javagen_ir::ServiceVersionEntry;

    use super::*;

    fn versions(values: &[&str]) -> ServiceVersion {
        ServiceVersion {
            class_name: "PetStoreServiceVersion".into(),
            package: "com.petstore".into(),
            service_name: "PetStore".into(),
            versions: values
                .iter()
                .map(|v| ServiceVersionEntry {
                    constant: format!("V{}", v.replace('-', "_")),
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_service_version_enum() {
        let settings = Settings::for_namespace("com.petstore");
        let version = versions(&["2023-01-01", "2024-01-01"]);
        let java = ServiceVersionTemplate::new(&settings, &version)
            .render()
            .unwrap()
            .render();

        assert!(java.contains("import com.azure.core.util.ServiceVersion;"));
        assert!(java.contains("public enum PetStoreServiceVersion implements ServiceVersion {"));
        assert!(java.contains("    V2023_01_01(\"2023-01-01\"),\n"));
        assert!(java.contains("    V2024_01_01(\"2024-01-01\");\n"));
        assert!(java.contains("    public static PetStoreServiceVersion getLatest() {\n        return V2024_01_01;\n    }"));
    }

    #[test]
    fn test_unbranded_service_version() {
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.flavor = Flavor::Unbranded;
        let version = versions(&["v1"]);
        let java = ServiceVersionTemplate::new(&settings, &version)
            .render()
            .unwrap()
            .render();
        assert!(java.contains("import io.clientcore.core.utils.ServiceVersion;"));
    }

    #[test]
    fn test_empty_versions() {
        let settings = Settings::for_namespace("com.petstore");
        let version = versions(&[]);
        assert!(ServiceVersionTemplate::new(&settings, &version).render().is_err());
    }
}
