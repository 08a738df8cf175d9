//! Per-file rendering state.

use std::collections::BTreeSet;

use javagen_codegen::{Runtime, RuntimeClass};
use javagen_codemodel::Settings;
use javagen_ir::{ClassType, IType};

use super::{JavaAnnotation, JavaFile};

/// Collects the imports of one Java file while its templates render.
///
/// Every type name handed out by the context has already been imported, so
/// templates never track imports by hand.
#[derive(Debug, Clone)]
pub struct JavaContext {
    package: String,
    runtime: Runtime,
    header: Vec<String>,
    imports: BTreeSet<String>,
}

impl JavaContext {
    pub fn new(settings: &Settings, package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            runtime: Runtime::new(settings.flavor()),
            header: settings.generator.license_header.lines(),
            imports: BTreeSet::new(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime
    }

    pub fn is_azure(&self) -> bool {
        self.runtime.is_azure()
    }

    pub fn import(&mut self, full_name: impl Into<String>) {
        self.imports.insert(full_name.into());
    }

    pub fn import_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(names.into_iter().map(Into::into));
    }

    /// Import `ty` and return its name as written in source.
    pub fn use_type(&mut self, ty: &IType) -> String {
        ty.add_imports_to(&mut self.imports);
        ty.simple_name()
    }

    /// Import `ty` along with whatever its JSON read and write calls need.
    pub fn use_json_type(&mut self, ty: &IType) -> String {
        ty.add_json_imports_to(&mut self.imports);
        ty.simple_name()
    }

    pub fn use_class(&mut self, class: &ClassType) -> String {
        self.use_type(&IType::Class(class.clone()))
    }

    /// Import a runtime class and return its simple name.
    pub fn runtime_class(&mut self, class: RuntimeClass) -> String {
        let class = self.runtime.class(class);
        self.imports.insert(class.full_name());
        class.name
    }

    /// The annotation marking generated members.
    pub fn generated(&mut self) -> JavaAnnotation {
        if self.is_azure() {
            JavaAnnotation::new(self.runtime_class(RuntimeClass::Generated))
        } else {
            self.runtime_class(RuntimeClass::Metadata);
            self.runtime_class(RuntimeClass::MetadataProperties);
            JavaAnnotation::raw(self.runtime.generated_annotation())
        }
    }

    /// A file in this context's package holding the class `name`.
    pub fn into_file(self, name: &str) -> JavaFile {
        JavaFile::new(&self.package, name)
            .header(self.header)
            .imports(self.imports)
    }
}

#[cfg(test)]
mod tests {
    use javagen_codemodel::Flavor;

    use super::*;

    #[test]
    fn test_runtime_class_imports() {
        let settings = Settings::for_namespace("com.petstore");
        let mut ctx = JavaContext::new(&settings, "com.petstore");
        assert_eq!(ctx.runtime_class(RuntimeClass::BinaryData), "BinaryData");
        assert_eq!(ctx.use_type(&IType::list(IType::uuid())), "List<UUID>");
        assert_eq!(ctx.generated().to_string(), "@Generated");

        let file = ctx.into_file("Thing").render();
        assert!(file.contains("import com.azure.core.util.BinaryData;"));
        assert!(file.contains("import java.util.UUID;"));
        assert!(file.contains("import com.azure.core.annotation.Generated;"));
    }

    #[test]
    fn test_unbranded_generated_annotation() {
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.flavor = Flavor::Unbranded;
        let mut ctx = JavaContext::new(&settings, "com.petstore");
        assert_eq!(
            ctx.generated().to_string(),
            "@Metadata(properties = { MetadataProperties.GENERATED })"
        );
    }
}
