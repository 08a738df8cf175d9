//! `package-info.java` and `module-info.java`.

use javagen_codegen::Runtime;
use javagen_codegen::builder::{CodeFragment, Renderable};
use javagen_codemodel::Settings;
use javagen_ir::PackageInfo;

use crate::ast::{JavaFile, JavaJavadoc};

/// Renders the `package-info.java` of one package.
pub struct PackageInfoTemplate<'a> {
    settings: &'a Settings,
    package: &'a PackageInfo,
}

impl<'a> PackageInfoTemplate<'a> {
    pub fn new(settings: &'a Settings, package: &'a PackageInfo) -> Self {
        Self { settings, package }
    }

    pub fn render(&self) -> JavaFile {
        JavaFile::package_info(&self.package.name)
            .header(self.settings.generator.license_header.lines())
            .package_javadoc(JavaJavadoc::new(&self.package.description))
    }
}

/// The module declaration body.
struct ModuleDeclaration {
    name: String,
    requires: Vec<String>,
    exports: Vec<String>,
    opens: Vec<(String, String)>,
}

impl Renderable for ModuleDeclaration {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        body.extend(
            self.requires
                .iter()
                .map(|module| CodeFragment::Line(format!("requires transitive {module};"))),
        );
        if !self.exports.is_empty() {
            body.push(CodeFragment::Blank);
            body.extend(
                self.exports
                    .iter()
                    .map(|package| CodeFragment::Line(format!("exports {package};"))),
            );
        }
        if !self.opens.is_empty() {
            body.push(CodeFragment::Blank);
            body.extend(self.opens.iter().map(|(package, module)| {
                CodeFragment::Line(format!("opens {package} to {module};"))
            }));
        }
        vec![CodeFragment::block(
            format!("module {} {{", self.name),
            body,
            Some("}".to_string()),
        )]
    }
}

/// Renders `module-info.java`: the library requires the runtime module,
/// exports its public packages and opens its models packages to the runtime.
pub struct ModuleInfoTemplate<'a> {
    settings: &'a Settings,
    exported: &'a [String],
    opened: &'a [String],
}

impl<'a> ModuleInfoTemplate<'a> {
    pub fn new(settings: &'a Settings, exported: &'a [String], opened: &'a [String]) -> Self {
        Self {
            settings,
            exported,
            opened,
        }
    }

    pub fn render(&self) -> JavaFile {
        let runtime = Runtime::new(self.settings.flavor());
        let mut requires = vec![runtime.core_module().to_string()];
        if self.settings.is_management() {
            requires.push("com.azure.core.management".to_string());
        }
        let reflection = runtime.reflection_module();

        JavaFile::module_info()
            .header(self.settings.generator.license_header.lines())
            .add(ModuleDeclaration {
                name: self.settings.namespace().to_string(),
                requires,
                exports: self.exported.to_vec(),
                opens: self
                    .opened
                    .iter()
                    .map(|package| (package.clone(), reflection.to_string()))
                    .collect(),
            })
    }
}
