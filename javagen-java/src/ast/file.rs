//! Java source files.

use std::collections::BTreeSet;

use javagen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::JavaJavadoc;

const SOURCE_ROOT: &str = "src/main/java";

/// A Java compilation unit: license header, package, imports and body.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaFile {
    path: String,
    header: Vec<String>,
    package_javadoc: Option<JavaJavadoc>,
    package: Option<String>,
    imports: BTreeSet<String>,
    body: Vec<Vec<CodeFragment>>,
}

impl JavaFile {
    /// The file declaring the top-level type `name` in `package`.
    pub fn new(package: &str, name: &str) -> Self {
        Self::at(
            format!("{SOURCE_ROOT}/{}/{name}.java", package.replace('.', "/")),
            Some(package.to_string()),
        )
    }

    /// `package-info.java` of `package`.
    pub fn package_info(package: &str) -> Self {
        Self::new(package, "package-info")
    }

    /// `module-info.java` at the source root.
    pub fn module_info() -> Self {
        Self::at(format!("{SOURCE_ROOT}/module-info.java"), None)
    }

    fn at(path: String, package: Option<String>) -> Self {
        Self {
            path,
            header: Vec::new(),
            package_javadoc: None,
            package,
            imports: BTreeSet::new(),
            body: Vec::new(),
        }
    }

    pub fn header(mut self, lines: Vec<String>) -> Self {
        self.header = lines;
        self
    }

    pub fn package_javadoc(mut self, javadoc: JavaJavadoc) -> Self {
        self.package_javadoc = Some(javadoc);
        self
    }

    pub fn imports(mut self, imports: impl IntoIterator<Item = String>) -> Self {
        self.imports.extend(imports);
        self
    }

    /// Add a top-level element (usually the single class of the file).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Path relative to the project root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether `import` is needed at all: types of `java.lang` and of the
    /// file's own package are visible without one.
    fn needs_import(&self, import: &str) -> bool {
        let Some((owner, _)) = import.rsplit_once('.') else {
            return false;
        };
        owner != "java.lang" && Some(owner) != self.package.as_deref()
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::java();

        for line in &self.header {
            builder.push_line(line);
        }
        if !self.header.is_empty() {
            builder.push_blank();
        }

        if let Some(javadoc) = &self.package_javadoc {
            builder.emit(javadoc);
        }
        if let Some(package) = &self.package {
            builder.push_line(&format!("package {package};"));
        }

        let imports: Vec<&String> = self
            .imports
            .iter()
            .filter(|i| self.needs_import(i))
            .collect();
        if !imports.is_empty() {
            if self.package.is_some() {
                builder.push_blank();
            }
            for import in imports {
                builder.push_line(&format!("import {import};"));
            }
        }

        for fragments in &self.body {
            builder.push_separator();
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{JavaClass, JavaModifiers};

    #[test]
    fn test_layout() {
        let file = JavaFile::new("com.petstore.models", "Pet")
            .header(vec!["// Licensed under the MIT License.".to_string()])
            .imports([
                "java.util.List".to_string(),
                "com.azure.json.JsonReader".to_string(),
                "java.lang.String".to_string(),
                "com.petstore.models.Tag".to_string(),
            ])
            .add(JavaClass::class(JavaModifiers::PUBLIC, "Pet"));

        assert_eq!(file.path(), "src/main/java/com/petstore/models/Pet.java");
        assert_eq!(
            file.render(),
            "// Licensed under the MIT License.\n\npackage com.petstore.models;\n\nimport com.azure.json.JsonReader;\nimport java.util.List;\n\npublic class Pet {\n}\n"
        );
    }

    #[test]
    fn test_module_info_has_no_package() {
        let file = JavaFile::module_info();
        assert_eq!(file.path(), "src/main/java/module-info.java");
        assert_eq!(file.render(), "");
    }
}
