//! Text clean-up applied to generated Java sources.

use std::collections::{BTreeSet, HashSet};

fn is_import(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("import ") && line.ends_with(';')
}

/// Every identifier-like token of `lines`.
fn identifiers<'a>(lines: impl Iterator<Item = &'a str>) -> HashSet<&'a str> {
    let mut found = HashSet::new();
    for line in lines {
        let mut start = None;
        for (i, c) in line.char_indices() {
            let part_of_ident = c.is_alphanumeric() || c == '_' || c == '$';
            match (start, part_of_ident) {
                (None, true) => start = Some(i),
                (Some(s), false) => {
                    found.insert(&line[s..i]);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            found.insert(&line[s..]);
        }
    }
    found
}

/// Drop imports that the file does not use.
///
/// An import is kept when its simple name appears as an identifier outside
/// the import block (a `{@link X}` in javadoc counts). Duplicates, `java.lang`
/// types and types of the file's own package are dropped. Surviving imports
/// are sorted.
pub fn prune_imports(source: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let Some(first) = lines.iter().position(|l| is_import(l)) else {
        return source.to_string();
    };
    let last = lines.iter().rposition(|l| is_import(l)).unwrap_or(first);

    let package = lines.iter().find_map(|l| {
        l.trim()
            .strip_prefix("package ")
            .and_then(|p| p.strip_suffix(';'))
            .map(str::trim)
    });
    let used = identifiers(
        lines[..first]
            .iter()
            .chain(&lines[last + 1..])
            .copied(),
    );

    let mut kept = BTreeSet::new();
    for line in &lines[first..=last] {
        if !is_import(line) {
            continue;
        }
        let statement = line.trim().trim_start_matches("import ").trim_end_matches(';');
        let (is_static, name) = match statement.strip_prefix("static ") {
            Some(rest) => (true, rest.trim()),
            None => (false, statement.trim()),
        };
        let Some((owner, simple)) = name.rsplit_once('.') else {
            continue;
        };
        if !is_static && (owner == "java.lang" || Some(owner) == package) {
            continue;
        }
        if simple == "*" || used.contains(simple) {
            let prefix = if is_static { "import static" } else { "import" };
            kept.insert(format!("{prefix} {name};"));
        }
    }

    let mut rest = &lines[last + 1..];
    if kept.is_empty() && rest.first().is_some_and(|l| l.trim().is_empty()) {
        rest = &rest[1..];
    }

    let mut out: Vec<String> = lines[..first].iter().map(|l| l.to_string()).collect();
    out.extend(kept);
    out.extend(rest.iter().map(|l| l.to_string()));

    let mut text = out.join("\n");
    if source.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_unused_and_duplicate_imports() {
        let source = "package com.petstore;\n\nimport java.util.Map;\nimport java.util.List;\nimport java.util.List;\nimport java.lang.String;\nimport com.petstore.Other;\n\npublic final class Pet {\n    private List<String> tags;\n}\n";
        assert_eq!(
            prune_imports(source),
            "package com.petstore;\n\nimport java.util.List;\n\npublic final class Pet {\n    private List<String> tags;\n}\n"
        );
    }

    #[test]
    fn test_javadoc_link_counts_as_use() {
        let source = "package com.petstore;\n\nimport com.azure.core.util.BinaryData;\n\n/**\n * Returns {@link BinaryData}.\n */\npublic interface Pets {\n}\n";
        assert_eq!(prune_imports(source), source);
    }

    #[test]
    fn test_removing_every_import_collapses_the_block() {
        let source = "package com.petstore;\n\nimport java.util.Map;\n\npublic final class Pet {\n}\n";
        assert_eq!(
            prune_imports(source),
            "package com.petstore;\n\npublic final class Pet {\n}\n"
        );
    }

    #[test]
    fn test_identifier_prefix_is_not_a_use() {
        let source = "package p;\n\nimport a.Pet;\n\nclass PetStore {\n}\n";
        assert_eq!(prune_imports(source), "package p;\n\nclass PetStore {\n}\n");
    }

    #[test]
    fn test_without_imports_is_unchanged() {
        let source = "package p;\n\nclass A {\n}\n";
        assert_eq!(prune_imports(source), source);
    }
}
