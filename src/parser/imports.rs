use crate::model::{EdgeKind, Import};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static STATIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+(?:type\s+)?(?:[\w$*{}\s,]+?\s+from\s*)?['"]([^'"\n]+)['"]"#)
        .expect("static import regex")
});

static REEXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*export\s+(?:type\s+)?(?:\*(?:\s+as\s+[\w$]+)?|\{[^}]*\})\s*from\s*['"]([^'"\n]+)['"]"#,
    )
    .expect("re-export regex")
});

static DYNAMIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#).expect("dynamic import regex")
});

static REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\brequire\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#).expect("require regex")
});

/// Import syntaxes recognized in source text, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSyntax {
    /// `import x from 'y'`, `import 'y'`, `export { a } from 'y'`
    Static,
    /// `import('y')`
    Dynamic,
    /// `require('y')`
    Require,
}

impl ImportSyntax {
    pub const ALL: [ImportSyntax; 3] = [
        ImportSyntax::Static,
        ImportSyntax::Dynamic,
        ImportSyntax::Require,
    ];

    pub fn kind(self) -> EdgeKind {
        match self {
            ImportSyntax::Static => EdgeKind::Import,
            ImportSyntax::Dynamic => EdgeKind::Dynamic,
            ImportSyntax::Require => EdgeKind::Require,
        }
    }

    /// Specifiers written with this syntax, in source order.
    pub fn extract(self, source: &str) -> Vec<String> {
        let patterns: &[&Regex] = match self {
            ImportSyntax::Static => &[&STATIC_IMPORT, &REEXPORT],
            ImportSyntax::Dynamic => &[&DYNAMIC_IMPORT],
            ImportSyntax::Require => &[&REQUIRE],
        };

        let mut found: Vec<(usize, String)> = patterns
            .iter()
            .flat_map(|re| re.captures_iter(source))
            .filter_map(|caps| caps.get(1))
            .map(|m| (m.start(), m.as_str().trim().to_string()))
            .filter(|(_, spec)| !spec.is_empty())
            .collect();
        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, spec)| spec).collect()
    }
}

/// Run every import syntax over `source`, keeping the first occurrence of each
/// specifier.
pub fn extract_imports(source: &str) -> Vec<Import> {
    let mut seen = HashSet::new();
    let mut imports = Vec::new();

    for syntax in ImportSyntax::ALL {
        for specifier in syntax.extract(source) {
            if seen.insert(specifier.clone()) {
                imports.push(Import::new(specifier, syntax.kind()));
            }
        }
    }

    imports
}
