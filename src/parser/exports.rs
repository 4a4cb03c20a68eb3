use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

pub const DEFAULT_EXPORT: &str = "default";

static NAMED_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*export\s+(?:declare\s+)?(?:async\s+)?(?:(?:const\s+enum|const|let|var|abstract\s+class|class|interface|type|enum|namespace)\s+|function\s*\*?\s*)([A-Za-z_$][\w$]*)"#,
    )
    .expect("named export regex")
});

static BRACED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*export\s+(?:type\s+)?\{([^}]*)\}"#).expect("braced export regex")
});

static DESTRUCTURED_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*export\s+(?:const|let|var)\s+\{([^}]*)\}\s*="#)
        .expect("destructured export regex")
});

static DEFAULT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*(?:export\s+default\b|module\.exports\s*=)"#)
        .expect("default export regex")
});

/// Export syntaxes recognized in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSyntax {
    /// `export function foo`, `export const bar`, `export class Baz`, ...
    Named,
    /// `export { a, b as c }`, `export { a } from './x'`, `export const { a } = obj`
    Destructured,
    /// `export default ...`, `module.exports = ...`
    Default,
}

impl ExportSyntax {
    pub const ALL: [ExportSyntax; 3] = [
        ExportSyntax::Named,
        ExportSyntax::Destructured,
        ExportSyntax::Default,
    ];

    pub fn extract(self, source: &str) -> Vec<String> {
        match self {
            ExportSyntax::Named => NAMED_DECLARATION
                .captures_iter(source)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .collect(),
            ExportSyntax::Destructured => {
                let braced = BRACED
                    .captures_iter(source)
                    .filter_map(|caps| caps.get(1))
                    .flat_map(|m| braced_names(m.as_str()));
                let declared = DESTRUCTURED_DECLARATION
                    .captures_iter(source)
                    .filter_map(|caps| caps.get(1))
                    .flat_map(|m| destructured_bindings(m.as_str()));
                braced.chain(declared).collect()
            }
            ExportSyntax::Default => {
                if DEFAULT_MARKER.is_match(source) {
                    vec![DEFAULT_EXPORT.to_string()]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

pub fn extract_exports(source: &str) -> BTreeSet<String> {
    ExportSyntax::ALL
        .iter()
        .flat_map(|syntax| syntax.extract(source))
        .collect()
}

/// `a, b as c, type D` -> `a`, `c`, `D`
fn braced_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .map(|item| item.strip_prefix("type ").unwrap_or(item).trim())
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once(" as ") {
            Some((_, alias)) => alias.trim().to_string(),
            None => item.to_string(),
        })
        .filter(|name| is_identifier(name))
        .collect()
}

/// `a, b: c, d = 1` -> `a`, `c`, `d`
fn destructured_bindings(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let binding = match item.split_once(':') {
                Some((_, local)) => local,
                None => item,
            };
            binding.split('=').next().unwrap_or(binding).trim().to_string()
        })
        .filter(|name| is_identifier(name))
        .collect()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
