use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How a dependency was written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// `import ... from '...'`, `import '...'`, `export ... from '...'`
    Import,
    /// `require('...')`
    Require,
    /// `import('...')`
    Dynamic,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Import => write!(f, "import"),
            EdgeKind::Require => write!(f, "require"),
            EdgeKind::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// A raw import specifier exactly as written, tagged with its syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub specifier: String,
    pub kind: EdgeKind,
    /// Module path the specifier resolved to; `None` for packages and
    /// specifiers that match no scanned file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
}

impl Import {
    pub fn new(specifier: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            specifier: specifier.into(),
            kind,
            resolved: None,
        }
    }
}

/// One scanned source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Project-relative, `/`-separated path. Unique key.
    pub path: String,
    pub name: String,
    pub imports: Vec<Import>,
    pub exports: BTreeSet<String>,
    pub lines_of_code: usize,
    /// Imports that resolved to another scanned module, in discovery order.
    pub dependencies: Vec<String>,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = module_name(&path);

        Self {
            path,
            name,
            imports: Vec::new(),
            exports: BTreeSet::new(),
            lines_of_code: 0,
            dependencies: Vec::new(),
        }
    }

    pub fn depends_on(&self, path: &str) -> bool {
        self.dependencies.iter().any(|d| d == path)
    }

    /// Parent directory of the module, or `""` at the project root.
    pub fn directory(&self) -> &str {
        self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }
}

fn module_name(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// A resolved module-to-module dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}
