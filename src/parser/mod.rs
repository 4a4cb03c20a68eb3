mod exports;
mod imports;

use crate::model::Import;
use std::collections::BTreeSet;
use std::path::Path;

pub use exports::{DEFAULT_EXPORT, ExportSyntax, extract_exports};
pub use imports::{ImportSyntax, extract_imports};

/// What one source file declares, before its imports are resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSource {
    pub imports: Vec<Import>,
    pub exports: BTreeSet<String>,
    pub lines_of_code: usize,
}

/// Recognizes source files by extension and extracts their declarations.
#[derive(Debug, Clone)]
pub struct SourceParser {
    extensions: Vec<String>,
}

impl SourceParser {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.has_extension(ext))
    }

    pub fn has_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn parse(&self, source: &str) -> ParsedSource {
        let code = strip_comments(source);

        ParsedSource {
            imports: extract_imports(&code),
            exports: extract_exports(&code),
            lines_of_code: count_lines_of_code(source),
        }
    }
}

pub fn count_lines_of_code(source: &str) -> usize {
    source.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Blank out `//` and `/* */` comments while leaving string literals and line
/// structure intact, so commented-out imports are not picked up.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q || (c == '\n' && q != '`') {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' | '`' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}
