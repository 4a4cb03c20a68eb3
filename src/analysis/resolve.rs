use crate::config::ResolutionSettings;
use crate::parser::SourceParser;
use path_clean::PathClean;
use std::collections::HashSet;
use std::path::PathBuf;

/// Specifiers that don't start with `.` or `/` name packages, not project files.
pub fn is_external(specifier: &str) -> bool {
    !(specifier.starts_with('.') || specifier.starts_with('/'))
}

/// Maps relative import specifiers onto scanned module paths.
pub struct Resolver<'a> {
    settings: &'a ResolutionSettings,
    parser: &'a SourceParser,
    known: &'a HashSet<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        settings: &'a ResolutionSettings,
        parser: &'a SourceParser,
        known: &'a HashSet<String>,
    ) -> Self {
        Self {
            settings,
            parser,
            known,
        }
    }

    /// The module `specifier` refers to when imported from `importer`, if it
    /// was scanned.
    pub fn resolve(&self, importer: &str, specifier: &str) -> Option<String> {
        if is_external(specifier) {
            return None;
        }

        self.candidates(importer, specifier)
            .into_iter()
            .find(|candidate| self.known.contains(candidate))
    }

    /// Every path `specifier` could name, most specific first.
    pub fn candidates(&self, importer: &str, specifier: &str) -> Vec<String> {
        let target = join_specifier(importer, specifier);
        let mut candidates = Vec::new();

        if let Some((stem, ext)) = split_extension(&target) {
            if self.parser.has_extension(ext) {
                candidates.push(target.clone());
            }
            if self
                .settings
                .substitute_extensions
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
            {
                for primary in &self.settings.primary_extensions {
                    candidates.push(format!("{}.{}", stem, primary));
                }
            }
        }

        let appended = self
            .settings
            .primary_extensions
            .iter()
            .chain(&self.settings.fallback_extensions);

        for ext in appended.clone() {
            candidates.push(format!("{}.{}", target, ext));
        }

        if self.settings.index_files {
            for ext in appended {
                candidates.push(if target.is_empty() {
                    format!("index.{}", ext)
                } else {
                    format!("{}/index.{}", target, ext)
                });
            }
        }

        let mut seen = HashSet::new();
        candidates.retain(|c| seen.insert(c.clone()));
        candidates
    }
}

/// Join `specifier` onto the importer's directory (or the project root for
/// `/`-rooted specifiers) and normalize to a `/`-separated relative path.
pub fn join_specifier(importer: &str, specifier: &str) -> String {
    let joined = if let Some(rooted) = specifier.strip_prefix('/') {
        PathBuf::from(rooted)
    } else {
        let dir = importer.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        PathBuf::from(dir).join(specifier)
    };

    let cleaned = joined.clean().to_string_lossy().replace('\\', "/");
    if cleaned == "." { String::new() } else { cleaned }
}

fn split_extension(path: &str) -> Option<(&str, &str)> {
    let file_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    let dot = path[file_start..].rfind('.')?;
    if dot == 0 {
        return None;
    }
    let dot = file_start + dot;
    Some((&path[..dot], &path[dot + 1..]))
}
