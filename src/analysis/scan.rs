use crate::analysis::AnalysisError;
use crate::analysis::resolve::{Resolver, is_external};
use crate::cancel::CancellationToken;
use crate::config::{Config, ScanSettings};
use crate::fs::FileSystem;
use crate::model::Module;
use crate::parser::{ParsedSource, SourceParser};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Source files under `root`, in walk order. Directories whose relative path
/// contains an excluded pattern are pruned without being entered.
pub fn discover_sources(
    root: &Path,
    settings: &ScanSettings,
    parser: &SourceParser,
) -> Result<Vec<PathBuf>, AnalysisError> {
    let exclude: Vec<String> = settings
        .exclude
        .iter()
        .filter(|pattern| !pattern.is_empty())
        .cloned()
        .collect();
    let filter_root = root.to_path_buf();

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        // Depth 0 is the root itself.
        .max_depth(settings.max_depth.map(|depth| depth + 1))
        .filter_entry(move |entry| {
            let relative = relative_path(&filter_root, entry.path());
            !exclude.iter().any(|pattern| relative.contains(pattern.as_str()))
        });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if is_file && parser.is_source_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "discovered source files");
    Ok(files)
}

/// Scan, parse and resolve every source module under `root`.
///
/// Files are read in parallel through `fs`. The first unreadable file aborts
/// the scan. Modules come back sorted by path with `dependencies` filled in.
pub fn scan_modules(
    root: &Path,
    config: &Config,
    fs: &dyn FileSystem,
    cancel: &CancellationToken,
) -> Result<Vec<Module>, AnalysisError> {
    let parser = SourceParser::new(&config.scan.extensions);
    let files = discover_sources(root, &config.scan, &parser)?;

    let mut parsed: Vec<(String, ParsedSource)> = files
        .par_iter()
        .map(|file| {
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }
            let source = fs.read_source(file)?;
            Ok((relative_path(root, file), parser.parse(&source)))
        })
        .collect::<Result<_, _>>()?;

    parsed.sort_by(|a, b| a.0.cmp(&b.0));

    let known: HashSet<String> = parsed.iter().map(|(path, _)| path.clone()).collect();
    let resolver = Resolver::new(&config.resolution, &parser, &known);

    let modules = parsed
        .into_iter()
        .map(|(path, source)| build_module(path, source, &resolver))
        .collect();

    Ok(modules)
}

fn build_module(path: String, source: ParsedSource, resolver: &Resolver<'_>) -> Module {
    let mut module = Module::new(path);
    module.exports = source.exports;
    module.lines_of_code = source.lines_of_code;

    for mut import in source.imports {
        import.resolved = resolver.resolve(&module.path, &import.specifier);
        match &import.resolved {
            Some(target) => {
                if !module.depends_on(target) {
                    module.dependencies.push(target.clone());
                }
            }
            None if !is_external(&import.specifier) => {
                tracing::debug!(
                    module = %module.path,
                    specifier = %import.specifier,
                    "unresolved internal import"
                );
            }
            None => {}
        }
        module.imports.push(import);
    }

    module
}

/// `path` relative to `root`, `/`-separated.
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{RealFs, mock::MockFs};
    use crate::model::EdgeKind;
    use std::fs;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        dir
    }

    fn scan(dir: &TempDir, config: &Config) -> Vec<Module> {
        scan_modules(dir.path(), config, &RealFs, &CancellationToken::new()).unwrap()
    }

    fn paths(modules: &[Module]) -> Vec<&str> {
        modules.iter().map(|m| m.path.as_str()).collect()
    }

    #[test]
    fn test_filters_by_extension_and_sorts() {
        let dir = project(&[
            ("src/b.ts", ""),
            ("src/a.tsx", ""),
            ("src/z/c.js", ""),
            ("src/a-b.mjs", ""),
            ("README.md", "# readme"),
            ("src/styles.css", ""),
        ]);
        let modules = scan(&dir, &Config::default());
        assert_eq!(paths(&modules), vec!["src/a-b.mjs", "src/a.tsx", "src/b.ts", "src/z/c.js"]);
    }

    #[test]
    fn test_default_exclusions() {
        let dir = project(&[
            ("src/index.ts", ""),
            ("node_modules/react/index.js", ""),
            ("dist/index.js", ""),
            ("coverage/lcov.js", ""),
        ]);
        assert_eq!(paths(&scan(&dir, &Config::default())), vec!["src/index.ts"]);
    }

    #[test]
    fn test_exclusion_is_substring_match() {
        let dir = project(&[("src/app.ts", ""), ("src/generated-api/client.ts", "")]);
        let mut config = Config::default();
        config.scan.exclude = vec!["generated".to_string(), String::new()];
        assert_eq!(paths(&scan(&dir, &config)), vec!["src/app.ts"]);
    }

    #[test]
    fn test_max_depth() {
        let dir = project(&[("root.ts", ""), ("src/one.ts", ""), ("src/deep/two.ts", "")]);
        let mut config = Config::default();
        config.scan.max_depth = Some(1);
        assert_eq!(paths(&scan(&dir, &config)), vec!["root.ts", "src/one.ts"]);
    }

    #[test]
    fn test_resolves_dependencies() {
        let dir = project(&[
            ("src/app.ts", "import { helper } from './util';\nimport React from 'react';\nconst x = require('./missing');\n"),
            ("src/util.ts", "export function helper() {}\nexport default helper;\n"),
        ]);
        let modules = scan(&dir, &Config::default());
        let app = &modules[0];

        assert_eq!(app.dependencies, vec!["src/util.ts"]);
        assert_eq!(app.imports.len(), 3);
        assert_eq!(app.imports[0].resolved.as_deref(), Some("src/util.ts"));
        assert_eq!(app.imports[2].specifier, "./missing");
        assert_eq!(app.imports[2].kind, EdgeKind::Require);
        assert!(app.imports[2].resolved.is_none());

        let util = &modules[1];
        assert!(util.exports.contains("helper"));
        assert!(util.exports.contains("default"));
        assert_eq!(util.lines_of_code, 2);
    }

    #[test]
    fn test_read_failure_aborts_scan() {
        let dir = project(&[("a.ts", "")]);
        let result = scan_modules(dir.path(), &Config::default(), &MockFs::new(), &CancellationToken::new());
        assert!(matches!(result, Err(AnalysisError::Io(_))));
    }

    #[test]
    fn test_reads_through_filesystem() {
        let dir = project(&[("a.ts", ""), ("b.ts", "")]);
        let fs = MockFs::with_files([
            (dir.path().join("a.ts"), "import './b';"),
            (dir.path().join("b.ts"), "import './a';"),
        ]);
        let modules = scan_modules(dir.path(), &Config::default(), &fs, &CancellationToken::new()).unwrap();
        assert_eq!(modules[0].dependencies, vec!["b.ts"]);
        assert_eq!(modules[1].dependencies, vec!["a.ts"]);
    }

    #[test]
    fn test_cancelled_scan() {
        let dir = project(&[("a.ts", "")]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = scan_modules(dir.path(), &Config::default(), &RealFs, &cancel);
        assert!(matches!(result, Err(AnalysisError::Cancelled)));
    }
}
