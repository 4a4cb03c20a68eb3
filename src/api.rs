//! Library API for modmap.
//!
//! These functions return `Result`s instead of printing and exiting, so the
//! analysis can be embedded in other tools.
//!
//! # Example
//!
//! ```no_run
//! use modmap::{analyze, AnalysisOptions};
//! use std::path::Path;
//!
//! let result = analyze(Path::new("."), AnalysisOptions::default())?;
//! println!("Found {} modules", result.modules.len());
//! for cycle in &result.cycles.cycles {
//!     println!("Cycle: {}", cycle.display_chain());
//! }
//! # Ok::<(), modmap::ModmapError>(())
//! ```

use crate::analysis::{AnalysisError, Analyzer, DependencyGraph, coupling_score, relative_path};
use crate::cancel::CancellationToken;
use crate::config::{CONFIG_FILE_NAME, Config, ConfigError, LayerPolicy};
use crate::model::{AnalysisResult, CycleReport, Module};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModmapError {
    /// The project path does not exist or is not a directory.
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// No scanned module matches the requested path.
    #[error("Module not found: {0}")]
    ModuleNotFound(String),
}

/// Per-call overrides layered over `.modmap.toml`.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Exclusion substrings; empty keeps the configured ones.
    pub exclude: Vec<String>,

    /// Directory levels below the root to scan.
    pub max_depth: Option<usize>,

    pub detect_circular: bool,

    /// Attach a Mermaid diagram to the result.
    pub generate_graph: bool,

    /// Replaces the configured layer policy when set.
    pub layers: Option<LayerPolicy>,

    pub cancellation: CancellationToken,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            max_depth: None,
            detect_circular: true,
            generate_graph: false,
            layers: None,
            cancellation: CancellationToken::new(),
        }
    }
}

/// A module together with its direct neighbors in the dependency graph.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    pub module: Module,
    pub dependencies: Vec<String>,
    pub dependents: Vec<String>,
    pub coupling_score: f64,
}

/// Run the full analysis over the project at `path`.
pub fn analyze(path: &Path, options: AnalysisOptions) -> Result<AnalysisResult, ModmapError> {
    let (root, config) = prepare(path, &options)?;

    let result = Analyzer::new(&root, &config)
        .with_cancellation(options.cancellation.clone())
        .detect_circular(options.detect_circular)
        .generate_graph(options.generate_graph)
        .run()?;

    Ok(result)
}

/// Look up one module and its direct dependencies and dependents.
///
/// `module` is a project-relative path (`src/app.ts`, `./src/app.ts`) or an
/// absolute path inside the project.
pub fn module_info(path: &Path, module: &str, options: AnalysisOptions) -> Result<ModuleInfo, ModmapError> {
    let (root, config) = prepare(path, &options)?;
    let wanted = normalize_module_path(&root, module);

    let modules = Analyzer::new(&root, &config)
        .with_cancellation(options.cancellation.clone())
        .scan()?;
    let graph = DependencyGraph::build(&modules);

    let found = modules
        .into_iter()
        .find(|m| m.path == wanted)
        .ok_or_else(|| ModmapError::ModuleNotFound(module.to_string()))?;

    let dependencies: Vec<String> = graph
        .dependencies_of(&found.path)
        .into_iter()
        .map(String::from)
        .collect();
    let dependents = graph
        .dependents_of(&found.path)
        .into_iter()
        .map(String::from)
        .collect();

    Ok(ModuleInfo {
        coupling_score: coupling_score(dependencies.len(), &config.thresholds),
        module: found,
        dependencies,
        dependents,
    })
}

/// Scan the project and report its dependency cycles.
pub fn find_circular_deps(path: &Path, options: AnalysisOptions) -> Result<CycleReport, ModmapError> {
    let (root, config) = prepare(path, &options)?;

    let report = Analyzer::new(&root, &config)
        .with_cancellation(options.cancellation.clone())
        .find_cycles()?;

    Ok(report)
}

/// Resolve the project root and fold `options` over its config file.
///
/// A config file that fails to parse is logged and replaced by the defaults;
/// only an unreadable one is an error.
pub fn prepare(path: &Path, options: &AnalysisOptions) -> Result<(PathBuf, Config), ModmapError> {
    let root = path
        .canonicalize()
        .map_err(|_| ModmapError::PathNotFound(path.to_path_buf()))?;
    if !root.is_dir() {
        return Err(ModmapError::PathNotFound(path.to_path_buf()));
    }

    let mut config = match Config::load(&root) {
        Ok(config) => config,
        Err(ConfigError::Parse(e)) => {
            tracing::warn!(error = %e, "ignoring malformed {CONFIG_FILE_NAME}, using defaults");
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    if !options.exclude.is_empty() {
        config.scan.exclude = options.exclude.clone();
    }
    if options.max_depth.is_some() {
        config.scan.max_depth = options.max_depth;
    }
    if let Some(layers) = &options.layers {
        config.layers = layers.clone();
    }

    Ok((root, config))
}

fn normalize_module_path(root: &Path, module: &str) -> String {
    let candidate = Path::new(module);
    let relative = if candidate.is_absolute() {
        relative_path(root, candidate)
    } else {
        module.replace('\\', "/")
    };

    let mut trimmed = relative.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.to_string()
}
