mod circular;
mod cohesion;
mod coupling;
pub(crate) mod graph;
mod layers;
mod metrics;
mod resolve;
mod scan;
mod suggest;

pub use circular::detect_circular_dependencies;
pub use cohesion::{group_cohesion, is_low_cohesion, project_cohesion};
pub use coupling::{coupling_score, is_high_coupling, module_metrics};
pub use graph::DependencyGraph;
pub use layers::{LayerClassifier, detect_layer_violations};
pub use metrics::compute_metrics;
pub use resolve::{Resolver, is_external, join_specifier};
pub use scan::{discover_sources, relative_path, scan_modules};
pub use suggest::suggest;

use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::fs::{FileSystem, FsError, default_fs};
use crate::model::{AnalysisResult, CycleReport, Summary};
use crate::output::render_mermaid;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Io(#[from] FsError),

    #[error("Failed to walk project tree: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Analysis was cancelled")]
    Cancelled,
}

/// One analysis run over a project directory.
///
/// ```no_run
/// use modmap::analysis::Analyzer;
/// use modmap::Config;
/// use std::path::Path;
///
/// let config = Config::default();
/// let result = Analyzer::new(Path::new("."), &config).generate_graph(true).run()?;
/// println!("{} modules", result.summary.total_modules);
/// # Ok::<(), modmap::analysis::AnalysisError>(())
/// ```
pub struct Analyzer<'a> {
    root: &'a Path,
    config: &'a Config,
    fs: &'a dyn FileSystem,
    cancel: CancellationToken,
    detect_circular: bool,
    generate_graph: bool,
}

impl<'a> Analyzer<'a> {
    pub fn new(root: &'a Path, config: &'a Config) -> Self {
        Self {
            root,
            config,
            fs: default_fs(),
            cancel: CancellationToken::new(),
            detect_circular: true,
            generate_graph: false,
        }
    }

    pub fn with_fs(mut self, fs: &'a dyn FileSystem) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn detect_circular(mut self, enabled: bool) -> Self {
        self.detect_circular = enabled;
        self
    }

    pub fn generate_graph(mut self, enabled: bool) -> Self {
        self.generate_graph = enabled;
        self
    }

    /// Scan and resolve modules without running any detector.
    pub fn scan(&self) -> Result<Vec<crate::model::Module>, AnalysisError> {
        scan_modules(self.root, self.config, self.fs, &self.cancel)
    }

    /// Scan and report cycles only.
    pub fn find_cycles(&self) -> Result<CycleReport, AnalysisError> {
        let modules = self.scan()?;
        let graph = DependencyGraph::build(&modules);
        detect_circular_dependencies(&graph, &self.config.thresholds, &self.cancel)
    }

    pub fn run(&self) -> Result<AnalysisResult, AnalysisError> {
        let thresholds = &self.config.thresholds;

        let modules = self.scan()?;
        let graph = DependencyGraph::build(&modules);

        let cycles = if self.detect_circular {
            detect_circular_dependencies(&graph, thresholds, &self.cancel)?
        } else {
            CycleReport::default()
        };

        let layer_violations = detect_layer_violations(&graph, &self.config.layers);
        let metrics = compute_metrics(&modules, &graph, thresholds);
        let suggestions = suggest(&cycles, &layer_violations, &metrics, thresholds);
        let mermaid_graph = self
            .generate_graph
            .then(|| render_mermaid(&graph, &cycles, thresholds.max_graph_edges));

        let summary = Summary {
            total_modules: graph.node_count(),
            total_edges: graph.edge_count(),
            circular_dependencies: cycles.len(),
            circular_may_be_incomplete: cycles.incomplete,
            layer_violations: layer_violations.len(),
            cohesion_score: metrics.cohesion_score,
            coupling_score: metrics.coupling_score,
        };

        tracing::info!(
            modules = summary.total_modules,
            edges = summary.total_edges,
            cycles = summary.circular_dependencies,
            violations = summary.layer_violations,
            "analysis complete"
        );

        Ok(AnalysisResult {
            project_name: project_name(self.root),
            summary,
            edges: graph.edges(),
            modules,
            cycles,
            layer_violations,
            metrics,
            suggestions,
            mermaid_graph,
        })
    }
}

fn project_name(root: &Path) -> String {
    root.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("project")
        .to_string()
}
