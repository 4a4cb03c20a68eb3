mod cycle;
mod layer;
mod metrics;
mod module;
mod suggestion;

pub use cycle::{Cycle, CycleReport, CycleSeverity};
pub use layer::LayerViolation;
pub use metrics::{GroupCohesion, Metrics, ModuleMetrics};
pub use module::{DependencyEdge, EdgeKind, Import, Module};
pub use suggestion::{Priority, Suggestion};

use serde::{Deserialize, Serialize};

/// Headline counts for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_modules: usize,
    pub total_edges: usize,
    pub circular_dependencies: usize,
    /// Set when a cycle search cap stopped detection early.
    pub circular_may_be_incomplete: bool,
    pub layer_violations: usize,
    pub cohesion_score: f64,
    pub coupling_score: f64,
}

/// Everything one analysis run produced.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub project_name: String,
    pub summary: Summary,
    pub modules: Vec<Module>,
    pub edges: Vec<DependencyEdge>,
    pub cycles: CycleReport,
    pub layer_violations: Vec<LayerViolation>,
    pub metrics: Metrics,
    pub suggestions: Vec<Suggestion>,
    pub mermaid_graph: Option<String>,
}

impl AnalysisResult {
    pub fn module(&self, path: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.path == path)
    }

    pub fn has_issues(&self) -> bool {
        !self.cycles.is_empty() || !self.layer_violations.is_empty()
    }
}
