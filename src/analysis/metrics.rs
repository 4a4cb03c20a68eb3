use crate::analysis::DependencyGraph;
use crate::analysis::cohesion::{group_cohesion, project_cohesion};
use crate::analysis::coupling::module_metrics;
use crate::config::Thresholds;
use crate::model::{Metrics, Module};

/// Per-module coupling, per-directory cohesion and the two project scores.
pub fn compute_metrics(modules: &[Module], graph: &DependencyGraph, thresholds: &Thresholds) -> Metrics {
    let module_scores = module_metrics(graph, thresholds);
    let groups = group_cohesion(modules);

    let coupling_score = if module_scores.is_empty() {
        0.0
    } else {
        module_scores.iter().map(|m| m.coupling_score).sum::<f64>() / module_scores.len() as f64
    };

    Metrics {
        cohesion_score: project_cohesion(&groups),
        coupling_score,
        modules: module_scores,
        groups,
    }
}
