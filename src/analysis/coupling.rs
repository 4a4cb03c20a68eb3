use crate::analysis::DependencyGraph;
use crate::config::{MAX_SCORE, Thresholds};
use crate::model::ModuleMetrics;

/// Coupling score (0-100, lower is better) for a module with
/// `dependency_count` distinct internal dependencies.
///
/// Up to the high-dependency threshold the score grows linearly but stays
/// below the high-coupling cutoff. Past the threshold it starts at the cutoff
/// and saturates toward `MAX_SCORE`.
pub fn coupling_score(dependency_count: usize, thresholds: &Thresholds) -> f64 {
    let cutoff = thresholds.high_coupling.clamp(0.0, MAX_SCORE);
    let limit = thresholds.high_dependency_count as f64;
    let count = dependency_count as f64;

    let score = if dependency_count <= thresholds.high_dependency_count {
        cutoff * count / (limit + 1.0)
    } else {
        cutoff + (MAX_SCORE - cutoff) * (1.0 - limit / count)
    };

    score.clamp(0.0, MAX_SCORE)
}

pub fn is_high_coupling(score: f64, thresholds: &Thresholds) -> bool {
    score >= thresholds.high_coupling
}

pub fn module_metrics(graph: &DependencyGraph, thresholds: &Thresholds) -> Vec<ModuleMetrics> {
    graph
        .graph()
        .node_weights()
        .map(|path| {
            let fan_out = graph.fan_out(path);
            ModuleMetrics {
                path: path.clone(),
                fan_in: graph.fan_in(path),
                fan_out,
                coupling_score: coupling_score(fan_out, thresholds),
            }
        })
        .collect()
}
