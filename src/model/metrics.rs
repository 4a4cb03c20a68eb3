use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetrics {
    pub path: String,
    pub fan_in: usize,
    pub fan_out: usize,
    /// 0-100, lower is better.
    pub coupling_score: f64,
}

/// Cohesion of the modules sharing one directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCohesion {
    pub directory: String,
    pub modules: usize,
    pub related_pairs: usize,
    pub possible_pairs: usize,
    /// 0-100, higher is better.
    pub cohesion_score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub modules: Vec<ModuleMetrics>,
    pub groups: Vec<GroupCohesion>,
    /// Project cohesion, 0-100, higher is better.
    pub cohesion_score: f64,
    /// Mean module coupling, 0-100, lower is better.
    pub coupling_score: f64,
}

impl Metrics {
    pub fn for_module(&self, path: &str) -> Option<&ModuleMetrics> {
        self.modules.iter().find(|m| m.path == path)
    }
}
