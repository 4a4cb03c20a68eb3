use crate::model::{DependencyEdge, EdgeKind, Module};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Directed module graph. Parallel edges (the same pair imported through
/// several specifiers) are kept; the set-based views collapse them.
pub struct DependencyGraph {
    graph: DiGraph<String, EdgeKind>,
    node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn build(modules: &[Module]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for module in modules {
            let idx = graph.add_node(module.path.clone());
            node_indices.insert(module.path.clone(), idx);
        }

        for module in modules {
            let from_idx = node_indices[&module.path];

            for import in &module.imports {
                let Some(target) = &import.resolved else {
                    continue;
                };
                if let Some(&to_idx) = node_indices.get(target) {
                    graph.add_edge(from_idx, to_idx, import.kind);
                }
            }
        }

        Self {
            graph,
            node_indices,
        }
    }

    pub fn graph(&self) -> &DiGraph<String, EdgeKind> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Raw edge count, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.node_indices.contains_key(path)
    }

    pub fn edges(&self) -> Vec<DependencyEdge> {
        self.graph
            .edge_references()
            .map(|e| DependencyEdge {
                from: self.graph[e.source()].clone(),
                to: self.graph[e.target()].clone(),
                kind: *e.weight(),
            })
            .collect()
    }

    /// Distinct `(from, to)` pairs in sorted order.
    pub fn unique_edges(&self) -> BTreeSet<(&str, &str)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].as_str(),
                    self.graph[e.target()].as_str(),
                )
            })
            .collect()
    }

    /// Every module mapped to its sorted, distinct dependencies.
    pub fn adjacency(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut adjacency: BTreeMap<&str, Vec<&str>> = self
            .graph
            .node_weights()
            .map(|path| (path.as_str(), Vec::new()))
            .collect();

        for (from, to) in self.unique_edges() {
            if let Some(successors) = adjacency.get_mut(from) {
                successors.push(to);
            }
        }

        adjacency
    }

    /// Distinct modules `path` imports, sorted.
    pub fn dependencies_of(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Outgoing)
    }

    /// Distinct modules importing `path`, sorted.
    pub fn dependents_of(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Incoming)
    }

    pub fn fan_in(&self, path: &str) -> usize {
        self.dependents_of(path).len()
    }

    pub fn fan_out(&self, path: &str) -> usize {
        self.dependencies_of(path).len()
    }

    fn neighbors(&self, path: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(path) else {
            return Vec::new();
        };

        let unique: BTreeSet<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].as_str())
            .collect();
        unique.into_iter().collect()
    }
}
