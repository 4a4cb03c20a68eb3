//! Circular dependency detection.
//!
//! Every module starts its own depth-first search, restricted to modules that
//! sort after it and can still reach it. A cycle is therefore found exactly
//! once, from its smallest member, already in canonical rotation. The current
//! path and the per-frame successor cursors live in an explicit
//! [`Traversal`] rather than the call stack, which gives the depth cap and
//! cancellation checks a single place to hook in.

use crate::analysis::{AnalysisError, DependencyGraph};
use crate::cancel::CancellationToken;
use crate::config::Thresholds;
use crate::model::{Cycle, CycleReport};
use std::collections::{BTreeMap, HashSet};

type Adjacency<'g> = BTreeMap<&'g str, Vec<&'g str>>;

pub fn detect_circular_dependencies(
    graph: &DependencyGraph,
    thresholds: &Thresholds,
    cancel: &CancellationToken,
) -> Result<CycleReport, AnalysisError> {
    let adjacency = graph.adjacency();
    let reverse = reverse_adjacency(&adjacency);
    let mut collector = CycleCollector::new(thresholds);

    'search: for &start in adjacency.keys() {
        let candidates = reaching(start, &reverse);
        if candidates.is_empty() {
            continue;
        }

        let mut traversal = Traversal::default();
        traversal.push(start);

        while let Some(next) = traversal.advance(&adjacency) {
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }

            let Some(next) = next else {
                traversal.pop();
                continue;
            };

            if next == start {
                if !collector.add(traversal.members()) {
                    break 'search;
                }
            } else if !candidates.contains(next) || traversal.on_stack.contains(next) {
                continue;
            } else if traversal.path.len() >= thresholds.max_cycle_depth {
                collector.incomplete = true;
            } else {
                traversal.push(next);
            }
        }
    }

    let report = collector.into_report();
    if report.incomplete {
        tracing::warn!(
            found = report.cycles.len(),
            max_cycles = thresholds.max_cycles,
            max_depth = thresholds.max_cycle_depth,
            "cycle search hit a cap; results may be incomplete"
        );
    } else {
        tracing::debug!(found = report.cycles.len(), "cycle search complete");
    }

    Ok(report)
}

fn reverse_adjacency<'g>(adjacency: &Adjacency<'g>) -> Adjacency<'g> {
    let mut reverse: Adjacency<'g> = adjacency.keys().map(|&node| (node, Vec::new())).collect();
    for (&from, successors) in adjacency {
        for &to in successors {
            if let Some(predecessors) = reverse.get_mut(to) {
                predecessors.push(from);
            }
        }
    }
    reverse
}

/// Modules sorting at or after `start` that reach `start` without passing
/// through a smaller module. Empty when `start` is on no such cycle.
fn reaching<'g>(start: &'g str, reverse: &Adjacency<'g>) -> HashSet<&'g str> {
    let mut found = HashSet::new();
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        for &pred in reverse.get(node).into_iter().flatten() {
            if pred >= start && found.insert(pred) {
                stack.push(pred);
            }
        }
    }
    found
}

#[derive(Default)]
struct Traversal<'g> {
    /// Modules on the current DFS path, root first.
    path: Vec<&'g str>,
    /// Index of the next successor to visit for each entry in `path`.
    cursors: Vec<usize>,
    on_stack: HashSet<&'g str>,
}

impl<'g> Traversal<'g> {
    fn push(&mut self, node: &'g str) {
        self.path.push(node);
        self.cursors.push(0);
        self.on_stack.insert(node);
    }

    fn pop(&mut self) {
        if let Some(node) = self.path.pop() {
            self.cursors.pop();
            self.on_stack.remove(node);
        }
    }

    /// `None` once the path is empty; `Some(None)` when the top module has no
    /// successors left; otherwise the next successor to visit.
    fn advance(&mut self, adjacency: &Adjacency<'g>) -> Option<Option<&'g str>> {
        let node = *self.path.last()?;
        let cursor = self.cursors.last_mut()?;
        let next = adjacency
            .get(node)
            .and_then(|successors| successors.get(*cursor))
            .copied();
        if next.is_some() {
            *cursor += 1;
        }
        Some(next)
    }

    fn members(&self) -> Vec<String> {
        self.path.iter().map(|n| n.to_string()).collect()
    }
}

struct CycleCollector {
    cycles: Vec<Cycle>,
    seen: HashSet<Vec<String>>,
    max_cycles: usize,
    long_cycle: usize,
    incomplete: bool,
}

impl CycleCollector {
    fn new(thresholds: &Thresholds) -> Self {
        Self {
            cycles: Vec::new(),
            seen: HashSet::new(),
            max_cycles: thresholds.max_cycles,
            long_cycle: thresholds.long_cycle,
            incomplete: false,
        }
    }

    /// Record a cycle in canonical form. Returns `false` when a new cycle
    /// arrives after the cap was reached, which ends the search.
    fn add(&mut self, members: Vec<String>) -> bool {
        let cycle = Cycle::from_members(members, self.long_cycle);
        if self.seen.contains(&cycle.modules) {
            return true;
        }
        if self.cycles.len() >= self.max_cycles {
            self.incomplete = true;
            return false;
        }
        self.seen.insert(cycle.modules.clone());
        self.cycles.push(cycle);
        true
    }

    fn into_report(mut self) -> CycleReport {
        self.cycles
            .sort_by(|a, b| a.length.cmp(&b.length).then_with(|| a.modules.cmp(&b.modules)));
        CycleReport {
            cycles: self.cycles,
            incomplete: self.incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::graph::tests::module;
    use crate::model::{CycleSeverity, Module};

    fn detect(modules: &[Module]) -> CycleReport {
        detect_with(modules, &Thresholds::default())
    }

    fn detect_with(modules: &[Module], thresholds: &Thresholds) -> CycleReport {
        let graph = DependencyGraph::build(modules);
        detect_circular_dependencies(&graph, thresholds, &CancellationToken::new()).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let report = detect(&[
            module("a.ts", &["b.ts", "c.ts"]),
            module("b.ts", &["c.ts"]),
            module("c.ts", &[]),
        ]);
        assert!(report.is_empty());
        assert!(!report.incomplete);
    }

    #[test]
    fn test_mutual_import_is_one_cycle_of_two() {
        let report = detect(&[module("a.ts", &["b.ts"]), module("b.ts", &["a.ts"])]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.cycles[0].length, 2);
        assert_eq!(report.cycles[0].modules, strings(&["a.ts", "b.ts", "a.ts"]));
    }

    #[test]
    fn test_self_import() {
        let report = detect(&[module("a.ts", &["a.ts"])]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.cycles[0].length, 1);
        assert_eq!(report.cycles[0].modules, strings(&["a.ts", "a.ts"]));
    }

    #[test]
    fn test_cycle_reported_in_canonical_rotation() {
        // Entering at "b" still reports the cycle starting at "a".
        let report = detect(&[
            module("b.ts", &["c.ts"]),
            module("c.ts", &["a.ts"]),
            module("a.ts", &["b.ts"]),
        ]);
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.cycles[0].modules,
            strings(&["a.ts", "b.ts", "c.ts", "a.ts"])
        );
    }

    #[test]
    fn test_no_duplicate_rotations() {
        let report = detect(&[
            module("a.ts", &["b.ts", "c.ts"]),
            module("b.ts", &["a.ts", "c.ts"]),
            module("c.ts", &["a.ts", "b.ts"]),
            module("d.ts", &["a.ts"]),
        ]);
        assert!(!report.is_empty());

        let mut keys = HashSet::new();
        for cycle in &report.cycles {
            let mut members = cycle.members().to_vec();
            members.sort();
            let mut rotated = cycle.members().to_vec();
            rotated.rotate_left(1);
            let rotated = Cycle::from_members(rotated, 3);
            assert_eq!(&rotated, cycle);
            assert!(keys.insert(cycle.modules.clone()));
            assert_eq!(members.len(), cycle.length);
        }
    }

    #[test]
    fn test_disjoint_cycles_sorted_by_length() {
        let report = detect(&[
            module("a.ts", &["b.ts"]),
            module("b.ts", &["c.ts"]),
            module("c.ts", &["a.ts"]),
            module("x.ts", &["y.ts"]),
            module("y.ts", &["x.ts"]),
        ]);
        assert_eq!(report.len(), 2);
        assert_eq!(report.cycles[0].length, 2);
        assert_eq!(report.cycles[1].length, 3);
    }

    #[test]
    fn test_long_cycle_severity() {
        let report = detect(&[
            module("a.ts", &["b.ts"]),
            module("b.ts", &["c.ts"]),
            module("c.ts", &["d.ts"]),
            module("d.ts", &["a.ts"]),
        ]);
        assert_eq!(report.cycles[0].severity, CycleSeverity::High);

        let relaxed = Thresholds {
            long_cycle: 4,
            ..Thresholds::default()
        };
        let report = detect_with(
            &[
                module("a.ts", &["b.ts"]),
                module("b.ts", &["c.ts"]),
                module("c.ts", &["d.ts"]),
                module("d.ts", &["a.ts"]),
            ],
            &relaxed,
        );
        assert_eq!(report.cycles[0].severity, CycleSeverity::Normal);
    }

    #[test]
    fn test_cycle_cap_marks_incomplete() {
        let thresholds = Thresholds {
            max_cycles: 1,
            ..Thresholds::default()
        };
        let report = detect_with(
            &[
                module("a.ts", &["b.ts"]),
                module("b.ts", &["a.ts"]),
                module("x.ts", &["y.ts"]),
                module("y.ts", &["x.ts"]),
            ],
            &thresholds,
        );
        assert_eq!(report.len(), 1);
        assert!(report.incomplete);
    }

    #[test]
    fn test_cap_exactly_met_is_complete() {
        let thresholds = Thresholds {
            max_cycles: 1,
            ..Thresholds::default()
        };
        let report = detect_with(
            &[module("a.ts", &["b.ts"]), module("b.ts", &["a.ts"])],
            &thresholds,
        );
        assert_eq!(report.len(), 1);
        assert!(!report.incomplete);
    }

    #[test]
    fn test_depth_cap_marks_incomplete() {
        let thresholds = Thresholds {
            max_cycle_depth: 2,
            ..Thresholds::default()
        };
        let report = detect_with(
            &[
                module("a.ts", &["b.ts"]),
                module("b.ts", &["c.ts"]),
                module("c.ts", &["a.ts"]),
            ],
            &thresholds,
        );
        assert!(report.incomplete);
    }

    #[test]
    fn test_cycles_through_a_shared_module() {
        // b and c both lead into d, which closes back to a.
        let report = detect(&[
            module("a.ts", &["b.ts", "c.ts"]),
            module("b.ts", &["d.ts"]),
            module("c.ts", &["d.ts"]),
            module("d.ts", &["a.ts"]),
        ]);
        assert!(!report.incomplete);
        let chains: Vec<_> = report.cycles.iter().map(|c| c.modules.clone()).collect();
        assert_eq!(
            chains,
            vec![
                strings(&["a.ts", "b.ts", "d.ts", "a.ts"]),
                strings(&["a.ts", "c.ts", "d.ts", "a.ts"]),
            ]
        );
    }

    #[test]
    fn test_overlapping_cycles_all_found() {
        let report = detect(&[
            module("a.ts", &["b.ts"]),
            module("b.ts", &["a.ts", "c.ts"]),
            module("c.ts", &["b.ts", "a.ts"]),
        ]);
        let chains: Vec<_> = report.cycles.iter().map(|c| c.modules.clone()).collect();
        assert_eq!(
            chains,
            vec![
                strings(&["a.ts", "b.ts", "a.ts"]),
                strings(&["b.ts", "c.ts", "b.ts"]),
                strings(&["a.ts", "b.ts", "c.ts", "a.ts"]),
            ]
        );
    }

    #[test]
    fn test_cancelled_search() {
        let graph = DependencyGraph::build(&[module("a.ts", &["b.ts"]), module("b.ts", &["a.ts"])]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = detect_circular_dependencies(&graph, &Thresholds::default(), &cancel);
        assert!(matches!(result, Err(AnalysisError::Cancelled)));
    }
}
