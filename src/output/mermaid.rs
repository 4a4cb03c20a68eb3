use crate::analysis::DependencyGraph;
use crate::model::CycleReport;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::Write;

const CYCLE_CLASS: &str = "cycle";
const CYCLE_STYLE: &str = "fill:#fde2e2,stroke:#c0392b,stroke-width:2px";

/// Render the dependency graph as a Mermaid `graph TD` diagram.
///
/// At most `max_edges` unique edges are drawn, taken in `(from, to)` order.
/// Modules that belong to a reported cycle get the `cycle` class.
pub fn render_mermaid(graph: &DependencyGraph, cycles: &CycleReport, max_edges: usize) -> String {
    let edges = graph.unique_edges();
    let in_cycle: BTreeSet<&str> = cycles
        .cycles
        .iter()
        .flat_map(|c| c.members().iter().map(String::as_str))
        .collect();
    render_edges(&edges, &in_cycle, max_edges)
}

/// Render already-collapsed edges. Output depends only on the inputs.
pub fn render_edges(
    edges: &BTreeSet<(&str, &str)>,
    in_cycle: &BTreeSet<&str>,
    max_edges: usize,
) -> String {
    let shown: Vec<(&str, &str)> = edges.iter().take(max_edges).copied().collect();
    let omitted = edges.len() - shown.len();

    let nodes: BTreeSet<&str> = shown.iter().flat_map(|&(from, to)| [from, to]).collect();
    let ids = assign_ids(&nodes);

    let mut out = String::from("graph TD\n");

    for node in &nodes {
        let _ = writeln!(out, "    {}[\"{}\"]", ids[node], escape_label(node));
    }

    for (from, to) in &shown {
        let _ = writeln!(out, "    {} --> {}", ids[from], ids[to]);
    }

    if omitted > 0 {
        let _ = writeln!(
            out,
            "    %% {} more edge{} omitted",
            omitted,
            if omitted == 1 { "" } else { "s" }
        );
    }

    let cycle_ids: Vec<&str> = nodes
        .iter()
        .filter(|node| in_cycle.contains(*node))
        .map(|node| ids[node].as_str())
        .collect();

    if !cycle_ids.is_empty() {
        let _ = writeln!(out, "    classDef {} {}", CYCLE_CLASS, CYCLE_STYLE);
        let _ = writeln!(out, "    class {} {}", cycle_ids.join(","), CYCLE_CLASS);
    }

    out
}

/// `m_` followed by the path with every character outside `[A-Za-z0-9_]`
/// replaced by `_`.
pub fn sanitize_id(path: &str) -> String {
    let mut id = String::with_capacity(path.len() + 2);
    id.push_str("m_");
    for c in path.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            id.push(c);
        } else {
            id.push('_');
        }
    }
    id
}

/// Labels are double-quoted on a single line; Mermaid has no backslash escape
/// inside them, only `#...;` entity codes.
pub fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '#' => escaped.push_str("#35;"),
            '"' => escaped.push_str("#quot;"),
            '\n' => escaped.push_str("#10;"),
            '\r' => escaped.push_str("#13;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Sanitized ids for `nodes`, suffixed `_2`, `_3`, ... on collision. Nodes
/// are visited in sorted order so the suffixes are stable.
fn assign_ids<'a>(nodes: &BTreeSet<&'a str>) -> BTreeMap<&'a str, String> {
    let mut taken = HashSet::new();
    let mut ids = BTreeMap::new();

    for &node in nodes {
        let base = sanitize_id(node);
        let mut id = base.clone();
        let mut suffix = 2;
        while taken.contains(&id) {
            id = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        taken.insert(id.clone());
        ids.insert(node, id);
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::graph::tests::module;
    use crate::model::Cycle;
    use proptest::prelude::*;

    fn edges<'a>(pairs: &[(&'a str, &'a str)]) -> BTreeSet<(&'a str, &'a str)> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_renders_nodes_and_edges() {
        let graph = DependencyGraph::build(&[
            module("src/a.ts", &["src/b.ts"]),
            module("src/b.ts", &[]),
        ]);
        let out = render_mermaid(&graph, &CycleReport::default(), 50);
        assert_eq!(
            out,
            "graph TD\n    m_src_a_ts[\"src/a.ts\"]\n    m_src_b_ts[\"src/b.ts\"]\n    m_src_a_ts --> m_src_b_ts\n"
        );
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::build(&[module("a.ts", &[])]);
        assert_eq!(render_mermaid(&graph, &CycleReport::default(), 50), "graph TD\n");
    }

    #[test]
    fn test_truncation_comment() {
        let out = render_edges(
            &edges(&[("a", "b"), ("a", "c"), ("b", "c")]),
            &BTreeSet::new(),
            2,
        );
        assert!(out.contains("m_a --> m_b"));
        assert!(out.contains("m_a --> m_c"));
        assert!(!out.contains("m_b --> m_c"));
        assert!(out.contains("%% 1 more edge omitted"));
    }

    #[test]
    fn test_cycle_members_get_class() {
        let graph = DependencyGraph::build(&[
            module("a.ts", &["b.ts"]),
            module("b.ts", &["a.ts", "c.ts"]),
            module("c.ts", &[]),
        ]);
        let cycles = CycleReport {
            cycles: vec![Cycle::from_members(vec!["a.ts".into(), "b.ts".into()], 3)],
            incomplete: false,
        };
        let out = render_mermaid(&graph, &cycles, 50);
        assert!(out.contains("classDef cycle"));
        assert!(out.contains("    class m_a_ts,m_b_ts cycle\n"));
    }

    #[test]
    fn test_colliding_ids_are_suffixed() {
        let out = render_edges(&edges(&[("a-b.ts", "a_b.ts")]), &BTreeSet::new(), 50);
        assert!(out.contains("m_a_b_ts[\"a-b.ts\"]"));
        assert!(out.contains("m_a_b_ts_2[\"a_b.ts\"]"));
        assert!(out.contains("m_a_b_ts --> m_a_b_ts_2"));
    }

    #[test]
    fn test_quotes_in_labels() {
        assert_eq!(escape_label("we\"ird.ts"), "we#quot;ird.ts");
        assert_eq!(sanitize_id("we\"ird.ts"), "m_we_ird_ts");
    }

    #[test]
    fn test_line_breaks_in_labels_stay_on_one_line() {
        assert_eq!(escape_label("odd\nname.ts"), "odd#10;name.ts");
        assert_eq!(escape_label("odd\r\n.ts"), "odd#13;#10;.ts");
        assert_eq!(escape_label("#quot;.ts"), "#35;quot;.ts");

        let graph = render_edges(
            &BTreeSet::from([("odd\nname.ts", "b.ts")]),
            &BTreeSet::new(),
            10,
        );
        assert_eq!(graph.lines().count(), 4);
        assert!(graph.contains("[\"odd#10;name.ts\"]"));
    }

    proptest! {
        #[test]
        fn prop_ids_are_mermaid_safe(path in any::<String>()) {
            let id = sanitize_id(&path);
            prop_assert!(id.starts_with("m_"));
            prop_assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }

        #[test]
        fn prop_rendering_is_deterministic(
            pairs in proptest::collection::vec((".{0,12}", ".{0,12}"), 0..20),
            max_edges in 0usize..25,
        ) {
            let set: BTreeSet<(&str, &str)> =
                pairs.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
            let first = render_edges(&set, &BTreeSet::new(), max_edges);
            let second = render_edges(&set, &BTreeSet::new(), max_edges);
            prop_assert_eq!(&first, &second);

            let nodes: BTreeSet<&str> =
                set.iter().take(max_edges).flat_map(|&(a, b)| [a, b]).collect();
            let ids = assign_ids(&nodes);
            let unique: HashSet<&String> = ids.values().collect();
            prop_assert_eq!(unique.len(), nodes.len());
        }
    }
}
