use crate::analysis::cohesion::is_low_cohesion;
use crate::analysis::coupling::is_high_coupling;
use crate::config::Thresholds;
use crate::model::{CycleReport, CycleSeverity, LayerViolation, Metrics, Priority, Suggestion};

/// Turn findings into recommendations, highest priority first. Order within a
/// priority follows the order findings were reported in.
pub fn suggest(
    cycles: &CycleReport,
    violations: &[LayerViolation],
    metrics: &Metrics,
    thresholds: &Thresholds,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for cycle in &cycles.cycles {
        let members = cycle.members().to_vec();
        let suggestion = match cycle.length {
            1 => Suggestion::new(
                Priority::Medium,
                format!("Remove the self-import in {}", members[0]),
                members,
            ),
            2 => Suggestion::new(
                Priority::Medium,
                format!(
                    "Break the cycle {} by extracting the shared types or functions into a module both can import",
                    cycle.display_chain()
                ),
                members,
            ),
            _ => {
                let priority = match cycle.severity {
                    CycleSeverity::High => Priority::High,
                    CycleSeverity::Normal => Priority::Medium,
                };
                Suggestion::new(
                    priority,
                    format!(
                        "Break the {}-module cycle {} with dependency injection or by inverting one of its imports",
                        cycle.length,
                        cycle.display_chain()
                    ),
                    members,
                )
            }
        };
        suggestions.push(suggestion);
    }

    if cycles.incomplete {
        suggestions.push(Suggestion::new(
            Priority::Low,
            format!(
                "Cycle search stopped after {} cycles; raise max_cycles or max_cycle_depth to see all of them",
                cycles.len()
            ),
            Vec::new(),
        ));
    }

    for violation in violations {
        suggestions.push(Suggestion::new(
            Priority::Medium,
            format!(
                "Route {} -> {} through an allowed layer or invert it behind an interface owned by the {} layer",
                violation.from, violation.to, violation.from_layer
            ),
            vec![violation.from.clone(), violation.to.clone()],
        ));
    }

    for module in &metrics.modules {
        if is_high_coupling(module.coupling_score, thresholds) {
            suggestions.push(Suggestion::new(
                Priority::Medium,
                format!(
                    "Split {} ({} internal dependencies, coupling {:.1}%) into smaller modules",
                    module.path, module.fan_out, module.coupling_score
                ),
                vec![module.path.clone()],
            ));
        }
    }

    for group in &metrics.groups {
        if is_low_cohesion(group.cohesion_score, thresholds) {
            let directory = if group.directory.is_empty() {
                "the project root"
            } else {
                group.directory.as_str()
            };
            suggestions.push(Suggestion::new(
                Priority::Low,
                format!(
                    "Regroup the {} modules in {} by responsibility (cohesion {:.1}%)",
                    group.modules, directory, group.cohesion_score
                ),
                Vec::new(),
            ));
        }
    }

    suggestions.sort_by(|a, b| b.priority.cmp(&a.priority));
    suggestions
}
