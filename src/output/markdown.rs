use crate::analysis::{is_high_coupling, is_low_cohesion};
use crate::config::Thresholds;
use crate::model::{AnalysisResult, CycleReport, CycleSeverity, Priority};
use crate::output::OutputFormatter;
use crate::output::json::percent;
use std::io::Write;

/// Human-readable report. Coupling and cohesion findings are judged against
/// `thresholds`.
pub struct MarkdownOutput {
    pub thresholds: Thresholds,
}

impl MarkdownOutput {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn format_cycles<W: Write>(&self, report: &CycleReport, writer: &mut W) -> std::io::Result<()> {
        if report.is_empty() {
            writeln!(writer, "No circular dependencies found.")?;
        } else {
            writeln!(writer, "## Circular Dependencies ({})\n", report.len())?;
            write_cycles(report, writer)?;
        }
        if report.incomplete {
            writeln!(writer, "\n_Cycle search hit a cap; more cycles may exist._")?;
        }
        Ok(())
    }
}

fn write_cycles<W: Write>(report: &CycleReport, writer: &mut W) -> std::io::Result<()> {
    for cycle in &report.cycles {
        let marker = match cycle.severity {
            CycleSeverity::High => "🔴",
            CycleSeverity::Normal => "🟡",
        };
        writeln!(writer, "- {} `{}` (length {})", marker, cycle.display_chain(), cycle.length)?;
    }
    Ok(())
}

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> std::io::Result<()> {
        let summary = &result.summary;

        writeln!(writer, "# Module Analysis: {}\n", result.project_name)?;

        writeln!(writer, "## Summary\n")?;
        writeln!(writer, "- Modules: {}", summary.total_modules)?;
        writeln!(writer, "- Dependencies: {}", summary.total_edges)?;
        writeln!(
            writer,
            "- Circular dependencies: {}{}",
            summary.circular_dependencies,
            if summary.circular_may_be_incomplete { " (search capped)" } else { "" }
        )?;
        writeln!(writer, "- Layer violations: {}", summary.layer_violations)?;
        writeln!(writer, "- Cohesion: {}", percent(summary.cohesion_score))?;
        writeln!(writer, "- Coupling: {}\n", percent(summary.coupling_score))?;

        if !result.cycles.is_empty() {
            writeln!(writer, "## Circular Dependencies\n")?;
            write_cycles(&result.cycles, writer)?;
            writeln!(writer)?;
        }

        if !result.layer_violations.is_empty() {
            writeln!(writer, "## Layer Violations\n")?;
            for violation in &result.layer_violations {
                writeln!(writer, "- {}", violation.message)?;
            }
            writeln!(writer)?;
        }

        let mut coupled: Vec<_> = result
            .metrics
            .modules
            .iter()
            .filter(|m| is_high_coupling(m.coupling_score, &self.thresholds))
            .collect();
        coupled.sort_by(|a, b| b.fan_out.cmp(&a.fan_out).then_with(|| a.path.cmp(&b.path)));

        if !coupled.is_empty() {
            writeln!(writer, "## High Coupling\n")?;
            for module in coupled {
                writeln!(
                    writer,
                    "- `{}` - {} dependencies, {} dependents ({})",
                    module.path,
                    module.fan_out,
                    module.fan_in,
                    percent(module.coupling_score)
                )?;
            }
            writeln!(writer)?;
        }

        let loose: Vec<_> = result
            .metrics
            .groups
            .iter()
            .filter(|g| is_low_cohesion(g.cohesion_score, &self.thresholds))
            .collect();

        if !loose.is_empty() {
            writeln!(writer, "## Low Cohesion\n")?;
            for group in loose {
                let directory = if group.directory.is_empty() { "." } else { group.directory.as_str() };
                writeln!(
                    writer,
                    "- `{}/` - {} of {} module pairs related ({})",
                    directory,
                    group.related_pairs,
                    group.possible_pairs,
                    percent(group.cohesion_score)
                )?;
            }
            writeln!(writer)?;
        }

        if result.suggestions.is_empty() {
            writeln!(writer, "## No Issues Found\n")?;
            writeln!(writer, "No dependency issues detected.")?;
        } else {
            writeln!(writer, "## Suggestions\n")?;
            for suggestion in &result.suggestions {
                let tag = match suggestion.priority {
                    Priority::High => "**high**",
                    Priority::Medium => "medium",
                    Priority::Low => "low",
                };
                writeln!(writer, "- [{}] {}", tag, suggestion.message)?;
            }
        }

        if let Some(graph) = &result.mermaid_graph {
            writeln!(writer, "\n## Dependency Graph\n")?;
            writeln!(writer, "```mermaid\n{}```", graph)?;
        }

        Ok(())
    }
}
