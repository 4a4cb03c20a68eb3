use crate::model::{AnalysisResult, CycleReport};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

/// Serialized shape of an analysis run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonResponse<'a> {
    pub summary: JsonSummary,
    pub modules: Vec<JsonModule<'a>>,
    pub circular_dependencies: Vec<JsonCycle<'a>>,
    pub layer_violations: Vec<JsonViolation<'a>>,
    pub suggestions: Vec<JsonSuggestion<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mermaid_graph: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSummary {
    pub total_modules: usize,
    pub total_edges: usize,
    pub circular_dependencies: usize,
    pub circular_may_be_incomplete: bool,
    pub layer_violations: usize,
    pub cohesion: String,
    pub coupling: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonModule<'a> {
    pub path: &'a str,
    pub lines_of_code: usize,
    pub dependency_count: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonCycle<'a> {
    pub cycle: &'a [String],
    pub length: usize,
    pub severity: String,
}

#[derive(Debug, Serialize)]
pub struct JsonViolation<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JsonSuggestion<'a> {
    pub priority: String,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCycles<'a> {
    pub circular_dependencies: Vec<JsonCycle<'a>>,
    pub circular_may_be_incomplete: bool,
}

/// A score rendered as a one-decimal percentage.
pub fn percent(score: f64) -> String {
    format!("{:.1}%", score)
}

pub fn cycles(report: &CycleReport) -> Vec<JsonCycle<'_>> {
    report
        .cycles
        .iter()
        .map(|c| JsonCycle {
            cycle: &c.modules,
            length: c.length,
            severity: c.severity.to_string(),
        })
        .collect()
}

impl<'a> JsonResponse<'a> {
    pub fn from_result(result: &'a AnalysisResult) -> Self {
        let summary = &result.summary;

        Self {
            summary: JsonSummary {
                total_modules: summary.total_modules,
                total_edges: summary.total_edges,
                circular_dependencies: summary.circular_dependencies,
                circular_may_be_incomplete: summary.circular_may_be_incomplete,
                layer_violations: summary.layer_violations,
                cohesion: percent(summary.cohesion_score),
                coupling: percent(summary.coupling_score),
            },
            modules: result
                .modules
                .iter()
                .map(|m| JsonModule {
                    path: &m.path,
                    lines_of_code: m.lines_of_code,
                    dependency_count: m.dependencies.len(),
                })
                .collect(),
            circular_dependencies: cycles(&result.cycles),
            layer_violations: result
                .layer_violations
                .iter()
                .map(|v| JsonViolation {
                    from: &v.from,
                    to: &v.to,
                    message: &v.message,
                })
                .collect(),
            suggestions: result
                .suggestions
                .iter()
                .map(|s| JsonSuggestion {
                    priority: s.priority.to_string(),
                    message: &s.message,
                })
                .collect(),
            mermaid_graph: result.mermaid_graph.as_deref(),
        }
    }
}

impl JsonOutput {
    /// Pretty-print any serializable value followed by a newline.
    pub fn write_value<W: Write, T: Serialize>(&self, value: &T, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }

    pub fn format_cycles<W: Write>(&self, report: &CycleReport, writer: &mut W) -> std::io::Result<()> {
        self.write_value(
            &JsonCycles {
                circular_dependencies: cycles(report),
                circular_may_be_incomplete: report.incomplete,
            },
            writer,
        )
    }
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> std::io::Result<()> {
        self.write_value(&JsonResponse::from_result(result), writer)
    }
}
