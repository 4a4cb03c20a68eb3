mod json;
mod markdown;
mod mermaid;

pub use json::{JsonCycle, JsonOutput, JsonResponse, JsonSummary, percent};
pub use markdown::MarkdownOutput;
pub use mermaid::{escape_label, render_edges, render_mermaid, sanitize_id};

use crate::model::AnalysisResult;
use std::io::Write;

pub trait OutputFormatter {
    fn format<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> std::io::Result<()>;
}
