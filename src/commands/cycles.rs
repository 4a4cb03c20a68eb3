use crate::api;
use crate::cli::{CyclesArgs, OutputFormat};
use crate::fs::default_fs;
use crate::output::{JsonOutput, MarkdownOutput};
use crate::style;

use super::{CommandContext, emit, report_error};

pub fn cmd_cycles(args: CyclesArgs) -> i32 {
    let ctx = match CommandContext::new(&args.path, &args.scan) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let (_, config) = match api::prepare(&ctx.path, &ctx.options) {
        Ok(prepared) => prepared,
        Err(e) => return report_error(&e),
    };

    let report = match api::find_circular_deps(&ctx.path, ctx.options) {
        Ok(report) => report,
        Err(e) => return report_error(&e),
    };

    let mut buffer = Vec::new();
    let format_result = match args.format {
        OutputFormat::Markdown => MarkdownOutput::new(config.thresholds).format_cycles(&report, &mut buffer),
        OutputFormat::Json => JsonOutput::new().format_cycles(&report, &mut buffer),
    };

    if let Err(e) = format_result {
        style::error(&format!("Failed to format output: {}", e));
        return 1;
    }

    emit(
        &String::from_utf8_lossy(&buffer),
        None,
        args.format == OutputFormat::Markdown,
        default_fs(),
    )
}
