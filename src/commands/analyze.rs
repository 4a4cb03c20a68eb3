use crate::api;
use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::fs::{FileSystem, default_fs};
use crate::output::{JsonOutput, MarkdownOutput, OutputFormatter};
use crate::style;

use super::{CommandContext, emit, report_error};

pub fn cmd_analyze(args: AnalyzeArgs) -> i32 {
    cmd_analyze_with_fs(args, default_fs())
}

pub fn cmd_analyze_with_fs(args: AnalyzeArgs, fs: &dyn FileSystem) -> i32 {
    let ctx = match CommandContext::new(&args.path, &args.scan) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let (_, config) = match api::prepare(&ctx.path, &ctx.options) {
        Ok(prepared) => prepared,
        Err(e) => return report_error(&e),
    };

    let options = api::AnalysisOptions {
        detect_circular: !args.no_cycles,
        generate_graph: args.graph,
        ..ctx.options
    };

    let result = match api::analyze(&ctx.path, options) {
        Ok(result) => result,
        Err(e) => return report_error(&e),
    };

    let mut buffer = Vec::new();
    let format_result = match args.format {
        OutputFormat::Markdown => MarkdownOutput::new(config.thresholds.clone()).format(&result, &mut buffer),
        OutputFormat::Json => JsonOutput::new().format(&result, &mut buffer),
    };

    if let Err(e) = format_result {
        style::error(&format!("Failed to format output: {}", e));
        return 1;
    }

    let code = emit(
        &String::from_utf8_lossy(&buffer),
        args.output.as_deref(),
        args.format == OutputFormat::Markdown,
        fs,
    );
    if code != 0 {
        return code;
    }

    // Cycles and layer violations fail CI runs only when asked to.
    if args.fail_on_issues && result.has_issues() {
        style::warning(&format!(
            "{} circular dependencies, {} layer violations",
            result.summary.circular_dependencies, result.summary.layer_violations
        ));
        return 1;
    }

    0
}
