use crate::api::{self, ModuleInfo};
use crate::cli::{ModuleArgs, OutputFormat};
use crate::fs::default_fs;
use crate::output::{JsonOutput, percent};
use crate::style;
use std::fmt::Write;

use super::{CommandContext, emit, report_error};

pub fn cmd_module(args: ModuleArgs) -> i32 {
    let ctx = match CommandContext::new(&args.path, &args.scan) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let info = match api::module_info(&ctx.path, &args.module, ctx.options) {
        Ok(info) => info,
        Err(e) => return report_error(&e),
    };

    let content = match args.format {
        OutputFormat::Markdown => render_markdown(&info),
        OutputFormat::Json => {
            let mut buffer = Vec::new();
            if let Err(e) = JsonOutput::new().write_value(&info, &mut buffer) {
                style::error(&format!("Failed to format output: {}", e));
                return 1;
            }
            String::from_utf8_lossy(&buffer).into_owned()
        }
    };

    emit(&content, None, args.format == OutputFormat::Markdown, default_fs())
}

fn render_markdown(info: &ModuleInfo) -> String {
    let module = &info.module;
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", module.path);
    let _ = writeln!(out, "- Lines of code: {}", module.lines_of_code);
    let _ = writeln!(out, "- Coupling: {}", percent(info.coupling_score));
    if !module.exports.is_empty() {
        let exports: Vec<&str> = module.exports.iter().map(String::as_str).collect();
        let _ = writeln!(out, "- Exports: `{}`", exports.join("`, `"));
    }

    let _ = writeln!(out, "\n## Dependencies ({})\n", info.dependencies.len());
    for dep in &info.dependencies {
        let _ = writeln!(out, "- `{}`", dep);
    }

    let external: Vec<&str> = module
        .imports
        .iter()
        .filter(|i| i.resolved.is_none())
        .map(|i| i.specifier.as_str())
        .collect();
    if !external.is_empty() {
        let _ = writeln!(out, "\n## Unresolved or External Imports\n");
        for spec in external {
            let _ = writeln!(out, "- `{}`", spec);
        }
    }

    let _ = writeln!(out, "\n## Dependents ({})\n", info.dependents.len());
    for dependent in &info.dependents {
        let _ = writeln!(out, "- `{}`", dependent);
    }

    out
}
