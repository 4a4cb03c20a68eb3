mod analyze;
mod cycles;
mod graph;
mod init;
mod module;

pub use analyze::{cmd_analyze, cmd_analyze_with_fs};
pub use cycles::cmd_cycles;
pub use graph::{cmd_graph, cmd_graph_with_fs};
pub use init::{cmd_init, cmd_init_with_fs};
pub use module::cmd_module;

use crate::api::{AnalysisOptions, ModmapError};
use crate::cli::ScanArgs;
use crate::fs::FileSystem;
use crate::style;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Shared context for command execution, reducing boilerplate across commands.
pub struct CommandContext {
    pub path: PathBuf,
    pub options: AnalysisOptions,
}

impl CommandContext {
    /// Resolve the project path and turn scan flags into analysis options.
    /// Returns Err(exit_code) if the path does not exist.
    pub fn new(path: &Path, scan: &ScanArgs) -> Result<Self, i32> {
        let resolved_path = match path.canonicalize() {
            Ok(p) => p,
            Err(_) => {
                style::error(&format!("Could not resolve path: {}", style::path(path)));
                return Err(1);
            }
        };

        let options = AnalysisOptions {
            exclude: scan.exclude.clone(),
            max_depth: scan.max_depth,
            ..AnalysisOptions::default()
        };

        Ok(Self {
            path: resolved_path,
            options,
        })
    }
}

/// Print an API error with a hint where one helps, returning the exit code.
pub fn report_error(err: &ModmapError) -> i32 {
    style::error(&err.to_string());
    match err {
        ModmapError::Config(_) => style::hint("check that .modmap.toml is readable"),
        ModmapError::ModuleNotFound(_) => style::hint("module paths are relative to the project root, e.g. src/app.ts"),
        _ => {}
    }
    1
}

/// Write `content` to `output` through `fs`, or to stdout. Markdown sent to
/// a terminal is rendered with termimad.
pub fn emit(content: &str, output: Option<&Path>, markdown: bool, fs: &dyn FileSystem) -> i32 {
    if let Some(output_path) = output {
        if let Err(e) = fs.write_output(output_path, content) {
            style::error(&e.to_string());
            return 1;
        }
        style::success(&format!("Wrote {}", style::path(output_path)));
        return 0;
    }

    let mut stdout = io::stdout();
    let result = if markdown {
        style::render_markdown(content, &mut stdout)
    } else {
        write!(stdout, "{}", content)
    };

    if let Err(e) = result {
        style::error(&format!("Failed to write output: {}", e));
        return 1;
    }
    0
}
