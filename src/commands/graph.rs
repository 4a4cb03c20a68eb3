use crate::api::{self, AnalysisOptions};
use crate::cli::GraphArgs;
use crate::fs::{FileSystem, default_fs};
use crate::style;

use super::{CommandContext, emit, report_error};

pub fn cmd_graph(args: GraphArgs) -> i32 {
    cmd_graph_with_fs(args, default_fs())
}

pub fn cmd_graph_with_fs(args: GraphArgs, fs: &dyn FileSystem) -> i32 {
    let ctx = match CommandContext::new(&args.path, &args.scan) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let options = AnalysisOptions {
        generate_graph: true,
        ..ctx.options
    };

    let result = match api::analyze(&ctx.path, options) {
        Ok(result) => result,
        Err(e) => return report_error(&e),
    };

    let Some(graph) = result.mermaid_graph else {
        style::error("No graph was generated");
        return 1;
    };

    emit(&graph, args.output.as_deref(), false, fs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScanArgs;
    use crate::fs::mock::MockFs;
    use tempfile::TempDir;

    #[test]
    fn test_exports_mermaid() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.ts"), "import './b';").unwrap();
        std::fs::write(dir.path().join("b.ts"), "").unwrap();
        let out = dir.path().join("deps.mmd");
        let fs = MockFs::new();

        let args = GraphArgs {
            path: dir.path().to_path_buf(),
            output: Some(out.clone()),
            scan: ScanArgs::default(),
        };
        assert_eq!(cmd_graph_with_fs(args, &fs), 0);

        let graph = fs.contents(&out).unwrap();
        assert!(graph.starts_with("graph TD\n"));
        assert!(graph.contains("m_a_ts --> m_b_ts"));
    }
}
