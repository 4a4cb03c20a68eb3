//! Integration tests for the modmap library API.

use modmap::{
    AnalysisOptions, CancellationToken, LayerPolicy, ModmapError, analyze, find_circular_deps,
    module_info,
};
use modmap::analysis::AnalysisError;
use modmap::output::{JsonOutput, OutputFormatter};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    dir
}

fn layered_project() -> TempDir {
    project(&[
        (
            "src/presentation/page.ts",
            "import { rules } from '../business/rules';\nimport { db } from '../data/db';\n",
        ),
        ("src/business/rules.ts", "import { db } from '../data/db';\nexport const rules = [];\n"),
        ("src/data/db.ts", "export const db = {};\n"),
    ])
}

fn three_tier() -> LayerPolicy {
    LayerPolicy::from_allowed([
        ("presentation", vec!["business"]),
        ("business", vec!["data"]),
        ("data", vec![]),
    ])
}

#[test]
fn test_mutual_import_is_one_cycle() {
    let dir = project(&[
        ("src/a.ts", "import { b } from './b';\nexport const a = 1;\n"),
        ("src/b.ts", "import { a } from './a.js';\nexport const b = 2;\n"),
    ]);

    let result = analyze(dir.path(), AnalysisOptions::default()).unwrap();

    assert_eq!(result.summary.total_modules, 2);
    assert_eq!(result.summary.total_edges, 2);
    assert_eq!(result.summary.circular_dependencies, 1);
    assert!(!result.summary.circular_may_be_incomplete);
    let cycle = &result.cycles.cycles[0];
    assert_eq!(cycle.length, 2);
    assert_eq!(cycle.modules, vec!["src/a.ts", "src/b.ts", "src/a.ts"]);
    assert!(result.has_issues());
    assert!(!result.suggestions.is_empty());
}

#[test]
fn test_acyclic_project() {
    let dir = project(&[
        ("index.ts", "import './lib/util';\nimport express from 'express';\n"),
        ("lib/util.ts", "export function util() {}\n"),
    ]);

    let result = analyze(dir.path(), AnalysisOptions::default()).unwrap();
    assert!(result.cycles.is_empty());
    assert!(result.layer_violations.is_empty());
    assert_eq!(result.summary.total_edges, 1);
    assert!(!result.has_issues());
}

#[test]
fn test_zero_edge_project() {
    let dir = project(&[("a.ts", "export const a = 1;\n"), ("b.js", "module.exports = {};\n")]);

    let result = analyze(
        dir.path(),
        AnalysisOptions {
            generate_graph: true,
            layers: Some(three_tier()),
            ..AnalysisOptions::default()
        },
    )
    .unwrap();

    assert_eq!(result.summary.total_edges, 0);
    assert!(result.cycles.is_empty());
    assert!(result.layer_violations.is_empty());
    assert_eq!(result.summary.coupling_score, 0.0);
    assert_eq!(result.mermaid_graph.as_deref(), Some("graph TD\n"));
}

#[test]
fn test_unresolvable_import_is_kept_but_not_a_dependency() {
    let dir = project(&[("src/app.ts", "import { gone } from './does-not-exist';\n")]);

    let result = analyze(dir.path(), AnalysisOptions::default()).unwrap();
    let app = result.module("src/app.ts").unwrap();

    assert_eq!(app.imports.len(), 1);
    assert_eq!(app.imports[0].specifier, "./does-not-exist");
    assert!(app.dependencies.is_empty());
    assert_eq!(result.summary.total_edges, 0);
}

#[test]
fn test_layer_violation() {
    let dir = layered_project();

    let result = analyze(
        dir.path(),
        AnalysisOptions {
            layers: Some(three_tier()),
            ..AnalysisOptions::default()
        },
    )
    .unwrap();

    assert_eq!(result.layer_violations.len(), 1);
    let violation = &result.layer_violations[0];
    assert_eq!(violation.from, "src/presentation/page.ts");
    assert_eq!(violation.to, "src/data/db.ts");
    assert_eq!(result.summary.layer_violations, 1);
}

#[test]
fn test_layer_policy_from_config_file() {
    let dir = layered_project();
    fs::write(
        dir.path().join(".modmap.toml"),
        "[layers.presentation]\nallow = [\"business\"]\n\n[layers.business]\nallow = [\"data\"]\n\n[layers.data]\nallow = []\n",
    )
    .unwrap();

    let result = analyze(dir.path(), AnalysisOptions::default()).unwrap();
    assert_eq!(result.layer_violations.len(), 1);
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let dir = project(&[("a.ts", "import './b';"), ("b.ts", ""), (".modmap.toml", "[thresholds\n")]);
    let result = analyze(dir.path(), AnalysisOptions::default()).unwrap();
    assert_eq!(result.summary.total_modules, 2);
    assert_eq!(result.summary.total_edges, 1);
}

#[test]
fn test_invalid_layer_policy_is_not_an_error() {
    let dir = layered_project();
    fs::write(
        dir.path().join(".modmap.toml"),
        "[layers.presentation]\nallow = \"business\"\n",
    )
    .unwrap();

    let result = analyze(dir.path(), AnalysisOptions::default()).unwrap();
    assert_eq!(result.summary.total_modules, 3);
    assert!(result.layer_violations.is_empty());
}

#[test]
fn test_analyze_invalid_path() {
    let result = analyze(Path::new("/nonexistent/path"), AnalysisOptions::default());

    match result {
        Err(ModmapError::PathNotFound(_)) => {}
        Err(e) => panic!("Expected PathNotFound error, got: {:?}", e),
        Ok(_) => panic!("Expected error for invalid path"),
    }
}

#[test]
fn test_node_modules_excluded_by_default() {
    let dir = project(&[
        ("src/index.ts", "import lodash from 'lodash';\n"),
        ("node_modules/lodash/index.js", "module.exports = {};\n"),
    ]);

    let result = analyze(dir.path(), AnalysisOptions::default()).unwrap();
    let paths: Vec<_> = result.modules.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(paths, vec!["src/index.ts"]);
}

#[test]
fn test_custom_exclude_replaces_defaults() {
    let dir = project(&[("src/index.ts", ""), ("src/legacy/old.ts", ""), ("dist/out.js", "")]);

    let result = analyze(
        dir.path(),
        AnalysisOptions {
            exclude: vec!["legacy".to_string()],
            ..AnalysisOptions::default()
        },
    )
    .unwrap();
    let paths: Vec<_> = result.modules.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(paths, vec!["dist/out.js", "src/index.ts"]);
}

#[test]
fn test_detect_circular_disabled() {
    let dir = project(&[("a.ts", "import './b';"), ("b.ts", "import './a';")]);
    let result = analyze(
        dir.path(),
        AnalysisOptions {
            detect_circular: false,
            ..AnalysisOptions::default()
        },
    )
    .unwrap();
    assert!(result.cycles.is_empty());
    assert_eq!(result.summary.total_edges, 2);
}

#[test]
fn test_module_info() {
    let dir = layered_project();

    let info = module_info(dir.path(), "./src/data/db.ts", AnalysisOptions::default()).unwrap();
    assert_eq!(info.module.path, "src/data/db.ts");
    assert!(info.module.exports.contains("db"));
    assert!(info.dependencies.is_empty());
    assert_eq!(
        info.dependents,
        vec!["src/business/rules.ts", "src/presentation/page.ts"]
    );

    let page = module_info(dir.path(), "src/presentation/page.ts", AnalysisOptions::default()).unwrap();
    assert_eq!(page.dependencies, vec!["src/business/rules.ts", "src/data/db.ts"]);
}

#[test]
fn test_module_info_not_found() {
    let dir = layered_project();
    let result = module_info(dir.path(), "src/missing.ts", AnalysisOptions::default());
    assert!(matches!(result, Err(ModmapError::ModuleNotFound(_))));
}

#[test]
fn test_find_circular_deps() {
    let dir = project(&[
        ("a.ts", "import './b';"),
        ("b.ts", "import './c';"),
        ("c.ts", "import './a';"),
        ("self.ts", "import './self';"),
    ]);

    let report = find_circular_deps(dir.path(), AnalysisOptions::default()).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.cycles[0].modules, vec!["self.ts", "self.ts"]);
    assert_eq!(report.cycles[1].modules, vec!["a.ts", "b.ts", "c.ts", "a.ts"]);
}

#[test]
fn test_find_circular_deps_through_shared_import() {
    let dir = project(&[
        ("a.ts", "import './b';\nimport './c';"),
        ("b.ts", "import './d';"),
        ("c.ts", "import './d';"),
        ("d.ts", "import './a';"),
    ]);

    let report = find_circular_deps(dir.path(), AnalysisOptions::default()).unwrap();
    assert!(!report.incomplete);
    assert_eq!(report.len(), 2);
    assert_eq!(report.cycles[0].modules, vec!["a.ts", "b.ts", "d.ts", "a.ts"]);
    assert_eq!(report.cycles[1].modules, vec!["a.ts", "c.ts", "d.ts", "a.ts"]);
}

#[test]
fn test_cancelled_analysis() {
    let dir = project(&[("a.ts", "")]);
    let cancellation = CancellationToken::new();
    cancellation.cancel();

    let result = analyze(
        dir.path(),
        AnalysisOptions {
            cancellation,
            ..AnalysisOptions::default()
        },
    );
    assert!(matches!(
        result,
        Err(ModmapError::Analysis(AnalysisError::Cancelled))
    ));
}

#[test]
fn test_json_response_shape() {
    let dir = project(&[("a.ts", "import './b';"), ("b.ts", "import './a';")]);
    let result = analyze(
        dir.path(),
        AnalysisOptions {
            generate_graph: true,
            ..AnalysisOptions::default()
        },
    )
    .unwrap();

    let mut buf = Vec::new();
    JsonOutput::new().format(&result, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(json["summary"]["totalModules"], 2);
    assert_eq!(json["summary"]["circularDependencies"], 1);
    assert!(json["summary"]["cohesion"].as_str().unwrap().ends_with('%'));
    assert_eq!(json["modules"][0]["dependencyCount"], 1);
    assert_eq!(json["circularDependencies"][0]["length"], 2);
    assert!(json["suggestions"].as_array().unwrap().len() >= 1);
    assert!(json["mermaidGraph"].as_str().unwrap().contains("class m_a_ts,m_b_ts cycle"));
}

#[test]
fn test_rendering_is_deterministic() {
    let dir = project(&[
        ("src/app.ts", "import './a';\nimport './b';\nimport './c';\n"),
        ("src/a.ts", "import './b';"),
        ("src/b.ts", "import './c';"),
        ("src/c.ts", "import './a';"),
    ]);
    let options = || AnalysisOptions {
        generate_graph: true,
        ..AnalysisOptions::default()
    };

    let first = analyze(dir.path(), options()).unwrap().mermaid_graph.unwrap();
    let second = analyze(dir.path(), options()).unwrap().mermaid_graph.unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with("graph TD\n"));
}
