pub mod analysis;
pub mod api;
pub mod cancel;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod style;

pub use api::{AnalysisOptions, ModmapError, ModuleInfo, analyze, find_circular_deps, module_info};
pub use cancel::CancellationToken;
pub use cli::Cli;
pub use commands::{cmd_analyze, cmd_cycles, cmd_graph, cmd_init, cmd_module};
pub use config::{Config, LayerPolicy};
pub use model::{AnalysisResult, Cycle, CycleReport};
