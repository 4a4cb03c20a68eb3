use clap::Parser;
use modmap::cli::{Cli, Command};
use modmap::logging::init_logging;
use modmap::{cmd_analyze, cmd_cycles, cmd_graph, cmd_init, cmd_module};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let exit_code = match cli.command {
        Command::Analyze(args) => cmd_analyze(args),
        Command::Cycles(args) => cmd_cycles(args),
        Command::Module(args) => cmd_module(args),
        Command::Graph(args) => cmd_graph(args),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}
