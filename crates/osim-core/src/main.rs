use clap::Parser;
use osim_core::cli::{self, Cli};
use osim_core::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);
    let code = cli::run(&cli);
    std::process::exit(code.as_i32());
}
