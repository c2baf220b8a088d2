use std::process;

use clap::Parser;

use argset::cli::{run, Cli};
use argset::logging::init_tracing;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(?cli, "Parsed arguments");

    let stdout = std::io::stdout();
    if let Err(err) = run(&cli, &mut stdout.lock()) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
