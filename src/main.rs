mod cli;
mod commands;

use clap::Parser;
use stash_cli::error::ErrorFormatter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    let verbose = cli.verbose;
    stash_cli::logging::init(verbose);

    if let Err(err) = commands::dispatch(cli).await {
        eprintln!("{}", ErrorFormatter::new(verbose).format(&err));
        std::process::exit(1);
    }
}
