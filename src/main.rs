use clap::Parser;
use monobuild::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    monobuild::log::init(cli.verbose, cli.quiet);

    tracing::debug!("monobuild v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli::run(cli) {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}
