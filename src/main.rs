//! searcher CLI entry point
//!
//! Installs the log subscriber (stderr, `RUST_LOG` aware), then hands
//! over to the CLI module. Prints CLI errors to stderr and exits non-zero.

use searcher::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
