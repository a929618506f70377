//! Crisol CLI — exhaustive custom-resource manifest generation.

use clap::Parser;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = crisol::cli::Cli::parse();
    if let Err(e) = crisol::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
