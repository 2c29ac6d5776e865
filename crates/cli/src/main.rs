use clap::Parser;
use patchbay_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG overrides; warnings are shown by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = Cli::parse().execute() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
