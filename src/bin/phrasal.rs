/// Phrasal command-line tool
///
/// Compiles JSON program trees to the binary format, dumps compiled programs,
/// and runs programs against a vocabulary file.
use phrasal_core::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
