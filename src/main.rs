mod cli;
mod client;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let name = cli.command.name();

    if let Err(e) = client::run(cli.command).await {
        tracing::error!(command = name, error = %e, "command failed");
        eprintln!("psa {name}: {e}");
        std::process::exit(1);
    }
}
