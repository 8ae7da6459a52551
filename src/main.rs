use clap::Parser;
use tracing_subscriber::EnvFilter;

use gql_typegen::cli::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gql_typegen=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    gql_typegen::cli::run(cli)
}
