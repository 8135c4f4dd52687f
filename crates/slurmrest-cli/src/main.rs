//! slurmrest - command-line client for slurmrestd.

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use slurmrest::SlurmClient;
use slurmrest_cli::{Args, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs on stderr, results on stdout
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.client_config().into_diagnostic()?;
    let client = SlurmClient::from_config(&config).await.into_diagnostic()?;

    let mut stdout = std::io::stdout().lock();
    run(&client, args.command, &mut stdout).await
}
