use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toxifabric::{cli::Cli, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout is reserved for the env/hosts output
    // consumed by the test harness.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
