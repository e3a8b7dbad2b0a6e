use clap::Parser;
use color_eyre::Result;
use fleet_core::VehicleService;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::App;

mod app;
mod cli;
mod command;
mod prompt;
mod view;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    initialize_logging();

    let args = cli::Args::parse();
    info!(api_url = %args.api_url, "starting fleet-admin");

    let mut app = App::new(VehicleService::connect(&args.api_url));
    app.run().await?;

    Ok(())
}

/// Logs go to stderr so they never interleave with the table on stdout.
fn initialize_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
