mod cli;
mod commands;
mod output;

use adminctl_core::AdminError;
use adminctl_idp::AdminApiClient;
use adminctl_postgres::PgRoleStore;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use cli::{Cli, Commands, require};
use output::print_error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        if let Some(details) = e.downcast_ref::<AdminError>().and_then(AdminError::details) {
            eprintln!("  {}", details.dimmed());
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    // Prefer RUST_LOG from env; stay quiet otherwise.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let provider_url = require(cli.provider_url, "--provider-url", "ADMINCTL_PROVIDER_URL")?;
    let service_key = require(cli.service_key, "--service-key", "ADMINCTL_SERVICE_KEY")?;
    let database_url = require(cli.database_url, "--database-url", "ADMINCTL_DATABASE_URL")?;

    let directory = AdminApiClient::new(&provider_url, service_key);
    let store = PgRoleStore::connect(&database_url).await?;

    match cli.command {
        Commands::Provision(args) => commands::provision::run(&directory, &store, args).await,
        Commands::ResetPassword(args) => commands::reset::run(&directory, &store, args).await,
    }
}
