//! CRM operations console — auth-gated customer, order, and campaign
//! workflows against the CRM REST backend.
//!
//! ```bash
//! crm-console customers list --search ada
//! crm-console campaigns preview -f drafts/summer.toml
//! crm-console campaigns create -f drafts/summer.toml
//! crm-console campaigns send 65f1a2 --yes
//! ```

use clap::{Parser, Subcommand};
use crm_api::CrmClient;
use crm_core::AppConfig;
use tracing::info;

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "crm-console")]
#[command(about = "Operations console for the CRM backend")]
#[command(version)]
struct Cli {
    /// API base URL (overrides config)
    #[arg(long, env = "CRM_CONSOLE__API__BASE_URL")]
    api_url: Option<String>,

    /// Rows per list page (overrides config)
    #[arg(long, env = "CRM_CONSOLE__PAGE_SIZE")]
    page_size: Option<u32>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Session status and logout
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthCommands,
    },
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: commands::customers::CustomerCommands,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderCommands,
    },
    /// Manage marketing campaigns
    Campaigns {
        #[command(subcommand)]
        action: commands::campaigns::CampaignCommands,
    },
    /// Headline figures and recent activity
    Dashboard,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crm_console=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    let client = CrmClient::new(&config.api)?;
    info!(base_url = %client.base_url(), "client ready");

    // Every view sits behind the login gate; only the auth commands
    // themselves may run without a session.
    if !matches!(cli.command, Commands::Auth { .. }) {
        client.require_session().await?;
    }

    match cli.command {
        Commands::Auth { action } => commands::auth::handle(action, &client).await?,
        Commands::Customers { action } => {
            commands::customers::handle(action, &client, &config, cli.format).await?
        }
        Commands::Orders { action } => {
            commands::orders::handle(action, &client, &config, cli.format).await?
        }
        Commands::Campaigns { action } => {
            commands::campaigns::handle(action, &client, &config, cli.format).await?
        }
        Commands::Dashboard => commands::dashboard::handle(&client, &config, cli.format).await?,
    }

    Ok(())
}
