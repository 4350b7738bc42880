//! ongoctl CLI - admin tooling for the Ongo ride-hailing backend
//!
//! This is the main entry point for the ongoctl command-line tool, which
//! provides paginated, filterable listings of the operation's resources:
//! - Drivers (`drivers` subcommand, with activation toggle)
//! - Vehicles (`vehicles` subcommand, with cab activation)
//! - Courses / rides (`courses` subcommand, with date/status filter)
//! - Rider accounts (`users` subcommand, with profile updates)
//! - Driver-onboarding requests (`requests` subcommand, with approval)

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ongoctl_core::{ApiClient, OngoConfig, Session, SessionStore, DEFAULT_BASE_URL};

mod commands;
mod tracing_setup;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "ongoctl",
    author,
    version,
    about = "Admin CLI for the Ongo ride-hailing backend",
    long_about = "List and manage drivers, vehicles, courses, users, and driver-onboarding \
                  requests through the backend's paginated REST API. Pagination links printed \
                  by list commands can be followed verbatim with --page."
)]
struct Cli {
    /// Backend base URL (default: production API)
    #[arg(long, env = "ONGOCTL_API_URL", global = true)]
    endpoint: Option<String>,

    /// Bearer token, overriding the stored session
    #[arg(long, env = "ONGOCTL_API_TOKEN", global = true)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chauffeur listings and activation
    Drivers(commands::drivers::DriversArgs),
    /// Cab fleet listings and activation
    Vehicles(commands::vehicles::VehiclesArgs),
    /// Ride listings with date/status filtering
    Courses(commands::courses::CoursesArgs),
    /// Rider account listings and profile updates
    Users(commands::users::UsersArgs),
    /// Driver-onboarding request listings and approval
    Requests(commands::requests::RequestsArgs),
}

/// Build the authenticated API client from flag/env, config file, and
/// stored session, in that priority order.
fn build_client(cli: &Cli) -> Result<Arc<ApiClient>> {
    let config = OngoConfig::load().context("failed to load ~/.ongoctl/config.toml")?;

    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    tracing::debug!(%endpoint, "resolved backend endpoint");

    let session = if let Some(token) = &cli.token {
        SessionStore::ephemeral(Some(Session::bearer(token)))
    } else {
        let store = SessionStore::open(SessionStore::default_path())
            .context("failed to read stored session")?;
        match (store.token(), &config.api.token) {
            (None, Some(token)) => SessionStore::ephemeral(Some(Session::bearer(token))),
            _ => store,
        }
    };

    let client =
        ApiClient::new(endpoint, Arc::new(session)).context("failed to build HTTP client")?;
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init_tracing(cli.debug)?;

    let api = build_client(&cli)?;

    match cli.command {
        Commands::Drivers(args) => commands::drivers::run_drivers(api, args).await,
        Commands::Vehicles(args) => commands::vehicles::run_vehicles(api, args).await,
        Commands::Courses(args) => commands::courses::run_courses(api, args).await,
        Commands::Users(args) => commands::users::run_users(api, args).await,
        Commands::Requests(args) => commands::requests::run_requests(api, args).await,
    }
}
