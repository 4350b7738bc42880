//! Driver listings and activation.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ongoctl_core::resources::driver::{self, Driver};
use ongoctl_core::{ApiClient, ListView};

use crate::commands::{describe_fetch_error, load_listing, pick_format, OutputFormat};
use crate::ui;

#[derive(Parser, Debug)]
pub struct DriversArgs {
    #[command(subcommand)]
    pub command: DriversCommands,
}

#[derive(Subcommand, Debug)]
pub enum DriversCommands {
    /// List drivers, optionally filtered by a search term
    List(ListArgs),
    /// Toggle a driver's activation state
    Activate(ActivateArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Free-text search term (name, phone, plate)
    #[arg(long, short)]
    pub search: Option<String>,

    /// Follow a pagination URL printed by a previous listing
    #[arg(long, value_name = "URL")]
    pub page: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ActivateArgs {
    /// Driver's car id
    pub car_id: i64,
}

pub async fn run_drivers(api: Arc<ApiClient>, args: DriversArgs) -> Result<()> {
    match args.command {
        DriversCommands::List(list) => run_list(api, list).await,
        DriversCommands::Activate(activate) => run_activate(api, activate).await,
    }
}

async fn run_list(api: Arc<ApiClient>, args: ListArgs) -> Result<()> {
    let view: ListView<Driver> = ListView::new(api, driver::LIST_ENDPOINT);
    let snapshot = load_listing(
        &view,
        args.page.as_deref(),
        args.search.as_deref(),
        driver::FILTER_PREFIX,
    )
    .await?;

    match pick_format(args.output, args.json) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot.items)?);
        }
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = snapshot
                .items
                .iter()
                .map(|d| {
                    vec![
                        d.id.to_string(),
                        d.full_name(),
                        d.telephone.clone().unwrap_or_else(|| "-".to_string()),
                        d.vehicle_status().unwrap_or("-").to_string(),
                        format!("{:.2} XAF", d.balance_xaf()),
                    ]
                })
                .collect();
            ui::print_table(&["ID", "NAME", "PHONE", "VEHICLE", "BALANCE"], &rows);
            ui::print_pagination(snapshot.meta.as_ref(), &snapshot.links);
        }
    }
    Ok(())
}

async fn run_activate(api: Arc<ApiClient>, args: ActivateArgs) -> Result<()> {
    driver::toggle_activation(api.as_ref(), args.car_id)
        .await
        .map_err(describe_fetch_error)?;
    println!("driver activation toggled for car {}", args.car_id);
    Ok(())
}
