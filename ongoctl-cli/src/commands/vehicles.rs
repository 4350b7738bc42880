//! Vehicle fleet listings and cab activation.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ongoctl_core::resources::vehicle::{self, Vehicle};
use ongoctl_core::{ApiClient, ListView};

use crate::commands::{describe_fetch_error, load_listing, pick_format, OutputFormat};
use crate::ui;

#[derive(Parser, Debug)]
pub struct VehiclesArgs {
    #[command(subcommand)]
    pub command: VehiclesCommands,
}

#[derive(Subcommand, Debug)]
pub enum VehiclesCommands {
    /// List the cab fleet
    List(ListArgs),
    /// Activate or deactivate a cab
    Activate(ActivateArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
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
    /// Vehicle id
    pub vehicule_id: i64,
}

pub async fn run_vehicles(api: Arc<ApiClient>, args: VehiclesArgs) -> Result<()> {
    match args.command {
        VehiclesCommands::List(list) => run_list(api, list).await,
        VehiclesCommands::Activate(activate) => run_activate(api, activate).await,
    }
}

async fn run_list(api: Arc<ApiClient>, args: ListArgs) -> Result<()> {
    let view: ListView<Vehicle> = ListView::new(api, vehicle::LIST_ENDPOINT);
    // No free-text search endpoint exists for vehicles.
    let snapshot = load_listing(&view, args.page.as_deref(), None, "").await?;

    match pick_format(args.output, args.json) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot.items)?);
        }
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = snapshot
                .items
                .iter()
                .map(|v| {
                    vec![
                        v.id.to_string(),
                        v.matricule.clone().unwrap_or_else(|| "-".to_string()),
                        format!(
                            "{} / {}",
                            v.modele.as_deref().unwrap_or("-"),
                            v.color.as_deref().unwrap_or("-")
                        ),
                        v.category_label().to_string(),
                        v.driver_name(),
                        v.statut.clone().unwrap_or_else(|| "-".to_string()),
                        if v.online() { "online" } else { "offline" }.to_string(),
                    ]
                })
                .collect();
            ui::print_table(
                &["ID", "PLATE", "MODEL", "CATEGORY", "DRIVER", "STATUS", "LINK"],
                &rows,
            );
            ui::print_pagination(snapshot.meta.as_ref(), &snapshot.links);
        }
    }
    Ok(())
}

async fn run_activate(api: Arc<ApiClient>, args: ActivateArgs) -> Result<()> {
    vehicle::toggle_activation(api.as_ref(), args.vehicule_id)
        .await
        .map_err(describe_fetch_error)?;
    println!("cab activation toggled for vehicle {}", args.vehicule_id);
    Ok(())
}
