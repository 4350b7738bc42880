//! Driver-onboarding request listings and approval.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ongoctl_core::resources::request::{self, DriverRequest};
use ongoctl_core::{ApiClient, ListView};

use crate::commands::{describe_fetch_error, load_listing, pick_format, OutputFormat};
use crate::ui;

#[derive(Parser, Debug)]
pub struct RequestsArgs {
    #[command(subcommand)]
    pub command: RequestsCommands,
}

#[derive(Subcommand, Debug)]
pub enum RequestsCommands {
    /// List pending onboarding requests
    List(ListArgs),
    /// Approve a request by activating the candidate's cab
    Approve(ApproveArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Free-text search term
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
pub struct ApproveArgs {
    /// Vehicle id attached to the onboarding request
    pub vehicule_id: i64,
}

pub async fn run_requests(api: Arc<ApiClient>, args: RequestsArgs) -> Result<()> {
    match args.command {
        RequestsCommands::List(list) => run_list(api, list).await,
        RequestsCommands::Approve(approve) => run_approve(api, approve).await,
    }
}

async fn run_list(api: Arc<ApiClient>, args: ListArgs) -> Result<()> {
    let view: ListView<DriverRequest> = ListView::new(api, request::LIST_ENDPOINT);
    let snapshot = load_listing(
        &view,
        args.page.as_deref(),
        args.search.as_deref(),
        request::FILTER_PREFIX,
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
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.full_name(),
                        r.telephone.clone().unwrap_or_else(|| "-".to_string()),
                        r.matricule.clone().unwrap_or_else(|| "-".to_string()),
                        r.categorie_id
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ]
                })
                .collect();
            ui::print_table(&["ID", "NAME", "PHONE", "PLATE", "CATEGORY"], &rows);
            ui::print_pagination(snapshot.meta.as_ref(), &snapshot.links);
        }
    }
    Ok(())
}

async fn run_approve(api: Arc<ApiClient>, args: ApproveArgs) -> Result<()> {
    request::approve(api.as_ref(), args.vehicule_id)
        .await
        .map_err(describe_fetch_error)?;
    println!(
        "onboarding request approved, cab {} activated",
        args.vehicule_id
    );
    Ok(())
}
