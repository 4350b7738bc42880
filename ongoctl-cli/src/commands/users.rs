//! Rider account listings and profile updates.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ongoctl_core::resources::user::{self, User, UserUpdate};
use ongoctl_core::{ApiClient, ListView};

use crate::commands::{describe_fetch_error, load_listing, pick_format, OutputFormat};
use crate::ui;

#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommands,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// List rider accounts
    List(ListArgs),
    /// Update a user's profile fields
    Update(UpdateArgs),
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
pub struct UpdateArgs {
    /// User id
    pub id: i64,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New profile image URL
    #[arg(long)]
    pub img: Option<String>,
}

pub async fn run_users(api: Arc<ApiClient>, args: UsersArgs) -> Result<()> {
    match args.command {
        UsersCommands::List(list) => run_list(api, list).await,
        UsersCommands::Update(update) => run_update(api, update).await,
    }
}

async fn run_list(api: Arc<ApiClient>, args: ListArgs) -> Result<()> {
    let view: ListView<User> = ListView::new(api, user::LIST_ENDPOINT);
    // The users endpoint offers no server-side search.
    let snapshot = load_listing(&view, args.page.as_deref(), None, "").await?;

    match pick_format(args.output, args.json) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot.items)?);
        }
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = snapshot
                .items
                .iter()
                .map(|u| {
                    vec![
                        u.id.to_string(),
                        u.full_name(),
                        u.email.clone().unwrap_or_else(|| "-".to_string()),
                        u.telephone.clone().unwrap_or_else(|| "-".to_string()),
                        format!("{:.2} XAF", u.balance.unwrap_or(0.0)),
                        if u.is_agency() { "agency" } else { "rider" }.to_string(),
                    ]
                })
                .collect();
            ui::print_table(&["ID", "NAME", "EMAIL", "PHONE", "BALANCE", "KIND"], &rows);
            ui::print_pagination(snapshot.meta.as_ref(), &snapshot.links);
        }
    }
    Ok(())
}

async fn run_update(api: Arc<ApiClient>, args: UpdateArgs) -> Result<()> {
    let update = UserUpdate {
        nom_utilisateur: args.name,
        description: args.description,
        img: args.img,
    };

    user::update(api.as_ref(), args.id, &update)
        .await
        .map_err(describe_fetch_error)?;
    println!("user {} updated", args.id);
    Ok(())
}
