//! Course (ride) listings with the structured date/status filter.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ongoctl_core::resources::course::{self, Course, CourseFilter};
use ongoctl_core::{ApiClient, ListView};

use crate::commands::{describe_fetch_error, load_listing, pick_format, OutputFormat};
use crate::ui;

#[derive(Parser, Debug)]
pub struct CoursesArgs {
    #[command(subcommand)]
    pub command: CoursesCommands,
}

#[derive(Subcommand, Debug)]
pub enum CoursesCommands {
    /// List courses, with an optional date/status filter
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Filter: departure date lower bound (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Filter: departure date upper bound (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Filter: course status (e.g. TERMINEE, ANNULEE, "EN COURS")
    #[arg(long)]
    pub status: Option<String>,

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

pub async fn run_courses(api: Arc<ApiClient>, args: CoursesArgs) -> Result<()> {
    match args.command {
        CoursesCommands::List(list) => run_list(api, list).await,
    }
}

async fn run_list(api: Arc<ApiClient>, args: ListArgs) -> Result<()> {
    let view: ListView<Course> = ListView::new(api, course::LIST_ENDPOINT);

    let filter = CourseFilter {
        debut: args.from,
        fin: args.to,
        statut: args.status.clone(),
    };

    let snapshot = if args.page.is_none() && !filter.is_empty() {
        // The structured filter goes through its own POST endpoint; an
        // empty filter degrades to the plain listing below.
        view.fetch_posted(course::FILTER_ENDPOINT, serde_json::to_value(&filter)?)
            .await
            .map_err(describe_fetch_error)?;
        view.snapshot()
    } else {
        load_listing(&view, args.page.as_deref(), None, "").await?
    };

    match pick_format(args.output, args.json) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot.items)?);
        }
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = snapshot
                .items
                .iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.code.clone().unwrap_or_else(|| "-".to_string()),
                        c.client.clone().unwrap_or_else(|| "-".to_string()),
                        c.route(),
                        format!(
                            "{} {}",
                            c.date_depart.as_deref().unwrap_or("-"),
                            c.heure_depart.as_deref().unwrap_or("")
                        )
                        .trim_end()
                        .to_string(),
                        format!("{:.0} XAF", c.amount_xaf()),
                        c.statut.clone().unwrap_or_else(|| "-".to_string()),
                        if c.paid() { "paid" } else { "unpaid" }.to_string(),
                    ]
                })
                .collect();
            ui::print_table(
                &[
                    "ID", "CODE", "CLIENT", "ROUTE", "DEPARTURE", "AMOUNT", "STATUS", "PAYMENT",
                ],
                &rows,
            );
            ui::print_pagination(snapshot.meta.as_ref(), &snapshot.links);
        }
    }
    Ok(())
}
