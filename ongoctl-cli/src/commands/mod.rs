//! Command implementations for the ongoctl CLI

pub mod courses;
pub mod drivers;
pub mod requests;
pub mod users;
pub mod vehicles;

use anyhow::anyhow;
use clap::ValueEnum;
use ongoctl_core::{FetchError, ListSnapshot, ListView};
use serde::de::DeserializeOwned;

/// Output format shared by all list commands.
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
}

pub fn pick_format(output: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        output
    }
}

/// Fold a retrieval failure into a user-facing error: soft failures carry
/// the backend's message, transport failures a generic connectivity one.
pub fn describe_fetch_error(err: FetchError) -> anyhow::Error {
    match err {
        FetchError::Rejected { message } => anyhow!("backend rejected the request: {message}"),
        FetchError::Connection(source) => {
            anyhow::Error::new(source).context("connection to the backend failed")
        }
    }
}

/// Shared first-load flow: an explicit `--page` URL wins (dispatched
/// verbatim), then a search term against the resource's filter prefix,
/// then the unfiltered default listing.
pub async fn load_listing<T>(
    view: &ListView<T>,
    page: Option<&str>,
    search: Option<&str>,
    filter_prefix: &str,
) -> anyhow::Result<ListSnapshot<T>>
where
    T: DeserializeOwned + Clone,
{
    let result = if let Some(url) = page {
        view.fetch_page(url, true).await
    } else if let Some(term) = search {
        view.fetch_filtered(term, filter_prefix, false).await
    } else {
        let endpoint = view.default_endpoint().to_string();
        view.fetch_page(&endpoint, false).await
    };

    result.map_err(describe_fetch_error)?;
    Ok(view.snapshot())
}
