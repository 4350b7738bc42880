//! Backend pagination envelope and its normalized form.
//!
//! Every list endpoint wraps its results in the same two-layer shape:
//!
//! ```json
//! { "success": true,
//!   "data": { "data": [...], "links": [...],
//!             "current_page": 1, "from": 1, "to": 15,
//!             "total": 42, "last_page": 3 } }
//! ```
//!
//! The outer layer signals business-level success; the inner layer is the
//! paginator. `from`/`to` arrive as `null` when a page is empty and are
//! normalized to `0` here.

use serde::{Deserialize, Serialize};

/// Outer response wrapper shared by every endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// One page of results as the backend serializes it.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub links: Vec<PageLink>,
    pub current_page: u32,
    #[serde(default)]
    pub from: Option<u32>,
    #[serde(default)]
    pub to: Option<u32>,
    pub total: u64,
    pub last_page: u32,
}

impl<T> Page<T> {
    /// Position within the total result set, with empty-page nulls
    /// normalized to zero.
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            current_page: self.current_page,
            from: self.from.unwrap_or(0),
            to: self.to.unwrap_or(0),
            total: self.total,
            last_page: self.last_page,
        }
    }
}

/// Normalized pagination position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub from: u32,
    pub to: u32,
    pub total: u64,
    pub last_page: u32,
}

/// One navigable page target.
///
/// `url` is `None` when navigation in that direction is unavailable;
/// such a link is a disabled affordance and must never be dispatched.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// How a pagination link should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Previous,
    Next,
    Page,
}

impl PageLink {
    /// Classify a link by its label.
    ///
    /// The previous/next sentinels carry HTML-escaped directional markers
    /// (`&laquo; Previous`, `Next &raquo;`). Directional classification wins
    /// over literal rendering whenever either token is present.
    pub fn kind(&self) -> LinkKind {
        if self.label.contains("Previous") || self.label.contains("&laquo;") {
            LinkKind::Previous
        } else if self.label.contains("Next") || self.label.contains("&raquo;") {
            LinkKind::Next
        } else {
            LinkKind::Page
        }
    }

    /// Terminal-friendly label: directional icons for the sentinels,
    /// the literal page number otherwise.
    pub fn display_label(&self) -> &str {
        match self.kind() {
            LinkKind::Previous => "<",
            LinkKind::Next => ">",
            LinkKind::Page => self.label.as_str(),
        }
    }

    /// A link with no URL is a disabled affordance.
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}
