pub mod client;
pub mod config;
pub mod error;
pub mod page;
pub mod resources;
pub mod retriever;
pub mod session;

pub use client::{ApiClient, ApiTransport, DEFAULT_BASE_URL};
pub use config::OngoConfig;
pub use error::{ApiError, FetchError};
pub use page::{Envelope, LinkKind, Page, PageLink, PageMeta};
pub use retriever::{Applied, ListSnapshot, ListView};
pub use session::{Session, SessionStore};
