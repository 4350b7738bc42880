//! Typed records and endpoint catalogs for the five listed resources.
//!
//! The backend serves every collection through the same pagination
//! envelope; these modules pin down the per-resource record shapes so
//! malformed payloads fail decoding explicitly instead of producing
//! silently-missing fields.

pub mod course;
pub mod driver;
pub mod request;
pub mod user;
pub mod vehicle;

use serde_json::Value;

use crate::client::ApiTransport;
use crate::error::{ApiError, FetchError};
use crate::page::Envelope;

/// Run a write endpoint (activation toggles, record updates) and fold the
/// acknowledgement envelope into the soft/transport error taxonomy.
pub async fn post_action(
    api: &dyn ApiTransport,
    path: &str,
    body: Value,
) -> Result<(), FetchError> {
    let raw = api
        .post_json(path, body)
        .await
        .map_err(FetchError::Connection)?;
    ack(path, raw)
}

/// Same as [`post_action`] for PUT endpoints.
pub async fn put_action(api: &dyn ApiTransport, path: &str, body: Value) -> Result<(), FetchError> {
    let raw = api
        .put_json(path, body)
        .await
        .map_err(FetchError::Connection)?;
    ack(path, raw)
}

fn ack(path: &str, raw: Value) -> Result<(), FetchError> {
    let envelope: Envelope<Value> = serde_json::from_value(raw)
        .map_err(|err| FetchError::Connection(ApiError::decode(path, err)))?;

    if envelope.success {
        Ok(())
    } else {
        Err(FetchError::rejected(envelope.message.unwrap_or_else(|| {
            "request rejected by the backend".to_string()
        })))
    }
}
