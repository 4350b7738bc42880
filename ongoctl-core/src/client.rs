//! HTTP collaborator: a thin reqwest wrapper with base-URL resolution,
//! bearer auth from the session context, and a fixed 15-second timeout.
//!
//! The retriever only sees the `ApiTransport` trait, so tests can swap in
//! a scripted in-memory transport.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::session::SessionStore;

/// Default backend base. Overridable via config or `ONGOCTL_API_URL`.
pub const DEFAULT_BASE_URL: &str = "https://api.ongo237.com/api";

/// Fixed client-side timeout; not configurable per call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Opaque request/response surface the retriever dispatches through.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// GET `target`. When `absolute` is true the target is dispatched
    /// verbatim; otherwise it is resolved against the configured base.
    async fn get_json(&self, target: &str, absolute: bool) -> Result<Value, ApiError>;

    /// POST `body` to a resource path (always base-relative).
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    /// PUT `body` to a resource path (always base-relative).
    async fn put_json(&self, path: &str, body: Value) -> Result<Value, ApiError>;
}

/// Bearer-authenticated JSON client for the ride-hailing backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a query target into the URL to dispatch.
    ///
    /// Absolute targets (previously returned pagination links) pass through
    /// byte-for-byte; relative targets join against the base.
    pub fn resolve_target(&self, target: &str, absolute: bool) -> String {
        if absolute {
            target.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                target.trim_start_matches('/')
            )
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Map the response to JSON, stripping the session on 401.
    async fn read_json(&self, target: &str, resp: reqwest::Response) -> Result<Value, ApiError> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(target, "401 from backend, clearing stored session");
            self.session.clear();
            return Err(ApiError::AuthExpired);
        }

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                target: target.to_string(),
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}

#[async_trait]
impl ApiTransport for ApiClient {
    async fn get_json(&self, target: &str, absolute: bool) -> Result<Value, ApiError> {
        // Pagination links arrive fully qualified; everything else is
        // a bare resource path. The target itself is never rewritten.
        let url = self.resolve_target(target, absolute);
        debug!(%url, "GET");

        let resp = self.authorize(self.http.get(&url)).send().await?;
        self.read_json(target, resp).await
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let url = self.resolve_target(path, false);
        debug!(%url, "POST");

        let resp = self
            .authorize(self.http.post(&url))
            .json(&body)
            .send()
            .await?;
        self.read_json(path, resp).await
    }

    async fn put_json(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let url = self.resolve_target(path, false);
        debug!(%url, "PUT");

        let resp = self
            .authorize(self.http.put(&url))
            .json(&body)
            .send()
            .await?;
        self.read_json(path, resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionStore};

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Arc::new(SessionStore::ephemeral(None))).unwrap()
    }

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[test]
    fn test_relative_target_resolves_against_base() {
        let c = client("https://api.example.com/api");
        assert_eq!(
            c.resolve_target("liste-chauffeurs", false),
            "https://api.example.com/api/liste-chauffeurs"
        );
    }

    #[test]
    fn test_trailing_and_leading_slashes_collapse() {
        let c = client("https://api.example.com/api/");
        assert_eq!(
            c.resolve_target("/vehicule/liste-vehicule-dash", false),
            "https://api.example.com/api/vehicule/liste-vehicule-dash"
        );
    }

    #[test]
    fn test_absolute_target_passes_through_verbatim() {
        let c = client("https://api.example.com/api");
        let link = "https://api.example.com/api/list-course-dash?page=2";
        assert_eq!(c.resolve_target(link, true), link);
    }

    #[test]
    fn test_absolute_target_is_not_rebased() {
        // Even a target that looks relative is dispatched untouched in
        // absolute mode; the caller owns the URL.
        let c = client("https://api.example.com/api");
        assert_eq!(
            c.resolve_target("/list-course-dash?page=2", true),
            "/list-course-dash?page=2"
        );
    }

    #[tokio::test]
    async fn test_401_clears_session_and_reports_expiry() {
        let session = Arc::new(SessionStore::ephemeral(Some(Session::bearer("tok"))));
        let c = ApiClient::new("https://api.example.com/api", session.clone()).unwrap();

        let err = c
            .read_json("liste-chauffeurs", response(401, ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::AuthExpired));
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_other_http_errors_keep_the_session() {
        let session = Arc::new(SessionStore::ephemeral(Some(Session::bearer("tok"))));
        let c = ApiClient::new("https://api.example.com/api", session.clone()).unwrap();

        let err = c
            .read_json("liste-chauffeurs", response(500, ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        assert_eq!(session.token().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_success_body_decodes_to_json() {
        let c = client("https://api.example.com/api");
        let value = c
            .read_json("liste-chauffeurs", response(200, r#"{"success":true}"#))
            .await
            .unwrap();
        assert_eq!(value["success"], serde_json::Value::Bool(true));
    }
}
