//! Paginated list retriever.
//!
//! Every list page in the dashboard drives the same protocol: fetch one
//! page of results, normalize the backend's pagination envelope into a
//! uniform `(items, links, meta)` triple, and re-query on page navigation
//! or an applied filter. `ListView` is that protocol, generic over the
//! resource's record type.
//!
//! Overlapping requests are sequenced: each dispatch takes a ticket and a
//! response is applied only while its ticket is still the newest, so a
//! stale in-flight request can never clobber newer state.

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::ApiTransport;
use crate::error::{ApiError, FetchError};
use crate::page::{Envelope, Page, PageLink, PageMeta};

/// Whether a resolved response was applied to the view or discarded
/// because a newer request superseded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Fresh,
    Superseded,
}

/// A consistent copy of the view's display state.
#[derive(Debug, Clone)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub links: Vec<PageLink>,
    pub meta: Option<PageMeta>,
}

struct ViewState<T> {
    items: Vec<T>,
    links: Vec<PageLink>,
    meta: Option<PageMeta>,
    loading: bool,
    // Ticket of the newest dispatch. Guarded by the same lock as the
    // display fields so checking and writing are one critical section.
    seq: u64,
}

/// One list view instance: current page of `T` plus navigation state.
pub struct ListView<T> {
    api: Arc<dyn ApiTransport>,
    default_endpoint: String,
    state: Mutex<ViewState<T>>,
}

impl<T: DeserializeOwned> ListView<T> {
    pub fn new(api: Arc<dyn ApiTransport>, default_endpoint: impl Into<String>) -> Self {
        Self {
            api,
            default_endpoint: default_endpoint.into(),
            state: Mutex::new(ViewState {
                items: Vec::new(),
                links: Vec::new(),
                meta: None,
                loading: false,
                seq: 0,
            }),
        }
    }

    /// The resource's unfiltered listing endpoint.
    pub fn default_endpoint(&self) -> &str {
        &self.default_endpoint
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn snapshot(&self) -> ListSnapshot<T>
    where
        T: Clone,
    {
        let state = self.lock();
        ListSnapshot {
            items: state.items.clone(),
            links: state.links.clone(),
            meta: state.meta,
        }
    }

    /// Fetch one page. `target` is a bare resource path when `absolute` is
    /// false, or a previously returned pagination URL dispatched verbatim
    /// when `absolute` is true.
    ///
    /// On soft failure (`success: false`) or transport failure the
    /// previously displayed items are retained and the loading flag is
    /// still cleared.
    pub async fn fetch_page(&self, target: &str, absolute: bool) -> Result<Applied, FetchError> {
        let ticket = self.begin();
        let outcome = self.dispatch_get(target, absolute).await;
        self.apply(ticket, outcome)
    }

    /// Re-query with a free-text term path-embedded under `endpoint_prefix`.
    ///
    /// An empty term or an empty prefix degrades to the unfiltered default
    /// listing; this is the documented fallback, not an error. The term is
    /// percent-encoded before concatenation so reserved characters cannot
    /// change the dispatched route.
    pub async fn fetch_filtered(
        &self,
        term: &str,
        endpoint_prefix: &str,
        absolute: bool,
    ) -> Result<Applied, FetchError> {
        if term.is_empty() || endpoint_prefix.is_empty() {
            let default = self.default_endpoint.clone();
            return self.fetch_page(&default, false).await;
        }

        let target = format!(
            "{}/{}",
            endpoint_prefix.trim_end_matches('/'),
            urlencoding::encode(term)
        );
        self.fetch_page(&target, absolute).await
    }

    /// Re-query through a POST endpoint carrying a structured filter body
    /// (the course date/status filter uses this).
    pub async fn fetch_posted(&self, path: &str, body: Value) -> Result<Applied, FetchError> {
        let ticket = self.begin();
        let outcome = match self.api.post_json(path, body).await {
            Ok(raw) => Self::decode(path, raw),
            Err(err) => Err(FetchError::Connection(err)),
        };
        self.apply(ticket, outcome)
    }

    /// Navigate via a pagination link. A link without a URL is a disabled
    /// affordance: no request is dispatched.
    pub async fn follow(&self, link: &PageLink) -> Result<(), FetchError> {
        let Some(url) = link.url.clone() else {
            debug!(label = %link.label, "ignoring disabled pagination link");
            return Ok(());
        };
        self.fetch_page(&url, true).await.map(|_| ())
    }

    fn begin(&self) -> u64 {
        let mut state = self.lock();
        state.seq += 1;
        state.loading = true;
        state.seq
    }

    async fn dispatch_get(&self, target: &str, absolute: bool) -> Result<Page<T>, FetchError> {
        let raw = self
            .api
            .get_json(target, absolute)
            .await
            .map_err(FetchError::Connection)?;
        Self::decode(target, raw)
    }

    fn decode(target: &str, raw: Value) -> Result<Page<T>, FetchError> {
        let envelope: Envelope<Page<T>> = serde_json::from_value(raw)
            .map_err(|err| FetchError::Connection(ApiError::decode(target, err)))?;

        if !envelope.success {
            return Err(FetchError::rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "request rejected by the backend".to_string()),
            ));
        }

        envelope.data.ok_or_else(|| {
            FetchError::Connection(ApiError::decode(
                target,
                <serde_json::Error as serde::de::Error>::custom(
                    "success envelope without page data",
                ),
            ))
        })
    }

    fn apply(
        &self,
        ticket: u64,
        outcome: Result<Page<T>, FetchError>,
    ) -> Result<Applied, FetchError> {
        let mut state = self.lock();

        // The staleness check and the state write happen under the same
        // lock: once a resolution sees its ticket is current, nothing can
        // slip in between the check and the write.
        if state.seq != ticket {
            debug!(ticket, "discarding superseded response");
            return Ok(Applied::Superseded);
        }

        state.loading = false;

        match outcome {
            Ok(page) => {
                state.meta = Some(page.meta());
                state.items = page.data;
                state.links = page.links;
                Ok(Applied::Fresh)
            }
            // Previous items stay on screen for both failure classes.
            Err(err) => Err(err),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ViewState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use tokio::sync::Notify;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        method: &'static str,
        target: String,
        absolute: bool,
    }

    /// Replays queued responses and records every dispatched call.
    struct ScriptedApi {
        calls: Mutex<Vec<Call>>,
        responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    }

    impl ScriptedApi {
        fn new(responses: Vec<Result<Value, ApiError>>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                responses: Mutex::new(responses.into()),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, method: &'static str, target: &str, absolute: bool) {
            self.calls.lock().unwrap().push(Call {
                method,
                target: target.to_string(),
                absolute,
            });
        }

        fn next_response(&self) -> Result<Value, ApiError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("test dispatched more calls than scripted")
        }
    }

    #[async_trait::async_trait]
    impl ApiTransport for ScriptedApi {
        async fn get_json(&self, target: &str, absolute: bool) -> Result<Value, ApiError> {
            self.record("GET", target, absolute);
            self.next_response()
        }

        async fn post_json(&self, path: &str, _body: Value) -> Result<Value, ApiError> {
            self.record("POST", path, false);
            self.next_response()
        }

        async fn put_json(&self, path: &str, _body: Value) -> Result<Value, ApiError> {
            self.record("PUT", path, false);
            self.next_response()
        }
    }

    fn envelope(items: Vec<Value>, links: Vec<Value>) -> Value {
        let count = items.len() as u64;
        let (from, to) = if count == 0 {
            (Value::Null, Value::Null)
        } else {
            (json!(1), json!(count))
        };
        json!({
            "success": true,
            "data": {
                "data": items,
                "links": links,
                "current_page": 1,
                "from": from,
                "to": to,
                "total": count,
                "last_page": 1
            }
        })
    }

    fn transport_error() -> ApiError {
        ApiError::Http {
            status: 500,
            target: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_relative_target_dispatched_unmodified() {
        let api = ScriptedApi::new(vec![Ok(envelope(vec![], vec![]))]);
        let view: ListView<Value> = ListView::new(api.clone(), "liste-chauffeurs");

        view.fetch_page("liste-chauffeurs", false).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![Call {
                method: "GET",
                target: "liste-chauffeurs".to_string(),
                absolute: false
            }]
        );
    }

    #[tokio::test]
    async fn test_absolute_target_dispatched_verbatim() {
        let api = ScriptedApi::new(vec![Ok(envelope(vec![], vec![]))]);
        let view: ListView<Value> = ListView::new(api.clone(), "liste-chauffeurs");

        let url = "https://api.example.com/api/liste-chauffeurs?page=3";
        view.fetch_page(url, true).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls[0].target, url);
        assert!(calls[0].absolute);
    }

    #[tokio::test]
    async fn test_empty_term_falls_back_to_default_listing() {
        let api = ScriptedApi::new(vec![Ok(envelope(vec![], vec![]))]);
        let view: ListView<Value> = ListView::new(api.clone(), "liste-chauffeurs");

        view.fetch_filtered("", "utilisateur/filtre-driver", false)
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![Call {
                method: "GET",
                target: "liste-chauffeurs".to_string(),
                absolute: false
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_prefix_falls_back_to_default_listing() {
        let api = ScriptedApi::new(vec![Ok(envelope(vec![], vec![]))]);
        let view: ListView<Value> = ListView::new(api.clone(), "liste-chauffeurs");

        view.fetch_filtered("martin", "", false).await.unwrap();

        assert_eq!(api.calls()[0].target, "liste-chauffeurs");
    }

    #[tokio::test]
    async fn test_filter_term_is_percent_encoded() {
        let api = ScriptedApi::new(vec![Ok(envelope(vec![], vec![]))]);
        let view: ListView<Value> = ListView::new(api.clone(), "liste-chauffeurs");

        view.fetch_filtered("a/b?c&d", "utilisateur/filtre-driver", false)
            .await
            .unwrap();

        assert_eq!(
            api.calls()[0].target,
            "utilisateur/filtre-driver/a%2Fb%3Fc%26d"
        );
    }

    #[tokio::test]
    async fn test_null_link_is_a_no_op() {
        let api = ScriptedApi::new(vec![]);
        let view: ListView<Value> = ListView::new(api.clone(), "liste-chauffeurs");

        let disabled = PageLink {
            url: None,
            label: "&laquo; Previous".to_string(),
            active: false,
        };
        view.follow(&disabled).await.unwrap();

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_envelope_normalized() {
        let api = ScriptedApi::new(vec![Ok(envelope(
            vec![json!({"id": 1}), json!({"id": 2})],
            vec![],
        ))]);
        let view: ListView<Value> = ListView::new(api, "liste-chauffeurs");

        let applied = view.fetch_page("liste-chauffeurs", false).await.unwrap();
        assert_eq!(applied, Applied::Fresh);

        let snap = view.snapshot();
        assert_eq!(snap.items, vec![json!({"id": 1}), json!({"id": 2})]);
        let meta = snap.meta.unwrap();
        assert_eq!(meta.from, 1);
        assert_eq!(meta.to, 2);
        assert_eq!(meta.total, 2);
    }

    #[tokio::test]
    async fn test_soft_failure_retains_previous_items() {
        let api = ScriptedApi::new(vec![
            Ok(envelope(vec![json!({"id": 1})], vec![])),
            Ok(json!({"success": false, "message": "X"})),
        ]);
        let view: ListView<Value> = ListView::new(api, "liste-chauffeurs");

        view.fetch_page("liste-chauffeurs", false).await.unwrap();
        let err = view
            .fetch_page("liste-chauffeurs", false)
            .await
            .unwrap_err();

        match err {
            FetchError::Rejected { message } => assert_eq!(message, "X"),
            other => panic!("expected soft failure, got {other:?}"),
        }
        assert_eq!(view.snapshot().items, vec![json!({"id": 1})]);
    }

    #[tokio::test]
    async fn test_transport_failure_retains_previous_items() {
        let api = ScriptedApi::new(vec![
            Ok(envelope(vec![json!({"id": 1})], vec![])),
            Err(transport_error()),
        ]);
        let view: ListView<Value> = ListView::new(api, "liste-chauffeurs");

        view.fetch_page("liste-chauffeurs", false).await.unwrap();
        let err = view
            .fetch_page("liste-chauffeurs", false)
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(view.snapshot().items, vec![json!({"id": 1})]);
    }

    #[tokio::test]
    async fn test_loading_cleared_on_every_resolution_path() {
        let api = ScriptedApi::new(vec![
            Ok(envelope(vec![], vec![])),
            Ok(json!({"success": false, "message": "nope"})),
            Err(transport_error()),
        ]);
        let view: ListView<Value> = ListView::new(api, "liste-chauffeurs");

        view.fetch_page("liste-chauffeurs", false).await.unwrap();
        assert!(!view.is_loading());

        view.fetch_page("liste-chauffeurs", false).await.unwrap_err();
        assert!(!view.is_loading());

        view.fetch_page("liste-chauffeurs", false).await.unwrap_err();
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_paginate_end_to_end() {
        // First load returns one numeric link; following it must dispatch
        // the link URL byte-for-byte.
        let link = json!({"url": "/list-course-dash?page=2", "label": "2", "active": false});
        let api = ScriptedApi::new(vec![
            Ok(envelope(vec![json!({"id": 1}), json!({"id": 2})], vec![link])),
            Ok(envelope(vec![json!({"id": 3})], vec![])),
        ]);
        let view: ListView<Value> = ListView::new(api.clone(), "list-course-dash");

        view.fetch_page("list-course-dash", false).await.unwrap();
        let links = view.snapshot().links;
        assert_eq!(links.len(), 1);

        view.follow(&links[0]).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls[1].target, "/list-course-dash?page=2");
        assert!(calls[1].absolute);
        assert_eq!(view.snapshot().items, vec![json!({"id": 3})]);
    }

    #[tokio::test]
    async fn test_posted_filter_replaces_view() {
        let api = ScriptedApi::new(vec![Ok(envelope(vec![json!({"id": 9})], vec![]))]);
        let view: ListView<Value> = ListView::new(api.clone(), "list-course-dash");

        view.fetch_posted("filter-course", json!({"statut": "TERMINEE"}))
            .await
            .unwrap();

        assert_eq!(api.calls()[0].method, "POST");
        assert_eq!(api.calls()[0].target, "filter-course");
        assert_eq!(view.snapshot().items, vec![json!({"id": 9})]);
    }

    /// Transport whose `slow` target blocks until released, for exercising
    /// out-of-order resolution.
    struct GatedApi {
        started: Notify,
        release: Notify,
    }

    #[async_trait::async_trait]
    impl ApiTransport for GatedApi {
        async fn get_json(&self, target: &str, _absolute: bool) -> Result<Value, ApiError> {
            if target == "slow" {
                self.started.notify_one();
                self.release.notified().await;
                Ok(envelope(vec![json!({"origin": "slow"})], vec![]))
            } else {
                Ok(envelope(vec![json!({"origin": "fast"})], vec![]))
            }
        }

        async fn post_json(&self, _path: &str, _body: Value) -> Result<Value, ApiError> {
            unreachable!("not used in this test")
        }

        async fn put_json(&self, _path: &str, _body: Value) -> Result<Value, ApiError> {
            unreachable!("not used in this test")
        }
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let api = Arc::new(GatedApi {
            started: Notify::new(),
            release: Notify::new(),
        });
        let view: Arc<ListView<Value>> = Arc::new(ListView::new(api.clone(), "slow"));

        let slow_view = view.clone();
        let slow = tokio::spawn(async move { slow_view.fetch_page("slow", false).await });

        // Issue the second request only once the first is in flight.
        api.started.notified().await;
        let applied = view.fetch_page("fast", false).await.unwrap();
        assert_eq!(applied, Applied::Fresh);

        // Let the first request resolve late; it must not overwrite.
        api.release.notify_one();
        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale, Applied::Superseded);

        assert_eq!(view.snapshot().items, vec![json!({"origin": "fast"})]);
    }

    /// Transport where every target blocks on its own gate, so the test
    /// controls the exact resolution order of overlapping requests.
    struct HeldApi {
        first_started: Notify,
        first_release: Notify,
        second_started: Notify,
        second_release: Notify,
    }

    #[async_trait::async_trait]
    impl ApiTransport for HeldApi {
        async fn get_json(&self, target: &str, _absolute: bool) -> Result<Value, ApiError> {
            if target == "first" {
                self.first_started.notify_one();
                self.first_release.notified().await;
            } else {
                self.second_started.notify_one();
                self.second_release.notified().await;
            }
            Ok(envelope(vec![json!({"origin": target})], vec![]))
        }

        async fn post_json(&self, _path: &str, _body: Value) -> Result<Value, ApiError> {
            unreachable!("not used in this test")
        }

        async fn put_json(&self, _path: &str, _body: Value) -> Result<Value, ApiError> {
            unreachable!("not used in this test")
        }
    }

    #[tokio::test]
    async fn test_superseded_resolution_leaves_newer_request_in_charge() {
        // A stale resolution arriving while the newer request is still in
        // flight must not touch the view at all: the loading flag stays set
        // and the items stay as they were.
        let api = Arc::new(HeldApi {
            first_started: Notify::new(),
            first_release: Notify::new(),
            second_started: Notify::new(),
            second_release: Notify::new(),
        });
        let view: Arc<ListView<Value>> = Arc::new(ListView::new(api.clone(), "first"));

        let first_view = view.clone();
        let first = tokio::spawn(async move { first_view.fetch_page("first", false).await });
        api.first_started.notified().await;

        let second_view = view.clone();
        let second = tokio::spawn(async move { second_view.fetch_page("second", false).await });
        api.second_started.notified().await;

        // Resolve the older request while the newer one is still pending.
        api.first_release.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), Applied::Superseded);
        assert!(view.is_loading());
        assert!(view.snapshot().items.is_empty());

        api.second_release.notify_one();
        assert_eq!(second.await.unwrap().unwrap(), Applied::Fresh);
        assert!(!view.is_loading());
        assert_eq!(view.snapshot().items, vec![json!({"origin": "second"})]);
    }
}
