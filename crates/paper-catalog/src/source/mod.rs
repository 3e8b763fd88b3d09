//! Data source adapter: one cancellable fetch of the full record set.
//!
//! [`CatalogClient`] performs the single GET against the listing endpoint.
//! [`PaperSource`] spawns it and publishes [`LoadState`] transitions through
//! a watch channel; the states are mutually exclusive over time. Cancelling
//! through the [`CancelHandle`] is silent: the fetch task returns without
//! writing any state, and the join handle reports [`FetchOutcome::Cancelled`].

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::Paper;

/// HTTP client for the catalog provider.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    papers_url: String,
}

/// Accepted response body shapes: a bare record array, or an envelope
/// exposing the array under `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PapersBody {
    Envelope { data: Vec<Value> },
    Bare(Vec<Value>),
}

impl PapersBody {
    fn into_records(self) -> Vec<Value> {
        match self {
            Self::Envelope { data } => data,
            Self::Bare(records) => records,
        }
    }
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self { http, papers_url: config.papers_url.clone() })
    }

    /// Fetch the full record set.
    ///
    /// Records that fail to decode individually are skipped with a warning;
    /// only transport, status, and whole-body decode problems are errors.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or a body
    /// that is neither a record array nor a `data` envelope.
    pub async fn fetch_papers(&self) -> ClientResult<Vec<Paper>> {
        tracing::debug!(url = %self.papers_url, "fetching catalog");

        let response = self.http.get(&self.papers_url).send().await?;
        let response = handle_response(response).await?;

        let body: Value = response.json().await?;
        let raw = serde_json::from_value::<PapersBody>(body)?.into_records();

        let mut papers = Vec::with_capacity(raw.len());
        for value in raw {
            match serde_json::from_value::<Paper>(value) {
                Ok(paper) => papers.push(paper),
                Err(err) => tracing::warn!(%err, "skipping undecodable record"),
            }
        }
        Ok(papers)
    }
}

/// Map non-success statuses to client errors.
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    match status.as_u16() {
        500..=599 => Err(ClientError::server(status.as_u16(), message)),
        _ => Err(ClientError::UnexpectedStatus { status: status.as_u16(), message }),
    }
}

/// Observable fetch state. Exactly one holds at any time.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Fetch in flight.
    #[default]
    Loading,
    /// Records available.
    Loaded(Arc<Vec<Paper>>),
    /// Fetch failed; the message is user-facing.
    Failed(String),
}

impl LoadState {
    /// Whether the fetch is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded records, if any.
    #[must_use]
    pub fn records(&self) -> Option<&Arc<Vec<Paper>>> {
        match self {
            Self::Loaded(records) => Some(records),
            _ => None,
        }
    }
}

/// Terminal outcome of the fetch task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The fetch ran to completion and published loaded or failed.
    Completed,
    /// The cancel signal fired first; no state was written.
    Cancelled,
}

/// Fires the cooperative cancellation signal. Dropping the handle without
/// calling [`CancelHandle::cancel`] cancels as well (deactivation).
#[derive(Debug)]
pub struct CancelHandle(oneshot::Sender<()>);

impl CancelHandle {
    /// Signal cancellation. A fetch that already settled is unaffected.
    pub fn cancel(self) {
        let _ = self.0.send(());
    }
}

/// Spawned adapter owning the single fetch.
#[derive(Debug)]
pub struct PaperSource {
    state: watch::Receiver<LoadState>,
    cancel: Option<CancelHandle>,
    task: Option<JoinHandle<FetchOutcome>>,
}

impl PaperSource {
    /// Activate the adapter: spawn the fetch and start in `Loading`.
    #[must_use]
    pub fn activate(client: CatalogClient) -> Self {
        let (state_tx, state_rx) = watch::channel(LoadState::Loading);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let task = tokio::spawn(run_fetch(client, state_tx, cancel_rx));

        Self { state: state_rx, cancel: Some(CancelHandle(cancel_tx)), task: Some(task) }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Wait until the state leaves `Loading`.
    ///
    /// After a cancellation no transition will ever arrive; the last
    /// observed state (still `Loading`) is returned once the channel closes.
    pub async fn settled(&mut self) -> LoadState {
        loop {
            let current = self.state.borrow().clone();
            if !current.is_loading() {
                return current;
            }
            if self.state.changed().await.is_err() {
                return self.state.borrow().clone();
            }
        }
    }

    /// Deactivate: silently cancel an in-flight fetch and report how the
    /// task ended. Idempotent.
    pub async fn deactivate(&mut self) -> FetchOutcome {
        if let Some(handle) = self.cancel.take() {
            handle.cancel();
        }
        match self.task.take() {
            Some(task) => task.await.unwrap_or(FetchOutcome::Cancelled),
            None => FetchOutcome::Cancelled,
        }
    }
}

async fn run_fetch(
    client: CatalogClient,
    state: watch::Sender<LoadState>,
    mut cancelled: oneshot::Receiver<()>,
) -> FetchOutcome {
    tokio::select! {
        _ = &mut cancelled => {
            tracing::debug!("catalog fetch cancelled before completion");
            FetchOutcome::Cancelled
        }
        result = client.fetch_papers() => {
            match result {
                Ok(papers) => {
                    tracing::info!(count = papers.len(), "catalog loaded");
                    let _ = state.send(LoadState::Loaded(Arc::new(papers)));
                }
                Err(err) => {
                    tracing::error!(%err, "catalog fetch failed");
                    let _ = state.send(LoadState::Failed(err.to_string()));
                }
            }
            FetchOutcome::Completed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_envelope_and_bare() {
        let envelope: PapersBody =
            serde_json::from_str(r#"{"data": [{"id": 1}], "meta": {}}"#).unwrap();
        assert_eq!(envelope.into_records().len(), 1);

        let bare: PapersBody = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(bare.into_records().len(), 2);
    }

    #[test]
    fn test_load_state_accessors() {
        assert!(LoadState::Loading.is_loading());
        assert!(LoadState::Loading.records().is_none());

        let loaded = LoadState::Loaded(Arc::new(Vec::new()));
        assert!(!loaded.is_loading());
        assert!(loaded.records().is_some());

        let failed = LoadState::Failed("HTTP 500".to_string());
        assert!(!failed.is_loading());
        assert!(failed.records().is_none());
    }
}
