//! The API client: single requests, SuiteQL queries, batches, and the
//! rate-limit probe.
//!
//! `NetSuiteClient` is the only component that talks to the network and to
//! the token refresher; the batch scheduler never bypasses it.

mod batch;
mod executor;

use std::sync::Arc;

use log::error;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::{Config, RATE_LIMIT_PROBE_PATH};
use crate::error_handling::{EngineError, InitializationError};
use crate::initialization::init_client;
use crate::rate_limit::{self, RateLimitInfo, RateLimitStatus};
use crate::request::RequestSpec;
use crate::retry::{RetryPolicy, RetryStrategy};
use crate::session::SessionStore;

pub use batch::{BatchOptions, ExecutionMode};

/// Client for the account-scoped SuiteTalk REST/SuiteQL API.
///
/// Holds the shared HTTP client, the session handle through which tokens are
/// read and refreshed, and the single-flight refresh gate. Cheap to share
/// behind an `Arc`; all methods take `&self`.
pub struct NetSuiteClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) client_id: String,
    pub(crate) session: Arc<dyn SessionStore>,
    /// Serializes refresh-and-persist sequences across concurrent calls so a
    /// burst of 401s performs a single token exchange.
    pub(crate) refresh_gate: tokio::sync::Mutex<()>,
}

impl NetSuiteClient {
    /// Creates a client from the configuration and a session handle.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(
        config: &Config,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, InitializationError> {
        Ok(Self {
            http: init_client(config)?,
            base_url: config.api_base_url(),
            client_id: config.client_id.clone(),
            session,
            refresh_gate: tokio::sync::Mutex::new(()),
        })
    }

    /// Replaces the account-derived base URL.
    ///
    /// Used to point the client at a sandbox account host or a local test
    /// server; trailing slashes are stripped so endpoint paths join cleanly.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    /// Executes one logical request under a named retry strategy.
    pub async fn single_request(
        &self,
        spec: &RequestSpec,
        strategy: RetryStrategy,
    ) -> Result<Value, EngineError> {
        self.single_request_with_policy(spec, &strategy.policy())
            .await
    }

    /// Executes one logical request under an explicit policy.
    pub async fn single_request_with_policy(
        &self,
        spec: &RequestSpec,
        policy: &RetryPolicy,
    ) -> Result<Value, EngineError> {
        executor::execute(self, spec, policy).await
    }

    /// Runs a SuiteQL query.
    ///
    /// Interior whitespace is collapsed to single spaces before sending; the
    /// query POSTs to the SuiteQL sub-path with a `Prefer: transient` header.
    pub async fn suiteql_query(
        &self,
        query: &str,
        strategy: RetryStrategy,
    ) -> Result<Value, EngineError> {
        let normalized = query.split_whitespace().collect::<Vec<_>>().join(" ");
        let spec = RequestSpec::post(
            crate::config::SUITEQL_PATH,
            serde_json::json!({ "q": normalized }),
        )
        .with_header("Prefer", "transient");
        self.single_request(&spec, strategy).await
    }

    /// Runs an ordered batch of requests.
    ///
    /// Mode selection, windowing, ordering, and abort semantics are described
    /// on [`BatchOptions`] and [`ExecutionMode`].
    pub async fn batch_request(
        &self,
        specs: Vec<RequestSpec>,
        options: BatchOptions,
    ) -> Result<Vec<Value>, EngineError> {
        batch::run(self, specs, options).await
    }

    /// Probes the current rate-limit state with a minimal HEAD request.
    ///
    /// Degrades to an empty [`RateLimitInfo`] (tier healthy, no warning) when
    /// the probe itself cannot be issued; the cause is logged, not surfaced.
    pub async fn check_rate_limit(&self) -> RateLimitStatus {
        let info = match self.probe_rate_limit().await {
            Ok(info) => info,
            Err(e) => {
                error!("Failed to check rate limit: {e}");
                RateLimitInfo::default()
            }
        };
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        rate_limit::evaluate(info, now)
    }

    async fn probe_rate_limit(&self) -> Result<RateLimitInfo, EngineError> {
        let tokens = self
            .session
            .tokens()
            .ok_or_else(|| EngineError::Auth("access token is not available".to_string()))?;

        let url = format!("{}{}", self.base_url, RATE_LIMIT_PROBE_PATH);
        let response = self
            .http
            .head(&url)
            .bearer_auth(&tokens.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| EngineError::Network { attempts: 1, source })?;

        Ok(rate_limit::parse(response.headers()))
    }
}
