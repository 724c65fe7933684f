//! Typed wrapper over the ledger authority's HTTP endpoints.
//!
//! Single-shot requests only: nothing here retries, and callers are
//! expected to surface errors and allow re-submission. Responses carry
//! the authoritative balance; callers overwrite their local copy with
//! it and never add or subtract locally.

use crate::{Error, Result};
use royale_types::{
    BalanceResponse, ErrorResponse, HistoryResponse, TransactionRecord, TransferRequest,
    WagerRequest, WagerResult,
};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default transport timeout. A hung request would otherwise hold the
/// session's in-flight gate indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct LedgerClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl LedgerClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        match endpoint.scheme() {
            "http" | "https" => {}
            scheme => return Err(Error::InvalidScheme(scheme.to_string())),
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    fn action_url(&self, action: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("action", action);
        url
    }

    /// Fetch the authoritative balance. Read-only; safe to call while
    /// an operation is in flight.
    pub async fn balance(&self) -> Result<u64> {
        let response = self.client.get(self.action_url("balance")).send().await?;
        let response = Self::check(response).await?;
        let body: BalanceResponse = response.json().await?;
        debug!(balance = body.balance, "fetched balance");
        Ok(body.balance)
    }

    /// Submit a deposit or withdrawal; returns the new authoritative
    /// balance on success.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<u64> {
        let response = self
            .client
            .post(self.action_url("transfer"))
            .json(request)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body: BalanceResponse = response.json().await?;
        Ok(body.balance)
    }

    /// Submit a wager for settlement. The returned balance already
    /// reflects both the bet and any win.
    pub async fn play(&self, request: &WagerRequest) -> Result<WagerResult> {
        let response = self
            .client
            .post(self.action_url("play"))
            .json(request)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch the most recent transactions, newest first.
    pub async fn history(&self) -> Result<Vec<TransactionRecord>> {
        let response = self.client.get(self.action_url("history")).send().await?;
        let response = Self::check(response).await?;
        let body: HistoryResponse = response.json().await?;
        Ok(body.transactions)
    }

    /// Map non-success statuses to [`Error::Rejected`], using the
    /// server's `{error}` body when present and a generic fallback
    /// otherwise.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "ledger request failed".to_string());
        Err(Error::Rejected { status, message })
    }
}
