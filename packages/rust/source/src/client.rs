//! Query client for the upstream document-source API.
//!
//! One call, one page: the engine works on fully-materialized batches bounded
//! by the upstream page cap, so the client never follows cursors. Fetch
//! failures surface as errors here; the conversion pipeline decides what to
//! substitute.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use faqbridge_shared::{FaqBridgeError, PAGE_SIZE_CAP, Result, SourceConfig, SourceRecord};

use crate::parse::record_from_json;

/// User-Agent string for upstream requests.
const USER_AGENT: &str = concat!("faqbridge/", env!("CARGO_PKG_VERSION"));

/// Header carrying the versioned-API date.
const VERSION_HEADER: &str = "Notion-Version";

// ---------------------------------------------------------------------------
// QueryBatch
// ---------------------------------------------------------------------------

/// One page of source records, as returned by a single upstream query.
#[derive(Debug, Clone)]
pub struct QueryBatch {
    /// Records in upstream order.
    pub records: Vec<SourceRecord>,
    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
    /// Whether the upstream reported more records beyond this page.
    pub has_more: bool,
}

// ---------------------------------------------------------------------------
// SourceClient
// ---------------------------------------------------------------------------

/// HTTP client for the document-source database query endpoint.
pub struct SourceClient {
    config: SourceConfig,
    client: Client,
}

impl SourceClient {
    /// Create a new client with the given source configuration.
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FaqBridgeError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Whether token and database id are both available.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Fetch one page of records from the configured database.
    ///
    /// `page_size` is clamped to the upstream cap of 100 records.
    #[instrument(skip(self))]
    pub async fn query_batch(&self, page_size: u32) -> Result<QueryBatch> {
        let token = self.config.resolve_token().ok_or_else(|| {
            FaqBridgeError::config(format!(
                "source API token not set; export {}",
                self.config.token_env
            ))
        })?;
        let database_id = self
            .config
            .resolve_database_id()
            .ok_or_else(|| FaqBridgeError::config("source database id not set"))?;

        let endpoint = self
            .config
            .base_url()?
            .join(&format!("v1/databases/{database_id}/query"))
            .map_err(|e| FaqBridgeError::config(format!("invalid query endpoint: {e}")))?;

        let page_size = page_size.clamp(1, PAGE_SIZE_CAP);

        let response = self
            .client
            .post(endpoint.as_str())
            .bearer_auth(&token)
            .header(VERSION_HEADER, &self.config.api_version)
            .json(&serde_json::json!({ "page_size": page_size }))
            .send()
            .await
            .map_err(|e| FaqBridgeError::Network(format!("{endpoint}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                %status,
                body = %body.chars().take(200).collect::<String>(),
                "upstream query failed"
            );
            return Err(FaqBridgeError::Upstream {
                status: status.as_u16(),
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FaqBridgeError::parse(format!("query response decode failed: {e}")))?;

        let records: Vec<SourceRecord> = payload
            .get("results")
            .and_then(serde_json::Value::as_array)
            .map(|results| results.iter().map(record_from_json).collect())
            .unwrap_or_default();

        let has_more = payload
            .get("has_more")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);

        debug!(records = records.len(), has_more, "fetched source batch");

        Ok(QueryBatch {
            records,
            fetched_at: Utc::now(),
            has_more,
        })
    }
}
