//! Route handlers for the faqbridge service.
//!
//! Three endpoints: a health check, the knowledge export (either boundary
//! encoding, selected per request), and the trivial first-answer lookup.
//! The knowledge endpoint always answers 200 with a well-formed body: the
//! pipeline degrades to sample rows or an empty result, never an error.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{Method, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use faqbridge_core::{EncodedRows, RowEncoding, build_rows, first_answer};
use faqbridge_shared::{Result, SourceConfig};
use faqbridge_source::SourceClient;

/// Reply when no record yields an answer.
const NO_ANSWER_FALLBACK: &str = "No matching information was found.";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    client: Arc<SourceClient>,
    page_size: u32,
}

impl AppState {
    pub fn new(source: SourceConfig) -> Result<Self> {
        let page_size = source.effective_page_size();
        Ok(Self {
            client: Arc::new(SourceClient::new(source)?),
            page_size,
        })
    }
}

/// Build the service router.
///
/// CORS is permissive: the knowledge-ingestion console calls this service
/// from the browser, cross-origin.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(health))
        .route("/knowledge", get(knowledge))
        .route("/answer", post(answer))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
struct KnowledgeParams {
    /// `values` (default) or `objects`.
    format: Option<String>,
}

/// Export the converted knowledge rows in the requested encoding.
async fn knowledge(
    State(state): State<AppState>,
    Query(params): Query<KnowledgeParams>,
) -> Json<EncodedRows> {
    let encoding = RowEncoding::from_query(params.format.as_deref());
    let rows = build_rows(&state.client, state.page_size).await;
    Json(encoding.encode(rows))
}

#[derive(Debug, Serialize)]
struct AnswerBody {
    answer: String,
}

/// First-result answer lookup.
async fn answer(State(state): State<AppState>) -> Json<AnswerBody> {
    let answer = first_answer(&state.client)
        .await
        .unwrap_or_else(|| NO_ANSWER_FALLBACK.to_string());
    Json(AnswerBody { answer })
}
