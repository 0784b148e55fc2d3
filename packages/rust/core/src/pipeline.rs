//! End-to-end conversion pipeline: query → extract → project → envelope.
//!
//! The engine itself (extraction and projection) is pure and synchronous;
//! this module is the only place in core that touches the upstream client.
//! Upstream failure never surfaces to the boundary as an error: the pipeline
//! degrades to the built-in sample rows, and callers that need a hard-empty
//! result use [`RowEncoding::empty`](crate::envelope::RowEncoding::empty).

use tracing::{info, instrument, warn};

use faqbridge_shared::{ExtractedFields, FaqBridgeError, KnowledgeSheet, OutputRow, SourceRecord};
use faqbridge_source::SourceClient;

use crate::extract::{extract, extract_batch};
use crate::validate::{LogRejections, RejectionObserver, project_with};

/// Page size for the first-result answer lookup.
const ANSWER_LOOKUP_PAGE_SIZE: u32 = 5;

/// Per-batch conversion counts.
#[derive(Debug, Clone, Copy)]
pub struct ConvertSummary {
    /// Records in the source batch.
    pub fetched: usize,
    /// Rows that passed admissibility.
    pub accepted: usize,
    /// Records dropped by the filter.
    pub rejected: usize,
}

/// Convert a fully-materialized batch in one order-preserving pass.
pub fn convert_batch(
    records: &[SourceRecord],
    observer: &dyn RejectionObserver,
) -> (Vec<OutputRow>, ConvertSummary) {
    let extracted = extract_batch(records);
    let rows = project_with(&extracted, observer);
    let summary = ConvertSummary {
        fetched: records.len(),
        accepted: rows.len(),
        rejected: records.len() - rows.len(),
    };
    (rows, summary)
}

/// The single hardcoded row served while the upstream is unconfigured or
/// unavailable, so the ingestion API always sees a usable sheet.
pub fn sample_rows() -> Vec<OutputRow> {
    let fields = ExtractedFields {
        ordinal: 1,
        category: [
            "Onboarding".into(),
            "Community".into(),
            String::new(),
            String::new(),
            String::new(),
        ],
        question: "How do I join the community cafe?".into(),
        answer: "Click the join button and post your introduction; approval usually takes one to two days.".into(),
        landing_url: "https://cafe.example.com/linkus".into(),
        landing_button_label: "Open cafe".into(),
        image_url: String::new(),
    };
    vec![OutputRow::from(&fields)]
}

/// Produce the projected rows for one knowledge request.
///
/// Unconfigured credentials and an upstream query rejection both degrade to
/// [`sample_rows`] (service continuity); a transport or decode failure yields
/// an empty sequence, which the caller wraps as the well-formed empty result.
/// A successful query yields the converted batch, which may legitimately be
/// empty.
#[instrument(skip(client))]
pub async fn build_rows(client: &SourceClient, page_size: u32) -> Vec<OutputRow> {
    if !client.is_configured() {
        info!("source credentials not configured, serving sample rows");
        return sample_rows();
    }

    match client.query_batch(page_size).await {
        Ok(batch) => {
            let (rows, summary) = convert_batch(&batch.records, &LogRejections);
            info!(
                fetched = summary.fetched,
                accepted = summary.accepted,
                rejected = summary.rejected,
                fetched_at = %batch.fetched_at,
                "batch converted"
            );
            if rows.is_empty() && summary.fetched > 0 {
                warn!("every record in the batch was rejected; check the source data against the admissibility rules");
            }
            rows
        }
        Err(FaqBridgeError::Upstream { status }) => {
            warn!(status, "upstream rejected the query, serving sample rows");
            sample_rows()
        }
        Err(e) => {
            warn!(error = %e, "upstream query failed, serving empty result");
            Vec::new()
        }
    }
}

/// [`build_rows`] wrapped in the values envelope.
pub async fn build_sheet(client: &SourceClient, page_size: u32) -> KnowledgeSheet {
    KnowledgeSheet::from_rows(&build_rows(client, page_size).await)
}

/// Trivial first-result lookup backing the answer endpoint: the answer text
/// of the first record in the database, if there is one.
#[instrument(skip_all)]
pub async fn first_answer(client: &SourceClient) -> Option<String> {
    if !client.is_configured() {
        return None;
    }

    let batch = client.query_batch(ANSWER_LOOKUP_PAGE_SIZE).await.ok()?;
    let record = batch.records.first()?;
    let answer = extract(record, 0).answer;
    (!answer.is_empty()).then_some(answer)
}
