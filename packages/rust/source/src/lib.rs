//! Upstream document-source client for faqbridge.
//!
//! Fetches one page of records from the source database's query endpoint and
//! converts the raw JSON property map into the typed
//! [`SourceRecord`](faqbridge_shared::SourceRecord) model. Transport only;
//! no extraction or validation happens here.

pub mod client;
pub mod parse;

pub use client::{QueryBatch, SourceClient};
pub use parse::record_from_json;
