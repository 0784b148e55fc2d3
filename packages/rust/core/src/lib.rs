//! Schema conversion and validation engine for faqbridge.
//!
//! Two components, used in sequence per batch:
//! - [`extract`](extract::extract) — pull the fixed set of logical fields out
//!   of one source record, tolerating name variants and absent properties.
//! - [`project`](validate::project) — apply the admissibility rules and emit
//!   the surviving rows, order-preserved, in either boundary encoding.
//!
//! [`pipeline`] ties the two to the upstream client and the envelope shapes.

pub mod envelope;
pub mod extract;
pub mod pipeline;
pub mod validate;

pub use envelope::{EncodedRows, RowEncoding};
pub use extract::{extract, extract_batch};
pub use pipeline::{ConvertSummary, build_rows, build_sheet, convert_batch, first_answer, sample_rows};
pub use validate::{
    LogRejections, MAX_ANSWER_CHARS, MAX_ANSWER_CHARS_WITH_LANDING, MAX_QUESTION_CHARS,
    RejectionObserver, RejectionReason, SilentRejections, admissibility, project, project_with,
};
