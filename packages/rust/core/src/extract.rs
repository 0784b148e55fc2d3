//! Field extractor: one source record → one [`ExtractedFields`].
//!
//! Extraction never fails. Every logical field resolves through a primary
//! property name with a single fallback name, and anything absent, malformed,
//! or empty-typed reads as the empty string.

use faqbridge_shared::{CATEGORY_SLOTS, ExtractedFields, SourceRecord};

/// Primary/secondary names for the question field.
const QUESTION_NAMES: (&str, &str) = ("Question", "question");

/// Primary/secondary names for the answer field.
const ANSWER_NAMES: (&str, &str) = ("Answer", "answer");

/// Primary/secondary names for the landing-button label field.
const BUTTON_LABEL_NAMES: (&str, &str) = ("Landing URL Button Name", "landing url button name");

/// Property name of the landing URL field.
const LANDING_URL_NAME: &str = "Landing URL";

/// Alternate property names for the image URL field, tried in order.
const IMAGE_URL_NAMES: (&str, &str) = ("Image Info (URL)", "Image URL");

/// Extract the logical fields of one record.
///
/// `position` is the record's zero-based index in its source batch;
/// `ordinal` is stamped as `position + 1` here, before any filtering.
pub fn extract(record: &SourceRecord, position: usize) -> ExtractedFields {
    let mut category: [String; CATEGORY_SLOTS] = Default::default();
    for (slot, value) in category.iter_mut().enumerate() {
        let level = slot + 1;
        *value = text_with_fallback(
            record,
            &format!("Category{level}"),
            &format!("Category {level}"),
        );
    }

    ExtractedFields {
        ordinal: (position + 1).try_into().unwrap_or(u32::MAX),
        category,
        question: text_with_fallback(record, QUESTION_NAMES.0, QUESTION_NAMES.1),
        answer: text_with_fallback(record, ANSWER_NAMES.0, ANSWER_NAMES.1),
        landing_url: record.url(LANDING_URL_NAME).to_string(),
        landing_button_label: text_with_fallback(
            record,
            BUTTON_LABEL_NAMES.0,
            BUTTON_LABEL_NAMES.1,
        ),
        image_url: url_with_fallback(record, IMAGE_URL_NAMES.0, IMAGE_URL_NAMES.1),
    }
}

/// Extract a whole batch, order-preserving and index-stamped.
pub fn extract_batch(records: &[SourceRecord]) -> Vec<ExtractedFields> {
    records
        .iter()
        .enumerate()
        .map(|(position, record)| extract(record, position))
        .collect()
}

/// Two-way name fallback for text fields.
///
/// A present-but-empty primary and an absent primary are indistinguishable
/// here; both fall through to the secondary name. Accepted simplification.
fn text_with_fallback(record: &SourceRecord, primary: &str, secondary: &str) -> String {
    let value = record.text(primary);
    if value.is_empty() {
        record.text(secondary).to_string()
    } else {
        value.to_string()
    }
}

/// Two-way name fallback for URL fields.
fn url_with_fallback(record: &SourceRecord, primary: &str, secondary: &str) -> String {
    let value = record.url(primary);
    if value.is_empty() {
        record.url(secondary).to_string()
    } else {
        value.to_string()
    }
}
