//! Upstream JSON → [`SourceRecord`] conversion.
//!
//! Property payloads are probed by shape, not by their declared kind tag:
//! `title` and `rich_text` payloads carry identical run arrays, and records
//! created from older API versions sometimes omit the tag entirely. Anything
//! unrecognized degrades to [`PropertyValue::Missing`], which extraction
//! treats like an absent property, never an error.

use serde_json::Value;

use faqbridge_shared::{PropertyValue, SourceRecord, TextRun};

/// Payload keys that carry text-run arrays.
const TEXT_PAYLOAD_KEYS: [&str; 2] = ["rich_text", "title"];

/// Convert one upstream page object into a [`SourceRecord`].
///
/// A page without a `properties` object yields an empty record (all fields
/// will extract as empty strings downstream).
pub fn record_from_json(page: &Value) -> SourceRecord {
    let mut record = SourceRecord::default();

    let Some(props) = page.get("properties").and_then(Value::as_object) else {
        return record;
    };

    for (name, prop) in props {
        record
            .properties
            .insert(name.clone(), property_from_json(prop));
    }

    record
}

/// Map one property payload to its tagged value.
fn property_from_json(prop: &Value) -> PropertyValue {
    for key in TEXT_PAYLOAD_KEYS {
        if let Some(runs) = prop.get(key).and_then(Value::as_array) {
            return PropertyValue::Text(runs.iter().map(text_run_from_json).collect());
        }
    }

    // A `url` key present but null is a present-but-unset URL property.
    if let Some(url) = prop.get("url") {
        return PropertyValue::Url(url.as_str().map(str::to_string));
    }

    PropertyValue::Missing
}

/// A run without a string `plain_text` still occupies its slot, as empty text.
fn text_run_from_json(run: &Value) -> TextRun {
    TextRun::new(run.get("plain_text").and_then(Value::as_str).unwrap_or(""))
}
