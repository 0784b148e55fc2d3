//! Core domain types for the faqbridge conversion engine.
//!
//! The flow through these types is one-directional:
//! [`SourceRecord`] (upstream property map) → [`ExtractedFields`] (canonical
//! intermediate) → [`OutputRow`] (boundary row, object or array form) →
//! [`KnowledgeSheet`] (values envelope).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of category levels in the knowledge schema. All slots are always
/// present in output rows, empty or not.
pub const CATEGORY_SLOTS: usize = 5;

/// Schema version tag carried by the values envelope.
pub const SCHEMA_TYPE: &str = "1.0";

/// Number of scalar fields in the array row form.
pub const ROW_WIDTH: usize = 10;

// ---------------------------------------------------------------------------
// Source properties
// ---------------------------------------------------------------------------

/// One run of a rich-text property payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    /// The plain-text rendering of this run.
    pub plain_text: String,
}

impl TextRun {
    pub fn new(plain_text: impl Into<String>) -> Self {
        Self {
            plain_text: plain_text.into(),
        }
    }
}

/// A single named property on a [`SourceRecord`], tagged by kind.
///
/// Upstream payloads of any unrecognized kind (checkboxes, dates, people, ...)
/// map to [`PropertyValue::Missing`] and resolve like an absent property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// An ordered sequence of text runs (rich text or title payloads).
    Text(Vec<TextRun>),
    /// A URL property; the stored string may itself be unset.
    Url(Option<String>),
    /// Present in the upstream record but carrying no usable value.
    Missing,
}

/// One externally-sourced record: a mapping of property name to tagged value.
///
/// Read-only input to extraction. Resolution never fails: anything absent,
/// empty-typed, or malformed reads as `""`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRecord {
    /// Named, typed properties as delivered by the upstream source.
    pub properties: HashMap<String, PropertyValue>,
}

impl SourceRecord {
    /// Build a record from an iterator of `(name, value)` pairs.
    pub fn from_properties<I, K>(props: I) -> Self
    where
        I: IntoIterator<Item = (K, PropertyValue)>,
        K: Into<String>,
    {
        Self {
            properties: props.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Resolve a text property to the plain text of its first run.
    ///
    /// Returns `""` for absent names, non-text kinds, and run-less payloads.
    pub fn text(&self, name: &str) -> &str {
        match self.properties.get(name) {
            Some(PropertyValue::Text(runs)) => runs
                .first()
                .map(|run| run.plain_text.as_str())
                .unwrap_or(""),
            _ => "",
        }
    }

    /// Resolve a URL property to its stored string.
    ///
    /// Returns `""` for absent names, non-URL kinds, and unset URLs. No format
    /// or scheme validation happens here.
    pub fn url(&self, name: &str) -> &str {
        match self.properties.get(name) {
            Some(PropertyValue::Url(Some(url))) => url.as_str(),
            _ => "",
        }
    }
}

// ---------------------------------------------------------------------------
// ExtractedFields
// ---------------------------------------------------------------------------

/// The canonical intermediate record produced by the field extractor.
///
/// Created fresh per source record, never mutated afterwards, consumed once
/// by the validator/projector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// One-based position of the record in its source batch.
    pub ordinal: u32,
    /// The five category levels, in order. Slots may be empty.
    pub category: [String; CATEGORY_SLOTS],
    /// FAQ question text.
    pub question: String,
    /// FAQ answer text.
    pub answer: String,
    /// Landing page URL shown with the answer.
    pub landing_url: String,
    /// Label for the landing page button.
    pub landing_button_label: String,
    /// URL of an image attached to the answer.
    pub image_url: String,
}

// ---------------------------------------------------------------------------
// OutputRow
// ---------------------------------------------------------------------------

/// The final boundary representation of one admissible record.
///
/// Serializes to the keyed-object encoding; [`OutputRow::to_values`] yields the
/// equivalent fixed-order array encoding. Both carry all five category slots,
/// empty or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "FAQ_No")]
    pub faq_no: String,
    #[serde(rename = "Category1")]
    pub category1: String,
    #[serde(rename = "Category2")]
    pub category2: String,
    #[serde(rename = "Category3")]
    pub category3: String,
    #[serde(rename = "Category4")]
    pub category4: String,
    #[serde(rename = "Category5")]
    pub category5: String,
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Answer")]
    pub answer: String,
    #[serde(rename = "Landing URL")]
    pub landing_url: String,
    #[serde(rename = "Landing URL Button Name")]
    pub landing_button_label: String,
    #[serde(rename = "Image Info (URL)")]
    pub image_url: String,
}

impl OutputRow {
    /// The array row form: `[FAQ_No, Category1..5, Question, Answer,
    /// Landing URL, Image URL]`. The button label has no slot in this form.
    pub fn to_values(&self) -> [String; ROW_WIDTH] {
        [
            self.faq_no.clone(),
            self.category1.clone(),
            self.category2.clone(),
            self.category3.clone(),
            self.category4.clone(),
            self.category5.clone(),
            self.question.clone(),
            self.answer.clone(),
            self.landing_url.clone(),
            self.image_url.clone(),
        ]
    }
}

impl From<&ExtractedFields> for OutputRow {
    /// Pure renaming/reordering. Performs no validation.
    fn from(fields: &ExtractedFields) -> Self {
        let [c1, c2, c3, c4, c5] = fields.category.clone();
        Self {
            faq_no: fields.ordinal.to_string(),
            category1: c1,
            category2: c2,
            category3: c3,
            category4: c4,
            category5: c5,
            question: fields.question.clone(),
            answer: fields.answer.clone(),
            landing_url: fields.landing_url.clone(),
            landing_button_label: fields.landing_button_label.clone(),
            image_url: fields.image_url.clone(),
        }
    }
}

impl From<&OutputRow> for ExtractedFields {
    /// Re-encode a projected row as extracted fields (used when a projected
    /// sequence is fed through the projector again).
    fn from(row: &OutputRow) -> Self {
        Self {
            ordinal: row.faq_no.parse().unwrap_or_default(),
            category: [
                row.category1.clone(),
                row.category2.clone(),
                row.category3.clone(),
                row.category4.clone(),
                row.category5.clone(),
            ],
            question: row.question.clone(),
            answer: row.answer.clone(),
            landing_url: row.landing_url.clone(),
            landing_button_label: row.landing_button_label.clone(),
            image_url: row.image_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// KnowledgeSheet
// ---------------------------------------------------------------------------

/// The array-of-arrays envelope consumed by the FAQ-ingestion API:
/// `{ "values": [[...10 strings...]], "schema_type": "1.0" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSheet {
    /// Admissible rows in source order, array form.
    pub values: Vec<[String; ROW_WIDTH]>,
    /// Envelope schema version, always [`SCHEMA_TYPE`].
    pub schema_type: String,
}

impl KnowledgeSheet {
    /// Wrap projected rows in the values envelope.
    pub fn from_rows(rows: &[OutputRow]) -> Self {
        Self {
            values: rows.iter().map(OutputRow::to_values).collect(),
            schema_type: SCHEMA_TYPE.to_string(),
        }
    }

    /// The well-formed empty result returned on total upstream failure.
    pub fn empty() -> Self {
        Self {
            values: Vec::new(),
            schema_type: SCHEMA_TYPE.to_string(),
        }
    }
}
