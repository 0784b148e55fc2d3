//! Boundary encodings for projected rows.
//!
//! The FAQ-ingestion API accepts two isomorphic serializations of the same
//! row sequence: the values envelope (`{values, schema_type}` with 10-element
//! string arrays) and a bare array of keyed objects. Which one to emit is a
//! caller-side presentation choice; filtering and field values are identical.

use serde::Serialize;

use faqbridge_shared::{KnowledgeSheet, OutputRow};

/// Which serialization a caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowEncoding {
    /// `{ "values": [[...]], "schema_type": "1.0" }`
    #[default]
    Values,
    /// `[ { "FAQ_No": ..., ... }, ... ]`
    Objects,
}

impl RowEncoding {
    /// Resolve an optional `format` query value; anything but `objects`
    /// selects the values envelope.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("objects") => Self::Objects,
            _ => Self::Values,
        }
    }

    /// Serialize rows in this encoding.
    pub fn encode(self, rows: Vec<OutputRow>) -> EncodedRows {
        match self {
            Self::Values => EncodedRows::Sheet(KnowledgeSheet::from_rows(&rows)),
            Self::Objects => EncodedRows::Objects(rows),
        }
    }

    /// The well-formed empty result in this encoding.
    pub fn empty(self) -> EncodedRows {
        match self {
            Self::Values => EncodedRows::Sheet(KnowledgeSheet::empty()),
            Self::Objects => EncodedRows::Objects(Vec::new()),
        }
    }
}

/// A row sequence ready to serialize in one of the two boundary shapes.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EncodedRows {
    Sheet(KnowledgeSheet),
    Objects(Vec<OutputRow>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqbridge_shared::ExtractedFields;

    fn rows() -> Vec<OutputRow> {
        let fields = ExtractedFields {
            ordinal: 1,
            category: ["A".into(), String::new(), String::new(), String::new(), String::new()],
            question: "Q".into(),
            answer: "An answer".into(),
            landing_url: "https://example.com".into(),
            landing_button_label: "Go".into(),
            image_url: String::new(),
        };
        vec![OutputRow::from(&fields)]
    }

    #[test]
    fn format_query_resolution() {
        assert_eq!(RowEncoding::from_query(None), RowEncoding::Values);
        assert_eq!(RowEncoding::from_query(Some("values")), RowEncoding::Values);
        assert_eq!(RowEncoding::from_query(Some("objects")), RowEncoding::Objects);
        assert_eq!(RowEncoding::from_query(Some("bogus")), RowEncoding::Values);
    }

    #[test]
    fn both_encodings_carry_identical_field_values() {
        let sheet = serde_json::to_value(RowEncoding::Values.encode(rows())).unwrap();
        let objects = serde_json::to_value(RowEncoding::Objects.encode(rows())).unwrap();

        assert_eq!(sheet["schema_type"], "1.0");
        let row = sheet["values"][0].as_array().unwrap();
        let obj = &objects[0];

        assert_eq!(row[0], obj["FAQ_No"]);
        assert_eq!(row[1], obj["Category1"]);
        assert_eq!(row[6], obj["Question"]);
        assert_eq!(row[7], obj["Answer"]);
        assert_eq!(row[8], obj["Landing URL"]);
        assert_eq!(row[9], obj["Image Info (URL)"]);
        // The button label only exists in the object form.
        assert_eq!(obj["Landing URL Button Name"], "Go");
    }

    #[test]
    fn empty_results_are_well_formed() {
        let sheet = serde_json::to_value(RowEncoding::Values.empty()).unwrap();
        assert_eq!(sheet["schema_type"], "1.0");
        assert_eq!(sheet["values"].as_array().map(Vec::len), Some(0));

        let objects = serde_json::to_value(RowEncoding::Objects.empty()).unwrap();
        assert_eq!(objects.as_array().map(Vec::len), Some(0));
    }
}
