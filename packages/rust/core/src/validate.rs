//! Admissibility rules and the validating projector.
//!
//! Rejections are silent filtering, never errors: the projector is a stable
//! filter over the input order, and each drop is reported to an injectable
//! [`RejectionObserver`] side-channel.

use std::fmt;

use faqbridge_shared::{CATEGORY_SLOTS, ExtractedFields, OutputRow};

/// Maximum question length, in characters.
pub const MAX_QUESTION_CHARS: usize = 50;

/// Maximum answer length without a landing URL, in characters.
pub const MAX_ANSWER_CHARS: usize = 1000;

/// Maximum answer length when a landing URL is set, in characters.
pub const MAX_ANSWER_CHARS_WITH_LANDING: usize = 400;

// ---------------------------------------------------------------------------
// RejectionReason
// ---------------------------------------------------------------------------

/// Why a record was dropped by the projector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Question or answer is empty.
    MissingQuestionOrAnswer,
    /// Question exceeds [`MAX_QUESTION_CHARS`].
    QuestionTooLong { chars: usize },
    /// Answer exceeds the cap that applies given the landing URL.
    AnswerTooLong { chars: usize, max: usize },
    /// An empty category slot precedes a non-empty one.
    CategoryGap,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingQuestionOrAnswer => write!(f, "question or answer is empty"),
            Self::QuestionTooLong { chars } => {
                write!(f, "question too long ({chars} chars, max {MAX_QUESTION_CHARS})")
            }
            Self::AnswerTooLong { chars, max } => {
                write!(f, "answer too long ({chars} chars, max {max})")
            }
            Self::CategoryGap => write!(f, "empty category level precedes a non-empty one"),
        }
    }
}

// ---------------------------------------------------------------------------
// Admissibility predicate
// ---------------------------------------------------------------------------

/// Check one record, returning the first failed rule if any.
///
/// Rules short-circuit in order: presence, question length, answer length,
/// category contiguity.
pub fn admissibility(fields: &ExtractedFields) -> Option<RejectionReason> {
    if fields.question.is_empty() || fields.answer.is_empty() {
        return Some(RejectionReason::MissingQuestionOrAnswer);
    }

    let question_chars = fields.question.chars().count();
    if question_chars > MAX_QUESTION_CHARS {
        return Some(RejectionReason::QuestionTooLong {
            chars: question_chars,
        });
    }

    let max_answer = if fields.landing_url.trim().is_empty() {
        MAX_ANSWER_CHARS
    } else {
        MAX_ANSWER_CHARS_WITH_LANDING
    };
    let answer_chars = fields.answer.chars().count();
    if answer_chars > max_answer {
        return Some(RejectionReason::AnswerTooLong {
            chars: answer_chars,
            max: max_answer,
        });
    }

    if !categories_contiguous(&fields.category) {
        return Some(RejectionReason::CategoryGap);
    }

    None
}

/// Non-empty category slots must form a prefix of the sequence:
/// the trimmed-non-empty indices equal `{0..k}` for some `k in 0..=5`.
fn categories_contiguous(category: &[String; CATEGORY_SLOTS]) -> bool {
    let filled = category
        .iter()
        .take_while(|slot| !slot.trim().is_empty())
        .count();
    category[filled..].iter().all(|slot| slot.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Rejection side-channel
// ---------------------------------------------------------------------------

/// Callback invoked once per dropped record.
pub trait RejectionObserver: Send + Sync {
    /// `index` is the record's zero-based position in the projected batch.
    fn rejected(&self, index: usize, fields: &ExtractedFields, reason: &RejectionReason);
}

/// No-op observer for headless/test usage.
pub struct SilentRejections;

impl RejectionObserver for SilentRejections {
    fn rejected(&self, _index: usize, _fields: &ExtractedFields, _reason: &RejectionReason) {}
}

/// Observer that warns per drop with the specific reason.
pub struct LogRejections;

impl RejectionObserver for LogRejections {
    fn rejected(&self, index: usize, fields: &ExtractedFields, reason: &RejectionReason) {
        tracing::warn!(
            index,
            ordinal = fields.ordinal,
            question = %preview(&fields.question, 30),
            %reason,
            "record dropped"
        );
    }
}

/// First `max` characters of `s`, for log lines.
fn preview(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project extracted records into output rows, dropping inadmissible ones.
///
/// Order-preserving stable filter; never fails. Projection itself is a pure
/// renaming of already-extracted fields and adds no validation.
pub fn project(fields: &[ExtractedFields]) -> Vec<OutputRow> {
    project_with(fields, &SilentRejections)
}

/// [`project`] with a rejection observer.
pub fn project_with(
    fields: &[ExtractedFields],
    observer: &dyn RejectionObserver,
) -> Vec<OutputRow> {
    fields
        .iter()
        .enumerate()
        .filter_map(|(index, f)| match admissibility(f) {
            None => Some(OutputRow::from(f)),
            Some(reason) => {
                observer.rejected(index, f, &reason);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn valid_fields() -> ExtractedFields {
        ExtractedFields {
            ordinal: 1,
            category: ["A".into(), "B".into(), String::new(), String::new(), String::new()],
            question: "How do I join?".into(),
            answer: "Click the join button.".into(),
            ..ExtractedFields::default()
        }
    }

    fn with_categories(slots: [&str; CATEGORY_SLOTS]) -> ExtractedFields {
        ExtractedFields {
            category: slots.map(String::from),
            ..valid_fields()
        }
    }

    /// Collects `(index, reason)` pairs for assertions.
    struct Recorder(Mutex<Vec<(usize, RejectionReason)>>);

    impl RejectionObserver for Recorder {
        fn rejected(&self, index: usize, _fields: &ExtractedFields, reason: &RejectionReason) {
            self.0.lock().unwrap().push((index, reason.clone()));
        }
    }

    #[test]
    fn valid_record_is_admissible() {
        assert_eq!(admissibility(&valid_fields()), None);
    }

    #[test]
    fn empty_question_or_answer_rejects() {
        let mut fields = valid_fields();
        fields.question = String::new();
        assert_eq!(
            admissibility(&fields),
            Some(RejectionReason::MissingQuestionOrAnswer)
        );

        let mut fields = valid_fields();
        fields.answer = String::new();
        assert_eq!(
            admissibility(&fields),
            Some(RejectionReason::MissingQuestionOrAnswer)
        );
    }

    #[test]
    fn question_length_boundary() {
        let mut fields = valid_fields();
        fields.question = "q".repeat(50);
        assert_eq!(admissibility(&fields), None);

        fields.question = "q".repeat(51);
        assert_eq!(
            admissibility(&fields),
            Some(RejectionReason::QuestionTooLong { chars: 51 })
        );
    }

    #[test]
    fn answer_cap_depends_on_landing_url() {
        let mut fields = valid_fields();
        fields.landing_url = "https://example.com".into();
        fields.answer = "a".repeat(400);
        assert_eq!(admissibility(&fields), None);

        fields.answer = "a".repeat(401);
        assert_eq!(
            admissibility(&fields),
            Some(RejectionReason::AnswerTooLong { chars: 401, max: 400 })
        );

        // The same 401-char answer passes once the landing URL is gone.
        fields.landing_url = String::new();
        assert_eq!(admissibility(&fields), None);

        fields.answer = "a".repeat(1001);
        assert_eq!(
            admissibility(&fields),
            Some(RejectionReason::AnswerTooLong { chars: 1001, max: 1000 })
        );
    }

    #[test]
    fn whitespace_landing_url_counts_as_absent() {
        let mut fields = valid_fields();
        fields.landing_url = "   ".into();
        fields.answer = "a".repeat(500);
        assert_eq!(admissibility(&fields), None);
    }

    #[test]
    fn answer_length_counts_characters_not_bytes() {
        let mut fields = valid_fields();
        fields.landing_url = "https://example.com".into();
        // 400 three-byte characters: within the cap.
        fields.answer = "가".repeat(400);
        assert_eq!(admissibility(&fields), None);
    }

    #[test]
    fn category_contiguity_boundaries() {
        assert_eq!(admissibility(&with_categories(["", "", "", "", ""])), None);
        assert_eq!(
            admissibility(&with_categories(["A", "B", "C", "D", "E"])),
            None
        );
        assert_eq!(
            admissibility(&with_categories(["A", "B", "", "", ""])),
            None
        );
        assert_eq!(
            admissibility(&with_categories(["A", "", "C", "", ""])),
            Some(RejectionReason::CategoryGap)
        );
        assert_eq!(
            admissibility(&with_categories(["A", "", "", "B", ""])),
            Some(RejectionReason::CategoryGap)
        );
        // Whitespace-only slots count as empty.
        assert_eq!(
            admissibility(&with_categories(["A", "  ", "C", "", ""])),
            Some(RejectionReason::CategoryGap)
        );
    }

    #[test]
    fn projection_is_a_stable_filter() {
        let mut second = valid_fields();
        second.ordinal = 2;
        second.question = String::new();
        let mut third = valid_fields();
        third.ordinal = 3;

        let rows = project(&[valid_fields(), second, third]);
        // Survivors keep source order and their pre-filter ordinals.
        assert_eq!(
            rows.iter().map(|r| r.faq_no.as_str()).collect::<Vec<_>>(),
            ["1", "3"]
        );
    }

    #[test]
    fn projection_is_idempotent() {
        let mut too_long = valid_fields();
        too_long.ordinal = 2;
        too_long.question = "q".repeat(60);

        let rows = project(&[valid_fields(), too_long]);
        let reencoded: Vec<ExtractedFields> =
            rows.iter().map(ExtractedFields::from).collect();
        assert_eq!(project(&reencoded), rows);
    }

    #[test]
    fn observer_sees_each_drop_with_reason() {
        let mut gap = valid_fields();
        gap.ordinal = 2;
        gap.category = ["X".into(), String::new(), "Y".into(), String::new(), String::new()];
        let mut empty = valid_fields();
        empty.ordinal = 3;
        empty.answer = String::new();

        let recorder = Recorder(Mutex::new(Vec::new()));
        let rows = project_with(&[valid_fields(), gap, empty], &recorder);

        assert_eq!(rows.len(), 1);
        let seen = recorder.0.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (1, RejectionReason::CategoryGap),
                (2, RejectionReason::MissingQuestionOrAnswer),
            ]
        );
    }
}
