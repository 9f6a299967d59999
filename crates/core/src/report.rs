use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Summary stored when neither the analyzer nor recognition produced text.
pub const NO_TEXT_SUMMARY: &str = "No text extracted.";

/// How many characters of raw extracted text the fallback summary keeps.
const SUMMARY_PREVIEW_CHARS: usize = 200;

/// A stored medical report row, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalReport {
    pub id: i64,
    pub member_id: Option<i64>,
    pub file_path: String,
    pub hospital_name: Option<String>,
    pub report_date: Option<NaiveDate>,
    pub report_type: Option<String>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a report about to be persisted; id and created_at are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub member_id: Option<i64>,
    pub file_path: String,
    pub hospital_name: Option<String>,
    pub report_date: Option<NaiveDate>,
    pub report_type: Option<String>,
    pub summary: String,
}

/// Resolve the summary to store for a report.
///
/// The analyzer's summary wins when present and non-empty. Otherwise the
/// first [`SUMMARY_PREVIEW_CHARS`] characters of the raw extracted text are
/// kept with an ellipsis marker; with no text at all, a fixed placeholder.
pub fn summarize(analyzed: Option<&str>, extracted: &str) -> String {
    match analyzed {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ if !extracted.is_empty() => {
            let preview: String = extracted.chars().take(SUMMARY_PREVIEW_CHARS).collect();
            format!("{preview}...")
        }
        _ => NO_TEXT_SUMMARY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzer_summary_wins() {
        assert_eq!(
            summarize(Some("Mild anemia."), "raw text"),
            "Mild anemia."
        );
    }

    #[test]
    fn blank_analyzer_summary_falls_back_to_text() {
        assert_eq!(summarize(Some("   "), "raw text"), "raw text...");
        assert_eq!(summarize(None, "raw text"), "raw text...");
    }

    #[test]
    fn long_text_is_truncated_to_200_chars() {
        let text = "x".repeat(500);
        let summary = summarize(None, &text);
        assert_eq!(summary.chars().count(), 203);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Multibyte input must not be sliced mid-codepoint.
        let text = "血".repeat(300);
        let summary = summarize(None, &text);
        assert_eq!(summary.chars().count(), 203);
    }

    #[test]
    fn no_text_at_all_uses_placeholder() {
        assert_eq!(summarize(None, ""), NO_TEXT_SUMMARY);
        assert_eq!(summarize(Some(""), ""), NO_TEXT_SUMMARY);
    }
}
