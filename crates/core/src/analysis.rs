use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::member::UNKNOWN_MEMBER;

/// Structured fields derived from a report's text by the analysis service.
///
/// Every field is optional: the service returns whatever it could find, and
/// a failed or skipped analysis degrades to `ReportFields::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportFields {
    pub name: Option<String>,
    pub hospital_name: Option<String>,
    pub report_date: Option<String>,
    pub report_type: Option<String>,
    pub summary: Option<String>,
}

impl ReportFields {
    /// The patient name to resolve the owning member by, falling back to
    /// the sentinel when the analyzer produced nothing usable.
    pub fn patient_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_MEMBER)
    }

    /// The report date parsed under the strict wire format, if any.
    pub fn parsed_report_date(&self) -> Option<NaiveDate> {
        self.report_date.as_deref().and_then(parse_report_date)
    }
}

/// Strict `YYYY-MM-DD` parse. Anything else — other separators, prose,
/// trailing garbage — is treated as no date rather than an error.
pub fn parse_report_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
