//! health-core: Shared domain types for the family health records service
//!
//! This crate provides the types used across the server and its tests,
//! including FamilyMember, MedicalReport, the analyzer field set, and the
//! recognition engine abstraction.

pub mod analysis;
pub mod member;
pub mod recognize;
pub mod report;

pub use analysis::{ReportFields, parse_report_date};
pub use member::{FamilyMember, UNKNOWN_MEMBER};
pub use recognize::{Extraction, RecognitionEngine, RecognitionError, TextLine};
pub use report::{MedicalReport, NO_TEXT_SUMMARY, NewReport, summarize};
