use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::report::MedicalReport;

/// Placeholder member name used when no patient name could be determined.
pub const UNKNOWN_MEMBER: &str = "Unknown Member";

/// A family member owning zero or more medical reports.
///
/// Members are created lazily, on the first upload whose extracted patient
/// name has no existing match. Only `name` is populated on that path; the
/// remaining attributes are filled in by hand later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: i64,
    pub name: String,
    pub relation: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,

    /// Reports owned by this member, embedded in list responses.
    #[serde(default)]
    pub reports: Vec<MedicalReport>,
}
