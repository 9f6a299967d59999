//! Repository operations on the records store.

use chrono::Utc;
use rusqlite::{OptionalExtension as _, params};

use health_core::{FamilyMember, MedicalReport, NewReport};

use super::Database;
use super::encode::{decode_date, decode_dt, encode_date, encode_dt};
use crate::error::AppError;

const MEMBER_COLUMNS: &str = "id, name, relation, gender, birth_date, created_at";
const REPORT_COLUMNS: &str =
    "id, member_id, file_path, hospital_name, report_date, report_type, summary, created_at";

fn map_member_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FamilyMember> {
    let birth_date = row
        .get::<_, Option<String>>(4)?
        .map(|s| decode_date(4, &s))
        .transpose()?;

    Ok(FamilyMember {
        id: row.get(0)?,
        name: row.get(1)?,
        relation: row.get(2)?,
        gender: row.get(3)?,
        birth_date,
        created_at: decode_dt(5, &row.get::<_, String>(5)?)?,
        reports: Vec::new(),
    })
}

fn map_report_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MedicalReport> {
    let report_date = row
        .get::<_, Option<String>>(4)?
        .map(|s| decode_date(4, &s))
        .transpose()?;

    Ok(MedicalReport {
        id: row.get(0)?,
        member_id: row.get(1)?,
        file_path: row.get(2)?,
        hospital_name: row.get(3)?,
        report_date,
        report_type: row.get(5)?,
        summary: row.get(6)?,
        created_at: decode_dt(7, &row.get::<_, String>(7)?)?,
    })
}

impl Database {
    /// Resolve a member by exact name, creating one on a miss.
    ///
    /// Runs in a single transaction on the store's one writer connection,
    /// backed by `UNIQUE(name)`, so two concurrent uploads for the same
    /// never-before-seen name cannot create duplicate rows. The member row
    /// is durable before the caller writes the report row.
    pub async fn get_or_create_member(&self, name: &str) -> Result<FamilyMember, AppError> {
        let name = name.to_string();
        let member = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;

                let existing = tx
                    .query_row(
                        &format!("SELECT {MEMBER_COLUMNS} FROM family_members WHERE name = ?1"),
                        params![name],
                        map_member_row,
                    )
                    .optional()?;

                let member = match existing {
                    Some(member) => member,
                    None => {
                        let created_at = Utc::now();
                        tx.execute(
                            "INSERT INTO family_members (name, created_at) VALUES (?1, ?2)",
                            params![name, encode_dt(created_at)],
                        )?;
                        FamilyMember {
                            id: tx.last_insert_rowid(),
                            name,
                            relation: None,
                            gender: None,
                            birth_date: None,
                            created_at,
                            reports: Vec::new(),
                        }
                    }
                };

                tx.commit()?;
                Ok(member)
            })
            .await?;

        Ok(member)
    }

    /// List members with their reports embedded, newest report first.
    pub async fn list_members(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FamilyMember>, AppError> {
        let members = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {MEMBER_COLUMNS} FROM family_members
                     ORDER BY id LIMIT ?1 OFFSET ?2"
                ))?;
                let mut members = stmt
                    .query_map(params![limit, skip], map_member_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                let mut report_stmt = conn.prepare(&format!(
                    "SELECT {REPORT_COLUMNS} FROM medical_reports
                     WHERE member_id = ?1 ORDER BY created_at DESC, id DESC"
                ))?;
                for member in &mut members {
                    member.reports = report_stmt
                        .query_map(params![member.id], map_report_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                }

                Ok(members)
            })
            .await?;

        Ok(members)
    }

    /// Persist a new report and return it with its assigned id and
    /// creation timestamp.
    pub async fn insert_report(&self, new: NewReport) -> Result<MedicalReport, AppError> {
        let report = self
            .conn
            .call(move |conn| {
                let created_at = Utc::now();
                conn.execute(
                    "INSERT INTO medical_reports
                       (member_id, file_path, hospital_name, report_date,
                        report_type, summary, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        new.member_id,
                        new.file_path,
                        new.hospital_name,
                        new.report_date.map(encode_date),
                        new.report_type,
                        new.summary,
                        encode_dt(created_at),
                    ],
                )?;

                Ok(MedicalReport {
                    id: conn.last_insert_rowid(),
                    member_id: new.member_id,
                    file_path: new.file_path,
                    hospital_name: new.hospital_name,
                    report_date: new.report_date,
                    report_type: new.report_type,
                    summary: Some(new.summary),
                    created_at,
                })
            })
            .await?;

        Ok(report)
    }

    /// List reports ordered by creation time, most recent first.
    ///
    /// The id tie-break keeps the order strict even when two inserts land
    /// on the same timestamp.
    pub async fn list_reports(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MedicalReport>, AppError> {
        let reports = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {REPORT_COLUMNS} FROM medical_reports
                     ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2"
                ))?;
                let reports = stmt
                    .query_map(params![limit, skip], map_report_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(reports)
            })
            .await?;

        Ok(reports)
    }

    /// Fetch a single report by id.
    pub async fn get_report(&self, id: i64) -> Result<Option<MedicalReport>, AppError> {
        let report = self
            .conn
            .call(move |conn| {
                let report = conn
                    .query_row(
                        &format!("SELECT {REPORT_COLUMNS} FROM medical_reports WHERE id = ?1"),
                        params![id],
                        map_report_row,
                    )
                    .optional()?;
                Ok(report)
            })
            .await?;

        Ok(report)
    }

    /// Delete a report row. Returns false if no such report existed.
    pub async fn delete_report(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self
            .conn
            .call(move |conn| {
                let rows = conn.execute("DELETE FROM medical_reports WHERE id = ?1", params![id])?;
                Ok(rows > 0)
            })
            .await?;

        Ok(deleted)
    }

    /// File paths of every report owned by a member, or `None` if the
    /// member does not exist. Used to clean up stored files before the
    /// rows are deleted.
    pub async fn member_report_paths(&self, id: i64) -> Result<Option<Vec<String>>, AppError> {
        let paths = self
            .conn
            .call(move |conn| {
                let exists = conn
                    .query_row(
                        "SELECT 1 FROM family_members WHERE id = ?1",
                        params![id],
                        |_| Ok(()),
                    )
                    .optional()?
                    .is_some();

                if !exists {
                    return Ok(None);
                }

                let mut stmt =
                    conn.prepare("SELECT file_path FROM medical_reports WHERE member_id = ?1")?;
                let paths = stmt
                    .query_map(params![id], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(Some(paths))
            })
            .await?;

        Ok(paths)
    }

    /// Delete a member and all of its report rows in one transaction.
    /// Returns false if no such member existed.
    pub async fn delete_member(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "DELETE FROM medical_reports WHERE member_id = ?1",
                    params![id],
                )?;
                let rows = tx.execute("DELETE FROM family_members WHERE id = ?1", params![id])?;
                tx.commit()?;
                Ok(rows > 0)
            })
            .await?;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use health_core::NewReport;

    use super::Database;

    fn report_for(member_id: i64, path: &str) -> NewReport {
        NewReport {
            member_id: Some(member_id),
            file_path: path.to_string(),
            hospital_name: None,
            report_date: None,
            report_type: None,
            summary: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn get_or_create_reuses_existing_member() {
        let db = Database::open_in_memory().await.unwrap();

        let first = db.get_or_create_member("Zhang Wei").await.unwrap();
        let second = db.get_or_create_member("Zhang Wei").await.unwrap();
        assert_eq!(first.id, second.id);

        let other = db.get_or_create_member("Li Na").await.unwrap();
        assert_ne!(first.id, other.id);
        assert!(other.relation.is_none());
        assert!(other.birth_date.is_none());

        let members = db.list_members(0, 100).await.unwrap();
        assert_eq!(members.len(), 2);
    }

    #[tokio::test]
    async fn report_date_round_trips() {
        let db = Database::open_in_memory().await.unwrap();
        let member = db.get_or_create_member("Zhang Wei").await.unwrap();

        let mut new = report_for(member.id, "uploads/a.png");
        new.report_date = NaiveDate::from_ymd_opt(2024, 3, 15);
        let stored = db.insert_report(new).await.unwrap();

        let fetched = db.get_report(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.report_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(fetched.member_id, Some(member.id));
    }

    #[tokio::test]
    async fn reports_list_newest_first() {
        let db = Database::open_in_memory().await.unwrap();
        let member = db.get_or_create_member("Zhang Wei").await.unwrap();

        for i in 0..3 {
            db.insert_report(report_for(member.id, &format!("uploads/{i}.png")))
                .await
                .unwrap();
        }

        let reports = db.list_reports(0, 100).await.unwrap();
        assert_eq!(reports.len(), 3);
        assert!(reports.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn member_delete_cascades_to_report_rows() {
        let db = Database::open_in_memory().await.unwrap();
        let member = db.get_or_create_member("Zhang Wei").await.unwrap();
        db.insert_report(report_for(member.id, "uploads/a.png"))
            .await
            .unwrap();
        db.insert_report(report_for(member.id, "uploads/b.png"))
            .await
            .unwrap();

        let paths = db.member_report_paths(member.id).await.unwrap().unwrap();
        assert_eq!(paths.len(), 2);

        assert!(db.delete_member(member.id).await.unwrap());
        assert!(db.list_reports(0, 100).await.unwrap().is_empty());
        assert!(db.list_members(0, 100).await.unwrap().is_empty());

        // A second delete finds nothing.
        assert!(!db.delete_member(member.id).await.unwrap());
        assert!(db.member_report_paths(member.id).await.unwrap().is_none());
    }
}
