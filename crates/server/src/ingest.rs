//! The upload ingestion pipeline.
//!
//! One sequential pass per upload: persist the file, extract text, derive
//! structured fields, resolve the owning member, record the report. Only
//! the initial write and database failures can abort the request; every
//! external-dependency failure degrades to a defined fallback so the
//! uploaded file is never lost to a broken enrichment step.

use health_core::{MedicalReport, NewReport, ReportFields, summarize};

use crate::AppState;
use crate::ai;
use crate::error::AppError;
use crate::ocr;

pub async fn ingest_upload(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
) -> Result<MedicalReport, AppError> {
    // 1. Persist the raw upload. An I/O failure here fails the request.
    let stored = state.uploads.save(filename, bytes).await?;
    let file_path = stored.to_string_lossy().into_owned();

    // 2. Recognition. Degrades to no text, never aborts.
    let extraction = ocr::extract(state.engine.clone(), &stored).await;

    // 3. Analysis, only with a configured credential and non-empty text.
    let fields = match &state.analyzer {
        Some(client) if !extraction.text().is_empty() => {
            match ai::analyzer::analyze(client, extraction.text()).await {
                Ok(fields) => fields,
                Err(e) => {
                    tracing::error!(error = %e, "Analysis failed, storing report without fields");
                    ReportFields::default()
                }
            }
        }
        _ => ReportFields::default(),
    };

    // 4–5. Resolve the owning member, creating it on first sight.
    let member = state.db.get_or_create_member(fields.patient_name()).await?;

    // 6. Record the report.
    let summary = summarize(fields.summary.as_deref(), extraction.text());
    let report_date = fields.parsed_report_date();
    let report = state
        .db
        .insert_report(NewReport {
            member_id: Some(member.id),
            file_path,
            hospital_name: fields.hospital_name,
            report_date,
            report_type: fields.report_type,
            summary,
        })
        .await?;

    tracing::info!(
        report_id = report.id,
        member_id = member.id,
        member = %member.name,
        "Upload ingested"
    );

    Ok(report)
}
