//! Extraction of structured report fields from recognized text

use health_core::ReportFields;

use super::client::{AnalysisError, ChatClient};

const PROMPT_HEADER: &str = r#"Extract the following information from the medical report text below:
- Patient name (key "name")
- Hospital name (key "hospital_name")
- Report date (key "report_date", YYYY-MM-DD format)
- Report type (key "report_type", e.g. Blood Test, CT Scan)
- Summary (key "summary", a brief description of the findings, written in the same language as the report text)

Return a single valid JSON object with exactly these five keys and no other
text or markdown formatting. Use null for anything the text does not contain."#;

/// Build the analysis prompt for one report's text.
fn build_prompt(text: &str) -> String {
    format!("{PROMPT_HEADER}\n\nText:\n{text}")
}

/// Derive structured fields from extracted text. One outbound call, no
/// retries; every failure is a typed error the caller degrades on.
pub async fn analyze(client: &ChatClient, text: &str) -> Result<ReportFields, AnalysisError> {
    let content = client.complete_json(&build_prompt(text)).await?;

    let json = extract_json(&content)
        .ok_or_else(|| AnalysisError::Malformed(format!("no JSON object in: {}", content)))?;

    serde_json::from_str(&json)
        .map_err(|e| AnalysisError::Malformed(format!("invalid field set: {}", e)))
}

/// Extract a JSON object from text that might contain markdown code blocks.
/// The response format constraint should prevent fencing, but models slip.
fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();

    // Direct JSON object
    if trimmed.starts_with('{') {
        return Some(trimmed.to_string());
    }

    // Wrapped in ```json ... ```
    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return Some(after[..end].trim().to_string());
        }
    }

    // Wrapped in ``` ... ```
    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            return Some(after[..end].trim().to_string());
        }
    }

    None
}
