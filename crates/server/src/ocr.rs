//! Local text recognition.
//!
//! The production engine drives the `tesseract` binary, probed once at
//! startup. No engine on the host is a supported degraded mode: uploads
//! still succeed, they just carry no extracted text.

use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use health_core::{Extraction, RecognitionEngine, RecognitionError, TextLine};

/// Recognition engine backed by the `tesseract` command-line binary.
pub struct TesseractCli;

impl TesseractCli {
    /// Probe for the binary. Returns `None` (recognition disabled) when it
    /// is missing or broken.
    pub fn detect() -> Option<Self> {
        match Command::new("tesseract").arg("--version").output() {
            Ok(out) if out.status.success() => Some(Self),
            Ok(out) => {
                tracing::warn!(status = %out.status, "tesseract probe failed, recognition disabled");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "tesseract not found, recognition disabled");
                None
            }
        }
    }
}

impl RecognitionEngine for TesseractCli {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, path: &Path) -> Result<Vec<TextLine>, RecognitionError> {
        let output = Command::new("tesseract").arg(path).arg("stdout").output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::Engine(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| TextLine {
                text: line.to_string(),
                confidence: None,
            })
            .collect())
    }
}

/// Run the extraction stage for one stored file.
///
/// Recognition is blocking and CPU-bound, so it runs on the blocking pool.
/// Every failure class is logged and folded into a degraded [`Extraction`]
/// variant; this stage can never abort an upload.
pub async fn extract(engine: Option<Arc<dyn RecognitionEngine>>, path: &Path) -> Extraction {
    let Some(engine) = engine else {
        return Extraction::Unavailable;
    };

    let path = path.to_path_buf();
    match tokio::task::spawn_blocking(move || engine.recognize(&path)).await {
        Ok(Ok(lines)) => Extraction::from_lines(lines),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Recognition failed");
            Extraction::Failed
        }
        Err(e) => {
            tracing::error!(error = %e, "Recognition task panicked");
            Extraction::Failed
        }
    }
}
