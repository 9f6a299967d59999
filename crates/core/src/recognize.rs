use std::path::Path;

use thiserror::Error;

/// Errors a recognition engine can report.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("recognition engine failed: {0}")]
    Engine(String),
}

/// One recognized line of text, in the order the engine reports them.
#[derive(Debug, Clone)]
pub struct TextLine {
    pub text: String,
    pub confidence: Option<f32>,
}

/// A local engine turning an image or document file into text lines.
///
/// Implementations are synchronous and CPU-bound; callers run them on a
/// blocking thread. Absence of any engine at startup is a supported
/// degraded mode, not an error.
pub trait RecognitionEngine: Send + Sync {
    /// Short human-readable engine name for startup logging.
    fn name(&self) -> &str;

    fn recognize(&self, path: &Path) -> Result<Vec<TextLine>, RecognitionError>;
}

/// Outcome of the text extraction stage.
///
/// Extraction never fails a request; the two degraded variants carry no
/// text and let the caller branch explicitly instead of swallowing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Recognized text, lines joined by newline in engine order.
    Text(String),
    /// No recognition engine is configured.
    Unavailable,
    /// The engine ran and failed; the failure was logged.
    Failed,
}

impl Extraction {
    /// Join engine output into a single text blob.
    pub fn from_lines(lines: Vec<TextLine>) -> Self {
        let text = lines
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n");
        Extraction::Text(text)
    }

    /// The extracted text, or `""` for either degraded variant.
    pub fn text(&self) -> &str {
        match self {
            Extraction::Text(text) => text,
            Extraction::Unavailable | Extraction::Failed => "",
        }
    }
}
