//! Durable storage for uploaded report files.
//!
//! Files live under a single flat directory. The storage key is
//! `{uuid}-{original file name}`: unique per request, so a re-upload of an
//! identically named file never clobbers earlier bytes, while the original
//! name stays visible in the path for display.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::AppError;

#[derive(Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Write an uploaded byte stream to durable storage and return the
    /// stored path. An I/O failure here fails the whole request.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
        // Keep only the final path component of the client-supplied name.
        let display_name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("upload.bin");

        let key = format!("{}-{}", Uuid::new_v4(), display_name);
        let path = self.root.join(key);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Best-effort file removal used by the delete paths. Failures are
    /// logged and never propagate; a file already gone counts as removed.
    pub async fn remove(&self, path: &str) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path, "Stored file already missing during cleanup");
            }
            Err(e) => {
                tracing::error!(path, error = %e, "Failed to delete stored file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> UploadStore {
        let root = std::env::temp_dir().join(format!("health-uploads-{}", Uuid::new_v4()));
        UploadStore::new(root)
    }

    #[tokio::test]
    async fn same_filename_gets_distinct_keys() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let first = store.save("report.png", b"one").await.unwrap();
        let second = store.save("report.png", b"two").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(tokio::fs::read(&first).await.unwrap(), b"one");
        assert_eq!(tokio::fs::read(&second).await.unwrap(), b"two");
        assert!(first.to_string_lossy().ends_with("report.png"));
    }

    #[tokio::test]
    async fn path_components_are_stripped_from_names() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let path = store.save("../../etc/passwd", b"x").await.unwrap();
        assert!(path.starts_with(&store.root));
        assert!(path.to_string_lossy().ends_with("passwd"));
    }

    #[tokio::test]
    async fn remove_tolerates_missing_files() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let path = store.save("a.png", b"x").await.unwrap();
        store.remove(&path.to_string_lossy()).await;
        assert!(!path.exists());

        // Second removal is a no-op, not a panic or error.
        store.remove(&path.to_string_lossy()).await;
    }
}
