//! Local staging storage for uploaded documents.
//!
//! Each document is written to the upload directory under a unique name for
//! exactly as long as text extraction needs it. The orchestrator owns the
//! handle and removes the file as soon as the document is processed, so disk
//! usage never grows with batch size.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;
use uuid::Uuid;

/// Write/read/delete capability rooted at the configured upload directory.
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Opens the store, creating the upload directory if needed.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create upload directory {}", root.display()))?;
        Ok(Self { root })
    }

    /// Writes one uploaded blob to disk and returns a handle to the staged file.
    pub async fn stage(&self, name: &str, bytes: &[u8]) -> Result<StagedDocument> {
        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(name));
        let path = self.root.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to stage '{name}'"))?;
        Ok(StagedDocument { path })
    }
}

/// One staged document on disk. Removal is explicit — the caller decides when
/// the file's lifetime ends.
pub struct StagedDocument {
    path: PathBuf,
}

impl StagedDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the staged file. Failures are logged, not propagated —
    /// cleanup must never turn a finished analysis into an error.
    pub async fn remove(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            warn!("Failed to remove staged file {}: {e}", self.path.display());
        }
    }
}

/// Keeps only the final path component of a client-supplied file name so a
/// crafted name cannot escape the upload directory.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if base.is_empty() {
        "document".to_string()
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stage_writes_blob_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).await.unwrap();

        let staged = store.stage("resume.pdf", b"content").await.unwrap();
        assert!(staged.path().starts_with(dir.path()));
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"content");
    }

    #[tokio::test]
    async fn test_remove_deletes_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).await.unwrap();

        let staged = store.stage("resume.pdf", b"content").await.unwrap();
        let path = staged.path().to_path_buf();
        staged.remove().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_staged_names_are_unique_per_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).await.unwrap();

        let a = store.stage("resume.pdf", b"a").await.unwrap();
        let b = store.stage("resume.pdf", b"b").await.unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn test_crafted_file_name_cannot_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).await.unwrap();

        let staged = store.stage("../../etc/passwd", b"x").await.unwrap();
        assert!(staged.path().starts_with(dir.path()));
        assert!(staged
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .ends_with("passwd"));
    }

    #[test]
    fn test_sanitize_empty_name_falls_back() {
        assert_eq!(sanitize_file_name(""), "document");
        assert_eq!(sanitize_file_name("dir/"), "document");
    }
}
