use std::path::{Path, PathBuf};

use crate::config::UploadConfig;
use crate::error::ServiceError;

/// Temporary storage for uploaded meter exports.
///
/// Each saved file is owned by the returned [`UploadGuard`] and removed when
/// the guard drops.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    allowed_extensions: Vec<String>,
}

impl UploadStore {
    pub fn new(cfg: &UploadConfig) -> Self {
        Self {
            dir: cfg.dir.clone(),
            allowed_extensions: cfg
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if needed.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    pub fn allowed_file(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    pub async fn save(&self, filename: &str, contents: &[u8]) -> Result<UploadGuard, ServiceError> {
        let path = self
            .dir
            .join(format!("{}_{}", uuid::Uuid::new_v4(), secure_filename(filename)));

        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| ServiceError::internal(format!("failed to store upload: {e}")))?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "stored upload");
        Ok(UploadGuard { path })
    }
}

/// Owns a stored upload; deletes it on drop.
#[derive(Debug)]
pub struct UploadGuard {
    path: PathBuf,
}

impl UploadGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(error = %e, path = %self.path.display(), "failed to remove upload");
        }
    }
}

/// Reduce a client-supplied file name to a safe single path component.
pub fn secure_filename(filename: &str) -> String {
    // Path separators split words like whitespace does.
    let flattened = filename.replace(['/', '\\'], " ");

    let cleaned: String = flattened
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
