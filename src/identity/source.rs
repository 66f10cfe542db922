use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::IdentityError;

/// Readable byte content behind an uploaded image
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Read the full content
    async fn read_all(&self) -> Result<Vec<u8>, IdentityError>;

    /// Size the source declares for itself, if known without reading it
    async fn declared_len(&self) -> Option<u64>;
}

/// Bytes already held in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    async fn read_all(&self) -> Result<Vec<u8>, IdentityError> {
        Ok(self.bytes.clone())
    }

    async fn declared_len(&self) -> Option<u64> {
        Some(self.bytes.len() as u64)
    }
}

/// A local file, read when the fingerprint is resolved
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, used as the upload's declared name
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl ByteSource for FileSource {
    async fn read_all(&self) -> Result<Vec<u8>, IdentityError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| IdentityError::UnreadableSource {
                filename: self.file_name(),
                reason: e.to_string(),
            })
    }

    async fn declared_len(&self) -> Option<u64> {
        tokio::fs::metadata(&self.path).await.ok().map(|meta| meta.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemorySource::new(b"abc".to_vec());
        assert_eq!(source.read_all().await.unwrap(), b"abc");
        assert_eq!(source.declared_len().await, Some(3));
    }

    #[tokio::test]
    async fn test_missing_file_is_unreadable() {
        let source = FileSource::new("/nonexistent/slide-labeler/img_000001.png");
        let err = source.read_all().await.unwrap_err();
        assert!(matches!(err, IdentityError::UnreadableSource { ref filename, .. } if filename == "img_000001.png"));
        assert_eq!(source.declared_len().await, None);
    }
}
