use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::UploadPath;

/// Staging area for uploaded and derived media files. Files are retained
/// after processing; there is deliberately no delete operation (see
/// DESIGN.md on upload retention).
#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    async fn store(
        &self,
        path: &UploadPath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError>;

    async fn fetch(&self, path: &UploadPath) -> Result<Vec<u8>, UploadStoreError>;

    async fn head(&self, path: &UploadPath) -> Result<u64, UploadStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
