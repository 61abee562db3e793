use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{UploadStore, UploadStoreError};
use crate::domain::UploadPath;

/// Filesystem-backed upload staging rooted at the configured uploads
/// directory. Files are written under `<upload uuid>/<filename>` so the
/// converted audio asset lands next to the original.
pub struct LocalUploadStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalUploadStore {
    pub fn new(base_dir: PathBuf) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(&base_dir).map_err(UploadStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_dir)
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(
        &self,
        path: &UploadPath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError> {
        let store_path = StorePath::from(path.as_str());
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?;

        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(UploadStoreError::Io(e));
                }
            };
            written += bytes.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                let _ = upload.abort().await;
                return Err(UploadStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?;

        Ok(written)
    }

    async fn fetch(&self, path: &UploadPath) -> Result<Vec<u8>, UploadStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| UploadStoreError::NotFound(e.to_string()))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| UploadStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn head(&self, path: &UploadPath) -> Result<u64, UploadStoreError> {
        let store_path = StorePath::from(path.as_str());
        let meta = self
            .inner
            .head(&store_path)
            .await
            .map_err(|e| UploadStoreError::NotFound(e.to_string()))?;
        Ok(meta.size as u64)
    }
}
