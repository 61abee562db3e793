use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Upload, UploadId, UploadState};

/// In-process registry of uploads between the upload request and the
/// user-triggered generate action. Entries live for the process lifetime.
#[derive(Default)]
pub struct UploadRegistry {
    uploads: RwLock<HashMap<UploadId, Upload>>,
}

impl UploadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, upload: Upload) {
        self.uploads.write().await.insert(upload.id, upload);
    }

    pub async fn get(&self, id: UploadId) -> Option<Upload> {
        self.uploads.read().await.get(&id).cloned()
    }

    pub async fn mark_completed(&self, id: UploadId) {
        if let Some(upload) = self.uploads.write().await.get_mut(&id) {
            upload.state = UploadState::Completed;
            upload.updated_at = Utc::now();
        }
    }
}
