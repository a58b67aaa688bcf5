//! Mock image storage

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use oea_client::error::{ClientError, ClientResult};
use oea_client::types::UploadFile;
use oea_client::ImageStorageApi;

/// In-memory storage bucket.
///
/// Produces deterministic durable URLs derived from the file name so
/// tests can assert on reconciled image lists. The URLs carry the real
/// storage-host marker, matching what the admin core classifies on.
#[derive(Default)]
pub struct MockImageStorage {
    uploads: Mutex<Vec<String>>,
    fail_for: Mutex<HashSet<String>>,
}

impl MockImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every upload of the named file
    pub fn fail_for(&self, file_name: impl Into<String>) {
        self.fail_for.lock().unwrap().insert(file_name.into());
    }

    /// File names uploaded so far, in call order
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    /// Durable URL this mock returns for a file name
    pub fn url_for(file_name: &str) -> String {
        format!(
            "https://unit-test.supabase.co/storage/v1/object/public/product-images/{}",
            file_name
        )
    }
}

#[async_trait]
impl ImageStorageApi for MockImageStorage {
    async fn upload(&self, file: &UploadFile) -> ClientResult<String> {
        self.uploads.lock().unwrap().push(file.file_name.clone());

        if self.fail_for.lock().unwrap().contains(&file.file_name) {
            return Err(ClientError::Upload(format!(
                "storage rejected {}",
                file.file_name
            )));
        }

        Ok(Self::url_for(&file.file_name))
    }
}
