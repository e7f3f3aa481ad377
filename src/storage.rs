//! Image buckets. Files are written under `STORAGE_DIR/<bucket>/` with a
//! random name and served back from `/storage/<bucket>/<name>`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub const PUBLIC_PREFIX: &str = "/storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    FarmImages,
    ProductImages,
}

impl Bucket {
    pub fn name(&self) -> &'static str {
        match self {
            Bucket::FarmImages => "farm_images",
            Bucket::ProductImages => "product_images",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("empty upload")]
    Empty,
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedObject {
    pub bucket: Bucket,
    pub path: String,
    pub public_url: String,
}

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
    public_base_url: String,
}

impl Storage {
    pub fn new(root: impl AsRef<Path>, public_base_url: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores `bytes` in `bucket` and returns where it can be fetched from.
    pub async fn upload(
        &self,
        bucket: Bucket,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<UploadedObject, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Empty);
        }

        let path = format!("{}.{}", Uuid::new_v4().simple(), extension(file_name));
        let dir = self.root.join(bucket.name());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&path), bytes).await?;

        tracing::debug!(bucket = bucket.name(), %path, size = bytes.len(), "object stored");
        let public_url = self.public_url(bucket, &path);
        Ok(UploadedObject {
            bucket,
            path,
            public_url,
        })
    }

    pub fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.public_base_url,
            PUBLIC_PREFIX,
            bucket.name(),
            path
        )
    }
}

/// Extension of the uploaded file name, or `bin` when it has none usable.
fn extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string())
}
