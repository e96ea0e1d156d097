use crate::models::ImageInfo;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("image type {0:?} is not a plain file extension")]
    InvalidType(String),
    #[error("cannot write image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes uploaded images under `folder` as `<image id><image type>` and
/// keeps their metadata in memory.
pub struct DiskImageStore {
    folder: PathBuf,
    images: Mutex<HashMap<String, ImageInfo>>,
}

impl DiskImageStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            images: Mutex::new(HashMap::new()),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Stores `data` and returns the generated image id.
    ///
    /// A failed write may leave a partial file behind; its metadata is only
    /// recorded once the write has succeeded.
    #[tracing::instrument(name = "Save image blob.", skip(self, data), fields(size = data.len()))]
    pub async fn save(
        &self,
        laptop_id: &str,
        image_type: &str,
        data: &[u8],
    ) -> Result<String, ImageStoreError> {
        if !is_valid_extension(image_type) {
            return Err(ImageStoreError::InvalidType(image_type.to_string()));
        }

        let image_id = Uuid::new_v4().to_string();
        let path = self.folder.join(format!("{image_id}{image_type}"));

        tokio::fs::write(&path, data)
            .await
            .map_err(|source| ImageStoreError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!("image written to {}", path.display());

        let info = ImageInfo {
            id: image_id.clone(),
            laptop_id: laptop_id.to_string(),
            image_type: image_type.to_string(),
            path,
            size: data.len(),
        };
        self.images.lock().await.insert(image_id.clone(), info);

        Ok(image_id)
    }

    pub async fn find(&self, image_id: &str) -> Option<ImageInfo> {
        self.images.lock().await.get(image_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.images.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.images.lock().await.is_empty()
    }
}

/// Empty, or a dot followed by up to 15 ASCII alphanumerics (`.jpg`, `.png`).
fn is_valid_extension(image_type: &str) -> bool {
    if image_type.is_empty() {
        return true;
    }
    match image_type.strip_prefix('.') {
        Some(ext) => {
            !ext.is_empty() && ext.len() < 16 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}
