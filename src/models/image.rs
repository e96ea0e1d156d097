use std::path::PathBuf;

/// Metadata kept for every stored image blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub id: String,
    pub laptop_id: String,
    pub image_type: String,
    pub path: PathBuf,
    pub size: usize,
}
