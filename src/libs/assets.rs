//! Managed assets directory: `<root>/photos` and `<root>/icons`.

use super::error::StoreResult;
use std::fs;
use std::path::{Path, PathBuf};

pub const PHOTOS_DIR: &str = "photos";
pub const ICONS_DIR: &str = "icons";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.root.join(PHOTOS_DIR)
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.root.join(ICONS_DIR)
    }

    /// Creates the photos and icons directories if they are missing.
    pub fn ensure(&self) -> StoreResult<()> {
        fs::create_dir_all(self.photos_dir())?;
        fs::create_dir_all(self.icons_dir())?;
        Ok(())
    }

    /// Where [`store_photo`](Self::store_photo) puts `source` for `student_id`:
    /// `<photos>/<student_id>.<ext>`, extension lowercased.
    pub fn photo_path(&self, source: &Path, student_id: &str) -> PathBuf {
        let file_name = match source.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => format!("{}.{}", student_id, ext.to_lowercase()),
            None => student_id.to_string(),
        };
        self.photos_dir().join(file_name)
    }

    /// Copies `source` into the photos directory and returns the stored path.
    /// An existing photo for the student is replaced.
    pub fn store_photo(&self, source: &Path, student_id: &str) -> StoreResult<PathBuf> {
        fs::create_dir_all(self.photos_dir())?;
        let target = self.photo_path(source, student_id);
        fs::copy(source, &target)?;
        tracing::debug!(source = %source.display(), target = %target.display(), "stored student photo");
        Ok(target)
    }
}
