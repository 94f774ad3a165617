//! Captured picture persistence.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Local;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::entities::ThumbKey;
use crate::domain::errors::StorageError;

const FILE_NAME_FORMAT: &str = "image-%Y-%m-%d-%H-%M-%3f.jpg";
const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Record of a captured picture written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPicture {
    /// Where the picture landed.
    pub path: PathBuf,
    /// Day string (`YYYY-MM-DD`) for date-grouped listings.
    pub date_key: String,
}

impl SavedPicture {
    /// The key under which the gallery will request this picture's thumbnail.
    #[must_use]
    pub fn thumb_key(&self) -> ThumbKey {
        ThumbKey::new(&self.path)
    }
}

/// Writes captured JPEG bytes into the pictures directory.
///
/// File names carry the capture timestamp down to the millisecond
/// (`image-2024-06-01-14-23-057.jpg`), so a directory listing sorts
/// chronologically.
pub struct PictureWriter {
    output_dir: PathBuf,
}

impl PictureWriter {
    /// Creates a writer targeting the given directory.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the directory pictures are written into.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes captured bytes to a date-stamped file.
    ///
    /// The file name and the returned `date_key` are derived from a single
    /// clock reading, so a capture straddling midnight cannot end up filed
    /// under one day and named for another.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the output directory cannot be prepared or
    /// the file cannot be written.
    pub async fn save(&self, data: Bytes) -> Result<SavedPicture, StorageError> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| StorageError::prepare_directory(&self.output_dir, e))?;

        let now = Local::now();
        let file_name = now.format(FILE_NAME_FORMAT).to_string();
        let date_key = now.format(DATE_KEY_FORMAT).to_string();
        let path = self.output_dir.join(file_name);

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| StorageError::write(&path, e))?;
        file.write_all(&data)
            .await
            .map_err(|e| StorageError::write(&path, e))?;
        file.flush()
            .await
            .map_err(|e| StorageError::write(&path, e))?;

        debug!(
            path = %path.display(),
            size = data.len(),
            date_key = %date_key,
            "Saved captured picture"
        );

        Ok(SavedPicture { path, date_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_writes_date_stamped_file() {
        let dir = tempdir().unwrap();
        let writer = PictureWriter::new(dir.path());

        let saved = writer
            .save(Bytes::from_static(b"jpeg bytes"))
            .await
            .unwrap();

        assert!(saved.path.exists());
        assert_eq!(tokio::fs::read(&saved.path).await.unwrap(), b"jpeg bytes");

        let name = saved.path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with(&format!("image-{}", saved.date_key)));
        assert!(name.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_saved_picture_doubles_as_thumb_key() {
        let dir = tempdir().unwrap();
        let writer = PictureWriter::new(dir.path());

        let saved = writer.save(Bytes::from_static(b"x")).await.unwrap();

        assert_eq!(saved.date_key.len(), "2024-06-01".len());
        assert_eq!(saved.thumb_key().as_path(), saved.path);
    }

    #[tokio::test]
    async fn test_save_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("pictures").join("camera");
        let writer = PictureWriter::new(&nested);

        let saved = writer.save(Bytes::from_static(b"data")).await.unwrap();

        assert!(nested.exists());
        assert!(saved.path.starts_with(&nested));
    }

    #[tokio::test]
    async fn test_successive_saves_produce_distinct_files() {
        let dir = tempdir().unwrap();
        let writer = PictureWriter::new(dir.path());

        let first = writer.save(Bytes::from_static(b"one")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let second = writer.save(Bytes::from_static(b"two")).await.unwrap();

        assert_ne!(first.path, second.path);
    }
}
