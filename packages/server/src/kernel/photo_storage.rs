//! Local file system storage for uploaded photos.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::kernel::BasePhotoStorage;

/// Writes uploads into a single directory, served back under `/uploads/<name>`
pub struct LocalPhotoStorage {
    base_path: PathBuf,
}

impl LocalPhotoStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn get_full_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }
}

/// Write and flush `data`; on any failure remove the file at `path`
async fn write_or_remove<W>(mut writer: W, path: &Path, data: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(data).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        // Don't leave a truncated photo behind
        drop(writer);
        let _ = fs::remove_file(path).await;
        return Err(e).with_context(|| format!("Failed to write {:?}", path));
    }
    Ok(())
}

#[async_trait]
impl BasePhotoStorage for LocalPhotoStorage {
    async fn put(&self, name: &str, data: &[u8]) -> Result<()> {
        let full_path = self.get_full_path(name);

        fs::create_dir_all(&self.base_path)
            .await
            .with_context(|| format!("Failed to create upload dir {:?}", self.base_path))?;

        let file = fs::File::create(&full_path)
            .await
            .with_context(|| format!("Failed to create {:?}", full_path))?;

        write_or_remove(file, &full_path, data).await?;

        tracing::debug!("Saved photo to {:?}", full_path);
        Ok(())
    }
}
