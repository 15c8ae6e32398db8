use std::path::{Path, PathBuf};
use std::sync::Arc;

use tl_core::{ExportTarget, WallpaperImage};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::generator::backend::PredictionBackend;
use crate::stitcher;

pub const EXPORT_FILE_NAME: &str = "wallpaper.png";

/// Turns the displayed wallpaper into a file. One export at a time: a second
/// request waits until the first has written its file.
pub struct Exporter {
    backend: Arc<dyn PredictionBackend>,
    output_dir: PathBuf,
    canvas: Mutex<()>,
}

impl Exporter {
    pub fn new(backend: Arc<dyn PredictionBackend>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            output_dir: output_dir.into(),
            canvas: Mutex::new(()),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(EXPORT_FILE_NAME)
    }

    pub async fn export(
        &self,
        image: &WallpaperImage,
        target: ExportTarget,
    ) -> Result<PathBuf, AppError> {
        let _canvas = self.canvas.lock().await;

        let bytes = self.backend.fetch_image(image.as_str()).await?;
        let png = stitcher::render_png(bytes, target).await?;

        let path = self.output_path();
        write_atomically(&path, &png).await?;

        info!(
            preset = %target.preset,
            width = target.width,
            height = target.height,
            path = %path.display(),
            "wallpaper exported"
        );
        Ok(path)
    }
}

// Readers never see a half-written file.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| EXPORT_FILE_NAME.to_string());
    let tmp = path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(&tmp, bytes).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}
