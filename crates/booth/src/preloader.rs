use cosmic::widget::image::Handle;
use std::{
    fmt::{self, Debug, Formatter},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Task cancelled")]
    Cancelled,
}

/// A slide image decoded ahead of time, ready for the renderer.
#[derive(Clone)]
pub struct PreloadedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
    pub path: PathBuf,
}

impl Debug for PreloadedImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreloadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("path", &self.path)
            .finish()
    }
}

/// Decodes `path` on the rayon pool.
pub async fn load_image(path: PathBuf) -> Result<PreloadedImage, LoadError> {
    let (tx, rx) = tokio::sync::oneshot::channel();

    rayon::spawn(move || {
        let result = load_image_sync(&path);
        let _ = tx.send(result);
    });

    rx.await.map_err(|_| LoadError::Cancelled)?
}

pub fn load_image_sync(path: &Path) -> Result<PreloadedImage, LoadError> {
    let bytes = std::fs::read(path)?;
    let rgba = image::load_from_memory(&bytes)?.into_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(PreloadedImage {
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
        width,
        height,
        path: path.to_path_buf(),
    })
}
