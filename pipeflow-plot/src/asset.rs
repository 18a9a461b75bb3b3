use std::path::{Path, PathBuf};

use eframe::egui::ColorImage;
use image::ImageError;
use thiserror::Error;

/// An error loading the reference image.
#[derive(Debug, Error)]
#[error("failed to load reference image {}: {source}", path.display())]
pub struct AssetError {
    pub path: PathBuf,
    pub source: ImageError,
}

/// Decodes an image file into pixels egui can upload as a texture.
///
/// # Errors
///
/// Returns an [`AssetError`] if the file cannot be read or decoded.
pub fn load_reference_image(path: &Path) -> Result<ColorImage, AssetError> {
    let image = image::open(path)
        .map_err(|source| AssetError {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}
