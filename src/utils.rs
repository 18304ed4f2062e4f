use eframe::egui;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};

pub const DEFAULT_EXTENSION: &str = "png";

pub fn load_logo(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
}

/// Appends `.png` when the chosen path has no extension.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Writes `image` in the format named by the path's extension. JPEG has no
/// alpha channel, so the image is flattened to RGB first.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        Error::UnsupportedFormat(
            path.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )
    })?;

    let dynamic = DynamicImage::ImageRgba8(image.clone());
    let encoded = match format {
        ImageFormat::Png => dynamic,
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(dynamic.to_rgb8()),
        other => {
            return Err(Error::UnsupportedFormat(
                other.extensions_str().first().copied().unwrap_or("?").to_string(),
            ))
        }
    };

    encoded
        .save_with_format(path, format)
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = %path.display(), ?format, "saved QR code");
    Ok(())
}

pub fn to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Largest size with the same aspect ratio as `size` that fits in `max`.
pub fn fit_within(size: egui::Vec2, max: egui::Vec2) -> egui::Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (max.x / size.x).min(max.y / size.y);
    size * scale
}
