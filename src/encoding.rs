use image::{imageops, imageops::FilterType, Rgb, Rgba, RgbaImage};
use qrcode::{types::QrError, Color, QrCode};
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    models::{ErrorCorrection, GenerationConfig, BORDER, MODULE_SIZE},
    utils::load_logo,
};

/// Encodes `text` at the smallest QR version that fits `level`.
pub fn build_symbol(text: &str, level: ErrorCorrection) -> Result<QrCode> {
    QrCode::with_error_correction_level(text.as_bytes(), level.ec_level()).map_err(|e| match e {
        QrError::DataTooLong => {
            warn!(level = %level, bytes = text.len(), "content exceeds QR capacity");
            Error::EncodingCapacityExceeded { level }
        }
        other => Error::from(other),
    })
}

/// Rasterizes `code` with `MODULE_SIZE` px modules and a `BORDER` quiet zone.
pub fn render_symbol(code: &QrCode, foreground: Rgb<u8>, background: Rgb<u8>) -> RgbaImage {
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = MODULE_SIZE * (modules + 2 * BORDER);
    let fg = Rgba([foreground[0], foreground[1], foreground[2], 255]);
    let bg = Rgba([background[0], background[1], background[2], 255]);

    RgbaImage::from_fn(side, side, |x, y| {
        let mx = (x / MODULE_SIZE).checked_sub(BORDER);
        let my = (y / MODULE_SIZE).checked_sub(BORDER);
        match (mx, my) {
            (Some(mx), Some(my)) if mx < modules && my < modules => {
                match colors[(my * modules + mx) as usize] {
                    Color::Dark => fg,
                    Color::Light => bg,
                }
            }
            _ => bg,
        }
    })
}

/// Scaled logo size for a QR image `qr_width` px wide: width is
/// `round(percent% of qr_width)`, height follows the logo's aspect ratio.
pub fn logo_dimensions(qr_width: u32, percent: u8, logo: (u32, u32)) -> (u32, u32) {
    let (logo_w, logo_h) = logo;
    let width = ((qr_width as u64 * percent as u64 + 50) / 100).max(1);
    let height = if logo_w == 0 {
        1
    } else {
        ((logo_h as u64 * width + logo_w as u64 / 2) / logo_w as u64).max(1)
    };
    (width as u32, height as u32)
}

/// Top-left corner that centers an `inner` box inside `outer`.
pub fn centered_offset(outer: (u32, u32), inner: (u32, u32)) -> (i64, i64) {
    (
        (outer.0 as i64 - inner.0 as i64) / 2,
        (outer.1 as i64 - inner.1 as i64) / 2,
    )
}

/// Resizes `logo` to `percent`% of the QR width and alpha-blends it at the
/// center of `qr`. Transparent logo pixels leave the QR untouched.
pub fn composite_logo(qr: &mut RgbaImage, logo: &RgbaImage, percent: u8) {
    let (w, h) = logo_dimensions(qr.width(), percent, logo.dimensions());
    let resized = imageops::resize(logo, w, h, FilterType::Lanczos3);
    let (x, y) = centered_offset(qr.dimensions(), (w, h));
    debug!(width = w, height = h, x, y, "placing logo");
    imageops::overlay(qr, &resized, x, y);
}

/// Runs the whole pipeline for one config. Nothing is returned on failure,
/// so the caller's previous image stays valid.
pub fn generate(config: &GenerationConfig) -> Result<RgbaImage> {
    let code = build_symbol(&config.text, config.error_correction)?;
    let logo = config.logo_path.as_deref().map(load_logo).transpose()?;

    let mut image = render_symbol(
        &code,
        config.foreground_or_default(),
        config.background_or_default(),
    );

    if let Some(logo) = &logo {
        composite_logo(&mut image, logo, config.logo_size_percent);
    }

    info!(
        modules = code.width(),
        size = image.width(),
        level = %config.error_correction,
        logo = logo.is_some(),
        "generated QR code"
    );
    Ok(image)
}

/// Convenience for callers that only need a plain symbol, e.g. the window icon.
pub fn generate_plain(text: &str) -> Result<RgbaImage> {
    generate(&GenerationConfig {
        text: text.to_string(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_logo(w: u32, h: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(w, h, color)
    }

    // Resampling a flat color can land a unit off the source value.
    fn close_to(pixel: &Rgba<u8>, expected: [u8; 4]) -> bool {
        pixel.0.iter().zip(expected).all(|(a, b)| a.abs_diff(b) <= 2)
    }

    #[test]
    fn test_image_size_matches_module_grid() {
        for text in ["a", "https://example.com/some/longer/path?with=query"] {
            let code = build_symbol(text, ErrorCorrection::H).unwrap();
            let image = generate_plain(text).unwrap();
            let expected = MODULE_SIZE * (code.width() as u32 + 2 * BORDER);
            assert_eq!(image.dimensions(), (expected, expected));
        }
    }

    #[test]
    fn test_version_one_fits_short_url() {
        let image = generate_plain("hi").unwrap();
        // Version 1 is 21 modules wide.
        assert_eq!(image.width(), 10 * (21 + 8));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = GenerationConfig {
            text: "https://www.rust-lang.org".to_string(),
            foreground: Some(Rgb([200, 10, 10])),
            ..Default::default()
        };
        assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());
    }

    #[test]
    fn test_colors_applied() {
        let config = GenerationConfig {
            text: "color".to_string(),
            foreground: Some(Rgb([10, 20, 30])),
            background: Some(Rgb([240, 230, 220])),
            ..Default::default()
        };
        let image = generate(&config).unwrap();
        // Corner is quiet zone; the finder pattern starts at (BORDER, BORDER).
        assert_eq!(image.get_pixel(0, 0), &Rgba([240, 230, 220, 255]));
        let finder = BORDER * MODULE_SIZE;
        assert_eq!(image.get_pixel(finder, finder), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_unset_colors_default_to_black_on_white() {
        let image = generate_plain("defaults").unwrap();
        let finder = BORDER * MODULE_SIZE + 1;
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(finder, finder), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_capacity_exceeded_at_level_h() {
        let text = "x".repeat(2000);
        assert!(matches!(
            build_symbol(&text, ErrorCorrection::H).err(),
            Some(Error::EncodingCapacityExceeded {
                level: ErrorCorrection::H
            })
        ));
        // The same content fits at L.
        assert!(build_symbol(&text, ErrorCorrection::L).is_ok());
    }

    #[test]
    fn test_logo_dimensions_follow_percent() {
        for percent in 5..=20u8 {
            let (w, _) = logo_dimensions(290, percent, (100, 100));
            let expected = (percent as f64 * 290.0 / 100.0).round() as u32;
            assert_eq!(w, expected, "percent {percent}");
        }
    }

    #[test]
    fn test_logo_dimensions_keep_aspect_ratio() {
        assert_eq!(logo_dimensions(400, 10, (200, 100)), (40, 20));
        assert_eq!(logo_dimensions(400, 20, (50, 150)), (80, 240));
        assert_eq!(logo_dimensions(100, 5, (1000, 1)), (5, 1));
    }

    #[test]
    fn test_centered_offset() {
        assert_eq!(centered_offset((290, 290), (29, 29)), (130, 130));
        assert_eq!(centered_offset((290, 290), (58, 30)), (116, 130));
    }

    #[test]
    fn test_composite_logo_is_centered() {
        let mut qr = RgbaImage::from_pixel(200, 200, Rgba([255, 255, 255, 255]));
        let logo = solid_logo(10, 10, Rgba([255, 0, 0, 255]));
        composite_logo(&mut qr, &logo, 20);

        // 40x40 logo at (80, 80).
        assert!(close_to(qr.get_pixel(80, 80), [255, 0, 0, 255]));
        assert!(close_to(qr.get_pixel(119, 119), [255, 0, 0, 255]));
        assert_eq!(qr.get_pixel(79, 79), &Rgba([255, 255, 255, 255]));
        assert_eq!(qr.get_pixel(120, 120), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_transparent_logo_leaves_qr_untouched() {
        let config = GenerationConfig {
            text: "mask".to_string(),
            ..Default::default()
        };
        let plain = generate(&config).unwrap();
        let mut composited = plain.clone();
        let logo = solid_logo(16, 16, Rgba([255, 0, 0, 0]));
        composite_logo(&mut composited, &logo, 20);
        assert_eq!(plain, composited);
    }

    #[test]
    fn test_generate_with_logo_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        solid_logo(8, 8, Rgba([0, 0, 255, 255])).save(&path).unwrap();

        let config = GenerationConfig {
            text: "https://example.com".to_string(),
            logo_path: Some(path),
            ..Default::default()
        }
        .with_logo_size(20);
        let image = generate(&config).unwrap();
        let center = image.width() / 2;
        assert!(close_to(image.get_pixel(center, center), [0, 0, 255, 255]));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_missing_logo_is_image_load_error() {
        let config = GenerationConfig {
            text: "x".to_string(),
            logo_path: Some("/definitely/not/here.png".into()),
            ..Default::default()
        };
        assert!(matches!(generate(&config), Err(Error::ImageLoad { .. })));
    }
}
