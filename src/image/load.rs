use crate::config::{AppConfig, ImageLimits};
use image::{GenericImageView, ImageFormat, ImageReader, Limits, RgbImage, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Encodings accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
    Bmp,
}

impl ImageKind {
    /// File extensions offered by the open dialog.
    pub const EXTENSIONS: [&'static str; 4] = ["jpg", "jpeg", "png", "bmp"];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    pub const fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Bmp => "BMP",
        }
    }
}

/// Why an image could not be turned into pixels.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported image type '{0}' (expected JPG, PNG or BMP)")]
    UnsupportedFormat(String),
    #[error("Not a recognizable image (expected JPG, PNG or BMP data)")]
    UnknownFormat,
    #[error("Failed to decode image data: {0}")]
    Decode(#[from] image::ImageError),
    #[error(
        "Image too large: {width}x{height} (~{} MP) exceeds limit (~{} MP)",
        .pixels / 1_000_000,
        .limit / 1_000_000
    )]
    TooLarge {
        width: u64,
        height: u64,
        pixels: u64,
        limit: u64,
    },
    #[error("Image data is truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// A decoded upload: immutable RGB pixels plus the format it arrived in.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    kind: Option<ImageKind>,
    pixels: RgbImage,
    byte_len: usize,
}

impl UploadedImage {
    /// Wrap raw RGBA pixels (clipboard data); alpha is dropped.
    pub fn from_rgba(width: usize, height: usize, bytes: &[u8]) -> Result<Self, LoadError> {
        let expected = width.saturating_mul(height).saturating_mul(4);
        if bytes.len() < expected {
            return Err(LoadError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(LoadError::TooLarge {
                width: width as u64,
                height: height as u64,
                pixels: (width as u64).saturating_mul(height as u64),
                limit: u64::from(u32::MAX),
            });
        };
        let rgba = RgbaImage::from_raw(w, h, bytes[..expected].to_vec()).ok_or_else(|| {
            LoadError::Truncated {
                expected,
                actual: bytes.len(),
            }
        })?;
        let pixels = image::DynamicImage::ImageRgba8(rgba).to_rgb8();
        Ok(Self {
            kind: None,
            pixels,
            byte_len: expected,
        })
    }

    /// Build directly from an RGB grid.
    #[cfg(test)]
    pub const fn from_rgb(pixels: RgbImage, kind: Option<ImageKind>, byte_len: usize) -> Self {
        Self {
            kind,
            pixels,
            byte_len,
        }
    }

    pub const fn kind(&self) -> Option<ImageKind> {
        self.kind
    }

    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub const fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn size(&self) -> [usize; 2] {
        let (w, h) = self.pixels.dimensions();
        [w as usize, h as usize]
    }
}

/// Reject dimensions beyond the configured pixel budget.
pub fn check_pixel_budget(limits: &ImageLimits, width: u64, height: u64) -> Result<(), LoadError> {
    let total_pixels = width.saturating_mul(height);
    if width > u64::from(limits.image_dim)
        || height > u64::from(limits.image_dim)
        || total_pixels > limits.total_pixels
    {
        return Err(LoadError::TooLarge {
            width,
            height,
            pixels: total_pixels,
            limit: limits.total_pixels,
        });
    }
    Ok(())
}

fn declared_kind(name: Option<&str>) -> Result<Option<ImageKind>, LoadError> {
    let Some(ext) = name
        .map(Path::new)
        .and_then(Path::extension)
        .and_then(|e| e.to_str())
    else {
        return Ok(None);
    };
    ImageKind::from_extension(ext)
        .map(Some)
        .ok_or_else(|| LoadError::UnsupportedFormat(ext.to_string()))
}

/// Decode raw upload bytes using configured limits.
///
/// `name` is the upload's file name when known; its extension must be one of the
/// accepted types. The content is sniffed independently and wins on mismatch.
pub fn decode_image_from_bytes(
    cfg: &AppConfig,
    name: Option<&str>,
    bytes: &[u8],
) -> Result<UploadedImage, LoadError> {
    let declared = declared_kind(name)?;
    let format = image::guess_format(bytes).map_err(|_| LoadError::UnknownFormat)?;
    let kind = ImageKind::from_format(format)
        .ok_or_else(|| LoadError::UnsupportedFormat(format!("{format:?}").to_lowercase()))?;
    if let Some(declared) = declared
        && declared != kind
    {
        log::warn!(
            "{} is named as {} but contains {} data",
            name.unwrap_or("upload"),
            declared.label(),
            kind.label()
        );
    }

    let il = cfg.effective_image_limits();
    let mut limits = Limits::default();
    limits.max_image_width = Some(il.image_dim);
    limits.max_image_height = Some(il.image_dim);
    limits.max_alloc = Some(il.alloc_bytes);
    let mut reader = ImageReader::with_format(Cursor::new(bytes), format);
    reader.limits(limits);
    let img = reader.decode()?;

    let (w, h) = img.dimensions();
    check_pixel_budget(&il, u64::from(w), u64::from(h))?;

    Ok(UploadedImage {
        kind: Some(kind),
        pixels: img.to_rgb8(),
        byte_len: bytes.len(),
    })
}

/// Load and decode an image from a filesystem path using configured limits.
pub fn decode_image_from_path(cfg: &AppConfig, path: &Path) -> Result<UploadedImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let name = path.file_name().and_then(|s| s.to_str());
    decode_image_from_bytes(cfg, name, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).expect("encode test image");
        out.into_inner()
    }

    fn sample() -> RgbImage {
        RgbImage::from_fn(5, 3, |x, y| Rgb([(x * 40) as u8, (y * 80) as u8, 7]))
    }

    #[test]
    fn decodes_png_and_bmp_uploads() {
        let cfg = AppConfig::default();
        for (format, name) in [(ImageFormat::Png, "a.png"), (ImageFormat::Bmp, "b.BMP")] {
            let bytes = encode(&sample(), format);
            let uploaded = decode_image_from_bytes(&cfg, Some(name), &bytes).expect("decodes");
            assert_eq!(uploaded.pixels(), &sample());
            assert_eq!(uploaded.byte_len(), bytes.len());
            assert_eq!(uploaded.kind(), ImageKind::from_format(format));
        }
    }

    #[test]
    fn rejects_non_image_bytes() {
        let cfg = AppConfig::default();
        let err = decode_image_from_bytes(&cfg, Some("notes.png"), b"definitely not a picture")
            .expect_err("text is not an image");
        assert!(matches!(err, LoadError::UnknownFormat));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn rejects_unsupported_extension() {
        let cfg = AppConfig::default();
        let bytes = encode(&sample(), ImageFormat::Png);
        let err = decode_image_from_bytes(&cfg, Some("scan.tiff"), &bytes).expect_err("tiff");
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "tiff"));
    }

    #[test]
    fn rejects_truncated_png() {
        let cfg = AppConfig::default();
        let bytes = encode(&sample(), ImageFormat::Png);
        let err = decode_image_from_bytes(&cfg, None, &bytes[..bytes.len() / 2])
            .expect_err("truncated");
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn content_wins_over_misleading_name() {
        let cfg = AppConfig::default();
        let bytes = encode(&sample(), ImageFormat::Png);
        let uploaded = decode_image_from_bytes(&cfg, Some("photo.jpg"), &bytes).expect("decodes");
        assert_eq!(uploaded.kind(), Some(ImageKind::Png));
    }

    #[test]
    fn rgba_upload_drops_alpha() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]));
        let uploaded = UploadedImage::from_rgba(2, 2, rgba.as_raw()).expect("valid");
        assert_eq!(uploaded.kind(), None);
        assert!(uploaded.pixels().pixels().all(|p| p.0 == [10, 20, 30]));

        let err = UploadedImage::from_rgba(2, 2, &rgba.as_raw()[..10]).expect_err("short");
        assert!(matches!(err, LoadError::Truncated { expected: 16, actual: 10 }));
    }

    #[test]
    fn pixel_budget_rejects_oversized_dimensions() {
        let limits = ImageLimits::default().sanitized();
        assert!(check_pixel_budget(&limits, 100, 100).is_ok());
        assert!(check_pixel_budget(&limits, u64::from(limits.image_dim) + 1, 1).is_err());
        assert!(check_pixel_budget(&limits, 10_000, 10_000).is_err());
    }
}
