use super::EdgeVisionApp;
use crate::config::AppConfig;
use crate::export::gray_to_rgba;
use crate::image::{ImageMeta, UploadedImage, human_readable_bytes};
use arboard::{Clipboard, Error as ClipboardError, ImageData};
use egui::Context;
use std::borrow::Cow;

struct ValidatedClipboardSize {
    width: usize,
    height: usize,
    expected_len: usize,
}

impl EdgeVisionApp {
    pub(crate) fn paste_image_from_clipboard(&mut self, ctx: &Context) {
        self.image.pending_task = None;
        match capture_clipboard_image(&self.config) {
            Ok(uploaded) => {
                let meta = ImageMeta::from_clipboard(uploaded.byte_len());
                self.install_image(ctx, uploaded, meta);
            }
            Err(err) => {
                log::warn!("{err}");
                self.set_status(err);
            }
        }
    }

    pub(crate) fn copy_result_to_clipboard(&mut self) {
        let Some(processed) = self.image.session.as_ref().and_then(|s| s.processed()) else {
            self.set_status("Nothing to copy yet.");
            return;
        };
        let (width, height) = processed.edges.dimensions();
        let data = ImageData {
            width: width as usize,
            height: height as usize,
            bytes: Cow::Owned(gray_to_rgba(&processed.edges)),
        };
        let label = processed.algorithm.label();
        let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_image(data));
        match result {
            Ok(()) => self.set_status(format!("Copied {label} result to clipboard.")),
            Err(err) => {
                let msg = format_clipboard_error("Copy", err);
                log::warn!("{msg}");
                self.set_status(msg);
            }
        }
    }
}

fn capture_clipboard_image(cfg: &AppConfig) -> Result<UploadedImage, String> {
    let mut clipboard = Clipboard::new().map_err(|err| format_clipboard_error("Paste", err))?;
    let data = clipboard
        .get_image()
        .map_err(|err| format_clipboard_error("Paste", err))?;
    let size = validate_clipboard_image(cfg, data.width, data.height)?;
    if data.bytes.len() < size.expected_len {
        return Err("Paste failed: clipboard image data is truncated.".to_string());
    }
    UploadedImage::from_rgba(size.width, size.height, &data.bytes[..size.expected_len])
        .map_err(|err| format!("Paste failed: {err}"))
}

fn validate_clipboard_image(
    cfg: &AppConfig,
    width: usize,
    height: usize,
) -> Result<ValidatedClipboardSize, String> {
    if width == 0 || height == 0 {
        return Err("Paste failed: clipboard image is empty.".to_string());
    }
    let limits = cfg.effective_image_limits();
    let width_u32 = u32::try_from(width).unwrap_or(u32::MAX);
    let height_u32 = u32::try_from(height).unwrap_or(u32::MAX);
    if width_u32 > limits.image_dim || height_u32 > limits.image_dim {
        return Err(format!(
            "Paste failed: clipboard image {width}x{height} exceeds the per-side limit ({} px).",
            limits.image_dim
        ));
    }

    let total_pixels = u64::try_from(width)
        .ok()
        .and_then(|w| u64::try_from(height).ok().and_then(|h| w.checked_mul(h)))
        .ok_or_else(|| {
            "Paste failed: clipboard dimensions are too large for this system.".to_string()
        })?;
    if total_pixels > limits.total_pixels {
        return Err(format!(
            "Paste failed: clipboard image too large: {width}x{height} (~{} MP) exceeds limit (~{} MP).",
            total_pixels / 1_000_000,
            limits.total_pixels / 1_000_000
        ));
    }

    let rgba_bytes = total_pixels.checked_mul(4).ok_or_else(|| {
        "Paste failed: clipboard image is too large to fit in memory.".to_string()
    })?;
    if rgba_bytes > limits.alloc_bytes {
        return Err(format!(
            "Paste failed: clipboard image needs about {} of RGBA data, over the configured limit ({}).",
            human_readable_bytes(rgba_bytes),
            human_readable_bytes(limits.alloc_bytes)
        ));
    }

    let expected_len = usize::try_from(rgba_bytes).map_err(|_| {
        "Paste failed: clipboard image does not fit in available memory.".to_string()
    })?;

    Ok(ValidatedClipboardSize {
        width,
        height,
        expected_len,
    })
}

fn format_clipboard_error(action: &str, err: ClipboardError) -> String {
    match err {
        ClipboardError::ContentNotAvailable => {
            format!("{action} failed: clipboard does not contain an image.")
        }
        ClipboardError::ClipboardNotSupported => {
            format!("{action} failed: clipboard access is not supported in this environment.")
        }
        ClipboardError::ClipboardOccupied => {
            format!("{action} failed: clipboard is busy; try again in a moment.")
        }
        ClipboardError::ConversionFailure => {
            format!("{action} failed: clipboard image could not be converted.")
        }
        ClipboardError::Unknown { description } => {
            format!("{action} failed: {description}")
        }
        _ => {
            format!("{action} failed: {err}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_clipboard_image_is_rejected() {
        let cfg = AppConfig::default();
        let err = validate_clipboard_image(&cfg, 0, 10).err().expect("empty");
        assert!(err.contains("empty"));
    }

    #[test]
    fn oversized_clipboard_side_is_rejected() {
        let cfg = AppConfig::default();
        let limit = cfg.effective_image_limits().image_dim as usize;
        let err = validate_clipboard_image(&cfg, limit + 1, 1)
            .err()
            .expect("too wide");
        assert!(err.contains("per-side limit"));
    }

    #[test]
    fn valid_size_reports_rgba_length() {
        let cfg = AppConfig::default();
        let size = validate_clipboard_image(&cfg, 640, 480).expect("fits");
        assert_eq!(size.expected_len, 640 * 480 * 4);
    }

    #[test]
    fn errors_name_the_action() {
        assert_eq!(
            format_clipboard_error("Copy", ClipboardError::ClipboardOccupied),
            "Copy failed: clipboard is busy; try again in a moment."
        );
    }
}
