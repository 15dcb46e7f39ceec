use super::load::ImageKind;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One label/value line of the image info window.
pub type InfoRow = (&'static str, String);

#[derive(Debug, Clone, PartialEq, Eq)]
enum UploadSource {
    File(PathBuf),
    Drop(Option<String>),
    Clipboard,
}

/// Facts about the current upload that the decoded pixels no longer carry.
#[derive(Debug, Clone)]
pub struct ImageMeta {
    source: UploadSource,
    kind: Option<ImageKind>,
    byte_len: Option<u64>,
    last_modified: Option<SystemTime>,
}

impl ImageMeta {
    /// Stat the file; a failed stat leaves size and mtime unknown.
    pub fn from_path(path: &Path) -> Self {
        let stat = std::fs::metadata(path).ok();
        Self {
            source: UploadSource::File(path.to_owned()),
            kind: None,
            byte_len: stat.as_ref().map(std::fs::Metadata::len),
            last_modified: stat.and_then(|m| m.modified().ok()),
        }
    }

    pub fn from_dropped_bytes(
        name: Option<&str>,
        byte_len: usize,
        last_modified: Option<SystemTime>,
    ) -> Self {
        let name = name.filter(|n| !n.is_empty()).map(str::to_owned);
        Self {
            source: UploadSource::Drop(name),
            kind: None,
            byte_len: u64::try_from(byte_len).ok(),
            last_modified,
        }
    }

    /// Clipboard uploads are raw RGBA, so `byte_len` is the pixel buffer size.
    pub fn from_clipboard(byte_len: usize) -> Self {
        Self {
            source: UploadSource::Clipboard,
            kind: None,
            byte_len: u64::try_from(byte_len).ok(),
            last_modified: None,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: Option<ImageKind>) -> Self {
        self.kind = kind;
        self
    }

    pub fn display_name(&self) -> String {
        match &self.source {
            UploadSource::File(path) => path.file_name().map_or_else(
                || path.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            ),
            UploadSource::Drop(Some(name)) => name.clone(),
            UploadSource::Drop(None) => "Unnamed drop".to_string(),
            UploadSource::Clipboard => "Clipboard image".to_string(),
        }
    }

    pub fn format_label(&self) -> &'static str {
        self.kind.map_or("Raw pixels", ImageKind::label)
    }

    /// Rows for the "File" section: origin, name, encoding, path, size, mtime.
    pub fn file_rows(&self) -> Vec<InfoRow> {
        let source = match self.source {
            UploadSource::File(_) => "File on disk",
            UploadSource::Drop(_) => "Dropped file",
            UploadSource::Clipboard => "Clipboard",
        };
        let mut rows = vec![
            ("Source", source.to_string()),
            ("Name", self.display_name()),
            ("Format", self.format_label().to_string()),
        ];
        if let UploadSource::File(path) = &self.source {
            rows.push(("Path", path.display().to_string()));
        }
        rows.push((
            "Size",
            self.byte_len.map_or_else(
                || "Unknown".to_string(),
                |n| format!("{} ({n} bytes)", human_readable_bytes(n)),
            ),
        ));
        rows.push((
            "Modified",
            self.last_modified
                .map_or_else(|| "Unknown".to_string(), utc_timestamp),
        ));
        rows
    }
}

/// Rows for the "Image" section: dimensions, reduced aspect ratio, pixel count.
pub fn dimension_rows([w, h]: [usize; 2]) -> Vec<InfoRow> {
    let aspect = match reduced_ratio(w, h) {
        Some((rw, rh)) => {
            #[allow(clippy::cast_precision_loss)]
            let decimal = w as f64 / h as f64;
            format!("{rw}:{rh} ({decimal:.3})")
        }
        None => "n/a".to_string(),
    };
    let pixels = u64::try_from(w)
        .ok()
        .zip(u64::try_from(h).ok())
        .map_or(u64::MAX, |(w, h)| w.saturating_mul(h));
    #[allow(clippy::cast_precision_loss)]
    let megapixels = pixels as f64 / 1e6;
    vec![
        ("Dimensions", format!("{w} × {h} px")),
        ("Aspect ratio", aspect),
        ("Pixels", format!("{pixels} ({megapixels:.2} MP)")),
    ]
}

/// Byte count in binary units, exact below 1 KiB.
pub fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for &next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.2} {unit}")
}

fn utc_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn reduced_ratio(w: usize, h: usize) -> Option<(usize, usize)> {
    if w == 0 || h == 0 {
        return None;
    }
    let (mut a, mut b) = (w, h);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    Some((w / a, h / a))
}
