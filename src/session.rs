use image::GrayImage;
use std::time::{Duration, Instant};

use crate::edges::{EdgeAlgorithm, EdgeSettings, detect_edges};
use crate::export::{download_file_name, encode_png};
use crate::image::UploadedImage;

/// Latest edge map together with the settings that produced it.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub algorithm: EdgeAlgorithm,
    pub settings: EdgeSettings,
    pub edges: GrayImage,
    pub duration: Duration,
}

/// Encoded edge map ready to be written to disk.
#[derive(Debug, Clone)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// One uploaded image and at most one derived result.
///
/// The source pixels never change; every settings change replaces the result.
pub struct FilterSession {
    original: UploadedImage,
    processed: Option<ProcessedImage>,
}

impl FilterSession {
    pub const fn new(original: UploadedImage) -> Self {
        Self {
            original,
            processed: None,
        }
    }

    pub const fn original(&self) -> &UploadedImage {
        &self.original
    }

    pub const fn processed(&self) -> Option<&ProcessedImage> {
        self.processed.as_ref()
    }

    /// Whether `process` would recompute for these settings.
    pub fn is_stale(&self, settings: &EdgeSettings) -> bool {
        let settings = settings.sanitized();
        self.processed
            .as_ref()
            .is_none_or(|p| p.settings != settings)
    }

    /// Run the detector unless the last result was computed with the same settings.
    pub fn process(&mut self, settings: &EdgeSettings) -> &ProcessedImage {
        let settings = settings.sanitized();
        if let Some(current) = self.processed.take_if(|p| p.settings == settings) {
            return self.processed.insert(current);
        }
        let started = Instant::now();
        let edges = detect_edges(self.original.pixels(), &settings);
        let duration = started.elapsed();
        log::debug!("{} took {duration:.2?}", settings.describe());
        self.processed.insert(ProcessedImage {
            algorithm: settings.algorithm,
            settings,
            edges,
            duration,
        })
    }

    /// PNG bytes of the current result, `None` before the first `process`.
    pub fn download(&self) -> Option<anyhow::Result<Download>> {
        let processed = self.processed.as_ref()?;
        Some(encode_png(&processed.edges).map(|bytes| Download {
            file_name: download_file_name(processed.algorithm),
            bytes,
        }))
    }
}
