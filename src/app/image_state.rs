use crate::image::{ImageMeta, ImageTexture, UploadedImage};
use crate::session::FilterSession;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::SystemTime;

pub enum ImageLoadRequest {
    Path(PathBuf),
    Bytes {
        name: Option<String>,
        bytes: Vec<u8>,
    },
}

pub struct PendingImageTask {
    pub(super) rx: Receiver<ImageLoadResult>,
    pub(super) meta: PendingImageMeta,
}

pub enum ImageLoadResult {
    Success(UploadedImage),
    Error(String),
}

#[derive(Clone)]
pub enum PendingImageMeta {
    Path {
        path: PathBuf,
    },
    DroppedBytes {
        name: Option<String>,
        byte_len: usize,
        last_modified: Option<SystemTime>,
    },
}

impl PendingImageMeta {
    pub(super) fn description(&self) -> String {
        match self {
            Self::Path { path } => path
                .file_name()
                .and_then(|s| s.to_str())
                .map_or_else(|| path.display().to_string(), str::to_string),
            Self::DroppedBytes { name, .. } => name
                .as_deref()
                .map_or_else(|| "dropped bytes".to_string(), str::to_string),
        }
    }

    pub(super) fn into_image_meta(self) -> ImageMeta {
        match self {
            Self::Path { path } => ImageMeta::from_path(&path),
            Self::DroppedBytes {
                name,
                byte_len,
                last_modified,
            } => ImageMeta::from_dropped_bytes(name.as_deref(), byte_len, last_modified),
        }
    }
}

/// The current upload, its filter session and the textures shown side by side.
#[derive(Default)]
pub struct ImageState {
    pub(super) session: Option<FilterSession>,
    pub(super) meta: Option<ImageMeta>,
    pub(super) original_texture: Option<ImageTexture>,
    pub(super) edges_texture: Option<ImageTexture>,
    pub(super) pending_task: Option<PendingImageTask>,
}

impl ImageState {
    pub(super) const fn has_image(&self) -> bool {
        self.session.is_some()
    }

    pub(super) fn has_result(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.processed().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_descriptions_prefer_file_names() {
        let path = PendingImageMeta::Path {
            path: PathBuf::from("/tmp/photos/cat.jpg"),
        };
        assert_eq!(path.description(), "cat.jpg");

        let unnamed = PendingImageMeta::DroppedBytes {
            name: None,
            byte_len: 12,
            last_modified: None,
        };
        assert_eq!(unnamed.description(), "dropped bytes");
        let rows = unnamed.into_image_meta().file_rows();
        assert!(rows.contains(&("Size", "12 B (12 bytes)".to_string())));
        assert!(rows.contains(&("Source", "Dropped file".to_string())));
    }

    #[test]
    fn empty_state_has_nothing_to_save() {
        let state = ImageState::default();
        assert!(!state.has_image());
        assert!(!state.has_result());
    }
}
