use super::{
    EdgeVisionApp, ImageLoadRequest, ImageLoadResult, PendingImageMeta, PendingImageTask,
};
use crate::image::{decode_image_from_bytes, decode_image_from_path};
use egui::Context;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::SystemTime;

impl EdgeVisionApp {
    pub(crate) fn start_loading_image_from_path(&mut self, path: PathBuf) {
        self.remember_image_dir_from_path(&path);
        let meta = PendingImageMeta::Path { path: path.clone() };
        self.start_image_load(ImageLoadRequest::Path(path), meta);
    }

    pub(crate) fn start_loading_image_from_bytes(
        &mut self,
        name: Option<String>,
        bytes: Vec<u8>,
        last_modified: Option<SystemTime>,
    ) {
        let meta = PendingImageMeta::DroppedBytes {
            name: name.clone(),
            byte_len: bytes.len(),
            last_modified,
        };
        self.start_image_load(ImageLoadRequest::Bytes { name, bytes }, meta);
    }

    fn start_image_load(&mut self, request: ImageLoadRequest, meta: PendingImageMeta) {
        let description = meta.description();
        let cfg = self.config.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match request {
                ImageLoadRequest::Path(path) => decode_image_from_path(&cfg, &path),
                ImageLoadRequest::Bytes { name, bytes } => {
                    decode_image_from_bytes(&cfg, name.as_deref(), &bytes)
                }
            };
            let msg = match result {
                Ok(uploaded) => ImageLoadResult::Success(uploaded),
                Err(err) => ImageLoadResult::Error(err.to_string()),
            };
            let _ = tx.send(msg);
        });
        // A newer request supersedes one still in flight; its result is dropped.
        self.image.pending_task = Some(PendingImageTask { rx, meta });
        log::info!("Loading {description}");
        self.set_status(format!("Loading {description}…"));
    }

    pub(crate) fn poll_image_loader(&mut self, ctx: &Context) {
        let Some(task) = self.image.pending_task.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(ImageLoadResult::Success(uploaded)) => {
                let meta = task.meta.into_image_meta();
                self.install_image(ctx, uploaded, meta);
            }
            Ok(ImageLoadResult::Error(err)) => {
                let label = task.meta.description();
                log::warn!("Failed to load {label}: {err}");
                self.set_status(format!("Failed to load {label}: {err}"));
            }
            Err(TryRecvError::Empty) => {
                self.image.pending_task = Some(task);
                ctx.request_repaint();
            }
            Err(TryRecvError::Disconnected) => {
                let label = task.meta.description();
                log::error!("Image worker for {label} disconnected");
                self.set_status(format!("Loading {label} failed: worker disconnected."));
            }
        }
    }

    pub(crate) fn remember_image_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.last_image_dir = Some(dir);
    }

    pub(crate) fn remember_export_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.last_export_dir = Some(dir);
    }
}
