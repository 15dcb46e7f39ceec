//! Main egui/eframe application state and UI orchestration.

use crate::config::AppConfig;
use crate::edges::EdgeSettings;
use crate::export;
use crate::image::{ImageMeta, ImageTexture, UploadedImage};
use crate::session::FilterSession;
use egui::{Context, Key};
use egui_file_dialog::{DialogState, FileDialog};
use std::path::{Path, PathBuf};

mod clipboard;
mod image_loader;
mod image_state;
mod ui;
mod ui_state;

use image_state::{
    ImageLoadRequest, ImageLoadResult, ImageState, PendingImageMeta, PendingImageTask,
};
use ui_state::{NativeDialog, UiState};

pub struct EdgeVisionApp {
    image: ImageState,
    ui: UiState,
    settings: EdgeSettings,
    config: AppConfig,
    active_dialog: Option<NativeDialog>,
    last_image_dir: Option<PathBuf>,
    last_export_dir: Option<PathBuf>,
}

impl EdgeVisionApp {
    /// Create the app with the given config and optionally queue an initial image load.
    pub fn new(ctx: &Context, config: AppConfig, initial_path: Option<&Path>) -> Self {
        ui::theme::apply_theme(ctx, &config.theme);
        let mut app = Self {
            image: ImageState::default(),
            ui: UiState::default(),
            settings: config.default_settings(),
            config,
            active_dialog: None,
            last_image_dir: None,
            last_export_dir: None,
        };
        if let Some(p) = initial_path {
            app.start_loading_image_from_path(p.to_owned());
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.ui.last_status = Some(msg.into());
    }

    /// Restore configured parameters while keeping the selected algorithm.
    fn reset_parameters(&mut self) {
        self.settings = EdgeSettings {
            algorithm: self.settings.algorithm,
            ..self.config.default_settings()
        };
        self.set_status("Parameters reset.");
    }

    fn install_image(&mut self, ctx: &Context, uploaded: UploadedImage, meta: ImageMeta) {
        let meta = meta.with_kind(uploaded.kind());
        let name = meta.display_name();
        let [w, h] = uploaded.size();
        log::info!("Loaded {name} ({w}x{h}, {})", meta.format_label());
        self.image.original_texture = Some(ImageTexture::from_rgb(
            ctx,
            "original_image",
            uploaded.pixels(),
        ));
        self.image.edges_texture = None;
        self.image.session = Some(FilterSession::new(uploaded));
        self.image.meta = Some(meta);
        self.ui.last_timing = None;
        self.set_status(format!("Loaded {name} ({w} × {h} px)"));
    }

    /// Recompute the edge map when the settings moved since the last run.
    fn refresh_edges(&mut self, ctx: &Context) {
        let Some(session) = self.image.session.as_mut() else {
            return;
        };
        if !session.is_stale(&self.settings) {
            return;
        }
        let processed = session.process(&self.settings);
        let timing = format!(
            "{} ({:.1} ms)",
            processed.settings.describe(),
            processed.duration.as_secs_f64() * 1000.0
        );
        match self.image.edges_texture.as_mut() {
            Some(texture) => texture.replace_gray(&processed.edges),
            None => {
                self.image.edges_texture =
                    Some(ImageTexture::from_gray(ctx, "edge_map", &processed.edges));
            }
        }
        log::debug!("Recomputed {timing}");
        self.ui.last_timing = Some(timing);
    }

    pub(crate) fn start_save_result(&mut self) {
        let Some(session) = self.image.session.as_ref() else {
            self.set_status("Nothing to save: load an image first.");
            return;
        };
        match session.download() {
            Some(Ok(download)) => {
                let mut dialog = Self::make_save_dialog(
                    "Save edge map",
                    &download.file_name,
                    &["png"],
                    self.last_export_dir.as_deref(),
                );
                dialog.save_file();
                self.active_dialog = Some(NativeDialog::SaveResult { dialog, download });
            }
            Some(Err(err)) => {
                log::error!("{err:#}");
                self.set_status(format!("Save failed: {err:#}"));
            }
            None => self.set_status("Nothing to save yet."),
        }
    }

    fn save_result_to(&mut self, path: &Path, bytes: &[u8]) {
        match export::save_bytes(path, bytes) {
            Ok(()) => {
                log::info!("Saved edge map to {}", path.display());
                self.set_status(format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("{err:#}");
                self.set_status(format!("Save failed: {err:#}"));
            }
        }
        self.remember_export_dir_from_path(path);
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        // Global hotkeys (ignored while typing in text fields)
        if ctx.egui_wants_keyboard_input() {
            return;
        }
        // Ctrl/Cmd + B: toggle side panel
        if ctx.input(|i| i.key_pressed(Key::B) && i.modifiers.command) {
            self.ui.side_open = !self.ui.side_open;
        }
        // Ctrl/Cmd + I: show image info
        if self.image.has_image() && ctx.input(|i| i.key_pressed(Key::I) && i.modifiers.command) {
            self.ui.info_window_open = true;
        }
        if self.active_dialog.is_some() {
            return;
        }
        // Ctrl/Cmd + O: open image
        if ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command) {
            self.open_image_dialog();
        }
        // Ctrl/Cmd + V: paste image from clipboard
        if ctx.input(|i| i.key_pressed(Key::V) && i.modifiers.command) {
            self.paste_image_from_clipboard(ctx);
        }
        // Ctrl/Cmd + S: save result
        if self.image.has_result() && ctx.input(|i| i.key_pressed(Key::S) && i.modifiers.command)
        {
            self.start_save_result();
        }
        // Ctrl/Cmd + Shift + C: copy result
        if self.image.has_result()
            && ctx.input(|i| i.key_pressed(Key::C) && i.modifiers.command && i.modifiers.shift)
        {
            self.copy_result_to_clipboard();
        }
    }

    fn update_dialogs(&mut self, ctx: &Context) {
        let Some(dialog_state) = self.active_dialog.as_mut() else {
            return;
        };
        let outcome = match dialog_state {
            NativeDialog::Open(dialog) | NativeDialog::SaveResult { dialog, .. } => {
                poll_dialog(ctx, dialog)
            }
        };
        match outcome {
            DialogOutcome::Pending => return,
            DialogOutcome::Closed => {}
            DialogOutcome::Cancelled => {
                let msg = match self.active_dialog {
                    Some(NativeDialog::SaveResult { .. }) => "Save canceled.",
                    _ => "Open canceled.",
                };
                self.set_status(msg);
            }
            DialogOutcome::Picked(path) => match self.active_dialog.take() {
                Some(NativeDialog::Open(_)) => self.start_loading_image_from_path(path),
                Some(NativeDialog::SaveResult { download, .. }) => {
                    self.save_result_to(&path, &download.bytes);
                }
                None => {}
            },
        }
        self.active_dialog = None;
    }
}

enum DialogOutcome {
    Pending,
    Picked(PathBuf),
    Cancelled,
    Closed,
}

fn poll_dialog(ctx: &Context, dialog: &mut FileDialog) -> DialogOutcome {
    dialog.update(ctx);
    if let Some(path) = dialog.take_picked() {
        return DialogOutcome::Picked(path);
    }
    match dialog.state() {
        DialogState::Cancelled => DialogOutcome::Cancelled,
        DialogState::Closed => DialogOutcome::Closed,
        _ => DialogOutcome::Pending,
    }
}

impl eframe::App for EdgeVisionApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx().clone();
        self.poll_image_loader(&ctx);
        self.handle_shortcuts(&ctx);

        egui::Panel::top("top").show_inside(ui, |ui| self.ui_top(ui));
        let side_frame =
            egui::Frame::side_top_panel(ui.style()).fill(self.config.theme.side_panel());
        egui::Panel::left("controls")
            .resizable(true)
            .default_size(280.0)
            .frame(side_frame)
            .show_animated_inside(ui, self.ui.side_open, |ui| self.ui_side_controls(ui));
        self.refresh_edges(&ctx);
        egui::Panel::bottom("status").show_inside(ui, |ui| self.ui_status_bar(ui));
        egui::CentralPanel::default().show_inside(ui, |ui| self.ui_central(ui));
        self.ui_image_info_window(&ctx);
        self.update_dialogs(&ctx);
    }
}
