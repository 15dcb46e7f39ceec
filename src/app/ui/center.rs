use super::super::EdgeVisionApp;
use super::common::{accent_heading, accent_subheading, fit_to_width};
use super::icons;
use crate::image::ImageTexture;
use egui::{Color32, RichText};

const WELCOME_TEXT: &str = "An interactive visual lab for exploring classic edge detection \
algorithms. Load an image, adjust parameters in real time, and see how Sobel, Laplacian, \
and Canny reveal image edges differently.";

const CREDITS: &str = "Developed with ❤ by AKEEL | GCU LAHORE";

impl EdgeVisionApp {
    pub(crate) fn ui_central(&mut self, ui: &mut egui::Ui) {
        self.handle_dropped_files(ui);
        let accent = self.config.theme.accent();

        egui::ScrollArea::vertical().show(ui, |ui| {
            accent_heading(
                ui,
                accent,
                "EDGE VISION — Interactive Edge Detection Visualizer",
            );
            accent_subheading(ui, accent, "Welcome to Edge Vision");
            ui.label(WELCOME_TEXT);
            ui.add_space(10.0);

            let Some(original) = self.image.original_texture.as_ref() else {
                self.ui_get_started(ui, accent);
                return;
            };

            let result_title = format!(
                "{} Edge Detection Result",
                self.settings.algorithm.label()
            );
            let edges = self.image.edges_texture.as_ref();
            ui.columns(2, |cols| {
                accent_subheading(&mut cols[0], accent, "Original Image");
                show_scaled(&mut cols[0], original);
                accent_subheading(&mut cols[1], accent, &result_title);
                match edges {
                    Some(texture) => show_scaled(&mut cols[1], texture),
                    None => {
                        cols[1].spinner();
                    }
                }
            });

            ui.add_space(10.0);
            ui.separator();
            accent_subheading(ui, accent, "Download Processed Image");
            ui.horizontal(|ui| {
                let has_result = self.image.has_result();
                if ui
                    .add_enabled(
                        has_result,
                        egui::Button::new(format!(
                            "{} Download Output Image",
                            icons::ICON_DOWNLOAD
                        )),
                    )
                    .on_hover_text("Save the edge map as PNG (Ctrl+S)")
                    .clicked()
                {
                    self.start_save_result();
                }
                if ui
                    .add_enabled(
                        has_result,
                        egui::Button::new(format!("{} Copy to clipboard", icons::ICON_COPY)),
                    )
                    .on_hover_text("Copy the edge map (Ctrl+Shift+C)")
                    .clicked()
                {
                    self.copy_result_to_clipboard();
                }
            });
            ui.separator();
            ui_credits(ui);
        });
    }

    fn ui_get_started(&self, ui: &mut egui::Ui, accent: Color32) {
        let loading = self.image.pending_task.is_some();
        egui::Frame::group(ui.style())
            .fill(accent.gamma_multiply(0.15))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                if loading {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading image…");
                    });
                } else {
                    ui.label(RichText::new("Upload an image to get started!").strong());
                    ui.label(
                        RichText::new(
                            "Open a JPG, PNG or BMP file (Ctrl+O), paste one (Ctrl+V), \
                             or drop it onto this window.",
                        )
                        .small(),
                    );
                }
            });
    }

    fn handle_dropped_files(&mut self, ui: &egui::Ui) {
        let dropped_files = ui.input(|i| i.raw.dropped_files.clone());
        if dropped_files.is_empty() {
            return;
        }
        log::debug!("Received {} dropped file(s)", dropped_files.len());
        for f in &dropped_files {
            if let Some(path) = &f.path {
                self.start_loading_image_from_path(path.clone());
                return;
            }
            if let Some(bytes) = &f.bytes {
                self.start_loading_image_from_bytes(
                    (!f.name.is_empty()).then(|| f.name.clone()),
                    bytes.to_vec(),
                    f.last_modified,
                );
                return;
            }
        }
        log::warn!("Drop contained no readable path or bytes");
        self.set_status("Drop failed: no readable bytes/path");
    }
}

fn ui_credits(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(CREDITS).small());
    });
}

fn show_scaled(ui: &mut egui::Ui, texture: &ImageTexture) {
    let display_size = fit_to_width(texture.size, ui.available_width());
    ui.add(egui::Image::new((texture.texture.id(), display_size)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_text(ctx: &egui::Context, mut add: impl FnMut(&mut egui::Ui)) -> Vec<String> {
        let mut output = ctx.run_ui(egui::RawInput::default(), &mut add);
        if output.shapes.is_empty() {
            output = ctx.run_ui(egui::RawInput::default(), &mut add);
        }
        output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                egui::Shape::Text(text) => Some(text.galley.text().to_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn credits_line_is_rendered() {
        let ctx = egui::Context::default();
        let texts = rendered_text(&ctx, ui_credits);
        assert!(texts.iter().any(|t| t == CREDITS), "{texts:?}");
    }
}
