use super::super::EdgeVisionApp;
use crate::image::{InfoRow, dimension_rows};
use egui::{Color32, RichText};

impl EdgeVisionApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Algorithm: {}", self.settings.algorithm.label()))
                    .small()
                    .color(Color32::from_gray(180)),
            );
            if let Some(timing) = &self.ui.last_timing {
                ui.separator();
                ui.label(
                    RichText::new(timing.as_str())
                        .small()
                        .color(Color32::from_gray(180)),
                );
            }
            if let Some(msg) = &self.ui.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }

    pub(crate) fn ui_image_info_window(&mut self, ctx: &egui::Context) {
        if !self.ui.info_window_open {
            return;
        }

        egui::Window::new("Image info")
            .open(&mut self.ui.info_window_open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                let Some(session) = self.image.session.as_ref() else {
                    ui.label("Load an image to inspect its metadata.");
                    return;
                };
                ui.heading("File");
                match self.image.meta.as_ref() {
                    Some(meta) => info_grid(ui, "file_info", &meta.file_rows()),
                    None => {
                        ui.label("No captured file metadata for this image.");
                    }
                }

                ui.add_space(6.0);
                ui.heading("Image");
                info_grid(ui, "image_info", &dimension_rows(session.original().size()));

                if let Some(processed) = session.processed() {
                    ui.add_space(6.0);
                    ui.heading("Result");
                    ui.label(processed.settings.describe());
                    ui.label(format!(
                        "Computed in {:.1} ms",
                        processed.duration.as_secs_f64() * 1000.0
                    ));
                }
            });
    }
}

fn info_grid(ui: &mut egui::Ui, id: &str, rows: &[InfoRow]) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            for (label, value) in rows {
                ui.label(RichText::new(*label).strong());
                ui.label(value.as_str());
                ui.end_row();
            }
        });
}
