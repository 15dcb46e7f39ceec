use super::super::EdgeVisionApp;
use super::icons;

impl EdgeVisionApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let has_image = self.image.has_image();
            let has_result = self.image.has_result();
            self.ui_file_menu(ui, has_result);
            ui.separator();

            self.ui_side_toggle(ui);
            ui.separator();

            let info_resp = ui
                .add_enabled(
                    has_image,
                    egui::Button::new(format!("{} Image info", icons::ICON_INFO))
                        .shortcut_text("Ctrl+I"),
                )
                .on_hover_text("Show file & image details (Ctrl+I)");
            if info_resp.clicked() && has_image {
                self.ui.info_window_open = true;
            }
        });
    }

    fn ui_file_menu(&mut self, ui: &mut egui::Ui, has_result: bool) {
        ui.menu_button(format!("{} File", icons::ICON_MENU), |ui| {
            if ui
                .add(egui::Button::new("Open image…").shortcut_text("Ctrl+O"))
                .on_hover_text("Open a JPG, PNG or BMP image (Ctrl+O). You can also drag & drop.")
                .clicked()
            {
                self.open_image_dialog();
                ui.close();
            }

            if ui
                .add(egui::Button::new("Paste image").shortcut_text("Ctrl+V"))
                .on_hover_text("Paste image from clipboard (Ctrl+V)")
                .clicked()
            {
                self.paste_image_from_clipboard(ui.ctx());
                ui.close();
            }

            ui.separator();

            if ui
                .add_enabled(
                    has_result,
                    egui::Button::new(format!("{} Save result…", icons::ICON_DOWNLOAD))
                        .shortcut_text("Ctrl+S"),
                )
                .on_hover_text("Save the edge map as PNG (Ctrl+S)")
                .clicked()
            {
                self.start_save_result();
                ui.close();
            }

            if ui
                .add_enabled(
                    has_result,
                    egui::Button::new(format!("{} Copy result", icons::ICON_COPY))
                        .shortcut_text("Ctrl+Shift+C"),
                )
                .on_hover_text("Copy the edge map to the clipboard (Ctrl+Shift+C)")
                .clicked()
            {
                self.copy_result_to_clipboard();
                ui.close();
            }
        });
    }

    fn ui_side_toggle(&mut self, ui: &mut egui::Ui) {
        let side_label = if self.ui.side_open {
            "Hide controls"
        } else {
            "Show controls"
        };
        let button = egui::Button::new(format!("{} {side_label}", icons::ICON_SIDE_TOGGLE))
            .shortcut_text("Ctrl+B");
        if ui
            .add(button)
            .on_hover_text("Toggle the edge detection controls (Ctrl+B)")
            .clicked()
        {
            self.ui.side_open = !self.ui.side_open;
        }
    }
}
