use crate::edges::KernelSize;
use crate::util::safe_usize_to_f32;
use egui::{Color32, RichText, Vec2};

pub fn accent_heading(ui: &mut egui::Ui, accent: Color32, text: &str) -> egui::Response {
    ui.label(RichText::new(text).heading().strong().color(accent))
}

pub fn accent_subheading(ui: &mut egui::Ui, accent: Color32, text: &str) -> egui::Response {
    ui.label(RichText::new(text).strong().size(16.0).color(accent))
}

/// Display size for an image scaled down to `max_width`, never enlarged.
pub fn fit_to_width(size: [usize; 2], max_width: f32) -> Vec2 {
    let base = Vec2::new(safe_usize_to_f32(size[0]), safe_usize_to_f32(size[1]));
    if base.x <= 0.0 || max_width <= 0.0 || base.x <= max_width {
        return base;
    }
    base * (max_width / base.x)
}

/// Kernel size picker restricted to `choices`.
pub fn kernel_size_combo(
    ui: &mut egui::Ui,
    id_salt: &str,
    value: &mut KernelSize,
    choices: &[KernelSize],
) {
    ui.horizontal(|ui| {
        ui.label("Kernel Size (odd only)");
        egui::ComboBox::from_id_salt(id_salt)
            .selected_text(value.label())
            .show_ui(ui, |ui| {
                for &choice in choices {
                    ui.selectable_value(value, choice, choice.label());
                }
            });
    });
}
