//! Side panel: algorithm choice and per-algorithm parameters.

use super::super::EdgeVisionApp;
use super::common::{accent_heading, accent_subheading, kernel_size_combo};
use super::icons;
use crate::edges::{EdgeAlgorithm, KernelSize, SIGMA_MAX, SobelDirection};
use egui::RichText;

impl EdgeVisionApp {
    pub(crate) fn ui_side_controls(&mut self, ui: &mut egui::Ui) {
        let accent = self.config.theme.accent();
        egui::ScrollArea::vertical().show(ui, |ui| {
            accent_heading(ui, accent, "Edge Detection Controls");
            ui.add_space(6.0);

            ui.label("Select Algorithm");
            for algorithm in EdgeAlgorithm::ALL {
                ui.radio_value(&mut self.settings.algorithm, algorithm, algorithm.label());
            }
            ui.separator();

            let title = format!("{} Parameters", self.settings.algorithm.label());
            accent_subheading(ui, accent, &title);
            ui.spacing_mut().slider_width = 150.0;
            match self.settings.algorithm {
                EdgeAlgorithm::Canny => self.ui_canny_controls(ui),
                EdgeAlgorithm::Sobel => self.ui_sobel_controls(ui),
                EdgeAlgorithm::Laplacian => {
                    kernel_size_combo(
                        ui,
                        "laplacian_kernel",
                        &mut self.settings.laplacian.kernel,
                        &KernelSize::LAPLACIAN_CHOICES,
                    );
                }
            }

            ui.add_space(8.0);
            if ui
                .button(format!("{} Reset parameters", icons::ICON_RESET))
                .on_hover_text("Restore the configured default parameters")
                .clicked()
            {
                self.reset_parameters();
            }

            if !self.image.has_image() {
                ui.add_space(6.0);
                ui.label(RichText::new("Load an image to see the result.").small().weak());
            }
        });
    }

    fn ui_canny_controls(&mut self, ui: &mut egui::Ui) {
        let canny = &mut self.settings.canny;
        ui.add(egui::Slider::new(&mut canny.lower, 0..=255).text("Lower Threshold"));
        ui.add(egui::Slider::new(&mut canny.upper, 0..=255).text("Upper Threshold"));
        if canny.lower > canny.upper {
            ui.label(
                RichText::new("Lower exceeds upper; the thresholds are swapped.")
                    .small()
                    .weak(),
            );
        }
        kernel_size_combo(
            ui,
            "canny_kernel",
            &mut canny.kernel,
            &KernelSize::SMOOTHING_CHOICES,
        );
        ui.add(
            egui::Slider::new(&mut canny.sigma, 0.0..=SIGMA_MAX)
                .step_by(0.1)
                .fixed_decimals(1)
                .text("Gaussian Sigma"),
        )
        .on_hover_text("0 derives sigma from the kernel size");
    }

    fn ui_sobel_controls(&mut self, ui: &mut egui::Ui) {
        let sobel = &mut self.settings.sobel;
        kernel_size_combo(
            ui,
            "sobel_kernel",
            &mut sobel.kernel,
            &KernelSize::SMOOTHING_CHOICES,
        );
        ui.label("Gradient Direction");
        ui.horizontal(|ui| {
            for direction in SobelDirection::ALL {
                ui.radio_value(&mut sobel.direction, direction, direction.label())
                    .on_hover_text(match direction {
                        SobelDirection::X => "First derivative along x",
                        SobelDirection::Y => "First derivative along y",
                        SobelDirection::Both => "Mixed derivative (dx = 1, dy = 1)",
                    });
            }
        });
    }
}
