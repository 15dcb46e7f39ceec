use crate::config::ThemeColors;
use egui::{Context, Stroke, TextStyle, Theme, ThemePreference};

/// Force the dark theme and recolor it from the config palette.
pub fn apply_theme(ctx: &Context, colors: &ThemeColors) {
    ctx.set_theme(ThemePreference::Dark);
    let monospace = colors.monospace;
    ctx.style_mut_of(Theme::Dark, |style| {
        let visuals = &mut style.visuals;
        visuals.override_text_color = Some(colors.text());
        visuals.panel_fill = colors.background();
        visuals.window_fill = colors.side_panel();
        visuals.extreme_bg_color = colors.background();
        visuals.hyperlink_color = colors.accent();
        visuals.selection.bg_fill = colors.accent();
        visuals.selection.stroke = Stroke::new(1.0, colors.text());
        visuals.widgets.hovered.weak_bg_fill = colors.button_hover();
        visuals.widgets.hovered.bg_fill = colors.button_hover();
        visuals.widgets.active.weak_bg_fill = colors.accent();
        visuals.widgets.active.bg_fill = colors.accent();
        if monospace {
            style.override_text_style = Some(TextStyle::Monospace);
        }
    });
}
