//! egui panels, windows and dialogs drawn by `EdgeVisionApp`.

mod center;
mod common;
mod dialogs;
mod icons;
mod info;
mod side;
pub(super) mod theme;
mod top;
