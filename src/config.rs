use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use egui::Color32;
use serde::Deserialize;

use crate::edges::EdgeSettings;

const CONFIG_FILE_NAME: &str = "edgevision.toml";

const fn rgb(color: [u8; 3]) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

/// Dark palette applied to the egui visuals at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub background: [u8; 3],
    pub text: [u8; 3],
    pub accent: [u8; 3],
    pub side_panel: [u8; 3],
    pub button_hover: [u8; 3],
    pub monospace: bool,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: [0x0f, 0x11, 0x17],
            text: [0xf5, 0xf6, 0xfa],
            accent: [0x1a, 0xbc, 0x9c],
            side_panel: [0x23, 0x26, 0x2d],
            button_hover: [0x17, 0xa5, 0x89],
            monospace: true,
        }
    }
}

impl ThemeColors {
    pub const fn background(&self) -> Color32 {
        rgb(self.background)
    }

    pub const fn text(&self) -> Color32 {
        rgb(self.text)
    }

    pub const fn accent(&self) -> Color32 {
        rgb(self.accent)
    }

    pub const fn side_panel(&self) -> Color32 {
        rgb(self.side_panel)
    }

    pub const fn button_hover(&self) -> Color32 {
        rgb(self.button_hover)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub image_limits: ImageLimits,
    pub theme: ThemeColors,
    pub defaults: EdgeSettings,
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match Self::parse(&contents) {
                    Ok(cfg) => {
                        log::info!("Loaded config from {}", path.display());
                        return cfg;
                    }
                    Err(err) => {
                        log::warn!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        log::debug!("No config file found, using defaults");
        Self::default()
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(contents)
    }

    pub fn effective_image_limits(&self) -> ImageLimits {
        self.image_limits.sanitized()
    }

    /// Filter settings used at startup and by "Reset parameters".
    pub fn default_settings(&self) -> EdgeSettings {
        self.defaults.sanitized()
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "EdgeVision", "EdgeVision") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(
                base_dirs
                    .config_dir()
                    .join("edgevision")
                    .join(CONFIG_FILE_NAME),
            );
        }

        paths
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub image_dim: u32,
    pub total_pixels: u64,
    pub alloc_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            image_dim: 12_000,
            total_pixels: 80_000_000,       // ~80 MP
            alloc_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl ImageLimits {
    pub fn sanitized(&self) -> Self {
        let dim = self.image_dim.clamp(64, 100_000);
        let pixels = self.total_pixels.clamp(1_000_000, 5_000_000_000); // 1 MP .. 5 GP
        let alloc = self
            .alloc_bytes
            .clamp(8 * 1024 * 1024, 8 * 1024 * 1024 * 1024); // 8 MiB .. 8 GiB
        Self {
            image_dim: dim,
            total_pixels: pixels,
            alloc_bytes: alloc,
        }
    }
}
