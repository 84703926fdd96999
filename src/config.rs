//! Docking configuration persistence
//!
//! Stores tunables in `~/.config/dockable/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drop_zone::{ZoneMetrics, MARGIN_FRACTION, MIN_MARGIN};
use crate::model::frame::{FrameMetrics, SPLITTER_WIDTH, TAB_STRIP_HEIGHT, TAB_WIDTH};
use crate::model::node::DEFAULT_MIN_PANE_SIZE;

/// Pointer travel (px) before a pressed tab turns into a drag
pub const DEFAULT_DRAG_THRESHOLD: f32 = 4.0;

/// Docking configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    /// Distance the pointer must travel before a drag starts
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,

    /// Smallest edge-zone margin in pixels
    #[serde(default = "default_min_margin")]
    pub min_margin: f32,

    /// Edge-zone margin as a fraction of the target's smaller side
    #[serde(default = "default_margin_fraction")]
    pub margin_fraction: f32,

    #[serde(default = "default_tab_strip_height")]
    pub tab_strip_height: f32,

    #[serde(default = "default_tab_width")]
    pub tab_width: f32,

    #[serde(default = "default_splitter_width")]
    pub splitter_width: f32,

    /// Floor for either side of a split while dragging its splitter
    #[serde(default = "default_min_pane_size")]
    pub min_pane_size: f32,
}

fn default_drag_threshold() -> f32 {
    DEFAULT_DRAG_THRESHOLD
}

fn default_min_margin() -> f32 {
    MIN_MARGIN
}

fn default_margin_fraction() -> f32 {
    MARGIN_FRACTION
}

fn default_tab_strip_height() -> f32 {
    TAB_STRIP_HEIGHT
}

fn default_tab_width() -> f32 {
    TAB_WIDTH
}

fn default_splitter_width() -> f32 {
    SPLITTER_WIDTH
}

fn default_min_pane_size() -> f32 {
    DEFAULT_MIN_PANE_SIZE
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            drag_threshold: default_drag_threshold(),
            min_margin: default_min_margin(),
            margin_fraction: default_margin_fraction(),
            tab_strip_height: default_tab_strip_height(),
            tab_width: default_tab_width(),
            splitter_width: default_splitter_width(),
            min_pane_size: default_min_pane_size(),
        }
    }
}

impl DockConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))?;
        Ok(config.sanitized())
    }

    /// Save config to the default location
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Replace negative or non-finite values with their defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: &mut f32, default: f32| {
            if !value.is_finite() || *value < 0.0 {
                tracing::warn!("Ignoring invalid config value {}, using {}", value, default);
                *value = default;
            }
        };
        fix(&mut self.drag_threshold, defaults.drag_threshold);
        fix(&mut self.min_margin, defaults.min_margin);
        fix(&mut self.margin_fraction, defaults.margin_fraction);
        fix(&mut self.tab_strip_height, defaults.tab_strip_height);
        fix(&mut self.tab_width, defaults.tab_width);
        fix(&mut self.splitter_width, defaults.splitter_width);
        fix(&mut self.min_pane_size, defaults.min_pane_size);
        self
    }

    pub fn frame_metrics(&self) -> FrameMetrics {
        FrameMetrics {
            tab_strip_height: self.tab_strip_height,
            tab_width: self.tab_width,
            splitter_width: self.splitter_width,
        }
    }

    pub fn zone_metrics(&self) -> ZoneMetrics {
        ZoneMetrics {
            margin_fraction: self.margin_fraction,
            min_margin: self.min_margin,
        }
    }
}
