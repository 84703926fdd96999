//! Command-line argument parsing for the demo binary
//!
//! Supports:
//! - Choosing the initial panels
//! - Scripted split-docks and pointer drags applied at startup
//! - Writing a JSON dump of the resulting tree

use clap::Parser;
use std::path::PathBuf;

use crate::drop_zone::DockZone;
use crate::geometry::{Point, Rect};

/// Build a dock layout, replay scripted operations, and print the tree
#[derive(Parser, Debug)]
#[command(name = "dockable", version, about = "Dockable panel layout demo")]
pub struct CliArgs {
    /// Panel ids to place in the initial tab group
    #[arg(value_name = "PANELS", default_values = ["explorer", "editor", "terminal"])]
    pub panels: Vec<String>,

    /// Window size as WIDTHxHEIGHT
    #[arg(long, value_name = "WxH", default_value = "1280x800", value_parser = parse_size)]
    pub size: (u32, u32),

    /// Split-dock PANEL against the current root, e.g. `terminal:bottom`
    #[arg(long = "split", value_name = "PANEL:ZONE", value_parser = parse_split)]
    pub splits: Vec<SplitRequest>,

    /// Drag from one point to another, e.g. `130,10:1200,400`
    #[arg(long = "drag", value_name = "X,Y:X,Y", value_parser = parse_drag)]
    pub drags: Vec<ScriptedDrag>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a JSON dump of the final tree (to PATH, or the dumps directory)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub dump: Option<Option<PathBuf>>,
}

/// `--split PANEL:ZONE`
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRequest {
    pub panel: String,
    pub zone: DockZone,
}

/// `--drag X,Y:X,Y`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedDrag {
    pub from: Point,
    pub to: Point,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub panels: Vec<String>,
    pub area: Rect,
    pub splits: Vec<SplitRequest>,
    pub drags: Vec<ScriptedDrag>,
    pub config_path: Option<PathBuf>,
    /// `Some(None)` writes to the dumps directory
    pub dump: Option<Option<PathBuf>>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mut seen = std::collections::HashSet::new();
        for panel in &self.panels {
            if !seen.insert(panel.as_str()) {
                return Err(format!("Panel '{}' listed more than once", panel));
            }
        }
        if let Some(split) = self.splits.iter().find(|s| !seen.contains(s.panel.as_str())) {
            return Err(format!("Cannot split unknown panel '{}'", split.panel));
        }

        let (width, height) = self.size;
        Ok(StartupConfig {
            panels: self.panels,
            area: Rect::new(0.0, 0.0, width as f32, height as f32),
            splits: self.splits,
            drags: self.drags,
            config_path: self.config,
            dump: self.dump,
        })
    }
}

pub fn parse_zone(s: &str) -> Result<DockZone, String> {
    match s.to_ascii_lowercase().as_str() {
        "left" => Ok(DockZone::Left),
        "right" => Ok(DockZone::Right),
        "top" => Ok(DockZone::Top),
        "bottom" => Ok(DockZone::Bottom),
        "center" => Ok(DockZone::Center),
        other => Err(format!(
            "Unknown zone '{}' (expected left, right, top, bottom or center)",
            other
        )),
    }
}

fn parse_split(s: &str) -> Result<SplitRequest, String> {
    let (panel, zone) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("Expected PANEL:ZONE, got '{}'", s))?;
    if panel.is_empty() {
        return Err(format!("Missing panel id in '{}'", s));
    }
    Ok(SplitRequest {
        panel: panel.to_string(),
        zone: parse_zone(zone)?,
    })
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("Expected X,Y, got '{}'", s))?;
    let x = x
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("Bad x coordinate '{}': {}", x, e))?;
    let y = y
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("Bad y coordinate '{}': {}", y, e))?;
    Ok(Point::new(x, y))
}

fn parse_drag(s: &str) -> Result<ScriptedDrag, String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("Expected X,Y:X,Y, got '{}'", s))?;
    Ok(ScriptedDrag {
        from: parse_point(from)?,
        to: parse_point(to)?,
    })
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Expected WIDTHxHEIGHT, got '{}'", s))?;
    let w = w.parse::<u32>().map_err(|e| format!("Bad width '{}': {}", w, e))?;
    let h = h.parse::<u32>().map_err(|e| format!("Bad height '{}': {}", h, e))?;
    if w == 0 || h == 0 {
        return Err("Window size must be non-zero".to_string());
    }
    Ok((w, h))
}
