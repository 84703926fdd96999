//! Debug layout dump for development diagnostics
//!
//! Serializes a snapshot of the dock tree to JSON, or to an indented text
//! outline, for easier debugging. Dumps are write-only; nothing reads them back.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::geometry::Rect;
use crate::model::{AppModel, DockNode, LayoutModel, NodeId, Orientation, PanelNode};

#[derive(Serialize)]
pub struct LayoutDump {
    pub timestamp: String,
    pub version: u64,
    pub area: Rect,
    pub root: Option<NodeDump>,
    pub undocked: Vec<PanelDump>,
    pub groups: Vec<GroupRectDump>,
    pub last_error: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDump {
    Panel(PanelDump),
    TabGroup {
        id: String,
        active: Option<String>,
        panels: Vec<PanelDump>,
    },
    Split {
        id: String,
        orientation: Orientation,
        ratio: f32,
        first: Option<Box<NodeDump>>,
        second: Option<Box<NodeDump>>,
    },
}

#[derive(Serialize)]
pub struct PanelDump {
    pub id: String,
    pub title: String,
    pub can_close: bool,
    pub can_float: bool,
    pub is_pinned: bool,
    pub content_created: bool,
}

#[derive(Serialize)]
pub struct GroupRectDump {
    pub id: String,
    pub bounds: Rect,
    pub tab_count: usize,
}

impl LayoutDump {
    pub fn from_model(model: &AppModel) -> Self {
        Self {
            timestamp: chrono_timestamp(),
            version: model.layout.version(),
            area: model.area,
            root: model
                .layout
                .root_id()
                .and_then(|root| node_dump(&model.layout, root)),
            undocked: model
                .layout
                .undocked_panels()
                .into_iter()
                .map(panel_dump)
                .collect(),
            groups: model
                .frame
                .groups
                .iter()
                .map(|group| GroupRectDump {
                    id: group.group.to_string(),
                    bounds: group.bounds,
                    tab_count: group.tabs.len(),
                })
                .collect(),
            last_error: model.last_error.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    /// Write to `path`, or to a timestamped file in the dumps dir
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, String> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => crate::config_paths::ensure_dumps_dir()?
                .join(format!("{}-layout-dump.json", self.timestamp)),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        std::fs::write(&path, self.to_json())
            .map_err(|e| format!("Failed to write dump to {}: {}", path.display(), e))?;

        tracing::info!("Wrote layout dump to {}", path.display());
        Ok(path)
    }
}

fn node_dump(layout: &LayoutModel, id: &NodeId) -> Option<NodeDump> {
    let dump = match layout.node(id)? {
        DockNode::Panel(panel) => NodeDump::Panel(panel_dump(panel)),
        DockNode::TabGroup(group) => NodeDump::TabGroup {
            id: id.to_string(),
            active: group.active_panel_id().map(ToString::to_string),
            panels: group
                .panels()
                .iter()
                .filter_map(|panel| layout.panel(panel))
                .map(panel_dump)
                .collect(),
        },
        DockNode::Split(split) => NodeDump::Split {
            id: id.to_string(),
            orientation: split.orientation,
            ratio: split.ratio(),
            first: split
                .first()
                .and_then(|child| node_dump(layout, child))
                .map(Box::new),
            second: split
                .second()
                .and_then(|child| node_dump(layout, child))
                .map(Box::new),
        },
    };
    Some(dump)
}

fn panel_dump(panel: &PanelNode) -> PanelDump {
    PanelDump {
        id: panel.id().to_string(),
        title: panel.title.clone(),
        can_close: panel.can_close,
        can_float: panel.can_float,
        is_pinned: panel.is_pinned,
        content_created: panel.content.is_created(),
    }
}

/// Indented text rendering of the tree, one node per line.
///
/// ```text
/// split horizontal 0.70
///   group [a*]
///   group [b*, c]
/// ```
///
/// The active tab of each group is marked with `*`.
pub fn outline(layout: &LayoutModel) -> String {
    let mut out = String::new();
    match layout.root_id() {
        Some(root) => outline_node(layout, root, 0, &mut out),
        None => out.push_str("(empty)\n"),
    }
    out
}

fn outline_node(layout: &LayoutModel, id: &NodeId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match layout.node(id) {
        None => {
            let _ = writeln!(out, "{}(missing {})", indent, id);
        }
        Some(DockNode::Panel(panel)) => {
            let _ = writeln!(out, "{}panel {}", indent, panel.id());
        }
        Some(DockNode::TabGroup(group)) => {
            let tabs: Vec<String> = group
                .panels()
                .iter()
                .map(|panel| {
                    if group.active_panel_id() == Some(panel) {
                        format!("{}*", panel)
                    } else {
                        panel.to_string()
                    }
                })
                .collect();
            let _ = writeln!(out, "{}group [{}]", indent, tabs.join(", "));
        }
        Some(DockNode::Split(split)) => {
            let orientation = match split.orientation {
                Orientation::Horizontal => "horizontal",
                Orientation::Vertical => "vertical",
            };
            let _ = writeln!(out, "{}split {} {:.2}", indent, orientation, split.ratio());
            for child in [split.first(), split.second()].into_iter().flatten() {
                outline_node(layout, child, depth + 1, out);
            }
        }
    }
}

fn chrono_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();

    let days_since_epoch = secs / 86400;
    let secs_today = secs % 86400;

    let hours = secs_today / 3600;
    let minutes = (secs_today % 3600) / 60;
    let seconds = secs_today % 60;

    let (year, month, day) = days_to_ymd(days_since_epoch as i64);

    format!(
        "{:04}-{:02}-{:02}-{:02}{:02}{:02}",
        year, month, day, hours, minutes, seconds
    )
}

/// Civil date from days since 1970-01-01
fn days_to_ymd(days: i64) -> (i32, u32, u32) {
    let days = days + 719468;
    let era = if days >= 0 { days } else { days - 146096 } / 146097;
    let doe = (days - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if m <= 2 { y + 1 } else { y };
    (year as i32, m, d)
}
