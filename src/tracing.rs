//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging layout
//! operations and drag state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=tree=debug,message=debug` - scoped filtering
//! - `RUST_LOG=dockable::update::drag=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/dockable/logs/dockable.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use std::collections::BTreeMap;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_NAME;
use crate::model::{DockNode, LayoutModel};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/dockable/logs/dockable.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the tree shape for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot {
    pub version: u64,
    pub root: Option<String>,
    pub split_count: usize,
    /// Group id -> (panel ids in order, active panel)
    pub groups: BTreeMap<String, (Vec<String>, Option<String>)>,
}

impl TreeSnapshot {
    pub fn from_layout(layout: &LayoutModel) -> Self {
        let mut groups = BTreeMap::new();
        let mut split_count = 0;
        for node in layout.pre_order() {
            match node {
                DockNode::TabGroup(group) => {
                    groups.insert(
                        group.id().to_string(),
                        (
                            group.panels().iter().map(ToString::to_string).collect(),
                            group.active_panel_id().map(ToString::to_string),
                        ),
                    );
                }
                DockNode::Split(_) => split_count += 1,
                DockNode::Panel(_) => {}
            }
        }

        Self {
            version: layout.version(),
            root: layout.root_id().map(ToString::to_string),
            split_count,
            groups,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &TreeSnapshot) -> Option<String> {
        if self.version == other.version {
            return None;
        }

        let mut changes = vec![format!("version {} → {}", self.version, other.version)];
        if self.root != other.root {
            changes.push(format!(
                "root {} → {}",
                self.root.as_deref().unwrap_or("-"),
                other.root.as_deref().unwrap_or("-")
            ));
        }
        if self.split_count != other.split_count {
            changes.push(format!(
                "splits {} → {}",
                self.split_count, other.split_count
            ));
        }

        for (id, (panels, active)) in &other.groups {
            match self.groups.get(id) {
                None => changes.push(format!("+group {} [{}]", id, panels.join(","))),
                Some((before, before_active)) => {
                    if before != panels {
                        changes.push(format!(
                            "group {}: [{}] → [{}]",
                            id,
                            before.join(","),
                            panels.join(",")
                        ));
                    }
                    if before_active != active {
                        changes.push(format!(
                            "group {} active → {}",
                            id,
                            active.as_deref().unwrap_or("-")
                        ));
                    }
                }
            }
        }
        for id in self.groups.keys() {
            if !other.groups.contains_key(id) {
                changes.push(format!("-group {}", id));
            }
        }

        Some(changes.join("; "))
    }
}
