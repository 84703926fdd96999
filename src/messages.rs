//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::drop_zone::DockZone;
use crate::geometry::Point;
use crate::model::NodeId;

/// Direct tree operations (menus, keyboard shortcuts, scripted layouts)
#[derive(Debug, Clone, PartialEq)]
pub enum DockMsg {
    /// Dock a panel as a tab of a group (`None` appends)
    DockAsTab {
        panel: NodeId,
        group: NodeId,
        index: Option<usize>,
    },
    /// Dock a panel against a node's edge or center
    SplitDock {
        panel: NodeId,
        target: NodeId,
        zone: DockZone,
    },
    /// Move a panel into another group
    MoveTab {
        panel: NodeId,
        group: NodeId,
        index: Option<usize>,
    },
    /// Reorder a tab within its group (`None` means last)
    ReorderTab {
        panel: NodeId,
        group: NodeId,
        index: Option<usize>,
    },
    /// Remove a panel from the layout
    RemovePanel(NodeId),
    /// Make a panel its group's active tab
    ActivatePanel(NodeId),
    SetSplitRatio { split: NodeId, ratio: f32 },
    SetPanelTitle { panel: NodeId, title: String },
    /// Sweep empty groups and single-child splits
    CleanupEmptyNodes,
}

/// Raw pointer input, already in window coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DragMsg {
    /// Pointer pressed; hit-tested against splitters and tabs
    PointerDown(Point),
    /// Start dragging a specific panel
    BeginPanelDrag { panel: NodeId, position: Point },
    /// Start dragging a specific splitter
    BeginSplitterDrag { split: NodeId, position: Point },
    /// Per-tick poll: pointer position and whether the primary button is held
    PointerMoved { position: Point, buttons_down: bool },
    /// Pointer released
    PointerUp(Point),
    /// Abandon the current drag (Escape)
    Cancel,
}

/// Application-level messages
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// Window resized
    Resize(u32, u32),
    /// Write a JSON dump of the tree (to the given path, or the dumps dir)
    DumpLayout(Option<PathBuf>),
    /// Forget the last reported error
    DismissError,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Tree operations
    Dock(DockMsg),
    /// Pointer drags (tabs and splitters)
    Drag(DragMsg),
    /// App messages (window, diagnostics)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Create a resize message
    pub fn resize(width: u32, height: u32) -> Self {
        Msg::App(AppMsg::Resize(width, height))
    }

    pub fn split_dock(panel: impl Into<NodeId>, target: impl Into<NodeId>, zone: DockZone) -> Self {
        Msg::Dock(DockMsg::SplitDock {
            panel: panel.into(),
            target: target.into(),
            zone,
        })
    }

    pub fn pointer_down(x: f32, y: f32) -> Self {
        Msg::Drag(DragMsg::PointerDown(Point::new(x, y)))
    }

    /// Pointer moved with the button held
    pub fn pointer_moved(x: f32, y: f32) -> Self {
        Msg::Drag(DragMsg::PointerMoved {
            position: Point::new(x, y),
            buttons_down: true,
        })
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Msg::Drag(DragMsg::PointerUp(Point::new(x, y)))
    }
}
