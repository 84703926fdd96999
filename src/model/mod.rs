//! Application model - the complete state of the docking surface
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod frame;
pub mod layout;
pub mod node;

pub use frame::{FrameMetrics, GroupFrame, LayoutFrame, SplitterBar, TabFrame};
pub use layout::{LayoutModel, ParentSlot};
pub use node::{
    ContentFactory, DockNode, NodeId, NodeKind, Orientation, PanelContent, PanelNode, SplitNode,
    SplitSlot, TabGroupNode,
};

use crate::config::DockConfig;
use crate::drag::{DragSession, SplitterDrag};
use crate::geometry::Rect;

/// The complete application state
#[derive(Debug)]
pub struct AppModel {
    /// The dock tree
    pub layout: LayoutModel,
    /// Tunables (thresholds, margins, bar sizes)
    pub config: DockConfig,
    /// Window area available to the layout
    pub area: Rect,
    /// Rectangles for the current tree; refreshed by [`AppModel::relayout`]
    pub frame: LayoutFrame,
    /// Tab drag in progress
    pub drag: Option<DragSession>,
    /// Splitter drag in progress
    pub splitter_drag: Option<SplitterDrag>,
    /// Message from the most recent rejected operation, for the view to show
    pub last_error: Option<String>,
}

impl AppModel {
    pub fn new(layout: LayoutModel, config: DockConfig, area: Rect) -> Self {
        let frame = LayoutFrame::compute(&layout, area, &config.frame_metrics());
        Self {
            layout,
            config,
            area,
            frame,
            drag: None,
            splitter_drag: None,
            last_error: None,
        }
    }

    /// Window resized
    pub fn set_area(&mut self, area: Rect) {
        if self.area != area {
            self.area = area;
            self.frame = self.compute_frame();
        }
    }

    /// Recompute the frame if the tree changed since it was built.
    /// Returns true when a new frame was computed.
    pub fn relayout(&mut self) -> bool {
        if self.frame.version == self.layout.version() && self.frame.area == self.area {
            return false;
        }
        self.frame = self.compute_frame();
        true
    }

    fn compute_frame(&self) -> LayoutFrame {
        LayoutFrame::compute(&self.layout, self.area, &self.config.frame_metrics())
    }

    /// Whether any pointer drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some() || self.splitter_drag.is_some()
    }
}
