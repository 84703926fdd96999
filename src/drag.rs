//! In-progress pointer drags
//!
//! Two kinds of drag exist and at most one of them is active at a time:
//! dragging a tab ([`DragSession`]) and dragging a splitter bar
//! ([`SplitterDrag`]). Both are plain values owned by the app model; they never
//! touch the layout tree themselves. The update layer reads them to decide what
//! to commit when the pointer is released.

use crate::drop_zone::DropTarget;
use crate::geometry::{Point, Rect};
use crate::model::{NodeId, Orientation};

/// A tab being dragged
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Panel under the pointer when the drag began
    pub panel: NodeId,
    /// Group the panel was dragged out of (None for an undocked panel)
    pub source_group: Option<NodeId>,
    /// Index of the panel's tab in the source group when the drag began
    pub source_index: Option<usize>,
    /// Screen rect of the tab header that was grabbed
    pub source_handle: Option<Rect>,
    pub start: Point,
    pub current: Point,
    /// Set once the pointer has travelled past the drag threshold; never cleared
    pub threshold_exceeded: bool,
    /// Drop target under the pointer as of the last move
    pub target: Option<DropTarget>,
}

impl DragSession {
    pub fn new(panel: NodeId, source_group: Option<NodeId>, start: Point) -> Self {
        Self {
            panel,
            source_group,
            source_index: None,
            source_handle: None,
            start,
            current: start,
            threshold_exceeded: false,
            target: None,
        }
    }

    pub fn with_source_tab(mut self, index: usize, handle: Rect) -> Self {
        self.source_index = Some(index);
        self.source_handle = Some(handle);
        self
    }

    /// Record a pointer move. Returns true when this move crossed the threshold.
    pub fn move_to(&mut self, position: Point, threshold: f32) -> bool {
        self.current = position;
        if self.threshold_exceeded {
            return false;
        }
        if self.start.distance_to(position) >= threshold {
            self.threshold_exceeded = true;
            return true;
        }
        false
    }

    /// Whether releasing now would move anything
    pub fn is_dragging(&self) -> bool {
        self.threshold_exceeded
    }
}

/// A splitter bar being dragged.
///
/// The new ratio lives only in `preview_ratio` until release, when it is
/// written to the split in one step. Cancelling discards it.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitterDrag {
    pub split: NodeId,
    pub orientation: Orientation,
    /// Rect of the whole split when the drag began
    pub container: Rect,
    pub start: Point,
    pub original_ratio: f32,
    pub preview_ratio: f32,
    /// Pixel floors for the first and second side
    pub min_first_size: f32,
    pub min_second_size: f32,
}

impl SplitterDrag {
    pub fn new(
        split: NodeId,
        orientation: Orientation,
        container: Rect,
        start: Point,
        ratio: f32,
    ) -> Self {
        Self {
            split,
            orientation,
            container,
            start,
            original_ratio: ratio,
            preview_ratio: ratio,
            min_first_size: 0.0,
            min_second_size: 0.0,
        }
    }

    pub fn with_min_sizes(mut self, first: f32, second: f32) -> Self {
        self.min_first_size = first.max(0.0);
        self.min_second_size = second.max(0.0);
        self
    }

    /// Recompute the preview ratio for the pointer at `position`
    pub fn move_to(&mut self, position: Point) -> f32 {
        let (delta, extent) = match self.orientation {
            Orientation::Horizontal => (position.x - self.start.x, self.container.width),
            Orientation::Vertical => (position.y - self.start.y, self.container.height),
        };
        if extent <= 0.0 {
            return self.preview_ratio;
        }

        let ratio = self.original_ratio + delta / extent;
        let low = self.min_first_size / extent;
        let high = 1.0 - self.min_second_size / extent;
        self.preview_ratio = if low > high {
            // Both floors cannot fit; ignore them
            ratio.clamp(0.0, 1.0)
        } else {
            ratio.clamp(low, high)
        };
        self.preview_ratio
    }

    pub fn has_changed(&self) -> bool {
        self.preview_ratio != self.original_ratio
    }
}
