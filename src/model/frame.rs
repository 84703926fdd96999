//! Frame layout - screen rectangles for the current tree
//!
//! The view layer asks for a [`LayoutFrame`] after each structural change and
//! uses it both for drawing and for hit-testing (tab strips, splitter bars and
//! drop targets). Computing a frame never touches the tree.

use super::layout::LayoutModel;
use super::node::{DockNode, NodeId, Orientation};
use crate::geometry::{Point, Rect};

/// Width of splitter bars in pixels
pub const SPLITTER_WIDTH: f32 = 6.0;

/// Height of a tab strip in pixels
pub const TAB_STRIP_HEIGHT: f32 = 28.0;

/// Width of a single tab header in pixels
pub const TAB_WIDTH: f32 = 120.0;

/// Pixel metrics used when laying out a frame
#[derive(Debug, Clone, Copy)]
pub struct FrameMetrics {
    pub tab_strip_height: f32,
    pub tab_width: f32,
    pub splitter_width: f32,
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self {
            tab_strip_height: TAB_STRIP_HEIGHT,
            tab_width: TAB_WIDTH,
            splitter_width: SPLITTER_WIDTH,
        }
    }
}

/// A tab header inside a group's tab strip
#[derive(Debug, Clone)]
pub struct TabFrame {
    pub panel: NodeId,
    pub rect: Rect,
}

/// Screen placement of one tab group
#[derive(Debug, Clone)]
pub struct GroupFrame {
    pub group: NodeId,
    /// Whole group, tab strip included
    pub bounds: Rect,
    pub tab_strip: Rect,
    pub content: Rect,
    pub tabs: Vec<TabFrame>,
    /// Set when a bare panel root was wrapped for display; not a real group
    pub synthetic: bool,
}

impl GroupFrame {
    pub fn tab_rects(&self) -> Vec<Rect> {
        self.tabs.iter().map(|tab| tab.rect).collect()
    }

    /// Index of the tab under `point`
    pub fn tab_at_point(&self, point: Point) -> Option<usize> {
        self.tabs
            .iter()
            .position(|tab| tab.rect.contains_point(point))
    }
}

/// A draggable bar between the two children of a split
#[derive(Debug, Clone)]
pub struct SplitterBar {
    pub split: NodeId,
    pub orientation: Orientation,
    /// Hit-testing rectangle
    pub rect: Rect,
    /// Rectangle of the whole split, used to turn pointer motion into a ratio
    pub container: Rect,
}

/// Rectangles for every visible tab group and splitter
#[derive(Debug, Clone, Default)]
pub struct LayoutFrame {
    pub area: Rect,
    /// Layout version this frame was computed from
    pub version: u64,
    /// Tab groups in pre-order (the drop-target tie-break order)
    pub groups: Vec<GroupFrame>,
    pub splitters: Vec<SplitterBar>,
}

impl LayoutFrame {
    /// Lay out `layout` inside `area`
    pub fn compute(layout: &LayoutModel, area: Rect, metrics: &FrameMetrics) -> Self {
        let mut frame = LayoutFrame {
            area,
            version: layout.version(),
            ..Default::default()
        };
        if let Some(root) = layout.root_id() {
            frame.compute_node(layout, root, area, metrics);
        }
        frame
    }

    fn compute_node(
        &mut self,
        layout: &LayoutModel,
        id: &NodeId,
        rect: Rect,
        metrics: &FrameMetrics,
    ) {
        let Some(node) = layout.node(id) else {
            return;
        };
        match node {
            DockNode::TabGroup(group) => {
                self.push_group(id, group.panels(), rect, metrics, false);
            }
            DockNode::Panel(panel) => {
                // Degenerate root: show the panel as a one-tab group
                self.push_group(id, std::slice::from_ref(panel.id()), rect, metrics, true);
            }
            DockNode::Split(split) => {
                let (Some(first), Some(second)) = (split.first(), split.second()) else {
                    return;
                };
                let total = match split.orientation {
                    Orientation::Horizontal => rect.width,
                    Orientation::Vertical => rect.height,
                };
                let first_size = total * split.ratio();
                let second_size = total - first_size;
                let half_bar = metrics.splitter_width / 2.0;

                let (first_rect, second_rect, bar) = match split.orientation {
                    Orientation::Horizontal => (
                        Rect::new(rect.x, rect.y, first_size, rect.height),
                        Rect::new(rect.x + first_size, rect.y, second_size, rect.height),
                        Rect::new(
                            rect.x + first_size - half_bar,
                            rect.y,
                            metrics.splitter_width,
                            rect.height,
                        ),
                    ),
                    Orientation::Vertical => (
                        Rect::new(rect.x, rect.y, rect.width, first_size),
                        Rect::new(rect.x, rect.y + first_size, rect.width, second_size),
                        Rect::new(
                            rect.x,
                            rect.y + first_size - half_bar,
                            rect.width,
                            metrics.splitter_width,
                        ),
                    ),
                };

                self.splitters.push(SplitterBar {
                    split: split.id().clone(),
                    orientation: split.orientation,
                    rect: bar,
                    container: rect,
                });

                self.compute_node(layout, first, first_rect, metrics);
                self.compute_node(layout, second, second_rect, metrics);
            }
        }
    }

    fn push_group(
        &mut self,
        id: &NodeId,
        panels: &[NodeId],
        rect: Rect,
        metrics: &FrameMetrics,
        synthetic: bool,
    ) {
        let strip_height = metrics.tab_strip_height.min(rect.height);
        let tab_strip = Rect::new(rect.x, rect.y, rect.width, strip_height);
        let content = Rect::new(
            rect.x,
            rect.y + strip_height,
            rect.width,
            rect.height - strip_height,
        );
        let tabs = panels
            .iter()
            .enumerate()
            .map(|(i, panel)| TabFrame {
                panel: panel.clone(),
                rect: Rect::new(
                    rect.x + i as f32 * metrics.tab_width,
                    rect.y,
                    metrics.tab_width,
                    strip_height,
                ),
            })
            .collect();

        self.groups.push(GroupFrame {
            group: id.clone(),
            bounds: rect,
            tab_strip,
            content,
            tabs,
            synthetic,
        });
    }

    pub fn group(&self, id: &NodeId) -> Option<&GroupFrame> {
        self.groups.iter().find(|frame| &frame.group == id)
    }

    /// First group (in pre-order) containing `point`
    pub fn group_at_point(&self, point: Point) -> Option<&GroupFrame> {
        self.groups
            .iter()
            .find(|frame| frame.bounds.contains_point(point))
    }

    /// Tab under `point`, as (group frame, tab index)
    pub fn tab_at_point(&self, point: Point) -> Option<(&GroupFrame, usize)> {
        self.groups.iter().find_map(|frame| {
            frame
                .tab_at_point(point)
                .filter(|_| !frame.synthetic)
                .map(|index| (frame, index))
        })
    }

    pub fn splitter_at_point(&self, point: Point) -> Option<&SplitterBar> {
        self.splitters
            .iter()
            .find(|bar| bar.rect.contains_point(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PanelNode;

    #[test]
    fn test_single_group_fills_area() {
        let layout =
            LayoutModel::with_panels([PanelNode::new("a", "A"), PanelNode::new("b", "B")]).unwrap();
        let frame = LayoutFrame::compute(
            &layout,
            Rect::new(0.0, 0.0, 800.0, 600.0),
            &FrameMetrics::default(),
        );

        assert!(frame.splitters.is_empty());
        assert_eq!(frame.groups.len(), 1);
        let group = &frame.groups[0];
        assert_eq!(group.bounds, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(group.tab_strip.height, TAB_STRIP_HEIGHT);
        assert_eq!(group.content.y, TAB_STRIP_HEIGHT);
        assert_eq!(group.tabs.len(), 2);
        assert_eq!(group.tabs[1].rect.x, TAB_WIDTH);
    }

    #[test]
    fn test_tab_at_point() {
        let layout =
            LayoutModel::with_panels([PanelNode::new("a", "A"), PanelNode::new("b", "B")]).unwrap();
        let frame = LayoutFrame::compute(
            &layout,
            Rect::new(0.0, 0.0, 800.0, 600.0),
            &FrameMetrics::default(),
        );

        let (group, index) = frame.tab_at_point(Point::new(130.0, 10.0)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(group.tabs[index].panel, NodeId::from("b"));
        assert!(frame.tab_at_point(Point::new(500.0, 10.0)).is_none());
        assert!(frame.tab_at_point(Point::new(10.0, 300.0)).is_none());
    }

    #[test]
    fn test_empty_layout_has_no_groups() {
        let frame = LayoutFrame::compute(
            &LayoutModel::new(),
            Rect::new(0.0, 0.0, 800.0, 600.0),
            &FrameMetrics::default(),
        );
        assert!(frame.groups.is_empty());
        assert!(frame.group_at_point(Point::new(10.0, 10.0)).is_none());
    }
}
