//! Drop-zone geometry for tab drags
//!
//! Pure functions over screen rectangles supplied by the view layer. Nothing
//! here reads or mutates the layout tree.
//!
//! A target rectangle is divided into four edge margins and a center region.
//! Edge hits split the target; a center hit docks as a tab. Margins are a
//! quarter of the target's smaller side, floored at [`MIN_MARGIN`] and capped at
//! a third of the smaller side so the center never vanishes.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::model::{NodeId, Orientation};

/// Fraction of the smaller side used for edge margins
pub const MARGIN_FRACTION: f32 = 0.25;

/// Usability floor for edge margins, in pixels
pub const MIN_MARGIN: f32 = 30.0;

/// Width of the insertion line shown while reordering tabs
pub const INSERTION_LINE_WIDTH: f32 = 3.0;

/// Where, relative to a target, a drop lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DockZone {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl DockZone {
    /// Hit-test priority order: edges before center
    pub const ALL: [DockZone; 5] = [
        DockZone::Left,
        DockZone::Right,
        DockZone::Top,
        DockZone::Bottom,
        DockZone::Center,
    ];

    pub fn is_edge(self) -> bool {
        self != DockZone::Center
    }

    /// Orientation of the split an edge drop creates
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            DockZone::Left | DockZone::Right => Some(Orientation::Horizontal),
            DockZone::Top | DockZone::Bottom => Some(Orientation::Vertical),
            DockZone::Center => None,
        }
    }

    /// Whether the dropped panel's new group takes the split's first slot
    pub fn new_group_first(self) -> bool {
        matches!(self, DockZone::Left | DockZone::Top)
    }

    /// Ratio given to the split's first child after an edge drop
    pub fn split_ratio(self) -> f32 {
        if self.new_group_first() {
            0.3
        } else {
            0.7
        }
    }
}

/// Tunables for margin thickness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneMetrics {
    pub margin_fraction: f32,
    pub min_margin: f32,
}

impl Default for ZoneMetrics {
    fn default() -> Self {
        Self {
            margin_fraction: MARGIN_FRACTION,
            min_margin: MIN_MARGIN,
        }
    }
}

/// One zone of a target: what to hit and what to show
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub zone: DockZone,
    pub hit_rect: Rect,
    /// Post-drop preview: half the target for edges, the whole target for center
    pub preview_rect: Rect,
}

/// What a drop onto a resolved target does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropKind {
    /// Split the target (edges) or dock as a tab (center)
    Zone(DockZone),
    /// Insert into the target group's tab strip at this index
    TabIndex(usize),
}

/// A resolved drop target
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub node: NodeId,
    pub kind: DropKind,
    pub preview_rect: Rect,
}

/// Edge margin thickness for `bounds`
pub fn margin_size(bounds: Rect, metrics: &ZoneMetrics) -> f32 {
    let smaller = bounds.min_dimension().max(0.0);
    // Cap is applied last so tiny targets keep a center region
    (smaller * metrics.margin_fraction)
        .max(metrics.min_margin)
        .min(smaller / 3.0)
}

/// The five zones of `bounds` with default metrics, in hit-test order
pub fn calculate_drop_zones(bounds: Rect) -> [DropZone; 5] {
    calculate_drop_zones_with(bounds, &ZoneMetrics::default())
}

pub fn calculate_drop_zones_with(bounds: Rect, metrics: &ZoneMetrics) -> [DropZone; 5] {
    let margin = margin_size(bounds, metrics);
    let Rect {
        x,
        y,
        width,
        height,
    } = bounds;
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    [
        DropZone {
            zone: DockZone::Left,
            hit_rect: Rect::new(x, y, margin, height),
            preview_rect: Rect::new(x, y, half_w, height),
        },
        DropZone {
            zone: DockZone::Right,
            hit_rect: Rect::new(x + width - margin, y, margin, height),
            preview_rect: Rect::new(x + half_w, y, half_w, height),
        },
        DropZone {
            zone: DockZone::Top,
            hit_rect: Rect::new(x, y, width, margin),
            preview_rect: Rect::new(x, y, width, half_h),
        },
        DropZone {
            zone: DockZone::Bottom,
            hit_rect: Rect::new(x, y + height - margin, width, margin),
            preview_rect: Rect::new(x, y + half_h, width, half_h),
        },
        DropZone {
            zone: DockZone::Center,
            hit_rect: Rect::new(
                x + margin,
                y + margin,
                width - 2.0 * margin,
                height - 2.0 * margin,
            ),
            preview_rect: bounds,
        },
    ]
}

/// Zone of a single target under `point`, edges first
pub fn zone_at_position(bounds: Rect, point: Point, metrics: &ZoneMetrics) -> Option<DropZone> {
    if !bounds.contains_point(point) {
        return None;
    }
    calculate_drop_zones_with(bounds, metrics)
        .into_iter()
        .find(|zone| zone.hit_rect.contains_point(point))
}

/// Resolve the drop target under `point` among `candidates`.
///
/// Candidates are scanned in the order given (pre-order of the visible tree).
/// All edge zones are tried before any center zone; within a priority level
/// the first candidate wins. Z-order and proximity are not considered.
pub fn get_drop_target_at_position(
    candidates: &[(NodeId, Rect)],
    point: Point,
    metrics: &ZoneMetrics,
) -> Option<DropTarget> {
    let zones: Vec<(&NodeId, [DropZone; 5])> = candidates
        .iter()
        .filter(|(_, bounds)| bounds.contains_point(point))
        .map(|(node, bounds)| (node, calculate_drop_zones_with(*bounds, metrics)))
        .collect();

    let hit = |want_edge: bool| {
        zones.iter().find_map(|(node, zones)| {
            zones
                .iter()
                .filter(|zone| zone.zone.is_edge() == want_edge)
                .find(|zone| zone.hit_rect.contains_point(point))
                .map(|zone| DropTarget {
                    node: (*node).clone(),
                    kind: DropKind::Zone(zone.zone),
                    preview_rect: zone.preview_rect,
                })
        })
    };

    hit(true).or_else(|| hit(false))
}

/// Insertion index for the cursor before adjusting for the dragged tab:
/// the first tab whose midpoint is at or right of `cursor_x`.
pub fn raw_tab_index(tab_rects: &[Rect], cursor_x: f32) -> usize {
    tab_rects
        .iter()
        .position(|rect| cursor_x <= rect.x + rect.width / 2.0)
        .unwrap_or(tab_rects.len())
}

/// Target index for reordering a tab within its own strip.
///
/// When the dragged tab sits before the insertion point its removal shifts
/// later tabs left, so the raw index is reduced by one.
pub fn calculate_tab_index(
    tab_rects: &[Rect],
    cursor_x: f32,
    dragged_index: Option<usize>,
) -> usize {
    let raw = raw_tab_index(tab_rects, cursor_x);
    match dragged_index {
        Some(dragged) if dragged < raw => raw - 1,
        _ => raw,
    }
}

/// Vertical insertion line at the boundary the cursor falls on
pub fn calculate_tab_reorder_preview_rect(tab_rects: &[Rect], cursor_x: f32) -> Option<Rect> {
    let first = tab_rects.first()?;
    let last = tab_rects.last()?;
    let raw = raw_tab_index(tab_rects, cursor_x);

    let (line_x, anchor) = if raw == 0 {
        (first.x, first)
    } else if raw >= tab_rects.len() {
        (last.right(), last)
    } else {
        let before = &tab_rects[raw - 1];
        let after = &tab_rects[raw];
        ((before.right() + after.x) / 2.0, after)
    };

    Some(Rect::new(
        line_x - INSERTION_LINE_WIDTH / 2.0,
        anchor.y,
        INSERTION_LINE_WIDTH,
        anchor.height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(count: usize, width: f32) -> Vec<Rect> {
        (0..count)
            .map(|i| Rect::new(i as f32 * width, 0.0, width, 28.0))
            .collect()
    }

    #[test]
    fn test_margin_clamps() {
        let metrics = ZoneMetrics::default();
        assert_eq!(margin_size(Rect::new(0.0, 0.0, 400.0, 200.0), &metrics), 50.0);
        // 25% of 100 is below the floor
        assert_eq!(margin_size(Rect::new(0.0, 0.0, 100.0, 100.0), &metrics), 30.0);
        // Floor would swallow the center; the third-cap wins
        assert_eq!(margin_size(Rect::new(0.0, 0.0, 60.0, 60.0), &metrics), 20.0);
        assert_eq!(margin_size(Rect::new(0.0, 0.0, 0.0, 0.0), &metrics), 0.0);
    }

    #[test]
    fn test_zone_rects_for_wide_target() {
        let zones = calculate_drop_zones(Rect::new(0.0, 0.0, 400.0, 200.0));
        assert_eq!(zones[0].zone, DockZone::Left);
        assert_eq!(zones[0].hit_rect, Rect::new(0.0, 0.0, 50.0, 200.0));
        assert_eq!(zones[1].hit_rect, Rect::new(350.0, 0.0, 50.0, 200.0));
        assert_eq!(zones[2].hit_rect, Rect::new(0.0, 0.0, 400.0, 50.0));
        assert_eq!(zones[3].hit_rect, Rect::new(0.0, 150.0, 400.0, 50.0));
        assert_eq!(zones[4].zone, DockZone::Center);
        assert_eq!(zones[4].hit_rect, Rect::new(50.0, 50.0, 300.0, 100.0));
    }

    #[test]
    fn test_previews_are_half_or_full() {
        let bounds = Rect::new(10.0, 20.0, 400.0, 200.0);
        let zones = calculate_drop_zones(bounds);
        assert_eq!(zones[0].preview_rect, Rect::new(10.0, 20.0, 200.0, 200.0));
        assert_eq!(zones[1].preview_rect, Rect::new(210.0, 20.0, 200.0, 200.0));
        assert_eq!(zones[2].preview_rect, Rect::new(10.0, 20.0, 400.0, 100.0));
        assert_eq!(zones[3].preview_rect, Rect::new(10.0, 120.0, 400.0, 100.0));
        assert_eq!(zones[4].preview_rect, bounds);
    }

    #[test]
    fn test_corner_prefers_first_edge() {
        let bounds = Rect::new(0.0, 0.0, 400.0, 200.0);
        let zone = zone_at_position(bounds, Point::new(5.0, 5.0), &ZoneMetrics::default()).unwrap();
        assert_eq!(zone.zone, DockZone::Left);
        let zone =
            zone_at_position(bounds, Point::new(200.0, 100.0), &ZoneMetrics::default()).unwrap();
        assert_eq!(zone.zone, DockZone::Center);
        assert!(zone_at_position(bounds, Point::new(500.0, 100.0), &ZoneMetrics::default()).is_none());
    }

    #[test]
    fn test_drop_target_prefers_traversal_order() {
        // Overlapping candidates: the first listed wins
        let candidates = vec![
            (NodeId::from("first"), Rect::new(0.0, 0.0, 400.0, 200.0)),
            (NodeId::from("second"), Rect::new(0.0, 0.0, 400.0, 200.0)),
        ];
        let target =
            get_drop_target_at_position(&candidates, Point::new(200.0, 100.0), &ZoneMetrics::default())
                .unwrap();
        assert_eq!(target.node, NodeId::from("first"));
        assert_eq!(target.kind, DropKind::Zone(DockZone::Center));
    }

    #[test]
    fn test_drop_target_edges_beat_centers() {
        // Point is in the center of the big target but on the left edge of the small one
        let candidates = vec![
            (NodeId::from("big"), Rect::new(0.0, 0.0, 800.0, 800.0)),
            (NodeId::from("small"), Rect::new(390.0, 300.0, 200.0, 200.0)),
        ];
        let target =
            get_drop_target_at_position(&candidates, Point::new(400.0, 400.0), &ZoneMetrics::default())
                .unwrap();
        assert_eq!(target.node, NodeId::from("small"));
        assert_eq!(target.kind, DropKind::Zone(DockZone::Left));
    }

    #[test]
    fn test_drop_target_outside_everything() {
        let candidates = vec![(NodeId::from("g"), Rect::new(0.0, 0.0, 100.0, 100.0))];
        assert!(
            get_drop_target_at_position(&candidates, Point::new(150.0, 50.0), &ZoneMetrics::default())
                .is_none()
        );
    }

    #[test]
    fn test_tab_index_adjusts_for_dragged_tab() {
        let rects = tabs(4, 100.0);
        // x=250 sits on C's midpoint: insert before C (raw 2), minus one for A's removal
        assert_eq!(raw_tab_index(&rects, 250.0), 2);
        assert_eq!(calculate_tab_index(&rects, 250.0, Some(0)), 1);
        // Dragging D leftwards needs no adjustment
        assert_eq!(calculate_tab_index(&rects, 250.0, Some(3)), 2);
        // Dropped from another group
        assert_eq!(calculate_tab_index(&rects, 250.0, None), 2);
        // Past the end
        assert_eq!(calculate_tab_index(&rects, 1000.0, None), 4);
        assert_eq!(calculate_tab_index(&rects, 1000.0, Some(1)), 3);
    }

    #[test]
    fn test_reorder_preview_line() {
        let rects = tabs(4, 100.0);
        let line = calculate_tab_reorder_preview_rect(&rects, 250.0).unwrap();
        assert_eq!(line, Rect::new(198.5, 0.0, 3.0, 28.0));

        let start = calculate_tab_reorder_preview_rect(&rects, 10.0).unwrap();
        assert_eq!(start.x, -1.5);

        let end = calculate_tab_reorder_preview_rect(&rects, 390.0).unwrap();
        assert_eq!(end.x, 398.5);

        assert!(calculate_tab_reorder_preview_rect(&[], 10.0).is_none());
    }

    #[test]
    fn test_zone_split_parameters() {
        assert_eq!(DockZone::Left.split_ratio(), 0.3);
        assert_eq!(DockZone::Bottom.split_ratio(), 0.7);
        assert_eq!(DockZone::Top.orientation(), Some(Orientation::Vertical));
        assert_eq!(DockZone::Center.orientation(), None);
        assert!(DockZone::Top.new_group_first());
        assert!(!DockZone::Right.new_group_first());
    }
}
