//! Pointer drag lifecycle
//!
//! Input arrives as a stream of pointer polls. A press on a tab starts a
//! [`DragSession`], a press on a splitter bar starts a [`SplitterDrag`]; only
//! one may be active at a time. Moves update previews without touching the
//! tree. Release commits exactly once through the dock engine; cancel drops the
//! session with no mutation.

use crate::commands::Cmd;
use crate::drag::{DragSession, SplitterDrag};
use crate::drop_zone::{
    calculate_tab_index, calculate_tab_reorder_preview_rect, get_drop_target_at_position,
    DockZone, DropKind, DropTarget,
};
use crate::error::DockError;
use crate::geometry::{Point, Rect};
use crate::messages::DragMsg;
use crate::model::{AppModel, DockNode, LayoutFrame, LayoutModel, NodeId};

use super::dock::{self, DockOutcome};
use super::report;

/// Handle pointer messages
pub fn update_drag(model: &mut AppModel, msg: DragMsg) -> Option<Cmd> {
    match msg {
        DragMsg::PointerDown(position) => pointer_down(model, position),

        DragMsg::BeginPanelDrag { panel, position } => match begin_drag(model, &panel, position) {
            Ok(true) => Some(Cmd::Redraw),
            Ok(false) => None,
            Err(err) => report(model, Err(err)),
        },

        DragMsg::BeginSplitterDrag { split, position } => {
            match begin_splitter_drag(model, &split, position) {
                Ok(true) => Some(Cmd::Redraw),
                Ok(false) => None,
                Err(err) => report(model, Err(err)),
            }
        }

        DragMsg::PointerMoved {
            position,
            buttons_down,
        } => drag_moved(model, position, buttons_down).then_some(Cmd::Redraw),

        DragMsg::PointerUp(position) => {
            if model.splitter_drag.is_some() {
                let result = end_splitter_drag(model);
                return report(model, result).or(Some(Cmd::Redraw));
            }
            if model.drag.is_some() {
                let result = end_drag(model, position);
                return report(model, result).or(Some(Cmd::Redraw));
            }
            None
        }

        DragMsg::Cancel => {
            let cancelled = cancel_drag(model) | cancel_splitter_drag(model);
            cancelled.then_some(Cmd::Redraw)
        }
    }
}

/// Hit-test a press: splitter bars win over tabs
fn pointer_down(model: &mut AppModel, position: Point) -> Option<Cmd> {
    model.relayout();

    if let Some(bar) = model.frame.splitter_at_point(position) {
        let split = bar.split.clone();
        return match begin_splitter_drag(model, &split, position) {
            Ok(started) => started.then_some(Cmd::Redraw),
            Err(err) => report(model, Err(err)),
        };
    }

    if let Some((group, index)) = model.frame.tab_at_point(position) {
        let panel = group.tabs[index].panel.clone();
        return match begin_drag(model, &panel, position) {
            Ok(started) => started.then_some(Cmd::Redraw),
            Err(err) => report(model, Err(err)),
        };
    }

    None
}

// ============================================================================
// Tab drags
// ============================================================================

/// Start dragging `panel` from `position`.
///
/// Returns `Ok(false)` without touching the current session when a drag is
/// already in progress.
pub fn begin_drag(
    model: &mut AppModel,
    panel: &NodeId,
    position: Point,
) -> Result<bool, DockError> {
    if model.is_dragging() {
        tracing::warn!(panel = %panel, "Ignoring drag start while another drag is active");
        return Ok(false);
    }
    model
        .layout
        .node(panel)
        .ok_or_else(|| DockError::NodeNotFound(panel.clone()))?
        .as_panel()
        .ok_or_else(|| DockError::NotAPanel(panel.clone()))?;
    model.relayout();

    let source_group = model.layout.group_of(panel).cloned();
    let mut session = DragSession::new(panel.clone(), source_group.clone(), position);
    let handle = source_group
        .as_ref()
        .and_then(|group| model.frame.group(group))
        .and_then(|frame| {
            frame
                .tabs
                .iter()
                .position(|tab| &tab.panel == panel)
                .map(|index| (index, frame.tabs[index].rect))
        });
    if let Some((index, rect)) = handle {
        session = session.with_source_tab(index, rect);
    }

    tracing::debug!(panel = %panel, x = position.x, y = position.y, "Drag started");
    model.drag = Some(session);
    Ok(true)
}

/// Per-tick pointer poll. Returns true when something visible changed.
///
/// A poll with no button held cancels the drag before any target is
/// recomputed, covering releases that never arrived as an event.
pub fn drag_moved(model: &mut AppModel, position: Point, buttons_down: bool) -> bool {
    if model.splitter_drag.is_some() {
        if !buttons_down {
            return cancel_splitter_drag(model);
        }
        return update_splitter_drag(model, position);
    }

    if model.drag.is_none() {
        return false;
    }
    if !buttons_down {
        tracing::debug!("Button released without an event, cancelling drag");
        return cancel_drag(model);
    }

    model.relayout();
    let threshold = model.config.drag_threshold;
    let zone_metrics = model.config.zone_metrics();
    let AppModel {
        layout,
        frame,
        drag,
        ..
    } = model;
    let Some(session) = drag.as_mut() else {
        return false;
    };

    let crossed = session.move_to(position, threshold);
    if !session.threshold_exceeded {
        return false;
    }

    let target = resolve_drop_target(layout, frame, session, position, &zone_metrics);
    let changed = crossed || target != session.target;
    if changed {
        tracing::trace!(target = ?target, "Drop target changed");
    }
    session.target = target;
    changed
}

/// Find what a release at `position` would do, or None when it would do nothing.
///
/// Tab strips take precedence and yield an insertion index. Elsewhere the
/// drop-zone calculator runs over every visible group in pre-order.
pub fn resolve_drop_target(
    layout: &LayoutModel,
    frame: &LayoutFrame,
    session: &DragSession,
    position: Point,
    zone_metrics: &crate::drop_zone::ZoneMetrics,
) -> Option<DropTarget> {
    let groups = || frame.groups.iter().filter(|group| !group.synthetic);

    if let Some(group) = groups().find(|group| group.tab_strip.contains_point(position)) {
        let rects = group.tab_rects();
        let is_source = session.source_group.as_ref() == Some(&group.group);
        let dragged_index = if is_source {
            group.tabs.iter().position(|tab| tab.panel == session.panel)
        } else {
            None
        };
        let index = calculate_tab_index(&rects, position.x, dragged_index);
        if is_source && dragged_index == Some(index) {
            return None;
        }
        let preview_rect = calculate_tab_reorder_preview_rect(&rects, position.x)
            .unwrap_or(group.tab_strip);
        return Some(DropTarget {
            node: group.group.clone(),
            kind: DropKind::TabIndex(index),
            preview_rect,
        });
    }

    let candidates: Vec<(NodeId, Rect)> = groups()
        .map(|group| (group.group.clone(), group.bounds))
        .collect();
    let target = get_drop_target_at_position(&candidates, position, zone_metrics)?;
    is_useful_drop(layout, session, &target).then_some(target)
}

/// Filter targets whose commit would be a no-op or an error
fn is_useful_drop(layout: &LayoutModel, session: &DragSession, target: &DropTarget) -> bool {
    let from_target = session.source_group.as_ref() == Some(&target.node);
    match target.kind {
        DropKind::Zone(DockZone::Center) => !from_target,
        DropKind::Zone(_) => {
            let lone_tab = layout
                .tab_group(&target.node)
                .is_some_and(|group| group.len() == 1);
            !(from_target && lone_tab)
        }
        DropKind::TabIndex(_) => true,
    }
}

/// Release the pointer: commit the session's drop target, or activate the
/// tab if the pointer never left the click threshold.
pub fn end_drag(model: &mut AppModel, position: Point) -> Result<DockOutcome, DockError> {
    let Some(mut session) = model.drag.take() else {
        return Ok(DockOutcome::Unchanged);
    };

    if !session.threshold_exceeded {
        tracing::debug!(panel = %session.panel, "Click on tab");
        if model.layout.group_of(&session.panel).is_none() {
            return Ok(DockOutcome::Unchanged);
        }
        return dock::activate_panel(&mut model.layout, &session.panel);
    }

    session.current = position;
    model.relayout();
    let target = resolve_drop_target(
        &model.layout,
        &model.frame,
        &session,
        position,
        &model.config.zone_metrics(),
    );
    let Some(target) = target else {
        tracing::debug!(panel = %session.panel, "Drag ended without a target");
        return Ok(DockOutcome::Unchanged);
    };

    commit_drop(&mut model.layout, &session, &target)
}

/// Apply a resolved drop to the tree
pub fn commit_drop(
    layout: &mut LayoutModel,
    session: &DragSession,
    target: &DropTarget,
) -> Result<DockOutcome, DockError> {
    let panel = &session.panel;
    tracing::debug!(panel = %panel, target = %target.node, kind = ?target.kind, "Committing drop");

    match target.kind {
        DropKind::TabIndex(index) => {
            if session.source_group.as_ref() == Some(&target.node) {
                dock::reorder_tab(layout, panel, &target.node, Some(index))
            } else {
                dock::move_tab(layout, panel, &target.node, Some(index))
            }
        }
        DropKind::Zone(DockZone::Center) => dock::dock_as_tab(layout, panel, &target.node, None),
        DropKind::Zone(zone) => dock::split_dock(layout, panel, &target.node, zone),
    }
}

/// Drop the tab drag without changing the tree
pub fn cancel_drag(model: &mut AppModel) -> bool {
    match model.drag.take() {
        Some(session) => {
            tracing::debug!(panel = %session.panel, "Drag cancelled");
            true
        }
        None => false,
    }
}

// ============================================================================
// Splitter drags
// ============================================================================

/// Start dragging the bar of `split`
pub fn begin_splitter_drag(
    model: &mut AppModel,
    split: &NodeId,
    position: Point,
) -> Result<bool, DockError> {
    if model.is_dragging() {
        tracing::warn!(split = %split, "Ignoring splitter drag while another drag is active");
        return Ok(false);
    }
    let node = model
        .layout
        .find_node_by_id(split)
        .ok_or_else(|| DockError::NodeNotFound(split.clone()))?;
    let DockNode::Split(node) = node else {
        return Err(DockError::NotASplit(split.clone()));
    };
    let (ratio, min_first, min_second) = (node.ratio(), node.min_first_size, node.min_second_size);

    model.relayout();
    let Some(bar) = model.frame.splitters.iter().find(|bar| &bar.split == split) else {
        return Ok(false);
    };

    let floor = model.config.min_pane_size;
    let drag = SplitterDrag::new(split.clone(), bar.orientation, bar.container, position, ratio)
        .with_min_sizes(min_first.max(floor), min_second.max(floor));

    tracing::debug!(split = %split, ratio, "Splitter drag started");
    model.splitter_drag = Some(drag);
    Ok(true)
}

/// Move the splitter preview; the tree is untouched
pub fn update_splitter_drag(model: &mut AppModel, position: Point) -> bool {
    let Some(drag) = model.splitter_drag.as_mut() else {
        return false;
    };
    let before = drag.preview_ratio;
    drag.move_to(position) != before
}

/// Write the previewed ratio to the split in one step
pub fn end_splitter_drag(model: &mut AppModel) -> Result<DockOutcome, DockError> {
    let Some(drag) = model.splitter_drag.take() else {
        return Ok(DockOutcome::Unchanged);
    };
    if !drag.has_changed() {
        return Ok(DockOutcome::Unchanged);
    }
    tracing::debug!(split = %drag.split, ratio = drag.preview_ratio, "Splitter drag committed");
    dock::set_split_ratio(&mut model.layout, &drag.split, drag.preview_ratio)
}

/// Discard the splitter preview
pub fn cancel_splitter_drag(model: &mut AppModel) -> bool {
    match model.splitter_drag.take() {
        Some(drag) => {
            tracing::debug!(split = %drag.split, "Splitter drag cancelled");
            true
        }
        None => false,
    }
}
