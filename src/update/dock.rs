//! Dock operation engine
//!
//! The only sanctioned way to restructure the layout tree. Every public
//! function validates its arguments up front, performs its mutation inside a
//! [`LayoutModel`] transaction, runs any cascading collapse, and bumps the
//! layout version once. A failed call leaves the tree exactly as it was.

use crate::drop_zone::DockZone;
use crate::error::DockError;
use crate::model::{
    DockNode, LayoutModel, NodeId, PanelNode, ParentSlot, SplitNode, SplitSlot, TabGroupNode,
};

/// Result of an operation that may legitimately have nothing to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockOutcome {
    /// The tree changed and the version was bumped
    Applied,
    /// Nothing to do; tree and version untouched
    Unchanged,
}

impl DockOutcome {
    pub fn is_applied(self) -> bool {
        self == DockOutcome::Applied
    }
}

// ============================================================================
// Argument checks
// ============================================================================

fn require_panel<'a>(layout: &'a LayoutModel, id: &NodeId) -> Result<&'a PanelNode, DockError> {
    layout
        .node(id)
        .ok_or_else(|| DockError::NodeNotFound(id.clone()))?
        .as_panel()
        .ok_or_else(|| DockError::NotAPanel(id.clone()))
}

fn require_in_tree<'a>(layout: &'a LayoutModel, id: &NodeId) -> Result<&'a DockNode, DockError> {
    layout
        .find_node_by_id(id)
        .ok_or_else(|| DockError::NodeNotFound(id.clone()))
}

fn require_group<'a>(
    layout: &'a LayoutModel,
    id: &NodeId,
) -> Result<&'a TabGroupNode, DockError> {
    require_in_tree(layout, id)?
        .as_tab_group()
        .ok_or_else(|| DockError::NotATabGroup(id.clone()))
}

// ============================================================================
// Tab operations
// ============================================================================

/// Move `panel` into `target_group` at `index` (append when `None` or out of
/// range) and make it the group's active tab.
///
/// A panel coming from another group is excised from it first; if that leaves
/// the source group empty (and it is not the root), the source collapses once
/// the panel has been re-homed.
pub fn dock_as_tab(
    layout: &mut LayoutModel,
    panel: &NodeId,
    target_group: &NodeId,
    index: Option<usize>,
) -> Result<DockOutcome, DockError> {
    require_panel(layout, panel)?;
    let group = require_group(layout, target_group)?;
    if group.contains(panel) {
        return Err(DockError::DuplicatePanelInGroup {
            group: target_group.clone(),
            panel: panel.clone(),
        });
    }

    let source = layout.group_of(panel).cloned();
    layout.transaction(|layout| {
        layout.attach(
            panel,
            ParentSlot::Group(target_group.clone(), index.unwrap_or(usize::MAX)),
        );
        if let Some(group) = layout.tab_group_mut(target_group) {
            group.set_active(panel);
        }
        if let Some(source) = &source {
            collapse_if_empty(layout, source);
        }
        Ok(())
    })?;

    layout.touch();
    tracing::debug!(
        panel = %panel,
        group = %target_group,
        source = ?source.as_ref().map(NodeId::as_str),
        "Docked panel as tab"
    );
    Ok(DockOutcome::Applied)
}

/// Move a panel to another group. Same semantics as [`dock_as_tab`].
pub fn move_tab(
    layout: &mut LayoutModel,
    panel: &NodeId,
    target_group: &NodeId,
    index: Option<usize>,
) -> Result<DockOutcome, DockError> {
    dock_as_tab(layout, panel, target_group, index)
}

/// Move `panel` to `new_index` within its own group (`None` means last).
///
/// The index is clamped to the group's bounds after removal. The active tab
/// is left alone.
pub fn reorder_tab(
    layout: &mut LayoutModel,
    panel: &NodeId,
    group: &NodeId,
    new_index: Option<usize>,
) -> Result<DockOutcome, DockError> {
    require_panel(layout, panel)?;
    let tab_group = require_group(layout, group)?;
    let current = tab_group
        .index_of(panel)
        .ok_or_else(|| DockError::PanelNotInGroup {
            group: group.clone(),
            panel: panel.clone(),
        })?;

    let last = tab_group.len() - 1;
    let target = new_index.map_or(last, |index| index.min(last));
    if target == current {
        return Ok(DockOutcome::Unchanged);
    }

    layout.transaction(|layout| {
        if let Some(tab_group) = layout.tab_group_mut(group) {
            tab_group.move_panel(current, target);
        }
        Ok(())
    })?;

    layout.touch();
    tracing::debug!(panel = %panel, group = %group, from = current, to = target, "Reordered tab");
    Ok(DockOutcome::Applied)
}

/// Make `panel` the active tab of its group
pub fn activate_panel(layout: &mut LayoutModel, panel: &NodeId) -> Result<DockOutcome, DockError> {
    require_panel(layout, panel)?;
    let Some(group) = layout.group_of(panel).cloned() else {
        return Ok(DockOutcome::Unchanged);
    };
    let Some(tab_group) = layout.tab_group_mut(&group) else {
        return Ok(DockOutcome::Unchanged);
    };
    if tab_group.active_panel_id() == Some(panel) {
        return Ok(DockOutcome::Unchanged);
    }
    tab_group.set_active(panel);
    layout.touch();
    Ok(DockOutcome::Applied)
}

// ============================================================================
// Split docking
// ============================================================================

/// Dock `panel` against `target` in `zone`.
///
/// `Center` docks as a tab and requires a tab group target. Edge zones wrap
/// the target in a new split whose other side is a fresh group holding only
/// `panel`: Left/Top put the new group first at ratio 0.3, Right/Bottom put it
/// second with the target keeping 0.7.
///
/// An empty tab group (the root of an empty layout) has nothing to split
/// against, so any zone docks `panel` into it as a tab. Splitting the only
/// panel of a group against that same group is a no-op.
pub fn split_dock(
    layout: &mut LayoutModel,
    panel: &NodeId,
    target: &NodeId,
    zone: DockZone,
) -> Result<DockOutcome, DockError> {
    require_panel(layout, panel)?;
    let target_node = require_in_tree(layout, target)?;

    let Some(orientation) = zone.orientation() else {
        if target_node.as_tab_group().is_none() {
            return Err(DockError::CenterRequiresTabGroup(target.clone()));
        }
        return dock_as_tab(layout, panel, target, None);
    };
    if matches!(target_node, DockNode::Panel(_)) {
        return Err(DockError::InvalidDockTarget(target.clone()));
    }
    validate_dock_operation(layout, panel, target)?;
    if target_node.as_tab_group().is_some_and(TabGroupNode::is_empty) {
        return dock_as_tab(layout, panel, target, None);
    }

    let source = layout.group_of(panel).cloned();
    if source.as_ref() == Some(target)
        && layout.tab_group(target).is_some_and(|group| group.len() == 1)
    {
        tracing::debug!(panel = %panel, "Ignoring split of a group's only panel against itself");
        return Ok(DockOutcome::Unchanged);
    }

    let new_split = layout.transaction(|layout| {
        layout.detach(panel);

        // Capture the target's slot and free it before the split claims the target
        let target_slot = layout
            .slot_of(target)
            .ok_or_else(|| DockError::NodeNotFound(target.clone()))?;
        layout.detach(target);

        let new_group = layout.insert_node(DockNode::TabGroup(TabGroupNode::new()));
        layout.attach(panel, ParentSlot::Group(new_group.clone(), 0));

        let split = layout.insert_node(DockNode::Split(SplitNode::new(
            orientation,
            zone.split_ratio(),
        )));
        let (first, second) = if zone.new_group_first() {
            (&new_group, target)
        } else {
            (target, &new_group)
        };
        layout.attach(first, ParentSlot::Split(split.clone(), SplitSlot::First));
        layout.attach(second, ParentSlot::Split(split.clone(), SplitSlot::Second));
        layout.attach(&split, target_slot);

        if let Some(source) = &source {
            if source != target {
                collapse_if_empty(layout, source);
            }
        }
        Ok(split)
    })?;

    layout.touch();
    tracing::debug!(
        panel = %panel,
        target = %target,
        zone = ?zone,
        split = %new_split,
        "Split-docked panel"
    );
    Ok(DockOutcome::Applied)
}

/// Reject docking a node onto itself or onto anything inside it
pub fn validate_dock_operation(
    layout: &LayoutModel,
    panel: &NodeId,
    target: &NodeId,
) -> Result<(), DockError> {
    if panel == target {
        return Err(DockError::DockOntoSelf(panel.clone()));
    }
    if layout.is_ancestor(panel, target) {
        return Err(DockError::DockOntoDescendant {
            panel: panel.clone(),
            target: target.clone(),
        });
    }
    Ok(())
}

// ============================================================================
// Removal & cleanup
// ============================================================================

/// Take `panel` out of the layout and hand it back.
///
/// Returns `Ok(None)` when the panel is not docked in any group. A group left
/// empty by the removal collapses (unless it is the root).
pub fn remove_panel(
    layout: &mut LayoutModel,
    panel: &NodeId,
) -> Result<Option<PanelNode>, DockError> {
    require_panel(layout, panel)?;
    let Some(group) = layout.group_of(panel).cloned() else {
        return Ok(None);
    };

    let removed = layout.transaction(|layout| {
        layout.detach(panel);
        let removed = match layout.remove_node(panel) {
            Some(DockNode::Panel(panel)) => panel,
            _ => return Err(DockError::NotAPanel(panel.clone())),
        };
        collapse_if_empty(layout, &group);
        Ok(removed)
    })?;

    layout.touch();
    tracing::debug!(panel = %panel, group = %group, "Removed panel");
    Ok(Some(removed))
}

/// Set a split's ratio (clamped to [0, 1])
pub fn set_split_ratio(
    layout: &mut LayoutModel,
    split: &NodeId,
    ratio: f32,
) -> Result<DockOutcome, DockError> {
    require_in_tree(layout, split)?;
    let node = layout
        .split_mut(split)
        .ok_or_else(|| DockError::NotASplit(split.clone()))?;
    let ratio = if ratio.is_nan() { node.ratio } else { ratio.clamp(0.0, 1.0) };
    if node.ratio == ratio {
        return Ok(DockOutcome::Unchanged);
    }
    node.ratio = ratio;
    layout.touch();
    Ok(DockOutcome::Applied)
}

/// Full-tree sweep removing empty groups and splits left with fewer than two
/// live children. Returns the number of nodes dropped.
pub fn cleanup_empty_nodes(layout: &mut LayoutModel) -> Result<usize, DockError> {
    let Some(root) = layout.root_id().cloned() else {
        return Ok(0);
    };
    let removed = layout.transaction(|layout| {
        let mut dropped = 0;
        let root_collapsible = sweep(layout, &root, &mut dropped);
        if root_collapsible && layout.split(&root).is_some() {
            layout.detach(&root);
            dropped += layout.drop_subtree(&root);
            let empty = layout.insert_node(DockNode::TabGroup(TabGroupNode::new()));
            layout.attach(&empty, ParentSlot::Root);
        }
        Ok(dropped)
    })?;

    if removed > 0 {
        layout.touch();
        tracing::debug!(removed, "Cleaned up empty layout nodes");
    }
    Ok(removed)
}

/// Post-order pass; returns whether `id` is collapsible (an empty group, a
/// missing child, or a split whose children are both collapsible). Nodes it
/// drops are added to `dropped`.
fn sweep(layout: &mut LayoutModel, id: &NodeId, dropped: &mut usize) -> bool {
    let (first, second) = match layout.node(id) {
        None => return true,
        Some(DockNode::Panel(_)) => return false,
        Some(DockNode::TabGroup(group)) => return group.is_empty(),
        Some(DockNode::Split(split)) => (split.first().cloned(), split.second().cloned()),
    };

    let first_collapsible = first.as_ref().map_or(true, |child| sweep(layout, child, dropped));
    let second_collapsible = second
        .as_ref()
        .map_or(true, |child| sweep(layout, child, dropped));

    match (first_collapsible, second_collapsible) {
        (true, true) => true,
        (false, false) => false,
        (first_dead, _) => {
            let (dead, survivor) = if first_dead {
                (first, second)
            } else {
                (second, first)
            };
            if let Some(dead) = dead {
                layout.detach(&dead);
                *dropped += layout.drop_subtree(&dead);
            }
            if let Some(survivor) = survivor {
                *dropped += replace_split_with(layout, id, &survivor);
            }
            false
        }
    }
}

/// Collapse `group` if it is empty and not the root
fn collapse_if_empty(layout: &mut LayoutModel, group: &NodeId) {
    let is_empty = layout.tab_group(group).is_some_and(TabGroupNode::is_empty);
    if !is_empty || layout.root_id() == Some(group) {
        return;
    }

    let parent = layout.slot_of(group);
    layout.detach(group);
    layout.remove_node(group);

    if let Some(ParentSlot::Split(split, _)) = parent {
        collapse_split(layout, &split);
    }
}

/// Replace a split that lost a child with its surviving child, cascading
/// upwards when nothing survives.
fn collapse_split(layout: &mut LayoutModel, split: &NodeId) {
    let Some(node) = layout.split(split) else {
        return;
    };
    let survivor = node.first().or(node.second()).cloned();

    match survivor {
        Some(survivor) => {
            replace_split_with(layout, split, &survivor);
        }
        None => {
            let slot = layout.detach(split);
            layout.remove_node(split);
            match slot {
                Some(ParentSlot::Split(parent, _)) => collapse_split(layout, &parent),
                Some(ParentSlot::Root) => {
                    let empty = layout.insert_node(DockNode::TabGroup(TabGroupNode::new()));
                    layout.attach(&empty, ParentSlot::Root);
                }
                _ => {}
            }
        }
    }
}

/// Put `survivor` where `split` was, then drop `split`. Returns the number of
/// nodes dropped.
fn replace_split_with(layout: &mut LayoutModel, split: &NodeId, survivor: &NodeId) -> usize {
    let Some(slot) = layout.slot_of(split) else {
        return 0;
    };
    layout.detach(survivor);
    layout.detach(split);
    layout.attach(survivor, slot);
    tracing::trace!(split = %split, survivor = %survivor, "Collapsed split");
    layout.drop_subtree(split)
}
