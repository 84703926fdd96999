//! Layout model - owns the dock tree and its arena of nodes
//!
//! Nodes are stored by id; the tree shape is carried by the child references
//! inside tab groups and splits, and mirrored by each node's `parent` field.
//! All slot changes go through [`LayoutModel::attach`] / [`LayoutModel::detach`]
//! so the two directions never disagree once an operation returns.
//!
//! Structural changes are announced through a version counter: every committed
//! mutation bumps [`LayoutModel::version`] exactly once, after any cascading
//! cleanup has finished.

use std::collections::{HashMap, HashSet};

use super::node::{DockNode, NodeId, PanelNode, SplitNode, SplitSlot, TabGroupNode};
use crate::error::DockError;

/// Where a node is attached in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentSlot {
    /// The node is the tree root
    Root,
    /// Child slot of a split
    Split(NodeId, SplitSlot),
    /// Position inside a tab group's panel list
    Group(NodeId, usize),
}

/// The complete dock layout
#[derive(Debug, Clone, Default)]
pub struct LayoutModel {
    nodes: HashMap<NodeId, DockNode>,
    root: Option<NodeId>,
    version: u64,
}

impl LayoutModel {
    /// Empty layout (no root)
    pub fn new() -> Self {
        Self::default()
    }

    /// Bootstrap a layout whose root is a single tab group holding `panels`
    pub fn with_panels(panels: impl IntoIterator<Item = PanelNode>) -> Result<Self, DockError> {
        let mut layout = Self::new();
        let group_id = layout.insert_node(DockNode::TabGroup(TabGroupNode::new()));
        layout.root = Some(group_id.clone());
        for panel in panels {
            let panel_id = layout.register_panel(panel)?;
            layout.attach(&panel_id, ParentSlot::Group(group_id.clone(), usize::MAX));
        }
        layout.validate_tree()?;
        Ok(layout)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current structural version; bumped once per committed change
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn root_id(&self) -> Option<&NodeId> {
        self.root.as_ref()
    }

    pub fn root(&self) -> Option<&DockNode> {
        self.root.as_ref().and_then(|id| self.nodes.get(id))
    }

    pub fn is_empty(&self) -> bool {
        match self.root() {
            None => true,
            Some(DockNode::TabGroup(group)) => group.is_empty(),
            Some(_) => false,
        }
    }

    /// Arena lookup, including registered panels that are not docked
    pub fn node(&self, id: &NodeId) -> Option<&DockNode> {
        self.nodes.get(id)
    }

    pub fn panel(&self, id: &NodeId) -> Option<&PanelNode> {
        self.nodes.get(id).and_then(DockNode::as_panel)
    }

    pub fn tab_group(&self, id: &NodeId) -> Option<&TabGroupNode> {
        self.nodes.get(id).and_then(DockNode::as_tab_group)
    }

    pub fn split(&self, id: &NodeId) -> Option<&SplitNode> {
        self.nodes.get(id).and_then(DockNode::as_split)
    }

    /// Total number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `id` is reachable from the root through its parent chain
    pub fn is_in_tree(&self, id: &NodeId) -> bool {
        let Some(root) = &self.root else {
            return false;
        };
        let mut current = id;
        // Bounded walk so a corrupted chain cannot loop forever
        for _ in 0..=self.nodes.len() {
            if current == root {
                return true;
            }
            match self.nodes.get(current).and_then(DockNode::parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Whether `ancestor` appears in the parent chain of `node` (excluding `node`)
    pub fn is_ancestor(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut current = self.nodes.get(node).and_then(DockNode::parent);
        for _ in 0..=self.nodes.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.nodes.get(id).and_then(DockNode::parent),
                None => return false,
            }
        }
        false
    }

    /// The tab group that currently holds `panel`
    pub fn group_of(&self, panel: &NodeId) -> Option<&NodeId> {
        let parent = self.panel(panel)?.parent()?;
        self.tab_group(parent).map(TabGroupNode::id)
    }

    // ========================================================================
    // Lookup & enumeration (tree only)
    // ========================================================================

    pub fn find_node_by_id(&self, id: &NodeId) -> Option<&DockNode> {
        if self.is_in_tree(id) {
            self.nodes.get(id)
        } else {
            None
        }
    }

    pub fn find_panel_by_id(&self, id: &NodeId) -> Option<&PanelNode> {
        self.find_node_by_id(id).and_then(DockNode::as_panel)
    }

    /// All nodes of the tree in pre-order
    pub fn pre_order(&self) -> Vec<&DockNode> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            self.collect_pre_order(root, &mut out, &mut HashSet::new());
        }
        out
    }

    fn collect_pre_order<'a>(
        &'a self,
        id: &NodeId,
        out: &mut Vec<&'a DockNode>,
        visited: &mut HashSet<NodeId>,
    ) {
        if !visited.insert(id.clone()) {
            return;
        }
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        out.push(node);
        for child in node.children() {
            self.collect_pre_order(&child, out, visited);
        }
    }

    pub fn get_all_panels(&self) -> Vec<&PanelNode> {
        self.pre_order()
            .into_iter()
            .filter_map(DockNode::as_panel)
            .collect()
    }

    pub fn get_all_tab_groups(&self) -> Vec<&TabGroupNode> {
        self.pre_order()
            .into_iter()
            .filter_map(DockNode::as_tab_group)
            .collect()
    }

    pub fn get_all_splits(&self) -> Vec<&SplitNode> {
        self.pre_order()
            .into_iter()
            .filter_map(DockNode::as_split)
            .collect()
    }

    /// Registered panels that are not currently docked anywhere
    pub fn undocked_panels(&self) -> Vec<&PanelNode> {
        let mut panels: Vec<&PanelNode> = self
            .nodes
            .values()
            .filter_map(DockNode::as_panel)
            .filter(|panel| panel.parent().is_none() && self.root.as_ref() != Some(panel.id()))
            .collect();
        panels.sort_by(|a, b| a.id().cmp(b.id()));
        panels
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check tree structure: acyclic, single-rooted, parents matching containers,
    /// child kinds legal, and no dangling or orphaned nodes in the arena.
    pub fn validate_tree(&self) -> Result<(), DockError> {
        let Some(root_id) = &self.root else {
            return self.validate_orphans(&HashSet::new());
        };
        let root = self
            .nodes
            .get(root_id)
            .ok_or_else(|| invalid(format!("root {} is missing from the arena", root_id)))?;
        if let Some(parent) = root.parent() {
            return Err(invalid(format!("root {} has parent {}", root_id, parent)));
        }

        let mut visited = HashSet::new();
        let mut stack = vec![root_id.clone()];
        while let Some(id) = stack.pop() {
            if !visited.insert(id.clone()) {
                return Err(invalid(format!("node {} is reachable twice (cycle)", id)));
            }
            let node = self
                .nodes
                .get(&id)
                .ok_or_else(|| invalid(format!("child {} is missing from the arena", id)))?;

            for child_id in node.children() {
                let child = self
                    .nodes
                    .get(&child_id)
                    .ok_or_else(|| invalid(format!("child {} of {} is missing", child_id, id)))?;
                if child.parent() != Some(&id) {
                    return Err(invalid(format!(
                        "node {} is held by {} but records parent {:?}",
                        child_id,
                        id,
                        child.parent().map(NodeId::as_str)
                    )));
                }
                let legal = match node {
                    DockNode::Panel(_) => false,
                    DockNode::TabGroup(_) => matches!(child, DockNode::Panel(_)),
                    DockNode::Split(_) => !matches!(child, DockNode::Panel(_)),
                };
                if !legal {
                    return Err(invalid(format!(
                        "{:?} {} cannot hold {:?} {}",
                        node.kind(),
                        id,
                        child.kind(),
                        child_id
                    )));
                }
                stack.push(child_id);
            }
        }

        self.validate_orphans(&visited)
    }

    fn validate_orphans(&self, reachable: &HashSet<NodeId>) -> Result<(), DockError> {
        for (id, node) in &self.nodes {
            if reachable.contains(id) {
                continue;
            }
            match (node, node.parent()) {
                (DockNode::Panel(_), None) => {}
                (_, Some(parent)) => {
                    return Err(invalid(format!(
                        "node {} points at parent {} but is not in the tree",
                        id, parent
                    )))
                }
                (_, None) => {
                    return Err(invalid(format!("{:?} {} is orphaned", node.kind(), id)))
                }
            }
        }
        Ok(())
    }

    /// Full invariant check: [`validate_tree`](Self::validate_tree) plus no empty
    /// non-root groups, no split with a missing child, and active panels that
    /// are members of their group.
    pub fn check_invariants(&self) -> Result<(), DockError> {
        self.validate_tree()?;
        for node in self.pre_order() {
            match node {
                DockNode::TabGroup(group) => {
                    if group.is_empty() && self.root.as_ref() != Some(group.id()) {
                        return Err(invalid(format!("non-root tab group {} is empty", group.id())));
                    }
                    if let Some(active) = group.active_panel_id() {
                        if !group.contains(active) {
                            return Err(invalid(format!(
                                "tab group {} has non-member active panel {}",
                                group.id(),
                                active
                            )));
                        }
                    }
                }
                DockNode::Split(split) => {
                    if split.first().is_none() || split.second().is_none() {
                        return Err(invalid(format!("split {} is missing a child", split.id())));
                    }
                }
                DockNode::Panel(_) => {}
            }
        }
        Ok(())
    }

    // ========================================================================
    // Root management
    // ========================================================================

    /// Empty the layout. Registered panels that were never docked are kept.
    pub fn clear(&mut self) {
        if let Some(old_root) = self.root.take() {
            self.drop_subtree(&old_root);
        }
        self.touch();
    }

    /// Make an arena node the new root.
    ///
    /// A bare panel is wrapped in a synthetic tab group. The node is detached
    /// from wherever it currently sits; whatever remains of the previous tree
    /// is dropped from the arena.
    pub fn set_root(&mut self, id: &NodeId) -> Result<(), DockError> {
        self.transaction(|layout| {
            let node = layout
                .nodes
                .get(id)
                .ok_or_else(|| DockError::NodeNotFound(id.clone()))?;

            let new_root = if matches!(node, DockNode::Panel(_)) {
                let group_id = layout.insert_node(DockNode::TabGroup(TabGroupNode::new()));
                layout.attach(id, ParentSlot::Group(group_id.clone(), 0));
                group_id
            } else {
                layout.detach(id);
                id.clone()
            };

            let old_root = layout.root.take();
            if let Some(old) = &old_root {
                if let Some(node) = layout.nodes.get_mut(old) {
                    node.set_parent(None);
                }
            }
            layout.attach(&new_root, ParentSlot::Root);
            if let Some(old) = old_root {
                if old != new_root {
                    layout.drop_subtree(&old);
                }
            }
            Ok(())
        })?;
        self.touch();
        Ok(())
    }

    /// Register `panel` and make it the root (wrapped in a tab group)
    pub fn set_root_panel(&mut self, panel: PanelNode) -> Result<NodeId, DockError> {
        let id = self.register_panel(panel)?;
        if let Err(err) = self.set_root(&id) {
            self.nodes.remove(&id);
            return Err(err);
        }
        Ok(id)
    }

    // ========================================================================
    // Panel registration
    // ========================================================================

    /// Add a panel to the arena without docking it
    pub fn register_panel(&mut self, mut panel: PanelNode) -> Result<NodeId, DockError> {
        if self.nodes.contains_key(panel.id()) {
            return Err(DockError::DuplicateId(panel.id().clone()));
        }
        panel.parent = None;
        Ok(self.insert_node(DockNode::Panel(panel)))
    }

    /// Remove an undocked panel from the arena, handing it back
    pub fn unregister_panel(&mut self, id: &NodeId) -> Result<PanelNode, DockError> {
        let panel = self
            .panel(id)
            .ok_or_else(|| DockError::NotAPanel(id.clone()))?;
        if panel.parent().is_some() || self.root.as_ref() == Some(id) {
            return Err(DockError::InvalidDockTarget(id.clone()));
        }
        match self.nodes.remove(id) {
            Some(DockNode::Panel(panel)) => Ok(panel),
            _ => Err(DockError::NotAPanel(id.clone())),
        }
    }

    /// Edit a panel's title
    pub fn set_panel_title(
        &mut self,
        id: &NodeId,
        title: impl Into<String>,
    ) -> Result<(), DockError> {
        let panel = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| DockError::NodeNotFound(id.clone()))?
            .as_panel_mut()
            .ok_or_else(|| DockError::NotAPanel(id.clone()))?;
        panel.title = title.into();
        self.touch();
        Ok(())
    }

    // ========================================================================
    // Mutation primitives (crate-internal)
    // ========================================================================

    /// Announce a committed change
    pub(crate) fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Run `op` so that either all of its changes land or none do
    pub(crate) fn transaction<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, DockError>,
    ) -> Result<T, DockError> {
        let nodes = self.nodes.clone();
        let root = self.root.clone();

        let mut result = op(self);
        if cfg!(debug_assertions) && result.is_ok() {
            if let Err(err) = self.check_invariants() {
                tracing::error!("Rolling back mutation that broke the tree: {}", err);
                result = Err(err);
            }
        }

        if result.is_err() {
            self.nodes = nodes;
            self.root = root;
        }
        result
    }

    pub(crate) fn insert_node(&mut self, node: DockNode) -> NodeId {
        let id = node.id().clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    pub(crate) fn remove_node(&mut self, id: &NodeId) -> Option<DockNode> {
        self.nodes.remove(id)
    }

    pub(crate) fn node_mut(&mut self, id: &NodeId) -> Option<&mut DockNode> {
        self.nodes.get_mut(id)
    }

    pub(crate) fn tab_group_mut(&mut self, id: &NodeId) -> Option<&mut TabGroupNode> {
        self.nodes.get_mut(id).and_then(DockNode::as_tab_group_mut)
    }

    pub(crate) fn split_mut(&mut self, id: &NodeId) -> Option<&mut SplitNode> {
        self.nodes.get_mut(id).and_then(DockNode::as_split_mut)
    }

    /// Locate the container slot currently holding `id`
    pub fn slot_of(&self, id: &NodeId) -> Option<ParentSlot> {
        if self.root.as_ref() == Some(id) {
            return Some(ParentSlot::Root);
        }
        let parent_id = self.nodes.get(id)?.parent()?;
        match self.nodes.get(parent_id)? {
            DockNode::Split(split) => split
                .slot_of(id)
                .map(|slot| ParentSlot::Split(parent_id.clone(), slot)),
            DockNode::TabGroup(group) => group
                .index_of(id)
                .map(|index| ParentSlot::Group(parent_id.clone(), index)),
            DockNode::Panel(_) => None,
        }
    }

    /// Remove `id` from its container slot and clear its parent.
    /// Returns the slot it occupied.
    pub(crate) fn detach(&mut self, id: &NodeId) -> Option<ParentSlot> {
        let slot = self.slot_of(id);
        match &slot {
            Some(ParentSlot::Root) => {
                self.root = None;
            }
            Some(ParentSlot::Split(split_id, which)) => {
                if let Some(split) = self.split_mut(split_id) {
                    *split.child_mut(*which) = None;
                }
            }
            Some(ParentSlot::Group(group_id, _)) => {
                if let Some(group) = self.tab_group_mut(group_id) {
                    group.remove_panel(id);
                }
            }
            None => {}
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.set_parent(None);
        }
        slot
    }

    /// Place `id` into `slot`, first detaching it from its current slot.
    ///
    /// Attaching to the slot a node already occupies is a no-op. A node that
    /// previously occupied a split slot or the root is left parentless; the
    /// caller is responsible for re-homing or dropping it. Group indices past
    /// the end append.
    pub(crate) fn attach(&mut self, id: &NodeId, slot: ParentSlot) {
        if self.slot_of(id).as_ref() == Some(&slot) {
            return;
        }
        self.detach(id);

        let parent = match &slot {
            ParentSlot::Root => {
                if let Some(previous) = self.root.replace(id.clone()) {
                    if let Some(node) = self.nodes.get_mut(&previous) {
                        node.set_parent(None);
                    }
                }
                None
            }
            ParentSlot::Split(split_id, which) => {
                let displaced = self
                    .split_mut(split_id)
                    .and_then(|split| split.child_mut(*which).replace(id.clone()));
                if let Some(previous) = displaced {
                    if let Some(node) = self.nodes.get_mut(&previous) {
                        node.set_parent(None);
                    }
                }
                Some(split_id.clone())
            }
            ParentSlot::Group(group_id, index) => {
                if let Some(group) = self.tab_group_mut(group_id) {
                    group.insert_panel(id.clone(), Some(*index));
                }
                Some(group_id.clone())
            }
        };

        if let Some(node) = self.nodes.get_mut(id) {
            node.set_parent(parent);
        }
    }

    /// Drop `id` and everything below it from the arena, returning how many
    /// nodes went
    pub(crate) fn drop_subtree(&mut self, id: &NodeId) -> usize {
        let mut stack = vec![id.clone()];
        let mut dropped = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                dropped += 1;
                stack.extend(node.children());
            }
        }
        dropped
    }
}

fn invalid(reason: String) -> DockError {
    DockError::InvalidTree(reason)
}
