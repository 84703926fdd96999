//! Layout tree nodes - panels, tab groups and splits
//!
//! Nodes live in the [`LayoutModel`](super::LayoutModel) arena and refer to each
//! other by [`NodeId`]. A node's `parent` is a lookup-only back-reference; only
//! the container that owns the child slot (a tab group's panel list or a
//! split's first/second slot) may change it, through the arena primitives.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Stable, unique node identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generate a fresh random (v4 UUID) identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&NodeId> for NodeId {
    fn from(value: &NodeId) -> Self {
        value.clone()
    }
}

// ============================================================================
// Split primitives
// ============================================================================

/// Axis along which a split divides its space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Children arranged side by side (left | right)
    Horizontal,
    /// Children stacked (top / bottom)
    Vertical,
}

/// One of the two child slots of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitSlot {
    First,
    Second,
}

impl SplitSlot {
    pub fn other(self) -> SplitSlot {
        match self {
            SplitSlot::First => SplitSlot::Second,
            SplitSlot::Second => SplitSlot::First,
        }
    }
}

/// Discriminant of a [`DockNode`], handy for logging and dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Panel,
    TabGroup,
    Split,
}

// ============================================================================
// Panel content
// ============================================================================

/// Factory producing a panel's view content on first use
pub type ContentFactory = Rc<dyn Fn() -> Rc<dyn Any>>;

/// Lazily created, cached view content for a panel
///
/// The factory runs at most once until [`PanelContent::invalidate`] is called.
/// The content is opaque to the layout; the view layer downcasts it.
#[derive(Clone, Default)]
pub struct PanelContent {
    factory: Option<ContentFactory>,
    cached: Rc<RefCell<Option<Rc<dyn Any>>>>,
}

impl PanelContent {
    pub fn new<T, F>(factory: F) -> Self
    where
        T: 'static,
        F: Fn() -> T + 'static,
    {
        Self {
            factory: Some(Rc::new(move || Rc::new(factory()) as Rc<dyn Any>)),
            cached: Rc::new(RefCell::new(None)),
        }
    }

    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Whether the factory has already produced the cached value
    pub fn is_created(&self) -> bool {
        self.cached.borrow().is_some()
    }

    /// Get the content, invoking the factory if nothing is cached yet
    pub fn get(&self) -> Option<Rc<dyn Any>> {
        if let Some(existing) = self.cached.borrow().as_ref() {
            return Some(Rc::clone(existing));
        }
        let factory = self.factory.as_ref()?;
        let created = factory();
        *self.cached.borrow_mut() = Some(Rc::clone(&created));
        Some(created)
    }

    /// Typed access to the content
    pub fn get_as<T: 'static>(&self) -> Option<Rc<T>> {
        self.get().and_then(|content| content.downcast::<T>().ok())
    }

    /// Drop the cached value so the next `get` rebuilds it
    pub fn invalidate(&self) {
        self.cached.borrow_mut().take();
    }
}

impl fmt::Debug for PanelContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelContent")
            .field("has_factory", &self.has_factory())
            .field("created", &self.is_created())
            .finish()
    }
}

// ============================================================================
// Panel (leaf)
// ============================================================================

/// A dockable panel - the leaf of the layout tree
#[derive(Debug, Clone)]
pub struct PanelNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub title: String,
    /// Icon key, interpreted by the view layer
    pub icon: Option<String>,
    pub content: PanelContent,
    pub can_close: bool,
    pub can_float: bool,
    pub is_pinned: bool,
}

impl PanelNode {
    pub fn new(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            title: title.into(),
            icon: None,
            content: PanelContent::default(),
            can_close: true,
            can_float: true,
            is_pinned: false,
        }
    }

    /// Panel with a generated id
    pub fn untitled(title: impl Into<String>) -> Self {
        Self::new(NodeId::generate(), title)
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_content<T, F>(mut self, factory: F) -> Self
    where
        T: 'static,
        F: Fn() -> T + 'static,
    {
        self.content = PanelContent::new(factory);
        self
    }

    pub fn closable(mut self, can_close: bool) -> Self {
        self.can_close = can_close;
        self
    }

    pub fn floatable(mut self, can_float: bool) -> Self {
        self.can_float = can_float;
        self
    }

    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }
}

// ============================================================================
// Tab group
// ============================================================================

/// An ordered set of panels shown as tabs, one of which is active
#[derive(Debug, Clone)]
pub struct TabGroupNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) panels: Vec<NodeId>,
    pub(crate) active_panel: Option<NodeId>,
}

impl TabGroupNode {
    pub(crate) fn new() -> Self {
        Self::with_id(NodeId::generate())
    }

    pub(crate) fn with_id(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            panels: Vec::new(),
            active_panel: None,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    /// Panel ids in tab order
    pub fn panels(&self) -> &[NodeId] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn contains(&self, panel: &NodeId) -> bool {
        self.panels.contains(panel)
    }

    pub fn index_of(&self, panel: &NodeId) -> Option<usize> {
        self.panels.iter().position(|id| id == panel)
    }

    pub fn active_panel_id(&self) -> Option<&NodeId> {
        self.active_panel.as_ref()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_panel.as_ref().and_then(|id| self.index_of(id))
    }

    /// Insert at `index`, appending when the index is absent or out of range.
    /// Returns the position the panel ended up at.
    pub(crate) fn insert_panel(&mut self, panel: NodeId, index: Option<usize>) -> usize {
        let at = match index {
            Some(i) if i < self.panels.len() => i,
            _ => self.panels.len(),
        };
        self.panels.insert(at, panel);
        self.panels_changed();
        at
    }

    pub(crate) fn remove_panel(&mut self, panel: &NodeId) -> Option<usize> {
        let index = self.index_of(panel)?;
        self.panels.remove(index);
        self.panels_changed();
        Some(index)
    }

    /// Move the tab at `from` to `to`; membership and the active tab are unchanged
    pub(crate) fn move_panel(&mut self, from: usize, to: usize) {
        if from >= self.panels.len() {
            return;
        }
        let panel = self.panels.remove(from);
        let to = to.min(self.panels.len());
        self.panels.insert(to, panel);
    }

    /// Returns false when `panel` is not a member.
    pub(crate) fn set_active(&mut self, panel: &NodeId) -> bool {
        if !self.contains(panel) {
            return false;
        }
        self.active_panel = Some(panel.clone());
        true
    }

    /// Keep `active_panel` pointing at a member after the list changed
    fn panels_changed(&mut self) {
        let active_is_member = self
            .active_panel
            .as_ref()
            .is_some_and(|active| self.panels.contains(active));
        if !active_is_member {
            self.active_panel = self.panels.first().cloned();
        }
    }
}

// ============================================================================
// Split
// ============================================================================

pub const DEFAULT_MIN_PANE_SIZE: f32 = 100.0;

/// Divides its space between exactly two children along one axis
#[derive(Debug, Clone)]
pub struct SplitNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub orientation: Orientation,
    pub(crate) first: Option<NodeId>,
    pub(crate) second: Option<NodeId>,
    /// Fraction of the space given to the first child, in [0, 1]
    pub(crate) ratio: f32,
    /// Pixel floors enforced by the view layer
    pub min_first_size: f32,
    pub min_second_size: f32,
}

impl SplitNode {
    pub(crate) fn new(orientation: Orientation, ratio: f32) -> Self {
        Self {
            id: NodeId::generate(),
            parent: None,
            orientation,
            first: None,
            second: None,
            ratio: ratio.clamp(0.0, 1.0),
            min_first_size: DEFAULT_MIN_PANE_SIZE,
            min_second_size: DEFAULT_MIN_PANE_SIZE,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    pub fn first(&self) -> Option<&NodeId> {
        self.first.as_ref()
    }

    pub fn second(&self) -> Option<&NodeId> {
        self.second.as_ref()
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn child(&self, slot: SplitSlot) -> Option<&NodeId> {
        match slot {
            SplitSlot::First => self.first.as_ref(),
            SplitSlot::Second => self.second.as_ref(),
        }
    }

    pub(crate) fn child_mut(&mut self, slot: SplitSlot) -> &mut Option<NodeId> {
        match slot {
            SplitSlot::First => &mut self.first,
            SplitSlot::Second => &mut self.second,
        }
    }

    /// Which slot holds `child`
    pub fn slot_of(&self, child: &NodeId) -> Option<SplitSlot> {
        if self.first.as_ref() == Some(child) {
            Some(SplitSlot::First)
        } else if self.second.as_ref() == Some(child) {
            Some(SplitSlot::Second)
        } else {
            None
        }
    }

    /// The other child of this split
    pub fn sibling_of(&self, child: &NodeId) -> Option<&NodeId> {
        self.slot_of(child)
            .and_then(|slot| self.child(slot.other()))
    }
}

// ============================================================================
// Node sum type
// ============================================================================

/// A node in the layout tree
#[derive(Debug, Clone)]
pub enum DockNode {
    Panel(PanelNode),
    TabGroup(TabGroupNode),
    Split(SplitNode),
}

impl DockNode {
    pub fn id(&self) -> &NodeId {
        match self {
            DockNode::Panel(panel) => &panel.id,
            DockNode::TabGroup(group) => &group.id,
            DockNode::Split(split) => &split.id,
        }
    }

    pub fn parent(&self) -> Option<&NodeId> {
        match self {
            DockNode::Panel(panel) => panel.parent.as_ref(),
            DockNode::TabGroup(group) => group.parent.as_ref(),
            DockNode::Split(split) => split.parent.as_ref(),
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            DockNode::Panel(panel) => panel.parent = parent,
            DockNode::TabGroup(group) => group.parent = parent,
            DockNode::Split(split) => split.parent = parent,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            DockNode::Panel(_) => NodeKind::Panel,
            DockNode::TabGroup(_) => NodeKind::TabGroup,
            DockNode::Split(_) => NodeKind::Split,
        }
    }

    /// Child ids in order (panels in tab order, split children first then second)
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            DockNode::Panel(_) => Vec::new(),
            DockNode::TabGroup(group) => group.panels.clone(),
            DockNode::Split(split) => split
                .first
                .iter()
                .chain(split.second.iter())
                .cloned()
                .collect(),
        }
    }

    pub fn as_panel(&self) -> Option<&PanelNode> {
        match self {
            DockNode::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn as_tab_group(&self) -> Option<&TabGroupNode> {
        match self {
            DockNode::TabGroup(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_split(&self) -> Option<&SplitNode> {
        match self {
            DockNode::Split(split) => Some(split),
            _ => None,
        }
    }

    pub(crate) fn as_panel_mut(&mut self) -> Option<&mut PanelNode> {
        match self {
            DockNode::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    pub(crate) fn as_tab_group_mut(&mut self) -> Option<&mut TabGroupNode> {
        match self {
            DockNode::TabGroup(group) => Some(group),
            _ => None,
        }
    }

    pub(crate) fn as_split_mut(&mut self) -> Option<&mut SplitNode> {
        match self {
            DockNode::Split(split) => Some(split),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = NodeId::generate();
        let b = NodeId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_content_factory_runs_once_until_invalidated() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let content = PanelContent::new(move || {
            counter.set(counter.get() + 1);
            String::from("body")
        });

        assert!(!content.is_created());
        assert_eq!(content.get_as::<String>().as_deref(), Some(&"body".to_string()));
        assert_eq!(content.get_as::<String>().as_deref(), Some(&"body".to_string()));
        assert_eq!(calls.get(), 1);

        content.invalidate();
        assert!(!content.is_created());
        content.get();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_content_without_factory() {
        let content = PanelContent::default();
        assert!(content.get().is_none());
        assert!(content.get_as::<u32>().is_none());
    }

    #[test]
    fn test_group_active_follows_membership() {
        let mut group = TabGroupNode::new();
        let a = NodeId::from("a");
        let b = NodeId::from("b");

        // 0 -> 1 panels makes the first panel active
        group.insert_panel(a.clone(), None);
        assert_eq!(group.active_panel_id(), Some(&a));

        group.insert_panel(b.clone(), None);
        assert_eq!(group.active_panel_id(), Some(&a));

        // Removing the active panel promotes the first remaining one
        group.remove_panel(&a);
        assert_eq!(group.active_panel_id(), Some(&b));

        group.remove_panel(&b);
        assert_eq!(group.active_panel_id(), None);
    }

    #[test]
    fn test_group_insert_out_of_range_appends() {
        let mut group = TabGroupNode::new();
        group.insert_panel(NodeId::from("a"), None);
        assert_eq!(group.insert_panel(NodeId::from("b"), Some(10)), 1);
        assert_eq!(group.insert_panel(NodeId::from("c"), Some(0)), 0);
        let order: Vec<&str> = group.panels().iter().map(NodeId::as_str).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_split_sibling_lookup() {
        let mut split = SplitNode::new(Orientation::Horizontal, 0.5);
        split.first = Some(NodeId::from("left"));
        split.second = Some(NodeId::from("right"));

        assert_eq!(
            split.sibling_of(&NodeId::from("left")),
            Some(&NodeId::from("right"))
        );
        assert_eq!(split.slot_of(&NodeId::from("right")), Some(SplitSlot::Second));
        assert_eq!(split.sibling_of(&NodeId::from("other")), None);
    }

    #[test]
    fn test_split_ratio_is_clamped() {
        assert_eq!(SplitNode::new(Orientation::Vertical, 1.5).ratio(), 1.0);
        assert_eq!(SplitNode::new(Orientation::Vertical, -0.2).ratio(), 0.0);
    }
}
