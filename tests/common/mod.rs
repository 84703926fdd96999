//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dockable::config::DockConfig;
use dockable::geometry::Rect;
use dockable::model::{AppModel, DockNode, LayoutModel, NodeId, PanelNode, TabGroupNode};

/// Window area used by model-level tests
pub const AREA: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 800.0,
    height: 600.0,
};

pub fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

/// Layout whose root group holds `panels` (titles are the upper-cased ids)
pub fn test_layout(panels: &[&str]) -> LayoutModel {
    LayoutModel::with_panels(panels.iter().map(|p| PanelNode::new(*p, p.to_uppercase())))
        .expect("valid bootstrap layout")
}

/// App model over [`test_layout`] in an 800x600 window
pub fn test_model(panels: &[&str]) -> AppModel {
    AppModel::new(test_layout(panels), DockConfig::default(), AREA)
}

pub fn root_id(layout: &LayoutModel) -> NodeId {
    layout.root_id().cloned().expect("layout has a root")
}

/// Panel ids of `group`, in tab order
pub fn tabs(layout: &LayoutModel, group: &NodeId) -> Vec<String> {
    layout
        .tab_group(group)
        .map(|g| g.panels().iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Panel ids of the group holding `panel`
pub fn tabs_with(layout: &LayoutModel, panel: &str) -> Vec<String> {
    match layout.group_of(&id(panel)) {
        Some(group) => tabs(layout, group),
        None => Vec::new(),
    }
}

pub fn active_of(layout: &LayoutModel, group: &NodeId) -> Option<String> {
    layout
        .tab_group(group)
        .and_then(TabGroupNode::active_panel_id)
        .map(ToString::to_string)
}

/// Assert every structural property a reachable tree must have
pub fn assert_tree_ok(layout: &LayoutModel) {
    if let Err(err) = layout.check_invariants() {
        panic!("invalid tree: {}\n{}", err, dockable::debug_dump::outline(layout));
    }

    let mut seen = std::collections::HashSet::new();
    for panel in layout.get_all_panels() {
        assert!(seen.insert(panel.id().clone()), "duplicate panel {}", panel.id());
    }

    for node in layout.pre_order() {
        match node {
            DockNode::TabGroup(group) => {
                assert!(
                    !group.is_empty() || layout.root_id() == Some(group.id()),
                    "empty non-root group {}",
                    group.id()
                );
            }
            DockNode::Split(split) => {
                assert!(split.first().is_some() && split.second().is_some());
                assert!((0.0..=1.0).contains(&split.ratio()));
            }
            DockNode::Panel(_) => {}
        }
    }
}

/// Deterministic xorshift generator for monkey tests
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in `0..n` (n > 0)
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}
