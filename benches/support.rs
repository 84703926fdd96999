//! Shared helpers for benchmarks

use dockable::config::DockConfig;
use dockable::drop_zone::DockZone;
use dockable::geometry::Rect;
use dockable::model::{AppModel, LayoutModel, NodeId, PanelNode};
use dockable::update::dock;

/// Layout with `groups` tab groups of `tabs_per_group` panels, built by
/// alternating right and bottom splits against the most recent group
#[allow(dead_code)]
pub fn make_layout(groups: usize, tabs_per_group: usize) -> LayoutModel {
    let panel_id = |g: usize, t: usize| format!("p{}_{}", g, t);
    let first = (0..tabs_per_group).map(|t| PanelNode::new(panel_id(0, t), panel_id(0, t)));
    let mut layout = LayoutModel::with_panels(first).expect("bootstrap layout");

    let mut last_group = layout.root_id().cloned().expect("root group");
    for g in 1..groups {
        let zone = if g % 2 == 0 {
            DockZone::Bottom
        } else {
            DockZone::Right
        };
        let lead = NodeId::from(panel_id(g, 0));
        layout
            .register_panel(PanelNode::new(lead.clone(), lead.to_string()))
            .expect("register panel");
        dock::split_dock(&mut layout, &lead, &last_group, zone).expect("split dock");
        last_group = layout.group_of(&lead).cloned().expect("new group");

        for t in 1..tabs_per_group {
            let id = NodeId::from(panel_id(g, t));
            layout
                .register_panel(PanelNode::new(id.clone(), id.to_string()))
                .expect("register panel");
            dock::dock_as_tab(&mut layout, &id, &last_group, None).expect("dock tab");
        }
    }
    layout
}

/// App model over [`make_layout`] in a 1920x1080 window
#[allow(dead_code)]
pub fn make_model(groups: usize, tabs_per_group: usize) -> AppModel {
    AppModel::new(
        make_layout(groups, tabs_per_group),
        DockConfig::default(),
        Rect::new(0.0, 0.0, 1920.0, 1080.0),
    )
}
