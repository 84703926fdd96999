//! Layout message handlers (docking, tabs, splits)

use crate::commands::Cmd;
use crate::messages::DockMsg;
use crate::model::AppModel;

use super::dock::{self, DockOutcome};
use super::report;

/// Handle tree operation messages
pub fn update_layout(model: &mut AppModel, msg: DockMsg) -> Option<Cmd> {
    let layout = &mut model.layout;
    let result = match msg {
        DockMsg::DockAsTab {
            panel,
            group,
            index,
        } => dock::dock_as_tab(layout, &panel, &group, index),

        DockMsg::SplitDock {
            panel,
            target,
            zone,
        } => dock::split_dock(layout, &panel, &target, zone),

        DockMsg::MoveTab {
            panel,
            group,
            index,
        } => dock::move_tab(layout, &panel, &group, index),

        DockMsg::ReorderTab {
            panel,
            group,
            index,
        } => dock::reorder_tab(layout, &panel, &group, index),

        DockMsg::RemovePanel(panel) => dock::remove_panel(layout, &panel).map(|removed| {
            if removed.is_some() {
                DockOutcome::Applied
            } else {
                DockOutcome::Unchanged
            }
        }),

        DockMsg::ActivatePanel(panel) => dock::activate_panel(layout, &panel),

        DockMsg::SetSplitRatio { split, ratio } => dock::set_split_ratio(layout, &split, ratio),

        DockMsg::SetPanelTitle { panel, title } => layout
            .set_panel_title(&panel, title)
            .map(|()| DockOutcome::Applied),

        DockMsg::CleanupEmptyNodes => dock::cleanup_empty_nodes(layout).map(|removed| {
            if removed > 0 {
                DockOutcome::Applied
            } else {
                DockOutcome::Unchanged
            }
        }),
    };

    report(model, result)
}
