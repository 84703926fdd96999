//! Pointer-driven drag flows, end to end through `update`

mod common;

use common::{active_of, assert_tree_ok, id, root_id, tabs, tabs_with, test_model};
use dockable::commands::Cmd;
use dockable::debug_dump::outline;
use dockable::drop_zone::{DockZone, DropKind};
use dockable::messages::{AppMsg, DockMsg, DragMsg, Msg};
use dockable::model::{AppModel, DockNode};
use dockable::update::update;

/// Press, move through `path`, release at the last point
fn drag(model: &mut AppModel, from: (f32, f32), path: &[(f32, f32)]) -> Option<Cmd> {
    update(model, Msg::pointer_down(from.0, from.1));
    for (x, y) in path {
        update(model, Msg::pointer_moved(*x, *y));
    }
    let (x, y) = path.last().copied().unwrap_or(from);
    update(model, Msg::pointer_up(x, y))
}

fn split_c_right(model: &mut AppModel) {
    let root = root_id(&model.layout);
    let cmd = update(model, Msg::split_dock("c", root, DockZone::Right));
    assert_eq!(cmd, Some(Cmd::Redraw));
}

fn root_ratio(model: &AppModel) -> f32 {
    model
        .layout
        .root()
        .and_then(DockNode::as_split)
        .map(|split| split.ratio())
        .unwrap()
}

// ========================================================================
// Tab drags
// ========================================================================

#[test]
fn test_drag_tab_to_right_edge_splits() {
    let mut model = test_model(&["a", "b", "c"]);
    let root = root_id(&model.layout);

    let cmd = drag(&mut model, (130.0, 10.0), &[(300.0, 200.0), (790.0, 300.0)]);
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert!(model.drag.is_none());

    let split = model.layout.root().and_then(DockNode::as_split).unwrap();
    assert_eq!(split.first(), Some(&root));
    assert_eq!(tabs(&model.layout, &root), vec!["a", "c"]);
    assert_eq!(tabs_with(&model.layout, "b"), vec!["b"]);
    // The frame follows the tree
    assert_eq!(model.frame.version, model.layout.version());
    assert_eq!(model.frame.groups.len(), 2);
    assert_tree_ok(&model.layout);
}

#[test]
fn test_drag_within_strip_reorders() {
    let mut model = test_model(&["a", "b", "c"]);
    let root = root_id(&model.layout);

    drag(&mut model, (10.0, 10.0), &[(150.0, 12.0), (250.0, 12.0)]);
    assert_eq!(tabs(&model.layout, &root), vec!["b", "a", "c"]);
    assert_eq!(active_of(&model.layout, &root).as_deref(), Some("a"));
}

#[test]
fn test_drag_to_other_strip_moves_tab() {
    let mut model = test_model(&["a", "b", "c"]);
    split_c_right(&mut model);
    let root = model.layout.group_of(&id("a")).cloned().unwrap();
    let c_group = model.layout.group_of(&id("c")).cloned().unwrap();

    drag(&mut model, (10.0, 10.0), &[(300.0, 10.0), (600.0, 10.0)]);
    assert_eq!(tabs(&model.layout, &c_group), vec!["a", "c"]);
    assert_eq!(tabs(&model.layout, &root), vec!["b"]);
    assert_eq!(active_of(&model.layout, &c_group).as_deref(), Some("a"));
    assert_tree_ok(&model.layout);
}

#[test]
fn test_drag_last_tab_out_collapses_its_group() {
    let mut model = test_model(&["a", "b", "c"]);
    split_c_right(&mut model);
    let root = model.layout.group_of(&id("a")).cloned().unwrap();

    // c into the centre of the left group
    drag(&mut model, (570.0, 10.0), &[(400.0, 200.0), (280.0, 300.0)]);
    assert_eq!(model.layout.root_id(), Some(&root));
    assert_eq!(tabs(&model.layout, &root), vec!["a", "b", "c"]);
    assert!(model.frame.splitters.is_empty());
    assert_tree_ok(&model.layout);
}

#[test]
fn test_target_preview_follows_pointer() {
    let mut model = test_model(&["a", "b"]);
    update(&mut model, Msg::pointer_down(130.0, 10.0));

    let cmd = update(&mut model, Msg::pointer_moved(790.0, 300.0));
    assert_eq!(cmd, Some(Cmd::Redraw));
    let target = model.drag.as_ref().and_then(|s| s.target.clone()).unwrap();
    assert_eq!(target.kind, DropKind::Zone(DockZone::Right));

    // Same target again: nothing to redraw
    assert_eq!(update(&mut model, Msg::pointer_moved(791.0, 300.0)), None);

    update(&mut model, Msg::pointer_moved(400.0, 300.0));
    assert!(model.drag.as_ref().unwrap().target.is_none());
}

#[test]
fn test_escape_cancels_without_mutation() {
    let mut model = test_model(&["a", "b", "c"]);
    let version = model.layout.version();
    let before = outline(&model.layout);

    update(&mut model, Msg::pointer_down(130.0, 10.0));
    update(&mut model, Msg::pointer_moved(790.0, 300.0));
    assert_eq!(update(&mut model, Msg::Drag(DragMsg::Cancel)), Some(Cmd::Redraw));
    assert!(model.drag.is_none());

    // A late release is ignored
    assert_eq!(update(&mut model, Msg::pointer_up(790.0, 300.0)), None);
    assert_eq!(model.layout.version(), version);
    assert_eq!(outline(&model.layout), before);
}

#[test]
fn test_poll_without_button_cancels() {
    let mut model = test_model(&["a", "b", "c"]);
    let version = model.layout.version();

    update(&mut model, Msg::pointer_down(130.0, 10.0));
    update(&mut model, Msg::pointer_moved(500.0, 300.0));
    update(
        &mut model,
        Msg::Drag(DragMsg::PointerMoved {
            position: dockable::geometry::Point::new(790.0, 300.0),
            buttons_down: false,
        }),
    );
    assert!(model.drag.is_none());
    assert_eq!(update(&mut model, Msg::pointer_up(790.0, 300.0)), None);
    assert_eq!(model.layout.version(), version);
}

#[test]
fn test_click_activates_tab() {
    let mut model = test_model(&["a", "b", "c"]);
    let root = root_id(&model.layout);

    // Wobble below the 4px threshold
    let cmd = drag(&mut model, (130.0, 10.0), &[(131.0, 11.0), (132.0, 10.0)]);
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(active_of(&model.layout, &root).as_deref(), Some("b"));
    assert_eq!(tabs(&model.layout, &root), vec!["a", "b", "c"]);
}

#[test]
fn test_drop_on_nothing_is_noop() {
    let mut model = test_model(&["a", "b"]);
    let version = model.layout.version();
    // Centre of the source group
    let cmd = drag(&mut model, (10.0, 10.0), &[(400.0, 300.0)]);
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(model.layout.version(), version);
    assert!(model.last_error.is_none());
}

#[test]
fn test_press_on_empty_space_starts_nothing() {
    let mut model = test_model(&["a"]);
    assert_eq!(update(&mut model, Msg::pointer_down(400.0, 300.0)), None);
    assert!(!model.is_dragging());
}

#[test]
fn test_only_one_drag_at_a_time() {
    let mut model = test_model(&["a", "b"]);
    update(&mut model, Msg::pointer_down(10.0, 10.0));
    let cmd = update(
        &mut model,
        Msg::Drag(DragMsg::BeginPanelDrag {
            panel: id("b"),
            position: dockable::geometry::Point::new(130.0, 10.0),
        }),
    );
    assert_eq!(cmd, None);
    assert_eq!(model.drag.as_ref().unwrap().panel, id("a"));
}

#[test]
fn test_begin_drag_of_unknown_panel_reports_error() {
    let mut model = test_model(&["a"]);
    let cmd = update(
        &mut model,
        Msg::Drag(DragMsg::BeginPanelDrag {
            panel: id("ghost"),
            position: dockable::geometry::Point::new(10.0, 10.0),
        }),
    )
    .unwrap();
    assert!(cmd.error().is_some_and(|e| e.contains("ghost")));
    assert!(!model.is_dragging());
}

// ========================================================================
// Splitter drags
// ========================================================================

#[test]
fn test_splitter_preview_then_commit_once() {
    let mut model = test_model(&["a", "b", "c"]);
    split_c_right(&mut model);
    let version = model.layout.version();

    // Bar sits on x=560
    assert_eq!(update(&mut model, Msg::pointer_down(560.0, 300.0)), Some(Cmd::Redraw));
    assert!(model.splitter_drag.is_some());

    update(&mut model, Msg::pointer_moved(460.0, 300.0));
    update(&mut model, Msg::pointer_moved(360.0, 300.0));
    // Preview only
    assert_eq!(model.layout.version(), version);
    assert_eq!(root_ratio(&model), 0.7);
    let preview = model.splitter_drag.as_ref().unwrap().preview_ratio;
    assert!((preview - 0.45).abs() < 1e-5);

    assert_eq!(update(&mut model, Msg::pointer_up(360.0, 300.0)), Some(Cmd::Redraw));
    assert_eq!(model.layout.version(), version + 1);
    assert!((root_ratio(&model) - 0.45).abs() < 1e-5);
    assert!(model.splitter_drag.is_none());
}

#[test]
fn test_splitter_cancel_discards_preview() {
    let mut model = test_model(&["a", "b", "c"]);
    split_c_right(&mut model);
    let version = model.layout.version();

    update(&mut model, Msg::pointer_down(560.0, 300.0));
    update(&mut model, Msg::pointer_moved(200.0, 300.0));
    update(&mut model, Msg::Drag(DragMsg::Cancel));
    update(&mut model, Msg::pointer_up(200.0, 300.0));

    assert_eq!(root_ratio(&model), 0.7);
    assert_eq!(model.layout.version(), version);
}

#[test]
fn test_splitter_respects_min_pane_size() {
    let mut model = test_model(&["a", "b", "c"]);
    split_c_right(&mut model);

    update(&mut model, Msg::pointer_down(560.0, 300.0));
    update(&mut model, Msg::pointer_moved(2000.0, 300.0));
    update(&mut model, Msg::pointer_up(2000.0, 300.0));
    // 100px floor on the second side of an 800px split
    assert!((root_ratio(&model) - 0.875).abs() < 1e-5);
}

#[test]
fn test_splitter_click_without_motion_is_noop() {
    let mut model = test_model(&["a", "b", "c"]);
    split_c_right(&mut model);
    let version = model.layout.version();

    update(&mut model, Msg::pointer_down(560.0, 300.0));
    assert_eq!(update(&mut model, Msg::pointer_up(560.0, 300.0)), Some(Cmd::Redraw));
    assert_eq!(model.layout.version(), version);
}

// ========================================================================
// Dispatcher
// ========================================================================

#[test]
fn test_rejected_operation_surfaces_error() {
    let mut model = test_model(&["a", "b"]);
    let version = model.layout.version();

    let cmd = update(
        &mut model,
        Msg::Dock(DockMsg::ReorderTab {
            panel: id("a"),
            group: id("missing"),
            index: Some(0),
        }),
    )
    .unwrap();
    assert!(matches!(cmd, Cmd::ShowError(_)));
    assert!(model.last_error.as_deref().is_some_and(|e| e.contains("missing")));
    assert_eq!(model.layout.version(), version);

    assert_eq!(
        update(&mut model, Msg::App(AppMsg::DismissError)),
        Some(Cmd::Redraw)
    );
    assert!(model.last_error.is_none());
    assert_eq!(update(&mut model, Msg::App(AppMsg::DismissError)), None);
}

#[test]
fn test_noop_operation_returns_nothing() {
    let mut model = test_model(&["a", "b"]);
    assert_eq!(update(&mut model, Msg::Dock(DockMsg::ActivatePanel(id("a")))), None);
    assert_eq!(update(&mut model, Msg::Dock(DockMsg::CleanupEmptyNodes)), None);
}

#[test]
fn test_resize_relayouts() {
    let mut model = test_model(&["a", "b", "c"]);
    split_c_right(&mut model);

    assert_eq!(update(&mut model, Msg::resize(1000, 500)), Some(Cmd::Redraw));
    let c_group = model.layout.group_of(&id("c")).unwrap();
    let frame = model.frame.group(c_group).unwrap();
    assert_eq!(frame.bounds.x, 700.0);
    assert_eq!(frame.bounds.height, 500.0);
}

#[test]
fn test_dump_request_becomes_command() {
    let mut model = test_model(&["a"]);
    assert_eq!(
        update(&mut model, Msg::App(AppMsg::DumpLayout(None))),
        Some(Cmd::WriteDump { path: None })
    );
}
