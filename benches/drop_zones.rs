//! Benchmarks for drop target resolution during a drag
//!
//! Run with: cargo bench drop_zones

mod support;
use support::make_model;

use dockable::drop_zone::{calculate_drop_zones, calculate_tab_index, get_drop_target_at_position};
use dockable::geometry::{Point, Rect};
use dockable::messages::Msg;
use dockable::model::NodeId;
use dockable::update::drag::resolve_drop_target;
use dockable::update::update;

fn main() {
    divan::main();
}

#[divan::bench]
fn zones_for_single_target() {
    divan::black_box(calculate_drop_zones(divan::black_box(Rect::new(
        0.0, 0.0, 1920.0, 1080.0,
    ))));
}

#[divan::bench(args = [4, 16, 64])]
fn tab_index(tabs: usize) {
    let rects: Vec<Rect> = (0..tabs)
        .map(|i| Rect::new(i as f32 * 120.0, 0.0, 120.0, 28.0))
        .collect();
    divan::black_box(calculate_tab_index(&rects, divan::black_box(250.0), Some(0)));
}

#[divan::bench(args = [1, 8, 32, 128])]
fn target_among_groups(bencher: divan::Bencher, groups: usize) {
    let model = make_model(groups, 2);
    let candidates: Vec<(NodeId, Rect)> = model
        .frame
        .groups
        .iter()
        .map(|group| (group.group.clone(), group.bounds))
        .collect();
    let metrics = model.config.zone_metrics();
    bencher.bench_local(|| {
        get_drop_target_at_position(&candidates, divan::black_box(Point::new(1900.0, 1000.0)), &metrics)
    });
}

/// One pointer poll of an active drag: the per-frame hot path
#[divan::bench(args = [1, 8, 32, 128])]
fn resolve_during_drag(bencher: divan::Bencher, groups: usize) {
    let mut model = make_model(groups, 2);
    update(&mut model, Msg::pointer_down(10.0, 10.0));
    update(&mut model, Msg::pointer_moved(400.0, 400.0));
    let metrics = model.config.zone_metrics();
    let Some(session) = model.drag.as_ref() else {
        return;
    };
    bencher.bench_local(|| {
        resolve_drop_target(
            &model.layout,
            &model.frame,
            session,
            divan::black_box(Point::new(1900.0, 1000.0)),
            &metrics,
        )
    });
}
