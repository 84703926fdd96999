//! Demo binary: build a layout, replay scripted operations, print the tree

use anyhow::{Context, Result};
use clap::Parser;

use dockable::cli::{CliArgs, ScriptedDrag};
use dockable::commands::Cmd;
use dockable::config::DockConfig;
use dockable::debug_dump::{outline, LayoutDump};
use dockable::messages::{DockMsg, DragMsg, Msg};
use dockable::model::{AppModel, LayoutModel, NodeId, PanelNode};
use dockable::update::update;

/// Pointer polls sent between press and release of a scripted drag
const DRAG_STEPS: usize = 8;

fn main() -> Result<()> {
    dockable::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let config = match &startup.config_path {
        Some(path) => DockConfig::load_from(path).map_err(anyhow::Error::msg)?,
        None => DockConfig::load(),
    };

    let layout = LayoutModel::with_panels(
        startup
            .panels
            .iter()
            .map(|id| PanelNode::new(id.as_str(), title_for(id))),
    )
    .context("Failed to build initial layout")?;
    let mut model = AppModel::new(layout, config, startup.area);

    for split in &startup.splits {
        let root = model
            .layout
            .root_id()
            .cloned()
            .context("Layout has no root")?;
        dispatch(
            &mut model,
            Msg::Dock(DockMsg::SplitDock {
                panel: NodeId::from(split.panel.as_str()),
                target: root,
                zone: split.zone,
            }),
        )?;
    }

    for drag in &startup.drags {
        replay_drag(&mut model, drag)?;
    }

    print!("{}", outline(&model.layout));
    if let Some(error) = &model.last_error {
        eprintln!("last error: {}", error);
    }

    if let Some(path) = startup.dump {
        dispatch(&mut model, Msg::App(dockable::messages::AppMsg::DumpLayout(path)))?;
    }

    Ok(())
}

/// Press, move in steps, release
fn replay_drag(model: &mut AppModel, drag: &ScriptedDrag) -> Result<()> {
    dispatch(model, Msg::Drag(DragMsg::PointerDown(drag.from)))?;
    for step in 1..=DRAG_STEPS {
        let t = step as f32 / DRAG_STEPS as f32;
        let x = drag.from.x + (drag.to.x - drag.from.x) * t;
        let y = drag.from.y + (drag.to.y - drag.from.y) * t;
        dispatch(model, Msg::pointer_moved(x, y))?;
    }
    dispatch(model, Msg::Drag(DragMsg::PointerUp(drag.to)))
}

/// Run one message through update and perform the resulting side effects
fn dispatch(model: &mut AppModel, msg: Msg) -> Result<()> {
    if let Some(cmd) = update(model, msg) {
        perform(model, cmd)?;
    }
    Ok(())
}

fn perform(model: &AppModel, cmd: Cmd) -> Result<()> {
    match cmd {
        Cmd::None | Cmd::Redraw => {}
        Cmd::ShowError(message) => eprintln!("error: {}", message),
        Cmd::WriteDump { path } => {
            let written = LayoutDump::from_model(model)
                .save(path.as_deref())
                .map_err(anyhow::Error::msg)?;
            println!("dump written to {}", written.display());
        }
        Cmd::Batch(cmds) => {
            for cmd in cmds {
                perform(model, cmd)?;
            }
        }
    }
    Ok(())
}

/// `terminal` -> `Terminal`
fn title_for(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
