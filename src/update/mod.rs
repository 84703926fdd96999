//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
pub mod dock;
pub mod drag;
mod layout;

use crate::commands::Cmd;
use crate::error::DockError;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::TreeSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use dock::DockOutcome;
pub use drag::update_drag;
pub use layout::update_layout;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let version = model.layout.version();

    let result = match msg {
        Msg::Dock(m) => layout::update_layout(model, m),
        Msg::Drag(m) => drag::update_drag(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    // Subscribers only ever see the tree after a full mutation
    if model.layout.version() != version {
        model.relayout();
        return Some(with_redraw(result));
    }
    result
}

/// Make sure `cmd` asks for a redraw
fn with_redraw(cmd: Option<Cmd>) -> Cmd {
    match cmd {
        None | Some(Cmd::None) => Cmd::Redraw,
        Some(cmd) if cmd.needs_redraw() => cmd,
        Some(cmd) => Cmd::batch(vec![cmd, Cmd::Redraw]),
    }
}

/// Turn an engine result into a command, recording failures on the model
pub(crate) fn report(
    model: &mut AppModel,
    result: Result<DockOutcome, DockError>,
) -> Option<Cmd> {
    match result {
        Ok(DockOutcome::Applied) => {
            model.last_error = None;
            Some(Cmd::Redraw)
        }
        Ok(DockOutcome::Unchanged) => None,
        Err(err) => {
            tracing::warn!("Dock operation rejected: {}", err);
            let message = err.to_string();
            model.last_error = Some(message.clone());
            Some(Cmd::ShowError(message))
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures the tree shape before and after and logs the diff.
/// Pointer moves are too frequent to log individually.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::DragMsg;

    let is_noisy = matches!(&msg, Msg::Drag(DragMsg::PointerMoved { .. }));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = TreeSnapshot::from_layout(&model.layout);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = TreeSnapshot::from_layout(&model.layout);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "tree", %diff, "layout changed");
        if let Err(err) = model.layout.check_invariants() {
            tracing::error!(msg = %msg_name, "Layout invariant broken: {}", err);
        }
    }

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Example outputs:
/// - `Dock::RemovePanel(NodeId("a"))`
/// - `Drag::PointerUp(Point { x: 10.0, y: 4.0 })`
/// - `App::Resize(1920, 1080)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Dock(m) => format!("Dock::{:?}", m),
        Msg::Drag(m) => format!("Drag::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
