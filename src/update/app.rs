//! App message handlers (window events, diagnostics)

use crate::commands::Cmd;
use crate::geometry::Rect;
use crate::messages::AppMsg;
use crate::model::AppModel;

/// Handle app messages (window events, diagnostics)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize(width, height) => {
            model.set_area(Rect::new(0.0, 0.0, width as f32, height as f32));
            Some(Cmd::Redraw)
        }

        AppMsg::DumpLayout(path) => Some(Cmd::WriteDump { path }),

        AppMsg::DismissError => model.last_error.take().map(|_| Cmd::Redraw),
    }
}
