//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// The tree or a drag preview changed; rebuild and redraw from the model
    Redraw,
    /// An operation was rejected; show the message to the user
    ShowError(String),
    /// Write a JSON dump of the tree
    WriteDump { path: Option<PathBuf> },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Error banners are part of the frame
            Cmd::ShowError(_) => true,
            Cmd::WriteDump { .. } => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// The error message carried by this command, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            Cmd::ShowError(message) => Some(message),
            Cmd::Batch(cmds) => cmds.iter().find_map(Cmd::error),
            _ => None,
        }
    }
}
