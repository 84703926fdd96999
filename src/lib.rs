//! Dockable - layout tree for dockable panels
//!
//! This crate provides the core types and logic for arranging panels into tab
//! groups and splits, implementing the Elm Architecture pattern: a model, the
//! messages that change it, and the commands those changes produce.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod debug_dump;
pub mod drag;
pub mod drop_zone;
pub mod error;
pub mod geometry;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::DockConfig;
pub use drop_zone::DockZone;
pub use error::DockError;
pub use messages::Msg;
pub use model::{AppModel, LayoutModel, NodeId, PanelNode};
pub use update::DockOutcome;
