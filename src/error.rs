//! Errors raised by the dock operation engine
//!
//! Two kinds of failure exist: argument errors (a required node is absent or
//! of the wrong kind) and invariant violations (the request would break the
//! tree's structural rules). Both are raised before any mutation happens.
//! "Nothing to do" conditions are not errors; they surface as
//! [`DockOutcome::Unchanged`](crate::update::dock::DockOutcome).

use thiserror::Error;

use crate::model::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DockError {
    #[error("node {0} does not exist in the layout")]
    NodeNotFound(NodeId),

    #[error("node {0} is not a tab group")]
    NotATabGroup(NodeId),

    #[error("node {0} is not a split")]
    NotASplit(NodeId),

    #[error("node {0} is not a panel")]
    NotAPanel(NodeId),

    #[error("node {0} cannot be used as a dock target")]
    InvalidDockTarget(NodeId),

    #[error("a node with id {0} is already registered")]
    DuplicateId(NodeId),

    #[error("tab group {group} already contains panel {panel}")]
    DuplicatePanelInGroup { group: NodeId, panel: NodeId },

    #[error("panel {panel} is not a member of tab group {group}")]
    PanelNotInGroup { group: NodeId, panel: NodeId },

    #[error("center drop on {0} requires a tab group target")]
    CenterRequiresTabGroup(NodeId),

    #[error("cannot dock node {0} onto itself")]
    DockOntoSelf(NodeId),

    #[error("cannot dock {panel} onto {target}: target is inside the dragged node")]
    DockOntoDescendant { panel: NodeId, target: NodeId },

    #[error("layout tree is invalid: {0}")]
    InvalidTree(String),
}

impl DockError {
    /// Missing or wrongly-typed required node
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            DockError::NodeNotFound(_)
                | DockError::NotATabGroup(_)
                | DockError::NotASplit(_)
                | DockError::NotAPanel(_)
                | DockError::InvalidDockTarget(_)
        )
    }

    /// Request would break a structural rule of the tree
    pub fn is_invariant_violation(&self) -> bool {
        !self.is_argument_error()
    }
}
