use crate::model::NodeId;
use std::fmt;

/// A recoverable problem found in an analysis result.
///
/// None of these abort a recompute; they are collected so the host can
/// surface them next to the rendered map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An input record could not be turned into a node and was skipped.
    RejectedRecord { index: usize, reason: String },
    DuplicateId { id: NodeId },
    RootParentDropped { id: NodeId, parent_id: NodeId },
    /// `parent_id` names a node that is not in the result; treated as a root.
    DanglingParent { id: NodeId, parent_id: NodeId },
    /// The ancestor walk exceeded its bound; the node was shown anyway.
    CycleDetected { id: NodeId },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RejectedRecord { index, reason } => {
                write!(f, "record {} rejected: {}", index, reason)
            }
            Diagnostic::DuplicateId { id } => write!(f, "duplicate node id {}", id),
            Diagnostic::RootParentDropped { id, parent_id } => {
                write!(f, "root node {} had parent {}, ignored", id, parent_id)
            }
            Diagnostic::DanglingParent { id, parent_id } => {
                write!(f, "node {} has unknown parent {}, shown as root", id, parent_id)
            }
            Diagnostic::CycleDetected { id } => {
                write!(f, "node {} sits on a parent cycle", id)
            }
        }
    }
}
