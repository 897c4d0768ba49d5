//! Document error types

use thiserror::Error;

use crate::node::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node is not an element: {0}")]
    NotAnElement(NodeId),

    #[error("Cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
