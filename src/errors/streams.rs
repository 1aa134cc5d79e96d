// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while building, driving and tearing down a topology.

use crate::errors::ValidationError;

/// Failure of a driver call, a node's processing logic, or topology construction.
///
/// Every variant is fatal to the call that produced it. The engine never
/// retries and never suppresses one of these; it only restores its cursor
/// before handing the error back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StreamsError {
    /// No source node consumes the given topic.
    #[error("no source node is bound to topic '{0}'")]
    UnknownSource(String),

    /// An indexed forward named a child position the node doesn't have.
    #[error("node '{node}' has no child at index {index} ({child_count} children)")]
    ChildIndexOutOfRange {
        node: String,
        index: usize,
        child_count: usize,
    },

    /// A forward was attempted while no node was active.
    #[error("forward called with no active node")]
    NoActiveNode,

    /// A state store lookup named a store that was never registered.
    #[error("state store '{0}' is not registered")]
    StoreNotFound(String),

    /// A typed store lookup found a store of a different concrete type.
    #[error("state store '{name}' is not a {expected}")]
    StoreTypeMismatch {
        name: String,
        expected: &'static str,
    },

    /// A store with this name is already registered.
    #[error("state store '{0}' is already registered")]
    DuplicateStore(String),

    /// A state store refused to initialize.
    #[error("failed to initialize state store '{store}': {reason}")]
    StoreInitFailed { store: String, reason: String },

    /// A processing unit reported a failure of its own.
    #[error("processor at node '{node}' failed: {reason}")]
    ProcessorFailed { node: String, reason: String },

    /// The optional recursion guard tripped.
    #[error("cascade depth limit of {limit} exceeded entering node '{node}'")]
    CascadeDepthExceeded { limit: usize, node: String },

    /// A driver setting is out of range.
    #[error("invalid driver config: {0}")]
    InvalidDriverConfig(String),

    /// The topology failed validation while being built.
    #[error("invalid topology: {}", join_errors(.0))]
    InvalidTopology(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_topology_lists_every_problem() {
        let err = StreamsError::InvalidTopology(vec![
            ValidationError::DuplicateNodeName {
                node: "a".to_string(),
            },
            ValidationError::UnresolvedParent {
                node: "b".to_string(),
                missing_parent: "ghost".to_string(),
            },
        ]);

        let message = err.to_string();
        assert!(message.contains("Duplicate node name: 'a'"));
        assert!(message.contains("Node 'b' has parent 'ghost' which does not exist"));
    }

    #[test]
    fn index_error_names_the_node() {
        let err = StreamsError::ChildIndexOutOfRange {
            node: "splitter".to_string(),
            index: 3,
            child_count: 2,
        };
        assert_eq!(
            err.to_string(),
            "node 'splitter' has no child at index 3 (2 children)"
        );
    }
}
