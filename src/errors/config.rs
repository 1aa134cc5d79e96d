// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors that can occur during topology validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A cycle was detected in the node graph
    CyclicTopology {
        /// The cycle path, closed by repeating the first node
        cycle: Vec<String>,
    },
    /// A node names a parent that doesn't exist
    UnresolvedParent {
        /// The node with the unresolved parent
        node: String,
        /// The parent that couldn't be resolved
        missing_parent: String,
    },
    /// Two nodes share a name
    DuplicateNodeName {
        /// The duplicate node name
        node: String,
    },
    /// Two state stores share a name
    DuplicateStoreName {
        /// The duplicate store name
        store: String,
    },
    /// A source node was given parents
    SourceWithParents {
        /// The offending source node
        node: String,
    },
    /// A sink node was used as a parent; sinks are terminal
    SinkAsParent {
        /// The child that names the sink as parent
        node: String,
        /// The sink node
        sink: String,
    },
    /// A topic is bound to more than one source node
    DuplicateSourceTopic {
        /// The shared topic
        topic: String,
        /// The source that claimed the topic first
        first: String,
        /// The source that tried to claim it again
        second: String,
    },
    /// A state store is connected to a node that doesn't exist
    UnknownStoreNode {
        /// The store being connected
        store: String,
        /// The missing node
        node: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CyclicTopology { cycle } => {
                write!(f, "Cycle detected in topology: {}", cycle.join(" -> "))
            }
            ValidationError::UnresolvedParent {
                node,
                missing_parent,
            } => {
                write!(
                    f,
                    "Node '{}' has parent '{}' which does not exist",
                    node, missing_parent
                )
            }
            ValidationError::DuplicateNodeName { node } => {
                write!(f, "Duplicate node name: '{}'", node)
            }
            ValidationError::DuplicateStoreName { store } => {
                write!(f, "Duplicate state store name: '{}'", store)
            }
            ValidationError::SourceWithParents { node } => {
                write!(f, "Source node '{}' cannot have parents", node)
            }
            ValidationError::SinkAsParent { node, sink } => {
                write!(
                    f,
                    "Node '{}' names sink '{}' as a parent; sinks cannot have children",
                    node, sink
                )
            }
            ValidationError::DuplicateSourceTopic {
                topic,
                first,
                second,
            } => {
                write!(
                    f,
                    "Topic '{}' is bound to source '{}' and again to source '{}'",
                    topic, first, second
                )
            }
            ValidationError::UnknownStoreNode { store, node } => {
                write!(
                    f,
                    "State store '{}' is connected to node '{}' which does not exist",
                    store, node
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
