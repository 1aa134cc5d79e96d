// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Immutable processing graphs.
//!
//! A [`Topology`] is built once by a [`TopologyBuilder`] (or from a config file
//! through [`crate::config::TopologyFactory`]) and only read after that. The
//! driver looks up source nodes by topic, walks nodes in declaration order for
//! initialization and punctuation, and instantiates the declared state stores.

mod builder;
mod node;
pub mod validation;

use std::collections::HashMap;
use std::fmt;

pub use builder::TopologyBuilder;
pub use node::{NodeId, NodeKind, ProcessorNode};
pub use validation::{validate_topology, NodeOutline, NodeRole, StoreOutline};

use crate::traits::StateStoreSupplier;

pub struct Topology {
    pub(crate) nodes: Vec<ProcessorNode>,
    pub(crate) sources: HashMap<String, NodeId>,
    pub(crate) store_suppliers: Vec<Box<dyn StateStoreSupplier>>,
}

impl Topology {
    /// The source node consuming `topic`.
    pub fn source(&self, topic: &str) -> Option<NodeId> {
        self.sources.get(topic).copied()
    }

    /// # Panics
    /// If `id` did not come from this topology.
    pub fn node(&self, id: NodeId) -> &ProcessorNode {
        &self.nodes[id.0]
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(NodeId)
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ProcessorNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn source_topics(&self) -> impl Iterator<Item = &String> {
        self.sources.keys()
    }

    pub fn store_suppliers(&self) -> impl Iterator<Item = &(dyn StateStoreSupplier + 'static)> {
        self.store_suppliers.iter().map(|s| &**s)
    }
}

impl fmt::Debug for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topology")
            .field("nodes", &self.nodes)
            .field("sources", &self.sources)
            .field(
                "stores",
                &self.store_suppliers.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
