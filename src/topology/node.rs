// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::Datum;
use crate::topology::NodeRole;
use crate::traits::Processor;

/// Position of a node in its topology's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// What a node does when a record reaches it.
pub enum NodeKind {
    /// Forwards every record to its children unchanged.
    Source { topics: Vec<String> },
    /// Hands every record to its processing unit.
    Processor(Box<dyn Processor>),
    /// Sends every record to a topic through the record collector.
    Sink { topic: String },
}

impl NodeKind {
    pub fn role(&self) -> NodeRole {
        match self {
            NodeKind::Source { .. } => NodeRole::Source,
            NodeKind::Processor(_) => NodeRole::Processor,
            NodeKind::Sink { .. } => NodeRole::Sink,
        }
    }
}

/// One vertex of a built topology.
pub struct ProcessorNode {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<NodeId>,
    pub(crate) stores: Vec<String>,
}

impl ProcessorNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> NodeRole {
        self.kind.role()
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The processing unit, if this is not a pure routing node.
    pub fn processor(&self) -> Option<&dyn Processor> {
        match &self.kind {
            NodeKind::Processor(processor) => Some(&**processor),
            _ => None,
        }
    }

    /// Names of the state stores connected to this node.
    pub fn stores(&self) -> &[String] {
        &self.stores
    }

    pub(crate) fn init(&self, ctx: &mut ProcessorContext<'_>) -> Result<(), StreamsError> {
        match &self.kind {
            NodeKind::Processor(processor) => processor.init(ctx),
            NodeKind::Source { .. } | NodeKind::Sink { .. } => Ok(()),
        }
    }

    pub(crate) fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        match &self.kind {
            NodeKind::Source { .. } => ctx.forward(key, value),
            NodeKind::Processor(processor) => processor.process(ctx, key, value),
            NodeKind::Sink { topic } => ctx.send(topic, key, value),
        }
    }
}

impl fmt::Debug for ProcessorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ProcessorNode");
        debug.field("name", &self.name).field("role", &self.role());
        match &self.kind {
            NodeKind::Source { topics } => debug.field("topics", topics),
            NodeKind::Processor(processor) => debug.field("processor", &processor.name()),
            NodeKind::Sink { topic } => debug.field("topic", topic),
        };
        debug
            .field("children", &self.children)
            .field("stores", &self.stores)
            .finish()
    }
}
