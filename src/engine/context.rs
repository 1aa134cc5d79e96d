// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-driver execution state and the node-facing context over it.
//!
//! ## Cursor discipline
//!
//! The cursor names the node whose children a `forward` targets. It is only
//! ever moved by [`ProcessorContext::enter`], which hands back a
//! [`CursorGuard`]; dropping the guard puts the previous value back. Every exit
//! path (normal return, `?`, unwinding) therefore leaves the cursor exactly as
//! it was before the call that moved it, and nested forwards compose by plain
//! recursion on the call stack.

use std::any::type_name;
use std::ops::{Deref, DerefMut};

use crate::errors::StreamsError;
use crate::observability::messages::{engine::*, StructuredLog};
use crate::record::{Datum, ProducerRecord};
use crate::stores::StoreRegistry;
use crate::topology::{NodeId, Topology};
use crate::traits::{RecordCollector, StateStore};

/// Mutable state owned by one driver.
#[derive(Debug)]
pub(crate) struct ExecutionState {
    pub(crate) time: i64,
    pub(crate) cursor: Option<NodeId>,
    pub(crate) depth: usize,
    pub(crate) max_depth: Option<usize>,
    pub(crate) stores: StoreRegistry,
    pub(crate) output: Vec<ProducerRecord>,
}

impl ExecutionState {
    pub(crate) fn new(max_depth: Option<usize>) -> Self {
        Self {
            time: 0,
            cursor: None,
            depth: 0,
            max_depth,
            stores: StoreRegistry::new(),
            output: Vec::new(),
        }
    }
}

/// The view of the driver a node works through.
///
/// Handed to every [`Processor`](crate::traits::Processor) and
/// [`StateStore`] callback. Forwarding, sending and store access all go
/// through here.
pub struct ProcessorContext<'a> {
    topology: &'a Topology,
    collector: &'a dyn RecordCollector,
    state: &'a mut ExecutionState,
}

impl<'a> ProcessorContext<'a> {
    pub(crate) fn new(
        topology: &'a Topology,
        collector: &'a dyn RecordCollector,
        state: &'a mut ExecutionState,
    ) -> Self {
        Self {
            topology,
            collector,
            state,
        }
    }

    pub fn topology(&self) -> &'a Topology {
        self.topology
    }

    /// Current logical time.
    pub fn timestamp(&self) -> i64 {
        self.state.time
    }

    /// Name of the active node, if any.
    pub fn current_node(&self) -> Option<&'a str> {
        let topology = self.topology;
        self.state.cursor.map(|id| topology.node(id).name())
    }

    pub fn state_store(&self, name: &str) -> Option<&(dyn StateStore + 'static)> {
        self.state.stores.get(name)
    }

    pub fn state_store_mut(&mut self, name: &str) -> Option<&mut (dyn StateStore + 'static)> {
        self.state.stores.get_mut(name)
    }

    /// Typed read access to a registered store.
    pub fn store<S: StateStore>(&self, name: &str) -> Result<&S, StreamsError> {
        self.state
            .stores
            .get(name)
            .ok_or_else(|| StreamsError::StoreNotFound(name.to_string()))?
            .as_any()
            .downcast_ref::<S>()
            .ok_or_else(|| StreamsError::StoreTypeMismatch {
                name: name.to_string(),
                expected: type_name::<S>(),
            })
    }

    /// Typed write access to a registered store.
    pub fn store_mut<S: StateStore>(&mut self, name: &str) -> Result<&mut S, StreamsError> {
        self.state
            .stores
            .get_mut(name)
            .ok_or_else(|| StreamsError::StoreNotFound(name.to_string()))?
            .as_any_mut()
            .downcast_mut::<S>()
            .ok_or_else(|| StreamsError::StoreTypeMismatch {
                name: name.to_string(),
                expected: type_name::<S>(),
            })
    }

    pub fn all_state_stores(&self) -> &StoreRegistry {
        &self.state.stores
    }

    /// Build a processor failure attributed to the active node.
    pub fn fail(&self, reason: impl Into<String>) -> StreamsError {
        StreamsError::ProcessorFailed {
            node: self.current_node().unwrap_or("<none>").to_string(),
            reason: reason.into(),
        }
    }

    /// Inject a record at the source consuming `topic`.
    ///
    /// The source becomes the active node and its children receive the record.
    /// The whole downstream cascade, including anything looped back through
    /// [`send`](Self::send), completes before this returns.
    pub fn process(&mut self, topic: &str, key: Datum, value: Datum) -> Result<(), StreamsError> {
        let source = self
            .topology
            .source(topic)
            .ok_or_else(|| StreamsError::UnknownSource(topic.to_string()))?;

        let mut scope = self.enter(source)?;
        scope.forward(key, value)
    }

    /// Send the record to every child of the active node, in declaration order.
    ///
    /// A node without children forwards to nothing.
    pub fn forward(&mut self, key: Datum, value: Datum) -> Result<(), StreamsError> {
        let this = self.active_node()?;
        let topology = self.topology;
        let children = topology.node(this).children();

        if let Some((last, rest)) = children.split_last() {
            for &child in rest {
                self.dispatch(this, child, key.clone(), value.clone())?;
            }
            self.dispatch(this, *last, key, value)?;
        }
        Ok(())
    }

    /// Send the record to the active node's child at `index`.
    pub fn forward_to_index(
        &mut self,
        key: Datum,
        value: Datum,
        index: usize,
    ) -> Result<(), StreamsError> {
        let this = self.active_node()?;
        let topology = self.topology;
        let node = topology.node(this);
        let child = *node
            .children()
            .get(index)
            .ok_or_else(|| StreamsError::ChildIndexOutOfRange {
                node: node.name().to_string(),
                index,
                child_count: node.children().len(),
            })?;

        self.dispatch(this, child, key, value)
    }

    /// Send the record to the first child of the active node named `child_name`.
    ///
    /// No matching child is not an error; the record is dropped.
    pub fn forward_to_child(
        &mut self,
        key: Datum,
        value: Datum,
        child_name: &str,
    ) -> Result<(), StreamsError> {
        let this = self.active_node()?;
        let topology = self.topology;
        let node = topology.node(this);

        match node
            .children()
            .iter()
            .copied()
            .find(|&child| topology.node(child).name() == child_name)
        {
            Some(child) => self.dispatch(this, child, key, value),
            None => {
                NamedChildNotFound {
                    node: node.name(),
                    child: child_name,
                }
                .log();
                Ok(())
            }
        }
    }

    /// Hand a record to the outbound transport.
    ///
    /// The record is appended to the driver's output log first, then given to
    /// the record collector, which may re-enter the topology before returning.
    pub fn send(&mut self, topic: &str, key: Datum, value: Datum) -> Result<(), StreamsError> {
        let record = ProducerRecord::new(topic, key, value, self.state.time);
        self.state.output.push(record.clone());

        let collector = self.collector;
        collector.send(self, record)
    }

    /// Make `node` the active node until the returned guard is dropped.
    pub(crate) fn enter<'c>(&'c mut self, node: NodeId) -> Result<CursorGuard<'c, 'a>, StreamsError> {
        if let Some(limit) = self.state.max_depth {
            if self.state.depth >= limit {
                return Err(StreamsError::CascadeDepthExceeded {
                    limit,
                    node: self.topology.node(node).name().to_string(),
                });
            }
        }

        let previous = self.state.cursor.replace(node);
        self.state.depth += 1;
        Ok(CursorGuard {
            ctx: self,
            previous,
        })
    }

    /// Run `init` on every node, in declaration order.
    pub(crate) fn init_nodes(&mut self) -> Result<(), StreamsError> {
        let topology = self.topology;
        for (id, node) in topology.nodes() {
            let mut scope = self.enter(id)?;
            node.init(&mut scope)?;
            NodeInitialized {
                node: node.name(),
                role: node.role(),
            }
            .log();
        }
        Ok(())
    }

    /// Fire `punctuate` on every node that carries a processing unit.
    pub(crate) fn punctuate_nodes(&mut self, timestamp: i64) -> Result<(), StreamsError> {
        let topology = self.topology;
        for (id, node) in topology.nodes() {
            if let Some(processor) = node.processor() {
                let mut scope = self.enter(id)?;
                processor.punctuate(&mut scope, timestamp)?;
            }
        }
        Ok(())
    }

    /// Run `close` on every node that carries a processing unit.
    pub(crate) fn close_nodes(&mut self) -> Result<(), StreamsError> {
        let topology = self.topology;
        for (id, node) in topology.nodes() {
            if let Some(processor) = node.processor() {
                let mut scope = self.enter(id)?;
                processor.close(&mut scope)?;
            }
        }
        Ok(())
    }

    fn active_node(&self) -> Result<NodeId, StreamsError> {
        self.state.cursor.ok_or(StreamsError::NoActiveNode)
    }

    fn dispatch(
        &mut self,
        from: NodeId,
        to: NodeId,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        let topology = self.topology;
        let child = topology.node(to);

        RecordForwarded {
            from: topology.node(from).name(),
            to: child.name(),
        }
        .log();

        let mut scope = self.enter(to)?;
        child.process(&mut scope, key, value)
    }
}

/// Scoped ownership of the cursor.
///
/// Derefs to the context it was taken from; restores the previous cursor and
/// depth on drop.
pub(crate) struct CursorGuard<'c, 'a> {
    ctx: &'c mut ProcessorContext<'a>,
    previous: Option<NodeId>,
}

impl<'a> Deref for CursorGuard<'_, 'a> {
    type Target = ProcessorContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl<'a> DerefMut for CursorGuard<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for CursorGuard<'_, '_> {
    fn drop(&mut self) {
        self.ctx.state.cursor = self.previous;
        self.ctx.state.depth -= 1;
    }
}
