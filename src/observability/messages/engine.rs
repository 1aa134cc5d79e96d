// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for driver lifecycle and record routing events.
//!
//! This module contains message types for logging events related to:
//! * Driver construction and teardown
//! * Record injection and punctuation sweeps
//! * Forwarding between nodes
//! * Loopback of sent records

use crate::observability::messages::StructuredLog;
use crate::topology::NodeRole;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Driver finished initializing every store and node.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_dagwood_streams::observability::messages::engine::DriverInitialized;
///
/// let msg = DriverInitialized {
///     node_count: 4,
///     store_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct DriverInitialized {
    pub node_count: usize,
    pub store_count: usize,
}

impl Display for DriverInitialized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Topology driver initialized: {} nodes, {} state stores",
            self.node_count, self.store_count
        )
    }
}

impl StructuredLog for DriverInitialized {
    fn log(&self) {
        tracing::info!(
            node_count = self.node_count,
            store_count = self.store_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "driver",
            span_name = name,
            node_count = self.node_count,
            store_count = self.store_count,
        )
    }
}

/// A node's `init` hook returned successfully.
///
/// # Log Level
/// `debug!` - Detailed lifecycle information
pub struct NodeInitialized<'a> {
    pub node: &'a str,
    pub role: NodeRole,
}

impl Display for NodeInitialized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Initialized {} node '{}'", self.role, self.node)
    }
}

impl StructuredLog for NodeInitialized<'_> {
    fn log(&self) {
        tracing::debug!(node = self.node, role = %self.role, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("node_init", span_name = name, node = self.node, role = %self.role)
    }
}

/// A caller fed a record into the topology.
///
/// # Log Level
/// `debug!` - Per-record event
///
/// # Example
/// ```
/// use the_dagwood_streams::observability::messages::engine::RecordInjected;
///
/// let msg = RecordInjected {
///     topic: "words",
///     timestamp: 1_000,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct RecordInjected<'a> {
    pub topic: &'a str,
    pub timestamp: i64,
}

impl Display for RecordInjected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Injecting record on topic '{}' at time {}",
            self.topic, self.timestamp
        )
    }
}

impl StructuredLog for RecordInjected<'_> {
    fn log(&self) {
        tracing::debug!(topic = self.topic, timestamp = self.timestamp, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "record",
            span_name = name,
            topic = self.topic,
            timestamp = self.timestamp,
        )
    }
}

/// A record moved from a node to one of its children.
///
/// # Log Level
/// `trace!` - Fires for every hop
pub struct RecordForwarded<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

impl Display for RecordForwarded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Forwarding record from '{}' to '{}'", self.from, self.to)
    }
}

impl StructuredLog for RecordForwarded<'_> {
    fn log(&self) {
        tracing::trace!(from = self.from, to = self.to, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("forward", span_name = name, from = self.from, to = self.to)
    }
}

/// A forward by child name matched none of the node's children.
///
/// # Log Level
/// `debug!` - The record is dropped, which is permitted
pub struct NamedChildNotFound<'a> {
    pub node: &'a str,
    pub child: &'a str,
}

impl Display for NamedChildNotFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' has no child named '{}'; record dropped",
            self.node, self.child
        )
    }
}

impl StructuredLog for NamedChildNotFound<'_> {
    fn log(&self) {
        tracing::debug!(node = self.node, child = self.child, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "forward_named",
            span_name = name,
            node = self.node,
            child = self.child,
        )
    }
}

/// A sent record is being fed back into the topology.
///
/// # Log Level
/// `debug!` - Per-record event
pub struct RecordLoopedBack<'a> {
    pub topic: &'a str,
    pub node: &'a str,
    pub timestamp: i64,
}

impl Display for RecordLoopedBack<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Looping record sent by '{}' back into topic '{}'",
            self.node, self.topic
        )
    }
}

impl StructuredLog for RecordLoopedBack<'_> {
    fn log(&self) {
        tracing::debug!(
            topic = self.topic,
            node = self.node,
            timestamp = self.timestamp,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "loopback",
            span_name = name,
            topic = self.topic,
            node = self.node,
            timestamp = self.timestamp,
        )
    }
}

/// A sent record targets a topic no source consumes and was only captured.
///
/// # Log Level
/// `debug!` - Terminal output of the topology
pub struct UnroutedRecordCaptured<'a> {
    pub topic: &'a str,
    pub node: &'a str,
}

impl Display for UnroutedRecordCaptured<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Captured record sent by '{}' to unconsumed topic '{}'",
            self.node, self.topic
        )
    }
}

impl StructuredLog for UnroutedRecordCaptured<'_> {
    fn log(&self) {
        tracing::debug!(topic = self.topic, node = self.node, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "capture",
            span_name = name,
            topic = self.topic,
            node = self.node,
        )
    }
}

/// A punctuation sweep is starting.
///
/// # Log Level
/// `debug!` - Scheduled callback sweep
pub struct PunctuationStarted {
    pub timestamp: i64,
    pub processor_count: usize,
}

impl Display for PunctuationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Punctuating {} processors at time {}",
            self.processor_count, self.timestamp
        )
    }
}

impl StructuredLog for PunctuationStarted {
    fn log(&self) {
        tracing::debug!(
            timestamp = self.timestamp,
            processor_count = self.processor_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "punctuate",
            span_name = name,
            timestamp = self.timestamp,
            processor_count = self.processor_count,
        )
    }
}

/// Driver closed every node and store.
///
/// # Log Level
/// `info!` - Important operational event
pub struct DriverClosed {
    pub node_count: usize,
    pub store_count: usize,
}

impl Display for DriverClosed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Topology driver closed: {} nodes, {} state stores",
            self.node_count, self.store_count
        )
    }
}

impl StructuredLog for DriverClosed {
    fn log(&self) {
        tracing::info!(
            node_count = self.node_count,
            store_count = self.store_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "driver_close",
            span_name = name,
            node_count = self.node_count,
            store_count = self.store_count,
        )
    }
}
