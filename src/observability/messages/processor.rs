// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processing unit events.
//!
//! This module contains message types for logging events related to:
//! * Processor instantiation from configuration
//! * Records observed, dropped or emitted by the built-in units

use crate::observability::messages::StructuredLog;
use crate::record::Datum;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A processing unit was instantiated for a configured node.
///
/// # Log Level
/// `debug!` - Detailed lifecycle information
///
/// # Example
/// ```
/// use the_dagwood_streams::observability::messages::processor::ProcessorCreated;
///
/// let msg = ProcessorCreated {
///     node: "upper",
///     processor: "change_case",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ProcessorCreated<'a> {
    pub node: &'a str,
    pub processor: &'a str,
}

impl Display for ProcessorCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Created '{}' processor for node '{}'",
            self.processor, self.node
        )
    }
}

impl StructuredLog for ProcessorCreated<'_> {
    fn log(&self) {
        tracing::debug!(node = self.node, processor = self.processor, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "processor_create",
            span_name = name,
            node = self.node,
            processor = self.processor,
        )
    }
}

/// A record passing through a logging unit.
///
/// # Log Level
/// `info!` - The unit exists to make records visible
pub struct RecordObserved<'a> {
    pub node: &'a str,
    pub key: &'a Datum,
    pub value: &'a Datum,
    pub timestamp: i64,
}

impl Display for RecordObserved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] t={} key={} value={}",
            self.node, self.timestamp, self.key, self.value
        )
    }
}

impl StructuredLog for RecordObserved<'_> {
    fn log(&self) {
        tracing::info!(
            node = self.node,
            key = %self.key,
            value = %self.value,
            timestamp = self.timestamp,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "record_observed",
            span_name = name,
            node = self.node,
            timestamp = self.timestamp,
        )
    }
}

/// A record matched none of a branching unit's predicates and was dropped.
///
/// # Log Level
/// `debug!` - Dropping unmatched records is expected behavior
pub struct RecordUnmatched<'a> {
    pub node: &'a str,
    pub value_type: &'a str,
}

impl Display for RecordUnmatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' has no branch for {} values; record dropped",
            self.node, self.value_type
        )
    }
}

impl StructuredLog for RecordUnmatched<'_> {
    fn log(&self) {
        tracing::debug!(node = self.node, value_type = self.value_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "record_unmatched",
            span_name = name,
            node = self.node,
            value_type = self.value_type,
        )
    }
}

/// A unit emitted the contents of a state store on punctuation.
///
/// # Log Level
/// `debug!` - Scheduled output
pub struct StoreEmitted<'a> {
    pub node: &'a str,
    pub store: &'a str,
    pub entry_count: usize,
    pub cleared: bool,
    pub timestamp: i64,
}

impl Display for StoreEmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' emitted {} entries from store '{}' at time {}",
            self.node, self.entry_count, self.store, self.timestamp
        )
    }
}

impl StructuredLog for StoreEmitted<'_> {
    fn log(&self) {
        tracing::debug!(
            node = self.node,
            store = self.store,
            entry_count = self.entry_count,
            cleared = self.cleared,
            timestamp = self.timestamp,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "store_emit",
            span_name = name,
            node = self.node,
            store = self.store,
            timestamp = self.timestamp,
        )
    }
}
