// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for topology validation.
//!
//! This module contains message types for logging events related to:
//! * Validation start and outcome
//! * Cycle detection

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cycle detected among the declared nodes.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_dagwood_streams::observability::messages::validation::CyclicTopologyDetected;
///
/// let cycle = vec!["a".to_string(), "b".to_string(), "a".to_string()];
/// let msg = CyclicTopologyDetected { cycle: &cycle };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CyclicTopologyDetected<'a> {
    pub cycle: &'a [String],
}

impl Display for CyclicTopologyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic topology detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicTopologyDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
        )
    }
}

/// Topology validation is starting.
///
/// # Log Level
/// `debug!` - Runs on every build
pub struct ValidationStarted {
    pub node_count: usize,
    pub store_count: usize,
}

impl Display for ValidationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validating topology: {} nodes, {} state stores",
            self.node_count, self.store_count
        )
    }
}

impl StructuredLog for ValidationStarted {
    fn log(&self) {
        tracing::debug!(
            node_count = self.node_count,
            store_count = self.store_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::DEBUG,
            "span_name",
            name = name,
            node_count = self.node_count,
            store_count = self.store_count,
        )
    }
}

/// Topology validation passed.
///
/// # Log Level
/// `debug!` - Runs on every build
pub struct ValidationCompleted {
    pub node_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Topology validation passed for {} nodes", self.node_count)
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        tracing::debug!(node_count = self.node_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::DEBUG,
            "span_name",
            name = name,
            node_count = self.node_count,
        )
    }
}

/// Topology validation failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_dagwood_streams::observability::messages::validation::ValidationFailed;
///
/// let msg = ValidationFailed { error_count: 2 };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Topology validation failed with {} error(s)",
            self.error_count
        )
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::error!(error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            error_count = self.error_count,
        )
    }
}
