// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for state store lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A state store finished initializing and is about to be registered.
///
/// # Log Level
/// `debug!` - Detailed lifecycle information
///
/// # Example
/// ```
/// use the_dagwood_streams::observability::messages::store::StoreInitialized;
///
/// let msg = StoreInitialized {
///     store: "word-counts",
///     kind: "in_memory_key_value",
///     timestamp: 0,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct StoreInitialized<'a> {
    pub store: &'a str,
    pub kind: &'a str,
    pub timestamp: i64,
}

impl Display for StoreInitialized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Initialized {} store '{}'", self.kind, self.store)
    }
}

impl StructuredLog for StoreInitialized<'_> {
    fn log(&self) {
        tracing::debug!(
            store = self.store,
            kind = self.kind,
            timestamp = self.timestamp,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "store_init",
            span_name = name,
            store = self.store,
            kind = self.kind,
            timestamp = self.timestamp,
        )
    }
}

/// A state store was closed.
///
/// # Log Level
/// `debug!` - Detailed lifecycle information
pub struct StoreClosed<'a> {
    pub store: &'a str,
    pub entry_count: usize,
}

impl Display for StoreClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Closed store '{}' holding {} entries",
            self.store, self.entry_count
        )
    }
}

impl StructuredLog for StoreClosed<'_> {
    fn log(&self) {
        tracing::debug!(store = self.store, entry_count = self.entry_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "store_close",
            span_name = name,
            store = self.store,
            entry_count = self.entry_count,
        )
    }
}
