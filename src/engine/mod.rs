// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Synchronous execution of a topology.
//!
//! [`TopologyTestDriver`] owns a topology and its state stores and runs every
//! record to completion on the caller's thread. Nodes see the driver through
//! [`ProcessorContext`]; sent records reach the [`RecordCollector`](crate::traits::RecordCollector),
//! by default a [`LoopbackSink`] that feeds them straight back in.

mod context;
mod driver;
mod loopback;

#[cfg(test)]
mod integration_tests;

pub(crate) use context::ExecutionState;
pub use context::ProcessorContext;
pub use driver::{DriverConfig, TopologyTestDriver};
pub use loopback::{CaptureOnlyCollector, LoopbackSink, UnroutedTopicPolicy};
