// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::ProducerRecord;

/// Outbound transport for records a node sends to a topic.
///
/// The engine depends only on this capability. `send` runs synchronously on
/// the caller's stack and gets the sending node's context, so an
/// implementation may re-enter the topology before returning.
pub trait RecordCollector {
    fn send(
        &self,
        ctx: &mut ProcessorContext<'_>,
        record: ProducerRecord,
    ) -> Result<(), StreamsError>;

    fn flush(&self) {}
}
