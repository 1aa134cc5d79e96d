// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Record collectors standing in for the real outbound transport.

use serde::Deserialize;

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::observability::messages::{engine::*, StructuredLog};
use crate::record::ProducerRecord;
use crate::traits::RecordCollector;

/// What the loopback sink does with a record sent to a topic no source consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnroutedTopicPolicy {
    /// Fail the send with [`StreamsError::UnknownSource`].
    #[default]
    Fail,
    /// Keep the record in the output log only.
    Capture,
}

/// Re-injects every sent record into the same topology.
///
/// A send to topic `T` becomes `process(T, key, value)` with the in-memory
/// key and value, run to completion before the send returns. Stage N of a
/// multi-stage topology therefore drives stage N+1 on the same call stack.
///
/// The sink never guards against cycles: a unit that keeps sending to a topic
/// that leads back to itself recurses until the stack is exhausted, unless the
/// driver was configured with a cascade depth limit.
#[derive(Debug, Clone, Default)]
pub struct LoopbackSink {
    unrouted: UnroutedTopicPolicy,
}

impl LoopbackSink {
    pub fn new(unrouted: UnroutedTopicPolicy) -> Self {
        Self { unrouted }
    }
}

impl RecordCollector for LoopbackSink {
    fn send(
        &self,
        ctx: &mut ProcessorContext<'_>,
        record: ProducerRecord,
    ) -> Result<(), StreamsError> {
        if self.unrouted == UnroutedTopicPolicy::Capture
            && ctx.topology().source(&record.topic).is_none()
        {
            UnroutedRecordCaptured {
                topic: &record.topic,
                node: ctx.current_node().unwrap_or("<none>"),
            }
            .log();
            return Ok(());
        }

        RecordLoopedBack {
            topic: &record.topic,
            node: ctx.current_node().unwrap_or("<none>"),
            timestamp: record.timestamp,
        }
        .log();

        ctx.process(&record.topic, record.key, record.value)
    }
}

/// Keeps sent records in the output log and goes no further.
///
/// Useful for exercising one stage of a multi-stage topology in isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureOnlyCollector;

impl RecordCollector for CaptureOnlyCollector {
    fn send(
        &self,
        _ctx: &mut ProcessorContext<'_>,
        _record: ProducerRecord,
    ) -> Result<(), StreamsError> {
        Ok(())
    }
}
