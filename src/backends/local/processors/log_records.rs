// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::observability::messages::{processor::RecordObserved, StructuredLog};
use crate::record::Datum;
use crate::traits::Processor;

/// Logs every record at `info` and forwards it unchanged.
#[derive(Debug, Default)]
pub struct LogRecordsProcessor;

impl LogRecordsProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for LogRecordsProcessor {
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        RecordObserved {
            node: ctx.current_node().unwrap_or("<none>"),
            key: &key,
            value: &value,
            timestamp: ctx.timestamp(),
        }
        .log();

        ctx.forward(key, value)
    }

    fn name(&self) -> &'static str {
        "log_records"
    }
}
