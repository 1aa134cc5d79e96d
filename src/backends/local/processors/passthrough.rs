// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::Datum;
use crate::traits::Processor;

/// Forwards every record unchanged to all children.
#[derive(Debug, Default)]
pub struct PassthroughProcessor;

impl PassthroughProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for PassthroughProcessor {
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        ctx.forward(key, value)
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
