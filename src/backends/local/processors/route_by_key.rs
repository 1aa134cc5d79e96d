// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::{datum_to_key, Datum};
use crate::traits::Processor;

/// Forwards each record to the child whose name equals the record's key.
///
/// Keys that name no child are dropped.
#[derive(Debug, Default)]
pub struct RouteByKeyProcessor;

impl RouteByKeyProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for RouteByKeyProcessor {
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        let child = datum_to_key(&key);
        ctx.forward_to_child(key, value, &child)
    }

    fn name(&self) -> &'static str {
        "route_by_key"
    }
}
