// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::Datum;

/// The processing unit carried by a processor node.
///
/// Methods take `&self`: a unit can be re-entered while one of its own calls
/// is still on the stack (a node that sends to a topic it also consumes), so
/// any per-instance state lives behind `Cell`/`RefCell`.
///
/// Every method receives the context of the node it is attached to. Calling
/// [`ProcessorContext::forward`] from any of them routes to that node's children.
pub trait Processor {
    /// Called once at driver construction, after every state store is registered.
    fn init(&self, _ctx: &mut ProcessorContext<'_>) -> Result<(), StreamsError> {
        Ok(())
    }

    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError>;

    /// Scheduled callback, fired by the driver's `punctuate`.
    fn punctuate(&self, _ctx: &mut ProcessorContext<'_>, _timestamp: i64) -> Result<(), StreamsError> {
        Ok(())
    }

    /// Called once when the driver is closed.
    fn close(&self, _ctx: &mut ProcessorContext<'_>) -> Result<(), StreamsError> {
        Ok(())
    }

    fn name(&self) -> &'static str;
}
