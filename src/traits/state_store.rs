// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::Datum;

/// A named store shared by every node of one driver.
///
/// The driver only ever calls the lifecycle methods. Reads and writes go
/// through the concrete type, reached with [`ProcessorContext::store_mut`].
pub trait StateStore: Any {
    fn name(&self) -> &str;

    /// Prepare the store. The driver registers it right after this returns `Ok`.
    fn init(&mut self, ctx: &ProcessorContext<'_>) -> Result<(), StreamsError>;

    fn flush(&mut self) -> Result<(), StreamsError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), StreamsError> {
        Ok(())
    }

    fn persistent(&self) -> bool {
        false
    }

    /// Point-in-time view of the contents, for dumps and assertions.
    fn snapshot(&self) -> Option<Datum> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Creates a fresh store instance for a driver.
pub trait StateStoreSupplier {
    fn name(&self) -> &str;

    fn get(&self) -> Box<dyn StateStore>;
}
