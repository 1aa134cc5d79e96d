// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::Datum;
use crate::stores::InMemoryKeyValueStore;
use crate::traits::Processor;

/// Keeps a running count per key in a key/value store.
///
/// Every record increments the count for its key and forwards
/// `(key, new_count)`. The value is ignored.
#[derive(Debug)]
pub struct CountByKeyProcessor {
    store: String,
}

impl CountByKeyProcessor {
    pub fn new(store: impl Into<String>) -> Self {
        Self {
            store: store.into(),
        }
    }
}

impl Processor for CountByKeyProcessor {
    fn init(&self, ctx: &mut ProcessorContext<'_>) -> Result<(), StreamsError> {
        ctx.store::<InMemoryKeyValueStore>(&self.store)?;
        Ok(())
    }

    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        _value: Datum,
    ) -> Result<(), StreamsError> {
        let store = ctx.store_mut::<InMemoryKeyValueStore>(&self.store)?;
        let count = store.get(&key).and_then(Datum::as_i64).unwrap_or(0) + 1;
        store.put(&key, Datum::from(count));

        ctx.forward(key, Datum::from(count))
    }

    fn name(&self) -> &'static str {
        "count_by_key"
    }
}
