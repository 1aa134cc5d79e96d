// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::observability::messages::{processor::StoreEmitted, StructuredLog};
use crate::record::Datum;
use crate::stores::InMemoryKeyValueStore;
use crate::traits::Processor;

/// Buffers the latest value per key and releases the buffer on punctuation.
///
/// `process` writes each record into the store and forwards nothing. On
/// `punctuate`, every entry is forwarded in key order as `(key, value)` with
/// the key as a string. With `clear` set, the store is emptied by the emit.
#[derive(Debug)]
pub struct EmitStoreOnPunctuateProcessor {
    store: String,
    clear: bool,
}

impl EmitStoreOnPunctuateProcessor {
    pub fn new(store: impl Into<String>, clear: bool) -> Self {
        Self {
            store: store.into(),
            clear,
        }
    }
}

impl Processor for EmitStoreOnPunctuateProcessor {
    fn init(&self, ctx: &mut ProcessorContext<'_>) -> Result<(), StreamsError> {
        ctx.store::<InMemoryKeyValueStore>(&self.store)?;
        Ok(())
    }

    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        ctx.store_mut::<InMemoryKeyValueStore>(&self.store)?
            .put(&key, value);
        Ok(())
    }

    fn punctuate(&self, ctx: &mut ProcessorContext<'_>, timestamp: i64) -> Result<(), StreamsError> {
        let store = ctx.store_mut::<InMemoryKeyValueStore>(&self.store)?;
        let entries: Vec<(String, Datum)> = if self.clear {
            store.drain()
        } else {
            store.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        };

        StoreEmitted {
            node: ctx.current_node().unwrap_or("<none>"),
            store: &self.store,
            entry_count: entries.len(),
            cleared: self.clear,
            timestamp,
        }
        .log();

        for (key, value) in entries {
            ctx.forward(Datum::String(key), value)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "emit_store_on_punctuate"
    }
}
