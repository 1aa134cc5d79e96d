// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;
use std::collections::BTreeMap;

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::observability::messages::{
    store::{StoreClosed, StoreInitialized},
    StructuredLog,
};
use crate::record::{datum_to_key, Datum};
use crate::traits::{StateStore, StateStoreSupplier};

/// Ordered in-memory key/value store.
///
/// Keys are stored by their string form (see [`datum_to_key`]), so `"1"` and
/// `1` address the same entry.
#[derive(Debug)]
pub struct InMemoryKeyValueStore {
    name: String,
    entries: BTreeMap<String, Datum>,
    initialized: bool,
}

impl InMemoryKeyValueStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
            initialized: false,
        }
    }

    pub fn get(&self, key: &Datum) -> Option<&Datum> {
        self.entries.get(&datum_to_key(key))
    }

    /// Insert or replace, returning the previous value.
    pub fn put(&mut self, key: &Datum, value: Datum) -> Option<Datum> {
        self.entries.insert(datum_to_key(key), value)
    }

    /// Insert only if the key is absent; returns the value now stored.
    pub fn put_if_absent(&mut self, key: &Datum, value: Datum) -> &Datum {
        self.entries.entry(datum_to_key(key)).or_insert(value)
    }

    pub fn delete(&mut self, key: &Datum) -> Option<Datum> {
        self.entries.remove(&datum_to_key(key))
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Datum)> {
        self.entries.iter()
    }

    /// Remove and return every entry, in key order.
    pub fn drain(&mut self) -> Vec<(String, Datum)> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for InMemoryKeyValueStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, ctx: &ProcessorContext<'_>) -> Result<(), StreamsError> {
        if self.initialized {
            return Err(StreamsError::StoreInitFailed {
                store: self.name.clone(),
                reason: "store is already initialized".to_string(),
            });
        }
        self.initialized = true;

        StoreInitialized {
            store: &self.name,
            kind: "in_memory_key_value",
            timestamp: ctx.timestamp(),
        }
        .log();
        Ok(())
    }

    fn close(&mut self) -> Result<(), StreamsError> {
        self.initialized = false;
        StoreClosed {
            store: &self.name,
            entry_count: self.entries.len(),
        }
        .log();
        Ok(())
    }

    fn snapshot(&self) -> Option<Datum> {
        let map: serde_json::Map<String, Datum> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Some(Datum::Object(map))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Supplies fresh [`InMemoryKeyValueStore`]s under one name.
#[derive(Debug, Clone)]
pub struct KeyValueStoreSupplier {
    name: String,
}

impl KeyValueStoreSupplier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl StateStoreSupplier for KeyValueStoreSupplier {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self) -> Box<dyn StateStore> {
        Box::new(InMemoryKeyValueStore::new(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CaptureOnlyCollector, ExecutionState};
    use crate::topology::TopologyBuilder;
    use serde_json::json;

    #[test]
    fn put_get_delete() {
        let mut store = InMemoryKeyValueStore::new("counts");

        assert_eq!(store.put(&json!("a"), json!(1)), None);
        assert_eq!(store.put(&json!("a"), json!(2)), Some(json!(1)));
        assert_eq!(store.get(&json!("a")), Some(&json!(2)));
        assert_eq!(store.delete(&json!("a")), Some(json!(2)));
        assert!(store.is_empty());
    }

    #[test]
    fn string_and_numeric_keys_share_entries() {
        let mut store = InMemoryKeyValueStore::new("s");
        store.put(&json!(7), json!("seven"));
        assert_eq!(store.get(&json!("7")), Some(&json!("seven")));
    }

    #[test]
    fn put_if_absent_keeps_existing_value() {
        let mut store = InMemoryKeyValueStore::new("s");
        store.put(&json!("k"), json!("first"));
        assert_eq!(store.put_if_absent(&json!("k"), json!("second")), &json!("first"));
        assert_eq!(store.put_if_absent(&json!("j"), json!("new")), &json!("new"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn drain_empties_in_key_order() {
        let mut store = InMemoryKeyValueStore::new("s");
        store.put(&json!("b"), json!(2));
        store.put(&json!("a"), json!(1));

        let drained = store.drain();
        assert_eq!(
            drained,
            vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))]
        );
        assert!(store.is_empty());
    }

    #[test]
    fn snapshot_is_a_json_object() {
        let mut store = InMemoryKeyValueStore::new("s");
        store.put(&json!("x"), json!(true));
        assert_eq!(store.snapshot(), Some(json!({"x": true})));
    }

    #[test]
    fn second_init_is_rejected_until_closed() {
        let topology = TopologyBuilder::new().build().unwrap();
        let collector = CaptureOnlyCollector;
        let mut state = ExecutionState::new(None);
        let ctx = ProcessorContext::new(&topology, &collector, &mut state);
        let mut store = InMemoryKeyValueStore::new("counts");

        store.init(&ctx).unwrap();
        let err = store.init(&ctx).unwrap_err();
        assert!(matches!(
            err,
            StreamsError::StoreInitFailed { ref store, .. } if store == "counts"
        ));

        store.close().unwrap();
        assert!(store.init(&ctx).is_ok());
    }

    #[test]
    fn supplier_hands_out_fresh_stores() {
        let supplier = KeyValueStoreSupplier::new("counts");
        let store = supplier.get();
        assert_eq!(store.name(), "counts");
        assert!(store.as_any().downcast_ref::<InMemoryKeyValueStore>().is_some());
    }
}
