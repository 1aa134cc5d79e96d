// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::StreamsError;
use crate::traits::StateStore;

/// Every state store instantiated for one driver, keyed by name.
#[derive(Default)]
pub struct StoreRegistry {
    stores: BTreeMap<String, Box<dyn StateStore>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, store: Box<dyn StateStore>) -> Result<(), StreamsError> {
        let name = store.name().to_string();
        if self.stores.contains_key(&name) {
            return Err(StreamsError::DuplicateStore(name));
        }
        self.stores.insert(name, store);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&(dyn StateStore + 'static)> {
        self.stores.get(name).map(|s| &**s)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn StateStore + 'static)> {
        self.stores.get_mut(name).map(|s| &mut **s)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(|k| k.as_str())
    }

    /// Stores in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &(dyn StateStore + 'static))> {
        self.stores.iter().map(|(name, store)| (name.as_str(), &**store))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Box<dyn StateStore>)> {
        self.stores.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreRegistry")
            .field("store_count", &self.stores.len())
            .field("store_names", &self.stores.keys().collect::<Vec<_>>())
            .finish()
    }
}
