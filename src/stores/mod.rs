// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod key_value;
pub mod registry;

pub use key_value::{InMemoryKeyValueStore, KeyValueStoreSupplier};
pub use registry::StoreRegistry;
