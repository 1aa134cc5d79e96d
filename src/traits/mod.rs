// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod collector;
pub mod processor;
pub mod state_store;

pub use collector::RecordCollector;
pub use processor::Processor;
pub use state_store::{StateStore, StateStoreSupplier};
