// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // built-in processing units
pub mod config;     // topology config loading + factory
pub mod engine;     // test driver, node context, loopback
pub mod errors;     // error handling
pub mod observability;
pub mod record;     // records and datums
pub mod stores;     // state stores
pub mod topology;   // graph model, builder, validation
pub mod traits;     // unified abstractions
