// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod loader;
mod streams;

pub use config::ValidationError;
pub use loader::ConfigError;
pub use streams::StreamsError;
