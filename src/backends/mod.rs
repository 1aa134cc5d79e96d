// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processing unit implementations.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process units selectable by name from a topology config:
//! - **Transformation**: case conversion, word splitting
//! - **Routing**: forward by key name, branch by value type
//! - **Stateful**: counting by key, buffering until punctuation
//! - **Diagnostics**: record logging, pass-through
//!
//! ## Stub Backend (Test-Only)
//! Recording, sending, looping and failing units for driver tests. Not
//! available outside test builds.
//!
//! # Examples
//!
//! ```rust
//! use the_dagwood_streams::backends::local::LocalProcessorFactory;
//! use the_dagwood_streams::config::{NodeConfig, NodeType};
//! use std::collections::HashMap;
//!
//! let config = NodeConfig {
//!     name: "words".to_string(),
//!     kind: NodeType::Processor,
//!     topics: vec![],
//!     topic: None,
//!     processor: Some("split_words".to_string()),
//!     parents: vec!["lines".to_string()],
//!     stores: vec![],
//!     options: HashMap::new(),
//! };
//!
//! let processor = LocalProcessorFactory::create_processor(&config)?;
//! assert_eq!(processor.name(), "split_words");
//! # Ok::<(), the_dagwood_streams::errors::ConfigError>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
