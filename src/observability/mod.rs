// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging for the stream driver.
//!
//! Every diagnostic the crate emits is a message struct with a `Display`
//! implementation and a [`messages::StructuredLog`] implementation that picks
//! the level and attaches the struct's fields to the tracing event. Callers
//! never format log strings inline.
//!
//! # Organization
//!
//! * `messages::engine` - driver lifecycle, record injection, routing and loopback
//! * `messages::processor` - events raised by the built-in processing units
//! * `messages::store` - state store lifecycle
//! * `messages::validation` - topology validation results
//!
//! # Usage
//!
//! ```rust
//! use the_dagwood_streams::observability::messages::{engine::RecordForwarded, StructuredLog};
//!
//! RecordForwarded { from: "source", to: "upper" }.log();
//! ```

pub mod messages;
