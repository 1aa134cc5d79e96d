// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Record types flowing through a topology.
//!
//! Keys and values stay in their in-memory form for the whole life of a
//! record. Nothing is ever encoded, so a value a node sends is exactly the
//! value the downstream source hands to its children.

use serde::Serialize;

/// In-memory key or value carried by a record.
pub type Datum = serde_json::Value;

/// A record a node hands to the outbound transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProducerRecord {
    pub topic: String,
    pub key: Datum,
    pub value: Datum,
    /// Logical time of the driver when the record was sent.
    pub timestamp: i64,
}

impl ProducerRecord {
    pub fn new(topic: impl Into<String>, key: Datum, value: Datum, timestamp: i64) -> Self {
        Self {
            topic: topic.into(),
            key,
            value,
            timestamp,
        }
    }
}

/// String form of a datum, used wherever a key has to be ordered or compared by name.
///
/// Strings map to themselves; everything else uses its JSON rendering.
pub fn datum_to_key(datum: &Datum) -> String {
    match datum {
        Datum::String(s) => s.clone(),
        other => other.to_string(),
    }
}
