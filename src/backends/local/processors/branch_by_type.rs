// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::observability::messages::{processor::RecordUnmatched, StructuredLog};
use crate::record::Datum;
use crate::traits::Processor;

/// JSON type of a value, as matched by [`BranchByTypeProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueType {
    pub fn of(value: &Datum) -> Self {
        match value {
            Datum::Null => ValueType::Null,
            Datum::Bool(_) => ValueType::Bool,
            Datum::Number(_) => ValueType::Number,
            Datum::String(_) => ValueType::String,
            Datum::Array(_) => ValueType::Array,
            Datum::Object(_) => ValueType::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

/// Forwards each record to the child at the position of the first branch
/// whose type matches the value.
///
/// Branch `i` targets child `i`, so the branch list should line up with the
/// node's children in declaration order. A matching branch with no child at
/// its position fails the call; a value no branch matches is dropped.
#[derive(Debug)]
pub struct BranchByTypeProcessor {
    branches: Vec<ValueType>,
}

impl BranchByTypeProcessor {
    pub fn new(branches: Vec<ValueType>) -> Self {
        Self { branches }
    }
}

impl Processor for BranchByTypeProcessor {
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        let value_type = ValueType::of(&value);
        match self.branches.iter().position(|b| *b == value_type) {
            Some(index) => ctx.forward_to_index(key, value, index),
            None => {
                RecordUnmatched {
                    node: ctx.current_node().unwrap_or("<none>"),
                    value_type: value_type.as_str(),
                }
                .log();
                Ok(())
            }
        }
    }

    fn name(&self) -> &'static str {
        "branch_by_type"
    }
}
