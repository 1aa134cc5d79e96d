// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::Datum;
use crate::traits::Processor;

/// Splits a string value into words and forwards one record per word.
///
/// Each outgoing record is keyed by the lowercased word with the original word
/// as its value, ready for a downstream [`CountByKeyProcessor`](super::CountByKeyProcessor).
/// Punctuation at either end of a word is stripped; words that are nothing but
/// punctuation are skipped.
#[derive(Debug, Default)]
pub struct SplitWordsProcessor;

impl SplitWordsProcessor {
    pub fn new() -> Self {
        Self
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
}

impl Processor for SplitWordsProcessor {
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        _key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        let text = value
            .as_str()
            .ok_or_else(|| ctx.fail(format!("expected a string value, got {}", value)))?;

        for word in words(text) {
            ctx.forward(
                Datum::String(word.to_lowercase()),
                Datum::String(word.to_string()),
            )?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "split_words"
    }
}
