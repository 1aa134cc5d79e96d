// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::engine::ProcessorContext;
use crate::errors::StreamsError;
use crate::record::Datum;
use crate::traits::Processor;

/// Target case for [`ChangeCaseProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    Upper,
    Lower,
    /// First letter of every word capitalized.
    Proper,
    /// Like `Proper`, but short articles, conjunctions and prepositions stay
    /// lowercase unless they open the text.
    Title,
}

/// Rewrites string values into another case and forwards them.
///
/// Keys pass through untouched. A non-string value fails the call.
pub struct ChangeCaseProcessor {
    mode: CaseMode,
}

impl ChangeCaseProcessor {
    pub fn new(mode: CaseMode) -> Self {
        Self { mode }
    }

    pub fn upper() -> Self {
        Self::new(CaseMode::Upper)
    }

    pub fn lower() -> Self {
        Self::new(CaseMode::Lower)
    }

    pub fn proper() -> Self {
        Self::new(CaseMode::Proper)
    }

    pub fn title() -> Self {
        Self::new(CaseMode::Title)
    }

    fn convert(&self, input: &str) -> String {
        match self.mode {
            CaseMode::Upper => input.to_uppercase(),
            CaseMode::Lower => input.to_lowercase(),
            CaseMode::Proper => input
                .split_whitespace()
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            CaseMode::Title => input
                .split_whitespace()
                .enumerate()
                .map(|(i, word)| {
                    let lower_word = word.to_lowercase();
                    if i == 0 || !is_minor_word(&lower_word) {
                        capitalize(word)
                    } else {
                        lower_word
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn is_minor_word(word: &str) -> bool {
    matches!(
        word,
        "a" | "an" | "the" | "and" | "or" | "but" | "in" | "on" | "at" | "to" | "for" | "of" | "with" | "by"
    )
}

impl Processor for ChangeCaseProcessor {
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        key: Datum,
        value: Datum,
    ) -> Result<(), StreamsError> {
        let text = value
            .as_str()
            .ok_or_else(|| ctx.fail(format!("expected a string value, got {}", value)))?;
        let converted = self.convert(text);
        ctx.forward(key, Datum::String(converted))
    }

    fn name(&self) -> &'static str {
        "change_case"
    }
}
