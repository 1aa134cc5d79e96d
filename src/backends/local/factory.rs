// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;

use super::processors::*;
use crate::config::consts::STORE_OPTION;
use crate::config::NodeConfig;
use crate::errors::ConfigError;
use crate::observability::messages::{processor::ProcessorCreated, StructuredLog};
use crate::traits::Processor;

/// Factory for creating local (in-process) processor instances
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Create a processor instance from a node's configuration
    ///
    /// The `processor` field selects the implementation; `options` configure it:
    /// - "passthrough" -> PassthroughProcessor
    /// - "change_case" -> ChangeCaseProcessor (`mode`: upper, lower, proper, title)
    /// - "split_words" -> SplitWordsProcessor
    /// - "count_by_key" -> CountByKeyProcessor (`store`)
    /// - "route_by_key" -> RouteByKeyProcessor
    /// - "branch_by_type" -> BranchByTypeProcessor (`types`: list of JSON type names)
    /// - "emit_store_on_punctuate" -> EmitStoreOnPunctuateProcessor (`store`, optional `clear`)
    /// - "log_records" -> LogRecordsProcessor
    pub fn create_processor(config: &NodeConfig) -> Result<Box<dyn Processor>, ConfigError> {
        let impl_name = config
            .processor
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField {
                node: config.name.clone(),
                field: "processor",
            })?;

        let processor: Box<dyn Processor> = match impl_name {
            "passthrough" => Box::new(PassthroughProcessor::new()),
            "change_case" => Box::new(ChangeCaseProcessor::new(required_option(config, "mode")?)),
            "split_words" => Box::new(SplitWordsProcessor::new()),
            "count_by_key" => Box::new(CountByKeyProcessor::new(required_option::<String>(
                config,
                STORE_OPTION,
            )?)),
            "route_by_key" => Box::new(RouteByKeyProcessor::new()),
            "branch_by_type" => Box::new(BranchByTypeProcessor::new(required_option(
                config, "types",
            )?)),
            "emit_store_on_punctuate" => Box::new(EmitStoreOnPunctuateProcessor::new(
                required_option::<String>(config, STORE_OPTION)?,
                optional_option(config, "clear")?.unwrap_or(false),
            )),
            "log_records" => Box::new(LogRecordsProcessor::new()),
            _ => {
                return Err(ConfigError::UnknownProcessor {
                    node: config.name.clone(),
                    processor: impl_name.to_string(),
                })
            }
        };

        ProcessorCreated {
            node: &config.name,
            processor: impl_name,
        }
        .log();

        Ok(processor)
    }

    /// List all available local processor implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![
            "passthrough",
            "change_case",
            "split_words",
            "count_by_key",
            "route_by_key",
            "branch_by_type",
            "emit_store_on_punctuate",
            "log_records",
        ]
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(impl_name: &str) -> bool {
        Self::list_available_implementations().contains(&impl_name)
    }
}

fn optional_option<T: DeserializeOwned>(
    config: &NodeConfig,
    option: &str,
) -> Result<Option<T>, ConfigError> {
    config
        .options
        .get(option)
        .map(|raw| {
            serde_json::from_value(raw.clone()).map_err(|e| ConfigError::InvalidOption {
                node: config.name.clone(),
                option: option.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn required_option<T: DeserializeOwned>(config: &NodeConfig, option: &str) -> Result<T, ConfigError> {
    optional_option(config, option)?.ok_or_else(|| ConfigError::InvalidOption {
        node: config.name.clone(),
        option: option.to_string(),
        reason: "option is required".to_string(),
    })
}
