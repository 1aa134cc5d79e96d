// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for topology config loading and processor instantiation.

use std::path::PathBuf;

use crate::errors::{StreamsError, ValidationError};

/// Errors that can occur while turning a config file into a runnable topology
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file couldn't be read
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension doesn't map to a known format
    #[error("unsupported config format for '{}' (expected .yaml, .yml or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A node is missing a field its type requires
    #[error("node '{node}' is missing required field '{field}'")]
    MissingField { node: String, field: &'static str },

    /// A processor node names an implementation the factory doesn't know
    #[error("node '{node}' references unknown processor '{processor}'")]
    UnknownProcessor { node: String, processor: String },

    /// A node connects to a store the config never declares
    #[error("node '{node}' uses undeclared state store '{store}'")]
    UnknownStore { node: String, store: String },

    /// A processor option is missing or malformed
    #[error("node '{node}' has invalid option '{option}': {reason}")]
    InvalidOption {
        node: String,
        option: String,
        reason: String,
    },

    /// A `driver` setting is out of range
    #[error("driver setting '{setting}' is invalid: {reason}")]
    InvalidDriverSetting {
        setting: &'static str,
        reason: String,
    },

    /// Structural validation failed
    #[error("configuration validation failed:\n{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Topology(#[from] StreamsError),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
