// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{TOML_EXTENSION, YAML_EXTENSIONS};
use crate::engine::DriverConfig;
use crate::errors::ConfigError;
use crate::topology::{validate_topology, NodeOutline, NodeRole, StoreOutline};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Declarative description of a topology and the driver that runs it.
///
/// Loaded from YAML (`.yaml`, `.yml`) or TOML (`.toml`), chosen by file
/// extension. Nodes are listed in declaration order, which is the order they
/// are initialized and punctuated in and the order children are forwarded to.
///
/// # Fields
/// * `driver` - Driver behavior (optional, defaults apply)
/// * `stores` - State stores to instantiate (optional)
/// * `nodes` - Sources, processors and sinks
///
/// # Example
/// ```yaml
/// driver:
///   unrouted_topics: capture
/// stores:
///   - name: counts
///     type: key_value
/// nodes:
///   - name: lines
///     type: source
///     topics: [text]
///   - name: words
///     type: processor
///     processor: split_words
///     parents: [lines]
///   - name: count
///     type: processor
///     processor: count_by_key
///     parents: [words]
///     stores: [counts]
///     options:
///       store: counts
///   - name: out
///     type: sink
///     topic: word-counts
///     parents: [count]
/// ```
#[derive(Debug, Deserialize)]
pub struct TopologyConfig {
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub stores: Vec<StoreConfig>,
    pub nodes: Vec<NodeConfig>,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: StoreType,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    #[default]
    KeyValue,
}

#[derive(Debug, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default)]
    pub topics: Vec<String>, // for sources
    pub topic: Option<String>,     // for sinks
    pub processor: Option<String>, // for processors
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub stores: Vec<String>,
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>, // processor-specific options
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Source,
    Processor,
    Sink,
}

impl From<NodeType> for NodeRole {
    fn from(kind: NodeType) -> Self {
        match kind {
            NodeType::Source => NodeRole::Source,
            NodeType::Processor => NodeRole::Processor,
            NodeType::Sink => NodeRole::Sink,
        }
    }
}

impl TopologyConfig {
    /// Parse a config from text in the given format.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Names of the nodes each store is connected to, in node declaration order.
    pub fn store_connections(&self, store: &str) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.stores.iter().any(|s| s == store))
            .map(|n| n.name.as_str())
            .collect()
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TopologyConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if YAML_EXTENSIONS.contains(&extension.as_str()) {
        TopologyConfig::from_yaml_str(&content)
    } else if extension == TOML_EXTENSION {
        TopologyConfig::from_toml_str(&content)
    } else {
        Err(ConfigError::UnsupportedFormat(path.to_path_buf()))
    }
}

pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<TopologyConfig, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Check the per-type required fields, then the topology structure.
pub fn validate_config(cfg: &TopologyConfig) -> Result<(), ConfigError> {
    if cfg.driver.max_cascade_depth == Some(0) {
        return Err(ConfigError::InvalidDriverSetting {
            setting: "max_cascade_depth",
            reason: "must be at least 1".to_string(),
        });
    }

    for node in &cfg.nodes {
        match node.kind {
            NodeType::Source if node.topics.is_empty() => {
                return Err(ConfigError::MissingField {
                    node: node.name.clone(),
                    field: "topics",
                });
            }
            NodeType::Processor if node.processor.is_none() => {
                return Err(ConfigError::MissingField {
                    node: node.name.clone(),
                    field: "processor",
                });
            }
            NodeType::Sink if node.topic.is_none() => {
                return Err(ConfigError::MissingField {
                    node: node.name.clone(),
                    field: "topic",
                });
            }
            _ => {}
        }

        if let Some(store) = node
            .stores
            .iter()
            .find(|s| !cfg.stores.iter().any(|declared| &declared.name == *s))
        {
            return Err(ConfigError::UnknownStore {
                node: node.name.clone(),
                store: store.clone(),
            });
        }
    }

    let node_outlines: Vec<NodeOutline<'_>> = cfg
        .nodes
        .iter()
        .map(|n| NodeOutline {
            name: &n.name,
            role: n.kind.into(),
            parents: &n.parents,
            topics: &n.topics,
        })
        .collect();

    // connections are derived from the nodes, so they always resolve
    let connections: Vec<Vec<String>> = cfg
        .stores
        .iter()
        .map(|s| {
            cfg.store_connections(&s.name)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    let store_outlines: Vec<StoreOutline<'_>> = cfg
        .stores
        .iter()
        .zip(&connections)
        .map(|(s, nodes)| StoreOutline {
            name: &s.name,
            nodes,
        })
        .collect();

    validate_topology(&node_outlines, &store_outlines).map_err(ConfigError::Invalid)
}
