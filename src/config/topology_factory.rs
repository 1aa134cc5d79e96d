// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::LocalProcessorFactory;
use crate::config::{validate_config, NodeType, StoreType, TopologyConfig};
use crate::engine::DriverConfig;
use crate::errors::ConfigError;
use crate::stores::KeyValueStoreSupplier;
use crate::topology::{Topology, TopologyBuilder};
use crate::traits::StateStoreSupplier;

/// Turns a [`TopologyConfig`] into a built topology plus the driver settings
/// it declares.
pub struct TopologyFactory;

impl TopologyFactory {
    /// Validate the config, instantiate every processor through the
    /// [`LocalProcessorFactory`], and build the topology.
    ///
    /// # Example
    /// ```
    /// use the_dagwood_streams::config::{TopologyConfig, TopologyFactory};
    /// use the_dagwood_streams::engine::TopologyTestDriver;
    ///
    /// let cfg = TopologyConfig::from_yaml_str(r#"
    /// nodes:
    ///   - name: src
    ///     type: source
    ///     topics: [in]
    ///   - name: upper
    ///     type: processor
    ///     processor: change_case
    ///     parents: [src]
    ///     options:
    ///       mode: upper
    /// "#)?;
    ///
    /// let (topology, driver_config) = TopologyFactory::from_config(&cfg)?;
    /// let driver = TopologyTestDriver::with_config(topology, driver_config)?;
    /// assert_eq!(driver.topology().node_count(), 2);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_config(cfg: &TopologyConfig) -> Result<(Topology, DriverConfig), ConfigError> {
        validate_config(cfg)?;

        let mut builder = TopologyBuilder::new();
        for node in &cfg.nodes {
            let parents: Vec<&str> = node.parents.iter().map(String::as_str).collect();
            builder = match node.kind {
                NodeType::Source => {
                    let topics: Vec<&str> = node.topics.iter().map(String::as_str).collect();
                    builder.add_source(&node.name, &topics)
                }
                NodeType::Processor => {
                    let processor = LocalProcessorFactory::create_processor(node)?;
                    builder.add_processor(&node.name, processor, &parents)
                }
                NodeType::Sink => {
                    let topic = node.topic.as_deref().ok_or_else(|| ConfigError::MissingField {
                        node: node.name.clone(),
                        field: "topic",
                    })?;
                    builder.add_sink(&node.name, topic, &parents)
                }
            };
        }

        for store in &cfg.stores {
            let supplier: Box<dyn StateStoreSupplier> = match store.kind {
                StoreType::KeyValue => Box::new(KeyValueStoreSupplier::new(store.name.clone())),
            };
            builder = builder.add_state_store(supplier, &cfg.store_connections(&store.name));
        }

        Ok((builder.build()?, cfg.driver.clone()))
    }
}
