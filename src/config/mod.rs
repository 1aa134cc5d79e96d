// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod topology_factory;

pub mod consts;

pub use loader::{
    load_and_validate_config, load_config, validate_config, NodeConfig, NodeType, StoreConfig,
    StoreType, TopologyConfig,
};
pub use topology_factory::TopologyFactory;
