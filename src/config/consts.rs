// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// File extensions parsed as YAML
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];
/// File extension parsed as TOML
pub const TOML_EXTENSION: &str = "toml";
/// Option key naming the state store a processor reads and writes
pub const STORE_OPTION: &str = "store";
