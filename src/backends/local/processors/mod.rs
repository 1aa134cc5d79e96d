// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod branch_by_type;
pub mod change_case;
pub mod count_by_key;
pub mod emit_store_on_punctuate;
pub mod log_records;
pub mod passthrough;
pub mod route_by_key;
pub mod split_words;

pub use branch_by_type::*;
pub use change_case::*;
pub use count_by_key::*;
pub use emit_store_on_punctuate::*;
pub use log_records::*;
pub use passthrough::*;
pub use route_by_key::*;
pub use split_words::*;
