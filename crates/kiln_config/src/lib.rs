//! Parsing and validation of `kiln.toml` build policy files.
//!
//! This crate reads the optional project configuration file and produces a
//! strongly-typed [`BuildPolicy`] describing the toolchain, flags, libraries
//! and output layout. When no file exists, [`BuildPolicy::default`] yields the
//! stock `g++`/C++17 policy.

#![warn(missing_docs)]

pub mod error;
pub mod flags;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
