//! Configuration for `zxpaint.toml`
//!
//! Assembly formatting and preview defaults, overridable from the command line.

pub mod loader;
pub mod schema;

pub use loader::{default_config, find_config, find_config_from, load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
