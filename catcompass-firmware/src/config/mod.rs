//! Configuration loading and parsing
//!
//! The face configuration is embedded at build time and parsed with a
//! small no_std parser; build.rs has already rejected malformed files.

pub mod toml;

pub use toml::{parse_config, ParseError};
