//! Configuration module for the token build system
//!
//! Provides types, discovery and parsing for `tokens.toml` project
//! configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
