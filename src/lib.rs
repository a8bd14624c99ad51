//! tokenforge - Library for building design tokens
//!
//! This library provides functionality to:
//! - Adapt design-tool style exports into a canonical token tree
//! - Transform tokens per platform through named transform groups
//! - Render CSS, SCSS, JavaScript, TypeScript, JSON, Markdown and HTML files

pub mod adapter;
pub mod build;
pub mod cli;
pub mod color;
pub mod config;
pub mod formats;
pub mod models;
pub mod registry;
pub mod transforms;
pub mod units;
#[cfg(feature = "watch")]
pub mod watch;
