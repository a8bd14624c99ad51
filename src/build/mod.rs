//! Build pipeline module for tokenforge
//!
//! Turns the configured sources into one artifact per platform file.
//!
//! # Overview
//!
//! The build pipeline consists of:
//! - **Discovery**: Find source files using glob patterns from config and
//!   load them into one token tree
//! - **Rendering**: Per platform, transform the flattened tokens and render
//!   each configured file
//! - **Writing**: Write artifacts under `<out>/<build_path>/`
//!
//! # Example
//!
//! ```no_run
//! use tokenforge::build::{BuildContext, BuildPipeline};
//! use tokenforge::config::load_config;
//! use std::path::PathBuf;
//!
//! let config = load_config(None)?;
//! let context = BuildContext::new(config, PathBuf::from("."));
//! let pipeline = BuildPipeline::with_builtins(context);
//!
//! let result = pipeline.build()?;
//! println!("{}", result.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod context;
pub mod discovery;
pub mod pipeline;
pub mod result;

pub use context::*;
pub use discovery::*;
pub use pipeline::*;
pub use result::*;
