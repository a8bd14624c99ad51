//! Data model for tokenforge.
//!
//! - [`token`]: the canonical [`Token`], its [`TokenType`], and the flattened
//!   [`TransformedToken`] that transforms and formats work on
//! - [`tree`]: the ordered [`TokenTree`]
//! - [`payload`]: provider style payloads consumed by the adapter

pub mod payload;
pub mod token;
pub mod tree;

pub use payload::*;
pub use token::*;
pub use tree::*;
