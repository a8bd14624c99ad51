//! Shared interface for the named registries.
//!
//! Both [`TransformRegistry`](crate::transforms::TransformRegistry) and
//! [`FormatRegistry`](crate::formats::FormatRegistry) implement
//! [`Registry`]. Registries are plain values owned by whoever builds the
//! pipeline; there is no process-wide registry.

mod traits;

pub use traits::Registry;
