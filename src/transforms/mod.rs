//! Transform registry and application
//!
//! A transform is a named pure function over one token that replaces its
//! name, replaces its value, or adds attributes. Transforms are composed
//! into ordered groups; a platform picks one group (or an explicit list).
//!
//! # Module Structure
//!
//! - [`types`] - Core transform types and error definitions
//! - [`builtin`] - Built-in transforms
//! - [`groups`] - Built-in transform groups
//! - [`registry`] - Name lookup for transforms and groups
//! - [`apply`] - Per-token application and alias unwinding

pub mod apply;
pub mod builtin;
pub mod groups;
pub mod registry;
pub mod types;

// Re-export main types at the module level for convenience
pub use apply::{apply_transforms, resolve_aliases};
pub use builtin::{
    builtin_transforms, camel_case, category_attributes, category_for, constant_case, hex_with_alpha, kebab_case,
    reference_to_var, semantic_name, type_prefix,
};
pub use groups::builtin_groups;
pub use registry::{ResolvedGroup, TransformRegistry};
pub use types::{Transform, TransformError, TransformFilter, TransformFn, TransformKind, TransformOptions};

/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
