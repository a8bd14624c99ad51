//! Core transform types and error definitions

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::models::{Attributes, TransformedToken};

/// Errors from resolving or applying a transform group.
///
/// All of them are fatal to the platform being built and to nothing else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// No transform group with this name is registered
    #[error("unknown transform group: {0}")]
    UnknownGroup(String),

    /// A group or transform list names a transform that is not registered
    #[error("unknown transform: {0}")]
    UnknownTransform(String),

    /// An alias points at a path with no token
    #[error("token '{token}' references missing token '{target}'")]
    UnresolvedReference { token: String, target: String },

    /// An alias chain loops back on itself
    #[error("circular reference: {}", chain.join(" -> "))]
    CircularReference { chain: Vec<String> },
}

/// Options every transform sees, resolved from the platform config.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOptions {
    /// Root font size in px for rem conversion
    pub base_font_size: f64,
    /// Keep aliases as `var(...)` references instead of inlining values
    pub output_references: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self { base_font_size: 16.0, output_references: true }
    }
}

impl TransformOptions {
    pub fn with_base_font_size(mut self, base_font_size: f64) -> Self {
        self.base_font_size = base_font_size;
        self
    }

    pub fn with_output_references(mut self, output_references: bool) -> Self {
        self.output_references = output_references;
        self
    }
}

/// Predicate deciding whether a transform applies to a token.
pub type TransformFilter = Arc<dyn Fn(&TransformedToken, &TransformOptions) -> bool + Send + Sync>;

type StringFn = Arc<dyn Fn(&TransformedToken, &TransformOptions) -> String + Send + Sync>;
type AttributeFn = Arc<dyn Fn(&TransformedToken, &TransformOptions) -> Attributes + Send + Sync>;

/// What a transform produces, and so which token field it replaces.
#[derive(Clone)]
pub enum TransformFn {
    /// Replaces `name`
    Name(StringFn),
    /// Replaces `value`
    Value(StringFn),
    /// Merged shallowly into `attributes`
    Attribute(AttributeFn),
}

/// Kind of a transform, for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Name,
    Value,
    Attribute,
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformKind::Name => write!(f, "name"),
            TransformKind::Value => write!(f, "value"),
            TransformKind::Attribute => write!(f, "attribute"),
        }
    }
}

/// A named pure function over one token.
#[derive(Clone)]
pub struct Transform {
    pub name: String,
    pub filter: Option<TransformFilter>,
    /// Value transforms only: also run on tokens whose value is a reference
    pub transitive: bool,
    pub func: TransformFn,
}

impl Transform {
    pub fn name<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&TransformedToken, &TransformOptions) -> String + Send + Sync + 'static,
    {
        Self::from_fn(name, TransformFn::Name(Arc::new(f)))
    }

    pub fn value<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&TransformedToken, &TransformOptions) -> String + Send + Sync + 'static,
    {
        Self::from_fn(name, TransformFn::Value(Arc::new(f)))
    }

    pub fn attribute<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&TransformedToken, &TransformOptions) -> Attributes + Send + Sync + 'static,
    {
        Self::from_fn(name, TransformFn::Attribute(Arc::new(f)))
    }

    fn from_fn(name: impl Into<String>, func: TransformFn) -> Self {
        Self { name: name.into(), filter: None, transitive: false, func }
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&TransformedToken, &TransformOptions) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn transitive(mut self) -> Self {
        self.transitive = true;
        self
    }

    pub fn kind(&self) -> TransformKind {
        match self.func {
            TransformFn::Name(_) => TransformKind::Name,
            TransformFn::Value(_) => TransformKind::Value,
            TransformFn::Attribute(_) => TransformKind::Attribute,
        }
    }

    /// Whether this transform should run on `token`.
    pub fn matches(&self, token: &TransformedToken, options: &TransformOptions) -> bool {
        if matches!(self.func, TransformFn::Value(_)) && !self.transitive && token.is_reference() {
            return false;
        }
        self.filter.as_ref().map_or(true, |filter| filter(token, options))
    }

    /// Apply to one token in place, honoring the filter.
    pub fn apply(&self, token: &mut TransformedToken, options: &TransformOptions) {
        if !self.matches(token, options) {
            return;
        }
        match &self.func {
            TransformFn::Name(f) => token.name = f(token, options),
            TransformFn::Value(f) => token.value = f(token, options),
            TransformFn::Attribute(f) => {
                let attributes = f(token, options);
                token.attributes.extend(attributes);
            }
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("filtered", &self.filter.is_some())
            .field("transitive", &self.transitive)
            .finish()
    }
}
