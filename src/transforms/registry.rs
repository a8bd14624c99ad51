//! Transform registry: named transforms and named groups of them.

use std::collections::HashMap;

use crate::registry::Registry;

use super::builtin::builtin_transforms;
use super::groups::builtin_groups;
use super::types::{Transform, TransformError};

/// Registry of transforms and transform groups.
///
/// Registering a name that already exists replaces the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, Transform>,
    groups: HashMap<String, Vec<String>>,
}

/// A group whose member names have been looked up.
#[derive(Debug, Clone)]
pub struct ResolvedGroup {
    pub name: String,
    pub transforms: Vec<Transform>,
}

impl ResolvedGroup {
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name.as_str()).collect()
    }
}

impl TransformRegistry {
    /// Create a new empty transform registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in transform and group.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for transform in builtin_transforms() {
            registry.register(transform);
        }
        for (name, members) in builtin_groups() {
            registry.register_group(name, members.into_iter().map(String::from).collect());
        }
        registry
    }

    /// Register a transform, replacing any with the same name.
    pub fn register(&mut self, transform: Transform) {
        self.transforms.insert(transform.name.clone(), transform);
    }

    /// Register a group, replacing any with the same name.
    ///
    /// Members are not checked until the group is resolved, so groups may
    /// name transforms registered later.
    pub fn register_group(&mut self, name: impl Into<String>, transforms: Vec<String>) {
        self.groups.insert(name.into(), transforms);
    }

    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.keys().cloned().collect();
        names.sort();
        names
    }

    /// Look up a named group and every transform it lists.
    pub fn resolve_group(&self, name: &str) -> Result<ResolvedGroup, TransformError> {
        let members = self.groups.get(name).ok_or_else(|| TransformError::UnknownGroup(name.to_string()))?;
        let mut resolved = self.resolve_transforms(members)?;
        resolved.name = name.to_string();
        Ok(resolved)
    }

    /// Look up an explicit, ordered list of transform names.
    pub fn resolve_transforms<S: AsRef<str>>(&self, names: &[S]) -> Result<ResolvedGroup, TransformError> {
        let transforms = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.transforms
                    .get(name)
                    .cloned()
                    .ok_or_else(|| TransformError::UnknownTransform(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedGroup { name: String::from("<custom>"), transforms })
    }
}

impl Registry<Transform> for TransformRegistry {
    fn contains(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&Transform> {
        self.transforms.get(name)
    }

    fn len(&self) -> usize {
        self.transforms.len()
    }

    fn clear(&mut self) {
        self.transforms.clear();
        self.groups.clear();
    }

    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        Box::new(self.transforms.keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Token, TokenType, TransformedToken};
    use crate::transforms::TransformOptions;

    #[test]
    fn test_builtins_registered() {
        let registry = TransformRegistry::with_builtins();
        assert!(registry.contains("name/semantic"));
        assert!(registry.contains("size/pxToRem"));
        assert_eq!(registry.group_names(), vec!["css", "docs", "js", "json", "scss"]);
    }

    #[test]
    fn test_resolve_group_preserves_order() {
        let registry = TransformRegistry::with_builtins();
        let group = registry.resolve_group("js").unwrap();
        assert_eq!(group.name, "js");
        assert_eq!(group.transform_names(), vec!["attribute/category", "name/constant", "color/rgba"]);
    }

    #[test]
    fn test_unknown_group() {
        let registry = TransformRegistry::with_builtins();
        assert_eq!(
            registry.resolve_group("android").unwrap_err(),
            TransformError::UnknownGroup("android".to_string())
        );
    }

    #[test]
    fn test_unknown_member_fails_resolution() {
        let mut registry = TransformRegistry::with_builtins();
        registry.register_group("broken", vec!["name/kebab".into(), "name/nope".into()]);
        assert_eq!(
            registry.resolve_group("broken").unwrap_err(),
            TransformError::UnknownTransform("name/nope".to_string())
        );
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = TransformRegistry::with_builtins();
        let before = registry.len();
        registry.register(Transform::name("name/kebab", |_, _| "custom".to_string()));
        assert_eq!(registry.len(), before);

        let group = registry.resolve_transforms(&["name/kebab"]).unwrap();
        let mut token = TransformedToken::from_token(&Token::new(vec!["a".into()], TokenType::Color, "#000000"));
        group.transforms[0].apply(&mut token, &TransformOptions::default());
        assert_eq!(token.name, "custom");
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = TransformRegistry::with_builtins();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.group_names().is_empty());
    }
}
