//! Common trait for registries that store named items.

/// Common trait for registries that store named items.
///
/// Transform and format registries both map a name to an entry and are
/// looked up by name at configuration time, so they share this interface.
///
/// # Type Parameters
///
/// * `V` - The type of value stored in the registry
///
/// # Example
///
/// ```
/// use tokenforge::registry::Registry;
/// use tokenforge::transforms::TransformRegistry;
///
/// let registry = TransformRegistry::with_builtins();
///
/// assert!(registry.contains("name/semantic"));
/// assert!(!registry.is_empty());
/// ```
pub trait Registry<V> {
    /// Check if an item with the given name exists in the registry.
    fn contains(&self, name: &str) -> bool;

    /// Get an item by name.
    ///
    /// Returns `None` if no item with the given name exists.
    fn get(&self, name: &str) -> Option<&V>;

    /// Get the number of items in the registry.
    fn len(&self) -> usize;

    /// Check if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all items from the registry.
    fn clear(&mut self);

    /// Get an iterator over all names in the registry.
    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_>;

    /// All names, sorted, for stable listings.
    fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names().cloned().collect();
        names.sort();
        names
    }
}
