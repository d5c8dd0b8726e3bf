use crate::supplier::Supplier;
use crate::value::Value;
use parking_lot::RwLock;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::Arc,
};

/// Separator between the segments of a dotted variable path.
pub const PATH_SEPARATOR: char = '.';

/// A map of variable names to value suppliers. Value maps back the root scope
/// and the override storage of child scopes, and are also a value type of
/// their own for nested variables.
///
/// Names passed to [`set`](ValueMap::set), [`get`](ValueMap::get) and
/// [`remove`](ValueMap::remove) may be dotted paths such as `player.name`,
/// which address a variable inside nested maps.
#[derive(Clone, Default)]
pub struct ValueMap {
    /// Maps are stored by reference instead of by value, and are internally
    /// mutable. The lock is only ever held for a single read or write of this
    /// level; suppliers are always invoked outside of it.
    inner: Arc<RwLock<BTreeMap<String, Supplier>>>,
}

impl ValueMap {
    /// Allocate a new, empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the supplier for a variable.
    ///
    /// For a dotted path, every segment but the last must name a nested map;
    /// segments that are missing or hold something other than a map are
    /// replaced with a new, empty map first.
    pub fn set(&self, name: &str, supplier: Supplier) -> &Self {
        match name.split_once(PATH_SEPARATOR) {
            None => {
                self.inner.write().insert(name.to_owned(), supplier);
            }
            Some((head, rest)) => {
                self.nested_or_insert(head).set(rest, supplier);
            }
        }

        self
    }

    /// Set a constant value for a variable, returning the map for chaining.
    pub fn with(self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, Supplier::constant(value));
        self
    }

    /// Get the supplier for a variable, following dotted paths into nested
    /// maps.
    ///
    /// Returns `None` if any segment of the path is missing, or if an
    /// intermediate segment does not hold a map.
    pub fn get(&self, name: &str) -> Option<Supplier> {
        match name.split_once(PATH_SEPARATOR) {
            None => self.get_raw(name),
            Some((head, rest)) => self.nested(head)?.get(rest),
        }
    }

    /// Get the supplier stored directly under the given name, without
    /// interpreting dots.
    pub fn get_raw(&self, name: &str) -> Option<Supplier> {
        self.inner.read().get(name).cloned()
    }

    /// Remove a variable, following dotted paths into nested maps, and return
    /// its supplier.
    pub fn remove(&self, name: &str) -> Option<Supplier> {
        match name.split_once(PATH_SEPARATOR) {
            None => self.inner.write().remove(name),
            Some((head, rest)) => self.nested(head)?.remove(rest),
        }
    }

    /// Remove every variable at this level.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Returns true if a variable is stored directly under the given name.
    pub fn contains_key(&self, name: &str) -> bool {
        self.inner.read().contains_key(name)
    }

    /// Get a snapshot of the names stored at this level.
    pub fn keys(&self) -> BTreeSet<String> {
        self.inner.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Copy every top-level entry of another map into this one.
    pub fn extend(&self, other: &ValueMap) {
        let entries = other.entries();
        self.inner.write().extend(entries);
    }

    /// Get a snapshot of the entries stored at this level.
    pub fn entries(&self) -> Vec<(String, Supplier)> {
        self.inner
            .read()
            .iter()
            .map(|(name, supplier)| (name.clone(), supplier.clone()))
            .collect()
    }

    /// Resolve a direct entry that holds a map.
    fn nested(&self, name: &str) -> Option<ValueMap> {
        match self.get_raw(name)?.get() {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    fn nested_or_insert(&self, name: &str) -> ValueMap {
        if let Some(map) = self.nested(name) {
            return map;
        }

        let map = ValueMap::new();
        self.inner.write().insert(name.to_owned(), Supplier::constant(map.clone()));
        map
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, rhs: &ValueMap) -> bool {
        // Map equality is based on identity rather than value.
        Arc::ptr_eq(&self.inner, &rhs.inner)
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl fmt::Display for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries = self.entries();

        write!(f, "{{")?;

        for (i, (name, supplier)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, supplier.get())?;
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps() {
        let map = ValueMap::new();

        assert!(map.get("foo").is_none());
        map.set("foo", Supplier::constant("hello"));
        assert!(map.get("foo").unwrap().get() == "hello");
        assert!(map.remove("foo").unwrap().get() == "hello");
        assert!(map.get("foo").is_none());
    }

    #[test]
    fn dotted_paths_create_nested_maps() {
        let map = ValueMap::new();
        map.set("player.name", Supplier::constant("MineGame159"));
        map.set("player.stats.level", Supplier::constant(12));

        assert_eq!(map.keys(), ["player".to_owned()].into_iter().collect::<BTreeSet<_>>());
        assert_eq!(map.get("player.name").unwrap().get(), "MineGame159");
        assert_eq!(map.get("player.stats.level").unwrap().get(), 12.0);
        assert_eq!(map.get("player").unwrap().get().get("name"), "MineGame159");
    }

    #[test]
    fn dotted_paths_replace_non_map_segments() {
        let map = ValueMap::new().with("player", "just a string");
        map.set("player.name", Supplier::constant("Steve"));

        assert_eq!(map.get("player.name").unwrap().get(), "Steve");
    }

    #[test]
    fn raw_lookups_do_not_split_names() {
        let map = ValueMap::new();
        map.set("a.b", Supplier::constant(1));

        assert!(map.get_raw("a.b").is_none());
        assert!(map.get_raw("a").is_some());
        assert!(map.get("a.b").is_some());
    }

    #[test]
    fn remove_dotted_path_only_removes_leaf() {
        let map = ValueMap::new();
        map.set("player.name", Supplier::constant("Steve"));
        map.set("player.age", Supplier::constant(5));

        assert_eq!(map.remove("player.name").unwrap().get(), "Steve");
        assert!(map.get("player.name").is_none());
        assert_eq!(map.get("player.age").unwrap().get(), 5.0);
        assert!(map.remove("player.missing").is_none());
        assert!(map.remove("nothing.here").is_none());
    }

    #[test]
    fn missing_or_scalar_segments_resolve_to_none() {
        let map = ValueMap::new().with("count", 3);

        assert!(map.get("count.inner").is_none());
        assert!(map.get("missing.inner").is_none());
    }

    #[test]
    fn clones_share_storage() {
        let map = ValueMap::new();
        let other = map.clone();
        other.set("x", Supplier::constant(true));

        assert_eq!(map, other);
        assert!(map.contains_key("x"));
        assert_ne!(map, ValueMap::new());
    }

    #[test]
    fn display() {
        let map = ValueMap::new().with("b", "x").with("a", 1);

        assert_eq!(map.to_string(), "{a: 1, b: x}");
        assert_eq!(ValueMap::new().to_string(), "{}");

        map.remove("a");
        map.remove("b");
        assert_eq!(Value::from(map).to_string(), "{}");
    }
}
