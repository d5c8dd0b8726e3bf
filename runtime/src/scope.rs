//! Variable scopes.
//!
//! A scope maps variable names to [`Supplier`]s. Scopes form a chain: a
//! [`RootScope`] sits at the bottom and holds the canonical variables, and any
//! number of [`ChildScope`]s can be stacked on top of it. A child can override
//! or hide any name its parent exposes without ever modifying the parent, so
//! throwing the child away restores the previous view.
use crate::supplier::Supplier;
use crate::table::{ValueMap, PATH_SEPARATOR};
use crate::value::Value;
use parking_lot::RwLock;
use std::{
    collections::{BTreeSet, HashSet},
    fmt,
};
use thiserror::Error;

/// Errors raised when a scope is used in a way it does not support.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ScopeError {
    /// A dotted name was given to a child scope. Dot notation is only
    /// understood by the root scope.
    #[error("child scopes do not support dot notation: '{name}'")]
    UnsupportedPath {
        name: String,
    },
}

/// A variable lookup context.
///
/// Absence of a variable is never an error: lookups return `None` and the
/// caller decides what an undefined variable means.
pub trait Scope: Send + Sync {
    /// Bind a variable supplier in this scope's own storage.
    fn set_supplier(&self, name: &str, supplier: Supplier) -> Result<(), ScopeError>;

    /// Remove every variable this scope provides itself. Ancestors are never
    /// affected.
    fn clear(&self);

    /// Remove a variable, returning the supplier that was visible through this
    /// scope immediately before.
    fn remove(&self, name: &str) -> Result<Option<Supplier>, ScopeError>;

    /// Get the supplier for a variable.
    fn get(&self, name: &str) -> Result<Option<Supplier>, ScopeError>;

    /// Get the supplier for a variable, skipping any name validation. This is
    /// what child scopes call on their parent while walking the chain.
    fn get_raw(&self, name: &str) -> Option<Supplier>;

    /// Get the names of every variable visible through this scope.
    fn keys(&self) -> BTreeSet<String>;

    /// Get the names of the variables this scope provides itself, excluding
    /// inherited ones.
    fn scoped_keys(&self) -> BTreeSet<String>;

    /// Get the map holding this scope's own variables.
    fn variables(&self) -> &ValueMap;

    /// Bind a variable to a constant value.
    fn set(&self, name: &str, value: impl Into<Value>) -> Result<&Self, ScopeError>
    where
        Self: Sized,
    {
        self.set_supplier(name, Supplier::constant(value))?;
        Ok(self)
    }

    /// Bind a variable to a closure that is invoked each time the variable is
    /// resolved.
    fn set_lazy(&self, name: &str, f: impl Fn() -> Value + Send + Sync + 'static) -> Result<&Self, ScopeError>
    where
        Self: Sized,
    {
        self.set_supplier(name, Supplier::new(f))?;
        Ok(self)
    }

    /// Create a new child scope with this scope as its parent.
    fn scope(&self) -> ChildScope<'_>
    where
        Self: Sized,
    {
        ChildScope::new(self)
    }
}

impl<'a> dyn Scope + 'a {
    /// Bind a variable to a constant value.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<&Self, ScopeError> {
        self.set_supplier(name, Supplier::constant(value))?;
        Ok(self)
    }

    /// Create a new child scope with this scope as its parent.
    pub fn scope(&self) -> ChildScope<'_> {
        ChildScope::new(self)
    }
}

/// The scope at the bottom of every chain.
///
/// Every operation is forwarded to the underlying [`ValueMap`], so dotted names
/// such as `player.name` address variables inside nested maps. The root is
/// safe to modify while other threads are resolving variables through it.
#[derive(Debug, Default)]
pub struct RootScope {
    variables: ValueMap,
}

impl RootScope {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scope for RootScope {
    fn set_supplier(&self, name: &str, supplier: Supplier) -> Result<(), ScopeError> {
        self.variables.set(name, supplier);
        Ok(())
    }

    fn clear(&self) {
        self.variables.clear();
    }

    fn remove(&self, name: &str) -> Result<Option<Supplier>, ScopeError> {
        Ok(self.variables.remove(name))
    }

    fn get(&self, name: &str) -> Result<Option<Supplier>, ScopeError> {
        Ok(self.variables.get(name))
    }

    fn get_raw(&self, name: &str) -> Option<Supplier> {
        self.variables.get_raw(name)
    }

    fn keys(&self) -> BTreeSet<String> {
        self.variables.keys()
    }

    fn scoped_keys(&self) -> BTreeSet<String> {
        self.variables.keys()
    }

    fn variables(&self) -> &ValueMap {
        &self.variables
    }
}

/// A scope stacked on top of another scope.
///
/// Each name is in one of three states from the child's point of view:
///
/// - *inherited*: resolved by the parent;
/// - *overridden*: bound in the child, shadowing the parent;
/// - *removed*: hidden, resolving to nothing no matter what the parent holds.
///
/// Setting a name always makes it overridden, removing a visible name makes it
/// removed, and clearing the child makes every name inherited again. The parent
/// is never modified.
///
/// A child scope is meant to live for one unit of work, such as a single
/// render. Child scopes do not support dotted names.
pub struct ChildScope<'p> {
    /// The scope this one inherits from.
    parent: &'p dyn Scope,

    /// Variables bound in this scope. May shadow variables in the parent.
    overrides: ValueMap,

    /// Names hidden from this scope's view of the parent.
    removed: RwLock<HashSet<String>>,
}

impl<'p> ChildScope<'p> {
    pub fn new(parent: &'p dyn Scope) -> Self {
        log::trace!("opening child scope");

        Self {
            parent,
            overrides: ValueMap::new(),
            removed: RwLock::default(),
        }
    }

    /// Get the parent of this scope.
    pub fn parent(&self) -> &'p dyn Scope {
        self.parent
    }

    /// Get a snapshot of the names currently removed from this scope.
    pub fn removed_keys(&self) -> BTreeSet<String> {
        self.removed.read().iter().cloned().collect()
    }

    /// Un-hide a removed name so that it is inherited from the parent again.
    ///
    /// Returns false if the name was not removed.
    pub fn restore(&self, name: &str) -> bool {
        self.removed.write().remove(name)
    }

    /// End the unit of work this scope was created for.
    ///
    /// Nothing needs to be undone since the parent was never touched; this
    /// only marks the point where the scope is discarded.
    pub fn close(self) {
        log::trace!("closing child scope");
    }

    fn check_name(name: &str) -> Result<(), ScopeError> {
        if name.contains(PATH_SEPARATOR) {
            Err(ScopeError::UnsupportedPath {
                name: name.to_owned(),
            })
        } else {
            Ok(())
        }
    }
}

impl Scope for ChildScope<'_> {
    fn set_supplier(&self, name: &str, supplier: Supplier) -> Result<(), ScopeError> {
        Self::check_name(name)?;

        self.overrides.set(name, supplier);
        self.removed.write().remove(name);

        Ok(())
    }

    fn clear(&self) {
        self.overrides.clear();
        self.removed.write().clear();
    }

    fn remove(&self, name: &str) -> Result<Option<Supplier>, ScopeError> {
        Self::check_name(name)?;

        let supplier = self.get_raw(name);

        if supplier.is_some() {
            self.removed.write().insert(name.to_owned());
            self.overrides.remove(name);
        }

        Ok(supplier)
    }

    fn get(&self, name: &str) -> Result<Option<Supplier>, ScopeError> {
        Self::check_name(name)?;

        Ok(self.get_raw(name))
    }

    fn get_raw(&self, name: &str) -> Option<Supplier> {
        if self.removed.read().contains(name) {
            return None;
        }

        self.overrides.get_raw(name).or_else(|| self.parent.get_raw(name))
    }

    fn keys(&self) -> BTreeSet<String> {
        let mut keys = self.parent.keys();

        {
            let removed = self.removed.read();
            keys.retain(|key| !removed.contains(key));
        }

        keys.extend(self.overrides.keys());
        keys
    }

    fn scoped_keys(&self) -> BTreeSet<String> {
        self.overrides.keys()
    }

    fn variables(&self) -> &ValueMap {
        &self.overrides
    }
}

impl fmt::Debug for ChildScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ChildScope")
            .field("overrides", &self.overrides)
            .field("removed", &self.removed_keys())
            .finish()
    }
}
