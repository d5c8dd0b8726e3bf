//! The Glint template runtime.
//!
//! Variables are resolved through a chain of scopes: a single [`RootScope`]
//! owned by the [`Runtime`], and any number of short-lived
//! [`ChildScope`](scope::ChildScope)s stacked on top of it to override or hide
//! names for one render without touching the root.

/// Convenience macro for creating a value map.
#[macro_export]
macro_rules! value_map {
    () => {
        $crate::table::ValueMap::default()
    };

    (
        $(
            $key:expr => $value:expr,
        )*
    ) => {
        {
            let map = $crate::value_map!();
            $(
                map.set($key, $crate::supplier::Supplier::constant($value));
            )*
            map
        }
    };
}

/// Convenience macro for throwing a runtime exception.
#[macro_export]
macro_rules! throw {
    ($($arg:tt)*) => {
        return Err($crate::exceptions::Exception::from(format!($($arg)*)))
    };
}

mod eval;
pub mod exceptions;
mod foreign;
pub mod runtime;
pub mod scope;
mod stdlib;
pub mod supplier;
pub mod table;
pub mod value;

// Re-export syntax crate.
pub mod syntax {
    pub use glint_syntax::*;
}

pub mod prelude {
    pub use crate::exceptions::Exception;
    pub use crate::foreign::Function;
    pub use crate::runtime::{Runtime, RuntimeBuilder};
    pub use crate::scope::{ChildScope, RootScope, Scope, ScopeError};
    pub use crate::supplier::Supplier;
    pub use crate::table::ValueMap;
    pub use crate::value::{Object, Value};
}

pub use crate::foreign::Function;
pub use crate::runtime::Runtime;
pub use crate::scope::{RootScope, Scope};
