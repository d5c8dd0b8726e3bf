use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// A deferred producer of a variable's value.
///
/// Scopes store suppliers rather than values; a supplier is only invoked when
/// the variable is resolved, so a binding can reflect state at render time
/// instead of the time it was bound.
#[derive(Clone)]
pub struct Supplier(Arc<dyn Fn() -> Value + Send + Sync>);

impl Supplier {
    /// Create a supplier that invokes the given closure on every resolution.
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Create a supplier that always produces the same value.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(move || value.clone())
    }

    /// Produce the current value.
    pub fn get(&self) -> Value {
        (self.0)()
    }

    /// Returns true if both suppliers are the same allocation.
    pub fn ptr_eq(&self, other: &Supplier) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Value> for Supplier {
    fn from(value: Value) -> Self {
        Self::constant(value)
    }
}

impl fmt::Debug for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<supplier@{:x}>", Arc::as_ptr(&self.0) as *const () as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn suppliers_are_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let supplier = {
            let calls = calls.clone();
            Supplier::new(move || Value::from(calls.fetch_add(1, Ordering::SeqCst) as f64))
        };

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(supplier.get(), Value::from(0.0));
        assert_eq!(supplier.get(), Value::from(1.0));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clones_share_the_closure() {
        let supplier = Supplier::constant("hello");

        assert!(supplier.ptr_eq(&supplier.clone()));
        assert!(!supplier.ptr_eq(&Supplier::constant("hello")));
    }
}
