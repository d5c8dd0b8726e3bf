use crate::prelude::*;
use std::{fmt, sync::Arc};

/// A native function that can be invoked by templates through a runtime as
/// well as in native code.
#[derive(Clone)]
pub struct Function(Arc<dyn Fn(Vec<Value>) -> Result<Value, Exception> + Send + Sync>);

impl Function {
    pub fn new(f: impl Fn(Vec<Value>) -> Result<Value, Exception> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: Vec<Value>) -> Result<Value, Exception> {
        (self.0)(args)
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for Function {
    fn eq(&self, rhs: &Function) -> bool {
        Arc::ptr_eq(&self.0, &rhs.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<function@{:x}>", self.id())
    }
}
