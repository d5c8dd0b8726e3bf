//! The Glint runtime.
use crate::eval;
use crate::exceptions::Exception;
use crate::scope::{ChildScope, RootScope, Scope};
use crate::stdlib;
use crate::supplier::Supplier;
use crate::syntax;
use crate::syntax::ast::*;
use crate::syntax::source::*;
use crate::value::Value;
use std::time::Instant;

/// Configure a runtime.
pub struct RuntimeBuilder {
    stdlib: bool,
    globals: Vec<(String, Supplier)>,
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new().with_stdlib()
    }
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            stdlib: false,
            globals: Vec::new(),
        }
    }

    /// Register the standard library functions as globals.
    pub fn with_stdlib(mut self) -> Self {
        self.stdlib = true;
        self
    }

    pub fn without_stdlib(mut self) -> Self {
        self.stdlib = false;
        self
    }

    /// Bind a global variable to a constant value. Dotted names are allowed.
    pub fn global(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.globals.push((name.into(), Supplier::constant(value)));
        self
    }

    /// Bind a global variable to a closure that is invoked on every lookup.
    pub fn global_lazy(mut self, name: impl Into<String>, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.globals.push((name.into(), Supplier::new(f)));
        self
    }

    pub fn build(self) -> Runtime {
        let start_time = Instant::now();

        let runtime = Runtime {
            globals: RootScope::new(),
        };

        if self.stdlib {
            stdlib::init(&runtime.globals);
        }

        // Globals given to the builder take precedence over the stdlib.
        for (name, supplier) in self.globals {
            runtime.globals.variables().set(&name, supplier);
        }

        log::debug!("runtime took {:?} to initialize", start_time.elapsed());

        runtime
    }
}

/// Holds all of the state of a Glint runtime.
///
/// A runtime can be shared between threads; rendering only needs a shared
/// reference, and globals may be changed while other threads are rendering.
#[derive(Debug)]
pub struct Runtime {
    /// Scope where global values are stored.
    globals: RootScope,
}

impl Default for Runtime {
    fn default() -> Self {
        RuntimeBuilder::default().build()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get the scope that holds all global variables.
    pub fn globals(&self) -> &RootScope {
        &self.globals
    }

    /// Set a global variable to a constant value. Dotted names address
    /// variables inside nested maps.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> &Self {
        self.globals.set_supplier(name, Supplier::constant(value)).ok();
        self
    }

    /// Set a global variable to a closure that is invoked on every lookup.
    pub fn set_lazy(&self, name: &str, f: impl Fn() -> Value + Send + Sync + 'static) -> &Self {
        self.globals.set_supplier(name, Supplier::new(f)).ok();
        self
    }

    /// Remove a global variable, returning its supplier.
    pub fn remove(&self, name: &str) -> Option<Supplier> {
        self.globals.remove(name).ok().flatten()
    }

    /// Resolve a global variable. Undefined variables resolve to `Nil`.
    pub fn get(&self, name: &str) -> Value {
        match self.globals.get(name) {
            Ok(Some(supplier)) => supplier.get(),
            _ => Value::Nil,
        }
    }

    /// Create a new child scope of the globals, for bindings that should only
    /// be visible for a limited time.
    pub fn scope(&self) -> ChildScope<'_> {
        self.globals.scope()
    }

    /// Compile the given source code as a template.
    pub fn compile(&self, file: impl Into<SourceFile>) -> Result<Template, Exception> {
        let file = file.into();
        let start_time = Instant::now();

        let template = syntax::parse(file.clone())?;

        log::debug!("compiled {} in {:?}", file.name(), start_time.elapsed());

        Ok(template)
    }

    /// Render a template against the global scope.
    pub fn run(&self, template: &Template) -> Result<String, Exception> {
        self.run_in(template, &self.globals)
    }

    /// Render a template, resolving variables through the given scope.
    pub fn run_in(&self, template: &Template, scope: &dyn Scope) -> Result<String, Exception> {
        eval::render(template, scope)
    }

    /// Compile and render the given source code in one step.
    pub fn render(&self, file: impl Into<SourceFile>) -> Result<String, Exception> {
        let template = self.compile(file)?;
        self.run(&template)
    }

    /// Evaluate a single expression through the given scope.
    pub fn evaluate(&self, expr: &Expr, scope: &dyn Scope) -> Result<Value, Exception> {
        eval::evaluate(expr, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_globals_override_stdlib() {
        let runtime = Runtime::builder().with_stdlib().global("upper", "shadowed").build();

        assert_eq!(runtime.get("upper"), "shadowed");
        assert!(runtime.get("lower").as_function().is_some());
    }

    #[test]
    fn without_stdlib_starts_empty() {
        let runtime = Runtime::builder().without_stdlib().build();

        assert!(runtime.globals().keys().is_empty());
    }

    #[test]
    fn globals_go_through_the_root_scope() {
        let runtime = Runtime::builder().without_stdlib().build();
        runtime.set("player.name", "Steve").set_lazy("level", || Value::from(3));

        let globals: &dyn Scope = runtime.globals();
        assert_eq!(globals.get("player.name").unwrap().unwrap().get(), "Steve");
        assert_eq!(runtime.get("level"), 3.0);
        assert!(globals.get_raw("player.name").is_none());

        assert!(runtime.remove("player.name").is_some());
        assert!(globals.get("player.name").unwrap().is_none());
        assert!(runtime.remove("player.name").is_none());
        assert!(runtime.get("player.name").is_nil());
    }

    #[test]
    fn lazy_globals() {
        let runtime = Runtime::builder().without_stdlib().global_lazy("answer", || Value::from(42)).build();

        assert_eq!(runtime.render("{answer}").unwrap(), "42");
    }

    #[test]
    fn calling_a_non_function_fails() {
        let runtime = Runtime::builder().without_stdlib().build();
        runtime.set("name", "Steve");

        match runtime.render("{name()}") {
            Err(Exception::NotCallable { type_name }) => assert_eq!(type_name, "string"),
            other => panic!("expected NotCallable, got {:?}", other),
        }
    }

    #[test]
    fn parse_errors_are_exceptions() {
        let runtime = Runtime::new();

        assert!(matches!(runtime.render("{unterminated"), Err(Exception::Parse(_))));
    }
}
