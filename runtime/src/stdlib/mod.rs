//! Functions that are registered as globals when a runtime is built with the
//! standard library.

use crate::prelude::*;

mod lang;
mod math;
mod string;

/// Register the standard library in the given global scope.
pub(crate) fn init(globals: &RootScope) {
    let variables = globals.variables();

    variables.extend(&lang::load());
    variables.extend(&math::load());
    variables.extend(&string::load());

    log::debug!("registered {} standard library globals", variables.len());
}

/// Get the argument at the given position, or nil if it was not passed.
fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

/// Get the argument at the given position as a number.
fn number_arg(function: &str, args: &[Value], index: usize) -> Result<f64, Exception> {
    match args.get(index) {
        Some(Value::Number(number)) => Ok(*number),
        Some(value) => throw!("{}() expects a number, got {}", function, value.type_name()),
        None => throw!("{}() expects at least {} argument(s)", function, index + 1),
    }
}
