use super::arg;
use crate::prelude::*;

pub fn load() -> ValueMap {
    value_map! {
        "glint" => value_map! {
            "version" => env!("CARGO_PKG_VERSION"),
        },
        "typeof" => Value::function(type_of),
        "default" => Value::function(default),
        "concat" => Value::function(concat),
    }
}

/// Returns the name of the type of the first argument.
fn type_of(args: Vec<Value>) -> Result<Value, Exception> {
    Ok(Value::from(arg(&args, 0).type_name()))
}

/// Returns the first argument, or the second if the first is nil.
fn default(args: Vec<Value>) -> Result<Value, Exception> {
    match arg(&args, 0) {
        Value::Nil => Ok(arg(&args, 1)),
        value => Ok(value),
    }
}

/// Renders every argument and joins them into one string.
fn concat(args: Vec<Value>) -> Result<Value, Exception> {
    Ok(Value::from(args.iter().map(Value::to_string).collect::<String>()))
}
