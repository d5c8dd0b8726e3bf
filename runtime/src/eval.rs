//! This module contains the core logic of the interpreter.

use crate::{
    exceptions::Exception,
    scope::Scope,
    syntax::ast::*,
    value::Value,
};

/// Render a template, resolving every variable through the given scope.
pub(crate) fn render(template: &Template, scope: &dyn Scope) -> Result<String, Exception> {
    let mut output = String::new();

    for segment in template.segments.iter() {
        match segment {
            Segment::Text(text) => output.push_str(text),
            Segment::Section(expr) => output.push_str(&evaluate(expr, scope)?.to_string()),
        }
    }

    Ok(output)
}

/// Evaluate a single expression.
pub(crate) fn evaluate(expr: &Expr, scope: &dyn Scope) -> Result<Value, Exception> {
    match expr {
        Expr::Null => Ok(Value::Nil),
        Expr::Boolean(boolean) => Ok(Value::Boolean(*boolean)),
        Expr::Number(number) => Ok(Value::Number(*number)),
        Expr::String(string) => Ok(Value::from(string.as_str())),
        Expr::Variable(name) => Ok(match scope.get(name)? {
            Some(supplier) => supplier.get(),
            None => {
                log::trace!("variable '{}' is undefined", name);
                Value::Nil
            }
        }),
        Expr::Field(target, name) => Ok(evaluate(target, scope)?.get(name)),
        Expr::Call(function, args) => {
            let function = evaluate(function, scope)?;

            let mut arg_values = Vec::with_capacity(args.len());
            for arg in args {
                arg_values.push(evaluate(arg, scope)?);
            }

            invoke(&function, arg_values)
        }
    }
}

/// Invoke the given value as a function with the given arguments.
pub(crate) fn invoke(value: &Value, args: Vec<Value>) -> Result<Value, Exception> {
    match value {
        Value::Function(function) => function.call(args),
        value => Err(Exception::NotCallable {
            type_name: value.type_name(),
        }),
    }
}
