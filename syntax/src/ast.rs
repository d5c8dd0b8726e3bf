//! Abstract syntax tree definitions for the template syntax.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed template, containing literal text interleaved with expression
/// sections.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Iterate over every expression section in this template.
    pub fn sections(&self) -> impl Iterator<Item = &Expr> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Section(expr) => Some(expr),
            Segment::Text(_) => None,
        })
    }
}

/// One piece of a template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Segment {
    /// Literal text, rendered as-is.
    Text(String),

    /// An expression in braces, rendered as the value it evaluates to.
    Section(Expr),
}

/// Abstract representation of an expression.
///
/// Contains a variant for each different expression type.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// The `null` literal.
    Null,

    /// A boolean literal.
    Boolean(bool),

    /// A number literal.
    Number(f64),

    /// A string literal.
    String(String),

    /// A bare variable reference, resolved against the evaluation scope.
    Variable(String),

    /// Field access on the value of another expression.
    Field(Box<Expr>, String),

    /// A function call on the value of another expression.
    Call(Box<Expr>, Vec<Expr>),
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Null => write!(f, "Null"),
            Expr::Boolean(v) => write!(f, "Boolean({})", v),
            Expr::Number(v) => write!(f, "Number({})", v),
            Expr::String(v) => write!(f, "String({:?})", v),
            Expr::Variable(v) => write!(f, "Variable({})", v),
            Expr::Field(target, name) => f.debug_struct("Field")
                .field("target", target)
                .field("name", name)
                .finish(),
            Expr::Call(function, args) => f.debug_struct("Call")
                .field("function", function)
                .field("args", args)
                .finish(),
        }
    }
}

/// Renders the expression back into source form.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Null => write!(f, "null"),
            Expr::Boolean(v) => write!(f, "{}", v),
            Expr::Number(v) => write!(f, "{}", v),
            Expr::String(v) => write!(f, "{:?}", v),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Field(target, name) => write!(f, "{}.{}", target, name),
            Expr::Call(function, args) => {
                write!(f, "{}(", function)?;

                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }

                write!(f, ")")
            }
        }
    }
}
