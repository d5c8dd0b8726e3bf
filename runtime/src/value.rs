//! Structures and implementations of the built-in data types.
use crate::exceptions::Exception;
use crate::foreign::Function;
use crate::table::ValueMap;
use std::fmt;
use std::sync::Arc;

type Number = f64;

/// A Glint value. This is a small enum that can represent any of the possible data types a template can work with.
///
/// Scalars are stored inline, while strings, maps and functions are stored behind a shared pointer so values can be
/// cloned cheaply and passed between threads.
#[derive(Clone, Default)]
pub enum Value {
    /// The "empty" value. This is what an undefined variable resolves to.
    #[default]
    Nil,

    /// A boolean value.
    Boolean(bool),

    /// A plain number. Stored by value.
    Number(Number),

    /// A string. Immutable, and stored by reference.
    String(Arc<str>),

    /// A native function.
    Function(Function),

    /// A map of nested variables, stored by reference.
    Map(ValueMap),

    /// An opaque object provided by the embedding application.
    Object(Object),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl<'a> From<&'a str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl Value {
    pub const TRUE: Self = Value::Boolean(true);
    pub const FALSE: Self = Value::Boolean(false);

    /// Wrap a native closure as a function value.
    pub fn function(f: impl Fn(Vec<Value>) -> Result<Value, Exception> + Send + Sync + 'static) -> Self {
        Value::Function(Function::new(f))
    }

    /// Wrap an application object as an opaque value.
    pub fn object(object: impl fmt::Display + Send + Sync + 'static) -> Self {
        Value::Object(Object::new(object))
    }

    /// Get the type of value, rendered as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Determine if this value is considered a truthy value.
    ///
    /// Nil and false are falsey, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    /// If this value is a boolean, get its value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If this value is a number, get its numeric value.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// If this value is a string, get its string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(&**string),
            _ => None,
        }
    }

    /// If this value is a function, get a reference to it.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    /// If this value is a map, get a reference to it.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// If this is a map, resolve the variable stored under a key.
    ///
    /// Dotted keys descend into nested maps. Anything missing resolves to `Nil`.
    pub fn get(&self, key: &str) -> Value {
        self.as_map()
            .and_then(|map| map.get(key))
            .map(|supplier| supplier.get())
            .unwrap_or_default()
    }
}

impl PartialEq for Value {
    fn eq(&self, rhs: &Value) -> bool {
        match (self, rhs) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(lhs), Value::Boolean(rhs)) => lhs == rhs,
            (Value::Number(lhs), Value::Number(rhs)) => lhs == rhs,
            (Value::String(lhs), Value::String(rhs)) => lhs == rhs,
            (Value::Function(lhs), Value::Function(rhs)) => lhs == rhs,
            (Value::Map(lhs), Value::Map(rhs)) => lhs == rhs,
            (Value::Object(lhs), Value::Object(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, rhs: &str) -> bool {
        self.as_str() == Some(rhs)
    }
}

impl<'a> PartialEq<&'a str> for Value {
    fn eq(&self, rhs: &&'a str) -> bool {
        self.as_str() == Some(*rhs)
    }
}

impl PartialEq<Number> for Value {
    fn eq(&self, rhs: &Number) -> bool {
        self.as_number() == Some(*rhs)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, rhs: &bool) -> bool {
        self.as_bool() == Some(*rhs)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(boolean) => write!(f, "{}", boolean),
            Value::Number(number) => write!(f, "{}", number),
            Value::String(string) => write!(f, "{:?}", string),
            Value::Map(map) => write!(f, "{:?}", map),
            _ => write!(f, "<{}>", self.type_name()),
        }
    }
}

/// Renders the value the way it appears in template output. Nil renders as
/// nothing at all.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::Boolean(boolean) => write!(f, "{}", boolean),
            Value::Number(number) => write!(f, "{}", number),
            Value::String(string) => write!(f, "{}", string),
            Value::Map(map) => write!(f, "{}", map),
            Value::Object(object) => write!(f, "{}", object),
            Value::Function(_) => write!(f, "<function>"),
        }
    }
}

/// An opaque object handed to templates by the embedding application.
///
/// Templates cannot look inside an object; it renders through its own
/// `Display` implementation.
#[derive(Clone)]
pub struct Object(Arc<dyn fmt::Display + Send + Sync>);

impl Object {
    pub fn new(object: impl fmt::Display + Send + Sync + 'static) -> Self {
        Self(Arc::new(object))
    }
}

impl PartialEq for Object {
    fn eq(&self, rhs: &Object) -> bool {
        // Object equality is based on identity rather than value.
        Arc::ptr_eq(&self.0, &rhs.0)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
