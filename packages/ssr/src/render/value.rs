//! Dynamic binding values
//!
//! A closed set of tagged variants for everything a binding expression
//! can produce. Directive dispatch goes through the `Directive` variant
//! (a capability check), never through concrete-type inspection.

use std::fmt;
use std::rc::Rc;

use crate::directive::Directive;
use crate::template::result::TemplateResult;

/// A dynamic value produced by a binding expression.
#[derive(Clone)]
pub enum Value {
    /// Absent value; produces nothing in node position.
    Null,
    /// Explicit "render nothing" sentinel.
    Nothing,
    /// "Leave the previous value in place" sentinel; on the server,
    /// where there is no previous value, it produces nothing.
    NoChange,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Template(TemplateResult),
    List(Vec<Value>),
    Directive(Rc<dyn Directive>),
}

impl Value {
    /// Truthiness as the client-side expression language defines it:
    /// absent values, `false`, zero and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null | Value::Nothing | Value::NoChange => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Template(_) | Value::List(_) | Value::Directive(_) => true,
        }
    }

    /// Text coercion for node positions and attribute interpolation.
    /// Nothing-like values never contribute text.
    pub fn coerce(&self) -> String {
        match self {
            Value::Null | Value::Nothing | Value::NoChange => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.clone(),
            Value::Template(_) => String::new(),
            Value::List(items) => items.iter().map(Value::coerce).collect(),
            Value::Directive(_) => String::new(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Nothing => write!(f, "Nothing"),
            Value::NoChange => write!(f, "NoChange"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Template(t) => write!(f, "Template({} values)", t.values.len()),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Directive(d) => write!(f, "Directive({})", d.kind()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<TemplateResult> for Value {
    fn from(v: TemplateResult) -> Self {
        Value::Template(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Rc<dyn Directive>> for Value {
    fn from(v: Rc<dyn Directive>) -> Self {
        Value::Directive(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// JSON data renders directly: objects have no HTML meaning and coerce
/// to nothing, everything else maps onto the matching variant.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(_) => Value::Nothing,
        }
    }
}
