use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A single argument value supplied to a formatting call.
///
/// The engine never mutates values; the map is read-only for the duration
/// of one `format` call.
#[derive(Clone)]
pub enum Value {
    /// Plain text, substituted verbatim (after brace escaping)
    Str(String),
    /// Integer, usable for plural resolution and number formatting
    Int(i64),
    /// Floating point number
    Float(f64),
    /// A numeric string such as `"1.50"`; keeps its visible fraction
    /// digits for plural operand decomposition
    Decimal(String),
    /// Seconds since the Unix epoch, rendered via the time delegate
    Time(i64),
    /// Arbitrary renderable object; substituted via its `Display` impl
    Render(Arc<dyn fmt::Display + Send + Sync>),
}

impl Value {
    /// Natural string form of the value, used for simple substitution
    /// and for the unknown-keyword fallback.
    pub fn render(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(x) => x.to_string(),
            Value::Decimal(s) => s.clone(),
            Value::Time(secs) => secs.to_string(),
            Value::Render(r) => r.to_string(),
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            Value::Decimal(s) | Value::Str(s) => s.trim().parse::<f64>().ok(),
            Value::Time(secs) => Some(*secs as f64),
            Value::Render(_) => None,
        }
    }

    /// Decimal-string form of the value, preserving visible fraction
    /// digits for string-typed numbers. `None` for non-numeric values.
    pub fn decimal_str(&self) -> Option<String> {
        match self {
            Value::Int(i) => Some(i.to_string()),
            Value::Float(x) if x.is_finite() => Some(x.to_string()),
            Value::Float(_) => None,
            Value::Decimal(s) | Value::Str(s) => {
                let t = s.trim();
                t.parse::<f64>().ok().map(|_| t.to_string())
            }
            Value::Time(secs) => Some(secs.to_string()),
            Value::Render(_) => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Decimal(s) => f.debug_tuple("Decimal").field(s).finish(),
            Value::Time(secs) => f.debug_tuple("Time").field(secs).finish(),
            Value::Render(r) => f.debug_tuple("Render").field(&r.to_string()).finish(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// Named argument collection for one formatting call.
#[derive(Debug, Clone, Default)]
pub struct Args(HashMap<String, Value>);

impl Args {
    pub fn new() -> Self {
        Args(HashMap::new())
    }

    /// Insert an argument, replacing any previous value for the name.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether `name` is a known argument. The scanner uses this to decide
    /// if a `{` opens a placeholder or is ordinary text.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
