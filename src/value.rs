//! Decoded JSON values and shape classification.
//!
//! Query documents arrive as text, are decoded by serde_json, and are then
//! converted into [`Value`] trees before compilation. Unlike
//! `serde_json::Value`, object entries are stored as an ordered list of
//! pairs, so compiled placeholders and their bound arguments always come out
//! in the order the document was written.

/// A decoded JSON value used throughout the query compiler.
///
/// # Examples
///
/// ```
/// use jsonwhere::Value;
///
/// let scalar = Value::Integer(21);
/// let doc = Value::Object(vec![("age".to_string(), scalar)]);
/// assert!(matches!(doc, Value::Object(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Object entries in document order
    Object(Vec<(String, Value)>),
}

/// Shape of a value as seen by the compiler.
///
/// Booleans and nulls have no SQL predicate mapping and classify as
/// [`Kind::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// String or number, usable as a bound argument
    Scalar,
    /// Array of values
    Array,
    /// Nested object
    Object,
    /// Boolean or null
    Unsupported,
}

impl Value {
    /// Classify this value for compiler dispatch.
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) | Value::Integer(_) | Value::Float(_) => Kind::Scalar,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Null | Value::Boolean(_) => Kind::Unsupported,
        }
    }

    /// Check whether this value can be bound as a single SQL argument.
    pub fn is_scalar(&self) -> bool {
        self.kind() == Kind::Scalar
    }
}

/// Convert a `serde_json::Value` into a [`Value`].
///
/// Object key order is preserved (serde_json is built with `preserve_order`),
/// which keeps argument order deterministic across parses of the same
/// document.
pub fn from_json(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // u64 beyond i64 range with no float representation
                Value::Null
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::Array(arr.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(obj) => {
            Value::Object(obj.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}
