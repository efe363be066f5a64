//! Dynamic values handed to a [`Schema`](crate::Schema) for validation.
//!
//! A [`Value`] is the "unknown" side of validation: whatever a dispatcher pulled off the wire
//! or a caller assembled by hand. Raw byte buffers have their own variant, [`Value::Bytes`], so
//! a byte container can be told apart from anything that merely looks like one (a string, an
//! array of numbers, an object with a `length` key, ...).

use bytes::Bytes;
use std::collections::BTreeMap;

/// The key/value storage of [`Value::Object`]
pub type ValueMap = BTreeMap<String, Value>;

/// An untyped value, checked by a [`Schema`](crate::Schema) before it becomes a typed one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// a genuine raw byte buffer, the only variant classified as a byte container
    Bytes(Bytes),
    Array(Vec<Value>),
    Object(ValueMap),
}

impl Value {
    /// Builds a [`Value::Object`] from `(key, value)` pairs
    ///
    /// # Example
    /// ```
    /// # use micro_schema::Value;
    /// let value = Value::object([("fileName", Value::from("test.txt")), ("size", Value::from(9))]);
    /// assert_eq!(value.get("fileName").and_then(Value::as_str), Some("test.txt"));
    /// ```
    pub fn object<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Short name of the variant, used in violation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true only for [`Value::Bytes`]
    #[inline]
    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when this value is an object
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

macro_rules! impl_from_number_for_value ({ $($ty:ty)* } => {
    $(
    impl From<$ty> for Value {
        #[allow(clippy::cast_precision_loss, reason = "numbers are carried as f64, like JSON numbers")]
        #[allow(clippy::cast_lossless, reason = "one impl for every primitive")]
        fn from(value: $ty) -> Self {
            Value::Number(value as f64)
        }
    }
    )*
});

impl_from_number_for_value! { f32 i8 i16 i32 i64 u8 u16 u32 u64 usize isize }

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// JSON has no byte type: a JSON array of numbers stays an [`Value::Array`] and never
/// classifies as a byte container.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
        }
    }
}
