use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Number;

use crate::error::Result;

/// Text used for instances that carry no custom stringification.
pub const DEFAULT_OBJECT_REPR: &str = "[object Object]";

/// Exclusive upper bound of `u64`, as a double.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Inclusive lower bound of `i64`, as a double.
const I64_FLOOR: f64 = -9_223_372_036_854_775_808.0;

/// A dynamically-typed outbound value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// No value at all (a missing property).
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// An opaque byte buffer.
    Bytes(Bytes),
    Array(Vec<Value>),
    /// A plain data record.
    Object(Object),
    /// An instance of an application type.
    Instance(Instance),
}

impl Value {
    /// Build a byte-buffer value.
    pub fn bytes(bytes: impl Into<Bytes>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// Build an array value.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build a plain-object value from `(name, value)` pairs.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// True for `Undefined` and `Null`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Short name of the variant, for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Instance(_) => "instance",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Look up a property on a plain object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(key))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(number: $ty) -> Self {
                    Value::Number(Number::from(number))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(float: f64) -> Self {
        match Number::from_f64(float) {
            Some(number) => Value::Number(canonical_number(number)),
            None => Value::Null,
        }
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Integral doubles that fit an integer type are stored as integers so
/// `1.0` renders as `1`, the way every double-based producer prints it.
pub(crate) fn canonical_number(number: Number) -> Number {
    let Some(float) = number.as_f64().filter(|_| number.is_f64()) else {
        return number;
    };
    if float.fract() != 0.0 {
        number
    } else if (0.0..U64_LIMIT).contains(&float) {
        Number::from(float as u64)
    } else if (I64_FLOOR..0.0).contains(&float) {
        Number::from(float as i64)
    } else {
        number
    }
}

/// Canonical text of a number: integers in decimal, doubles in their
/// shortest round-trip form, switching to exponent notation outside
/// `[1e-6, 1e21)`.
pub fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float_text(float),
        _ => number.to_string(),
    }
}

fn float_text(float: f64) -> String {
    if float == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&float.abs()) {
        return format!("{float}");
    }
    let text = format!("{float:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// An insertion-ordered record with unique string keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property. An existing property keeps its position and has
    /// its value replaced; the old value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    /// Remove a property, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(name, _)| name == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A type that renders itself as human-readable text.
///
/// Instances built with a `Stringable` representation are serialized through
/// it; instances without one fall back to [`DEFAULT_OBJECT_REPR`]. Every
/// `Display` type is `Stringable`.
pub trait Stringable: Send + Sync {
    fn stringify(&self) -> String;
}

impl<T> Stringable for T
where
    T: fmt::Display + Send + Sync + ?Sized,
{
    fn stringify(&self) -> String {
        self.to_string()
    }
}

/// An instance of an application type.
///
/// `fields` holds its enumerable data, used when the instance is nested
/// inside a plain container. `repr`, when present, is its custom
/// stringification.
#[derive(Clone)]
pub struct Instance {
    type_name: &'static str,
    fields: Object,
    repr: Option<Arc<dyn Stringable>>,
}

impl Instance {
    /// Create an instance with no custom stringification.
    pub fn new(type_name: &'static str, fields: Object) -> Self {
        Self {
            type_name,
            fields,
            repr: None,
        }
    }

    /// Capture a serializable value's fields. The instance has no custom
    /// stringification.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let fields = match Value::from_json(serde_json::to_value(value)?) {
            Value::Object(object) => object,
            _ => Object::new(),
        };
        Ok(Self::new(std::any::type_name::<T>(), fields))
    }

    /// Capture a serializable value's fields and use the value itself as the
    /// custom stringification.
    pub fn stringable<T>(value: T) -> Result<Self>
    where
        T: Serialize + Stringable + 'static,
    {
        Ok(Self::from_serialize(&value)?.with_repr(value))
    }

    /// Attach a custom stringification.
    pub fn with_repr(mut self, repr: impl Stringable + 'static) -> Self {
        self.repr = Some(Arc::new(repr));
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &Object {
        &self.fields
    }

    pub fn has_repr(&self) -> bool {
        self.repr.is_some()
    }

    /// Run the custom stringification, if any.
    pub fn stringify(&self) -> Option<String> {
        self.repr.as_ref().map(|repr| repr.stringify())
    }

    /// The custom stringification, or the default object text.
    pub fn to_display_string(&self) -> String {
        self.stringify()
            .unwrap_or_else(|| DEFAULT_OBJECT_REPR.to_string())
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("has_repr", &self.has_repr())
            .finish()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        let same_repr = match (&self.repr, &other.repr) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_repr && self.type_name == other.type_name && self.fields == other.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Complex {
        name: &'static str,
    }

    impl fmt::Display for Complex {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.name)
        }
    }

    #[test]
    fn number_text_integers() {
        assert_eq!(number_text(&Number::from(12345)), "12345");
        assert_eq!(number_text(&Number::from(-7i64)), "-7");
        assert_eq!(
            number_text(&Number::from(u64::MAX)),
            "18446744073709551615"
        );
    }

    #[test]
    fn number_text_floats() {
        let text = |f: f64| number_text(&Number::from_f64(f).unwrap());
        assert_eq!(text(1.5), "1.5");
        assert_eq!(text(0.1), "0.1");
        assert_eq!(text(-0.0), "0");
        assert_eq!(text(1e20), "100000000000000000000");
        assert_eq!(text(1e21), "1e+21");
        assert_eq!(text(1.5e300), "1.5e+300");
        assert_eq!(text(0.000001), "0.000001");
        assert_eq!(text(1e-7), "1e-7");
    }

    #[test]
    fn integral_floats_become_integers() {
        assert_eq!(Value::from(3.0), Value::from(3));
        assert_eq!(Value::from(-0.0), Value::from(0));
        assert!(matches!(Value::from(2.5), Value::Number(n) if n.is_f64()));
        assert_eq!(Value::from(f64::NAN), Value::Null);
        assert_eq!(Value::from(f64::INFINITY), Value::Null);
    }

    #[test]
    fn integral_floats_beyond_double_precision_become_integers() {
        assert_eq!(
            Value::from(9_007_199_254_740_992.0),
            Value::from(9_007_199_254_740_992u64)
        );
        assert_eq!(
            Value::from(1e19),
            Value::from(10_000_000_000_000_000_000u64)
        );
        assert_eq!(
            Value::from(-1e18),
            Value::from(-1_000_000_000_000_000_000i64)
        );
        assert!(matches!(Value::from(1e20), Value::Number(n) if n.is_f64()));
        assert!(matches!(Value::from(-1e19), Value::Number(n) if n.is_f64()));
    }

    #[test]
    fn object_insert_replaces_in_place() {
        let mut object = Object::new();
        object.insert("a", 1);
        object.insert("b", 2);
        assert_eq!(object.insert("a", 3), Some(Value::from(1)));

        let keys: Vec<&str> = object.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(object.get("a"), Some(&Value::from(3)));
    }

    #[test]
    fn object_remove_keeps_order() {
        let mut object: Object = [
            ("x", Value::from(1)),
            ("y", Value::from(2)),
            ("z", Value::from(3)),
        ]
        .into_iter()
        .collect();
        assert_eq!(object.remove("y"), Some(Value::from(2)));
        assert_eq!(object.remove("y"), None);

        let keys: Vec<&str> = object.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["x", "z"]);
    }

    #[test]
    fn instance_with_repr_stringifies() {
        let instance = Instance::stringable(Complex { name: "complex" }).unwrap();
        assert!(instance.has_repr());
        assert_eq!(instance.stringify().as_deref(), Some("complex"));
        assert_eq!(instance.fields().get("name"), Some(&Value::from("complex")));
        assert!(instance.type_name().ends_with("Complex"));
    }

    #[test]
    fn instance_without_repr_uses_default_text() {
        let instance = Instance::from_serialize(&Complex { name: "complex" }).unwrap();
        assert!(!instance.has_repr());
        assert_eq!(instance.stringify(), None);
        assert_eq!(instance.to_display_string(), DEFAULT_OBJECT_REPR);
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
