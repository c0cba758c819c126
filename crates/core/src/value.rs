//! Value type definitions for ordo.
//!
//! This module defines the `Value` enum, the key space every query operation
//! works in. A container projects each element into a `Value` through its
//! accessor, and predicates, comparisons, grouping and aggregates all read
//! that projection.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

/// A computed field: reading it through a property path invokes the function.
#[derive(Clone)]
pub struct Getter(Rc<dyn Fn() -> Value>);

impl Getter {
    /// Wraps a zero-argument function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + 'static,
    {
        Self(Rc::new(f))
    }

    /// Invokes the getter.
    #[inline]
    pub fn get(&self) -> Value {
        (self.0)()
    }

    /// Returns true if both getters are the same function instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Getter) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Getter(..)")
    }
}

/// A record with keys sorted for binary-search lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    /// Creates a new empty object.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an object with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the object has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.as_str().cmp(key))
    }

    /// Gets a field by name. O(log n)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).ok().map(|idx| &self.entries[idx].1)
    }

    /// Inserts a field, replacing any previous value under the same name.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (key, value)),
        }
    }

    /// Removes a field and returns its value if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key).ok().map(|idx| self.entries.remove(idx).1)
    }

    /// Returns true if the object has a field with the given name.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_ok()
    }

    /// Returns an iterator over field names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns an iterator over field values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over name-value pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Object::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

/// A dynamically typed value.
///
/// Arrays, objects and getters are reference counted: cloning a `Value`
/// shares them, and [`Value::strict_eq`] compares them by identity. The
/// derived `PartialEq` is structural and exists for assertions.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Double precision number
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Shared sequence of values
    Array(Rc<Vec<Value>>),
    /// Shared record
    Object(Rc<Object>),
    /// Computed field
    Getter(Getter),
}

impl Value {
    /// Builds an object value from name-value pairs.
    pub fn object<K, V, I>(fields: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Rc::new(fields.into_iter().collect()))
    }

    /// Builds an array value.
    pub fn array<V, I>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Builds a getter value.
    pub fn getter<F>(f: F) -> Value
    where
        F: Fn() -> Value + 'static,
    {
        Value::Getter(Getter::new(f))
    }

    /// Returns a short name for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Getter(_) => "getter",
        }
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a Number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the items if this is an Array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the record if this is an Object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Invokes getters until a plain value is reached.
    pub fn resolve(&self) -> Cow<'_, Value> {
        match self {
            Value::Getter(g) => Cow::Owned(g.get().resolve().into_owned()),
            other => Cow::Borrowed(other),
        }
    }

    /// Truthiness: null, false, 0, NaN and "" are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
            Value::Getter(g) => g.get().is_truthy(),
        }
    }

    /// Numeric coercion. Values with no numeric reading become NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => parse_number(s),
            Value::Array(_) => parse_number(&self.to_string()),
            Value::Object(_) => f64::NAN,
            Value::Getter(g) => g.get().to_number(),
        }
    }

    /// Strict equality (`===`).
    ///
    /// Primitives compare by value (NaN is never equal, `0 === -0`); arrays,
    /// objects and getters compare by identity.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Getter(a), Value::Getter(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Loose equality (`==`).
    ///
    /// Null only equals null. Booleans and strings are coerced to numbers when
    /// compared against numbers; arrays and objects compared against a
    /// primitive use their string conversion.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Getter(g), _) => g.get().loose_eq(other),
            (_, Value::Getter(g)) => self.loose_eq(&g.get()),
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Bool(_), _) | (_, Value::Bool(_)) => self.to_number() == other.to_number(),
            (Value::Number(a), Value::String(_)) => *a == other.to_number(),
            (Value::String(_), Value::Number(b)) => self.to_number() == *b,
            (Value::Array(_) | Value::Object(_), Value::String(s))
            | (Value::String(s), Value::Array(_) | Value::Object(_)) => {
                let composite = if self.as_str().is_some() { other } else { self };
                composite.to_string() == *s
            }
            (Value::Array(_) | Value::Object(_), Value::Number(n))
            | (Value::Number(n), Value::Array(_) | Value::Object(_)) => {
                let composite = if self.as_f64().is_some() { other } else { self };
                composite.to_number() == *n
            }
            _ => self.strict_eq(other),
        }
    }

    /// Relational comparison as used by `<`, `>`, `<=` and `>=`.
    ///
    /// Two strings compare lexicographically; anything else compares
    /// numerically. Returns `None` when either side has no numeric reading.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        let (a, b) = (self.resolve(), other.resolve());
        if let (Value::String(x), Value::String(y)) = (a.as_ref(), b.as_ref()) {
            return Some(x.cmp(y));
        }
        a.to_number().partial_cmp(&b.to_number())
    }

    /// A total order over all values: first by variant, then by content.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        let (a, b) = (self.resolve(), other.resolve());
        match (a.as_ref(), b.as_ref()) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Array(x), Value::Array(y)) => {
                for (l, r) in x.iter().zip(y.iter()) {
                    let ord = l.total_cmp(r);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                x.len().cmp(&y.len())
            }
            (Value::Object(x), Value::Object(y)) => {
                for ((lk, lv), (rk, rv)) in x.iter().zip(y.iter()) {
                    let ord = lk.cmp(rk).then_with(|| lv.total_cmp(rv));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                x.len().cmp(&y.len())
            }
            (x, y) => x.type_order().cmp(&y.type_order()),
        }
    }

    fn type_order(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
            Value::Getter(_) => 6,
        }
    }

    /// Reads a single property.
    ///
    /// Objects expose their fields, arrays their indices and `length`,
    /// strings their `length`. Getters are invoked on the way.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(obj) => obj.get(name).map(|v| v.resolve().into_owned()),
            Value::Array(items) => {
                if name == "length" {
                    return Some(Value::Number(items.len() as f64));
                }
                name.parse::<usize>()
                    .ok()
                    .and_then(|idx| items.get(idx))
                    .map(|v| v.resolve().into_owned())
            }
            Value::String(s) if name == "length" => Some(Value::Number(s.chars().count() as f64)),
            Value::Getter(g) => g.get().field(name),
            _ => None,
        }
    }

    /// Returns true if `field(name)` would find something.
    pub fn has_field(&self, name: &str) -> bool {
        match self {
            Value::Object(obj) => obj.contains_key(name),
            Value::Array(items) => {
                name == "length" || name.parse::<usize>().map_or(false, |idx| idx < items.len())
            }
            Value::Getter(g) => g.get().has_field(name),
            _ => false,
        }
    }

    /// Follows a property path. A missing segment yields Null.
    pub fn path<S: AsRef<str>>(&self, segments: &[S]) -> Value {
        let mut current = self.resolve().into_owned();
        for segment in segments {
            match current.field(segment.as_ref()) {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }
        current
    }
}

fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let numeric = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    if numeric {
        s.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if (-1e15..=1e15).contains(&n) && n == (n as i64) as f64 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => fmt_number(*n, f),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    // null renders as an empty slot inside a sequence
                    if !item.is_null() {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Getter(g) => write!(f, "{}", g.get()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Getter(a), Value::Getter(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Number(v as f64)
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize, f32, f64);

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(Rc::new(v))
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(Rc::new(v))
    }
}

impl From<Getter> for Value {
    fn from(v: Getter) -> Self {
        Value::Getter(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Value::Number(_) => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Getter(g) => serde::Serialize::serialize(&g.get(), serializer),
        }
    }
}
