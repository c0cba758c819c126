//! Hashable strict-equality keys for deduplication and grouping.

use alloc::rc::Rc;
use alloc::string::String;
use ordo_core::Value;

/// Two values get the same key exactly when they are strictly equal.
///
/// Composite values are keyed by address, so the values a key was taken
/// from must outlive the set it is stored in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum IdentityKey {
    Null,
    Bool(bool),
    Number(u64),
    String(String),
    Ref(usize),
}

impl IdentityKey {
    /// Returns `None` for NaN, which equals nothing.
    pub(crate) fn of(value: &Value) -> Option<Self> {
        let value = value.resolve();
        let key = match value.as_ref() {
            Value::Null => IdentityKey::Null,
            Value::Bool(b) => IdentityKey::Bool(*b),
            Value::Number(n) if n.is_nan() => return None,
            // 0 and -0 are strictly equal
            Value::Number(n) if *n == 0.0 => IdentityKey::Number(0),
            Value::Number(n) => IdentityKey::Number(n.to_bits()),
            Value::String(s) => IdentityKey::String(s.clone()),
            Value::Array(items) => IdentityKey::Ref(Rc::as_ptr(items) as *const () as usize),
            Value::Object(obj) => IdentityKey::Ref(Rc::as_ptr(obj) as *const () as usize),
            Value::Getter(_) => return None,
        };
        Some(key)
    }
}
