//! Conversion of elements into plain serializable values.

use crate::value::Value;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

/// Produces a plain representation suitable for serialization.
///
/// Getters are resolved, nested arrays and objects are converted
/// recursively and non-finite numbers become null.
pub trait ToJson {
    fn to_json(&self) -> Value;
}

impl ToJson for Value {
    fn to_json(&self) -> Value {
        match self {
            Value::Number(n) if !n.is_finite() => Value::Null,
            Value::Array(items) => {
                Value::Array(Rc::new(items.iter().map(ToJson::to_json).collect()))
            }
            Value::Object(obj) => Value::object(obj.iter().map(|(k, v)| (k, v.to_json()))),
            Value::Getter(g) => g.get().to_json(),
            other => other.clone(),
        }
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(v) => v.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(Rc::new(self.iter().map(ToJson::to_json).collect()))
    }
}

macro_rules! impl_to_json_via_value {
    ($($ty:ty),*) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> Value {
                    Value::from(self.clone()).to_json()
                }
            }
        )*
    };
}

impl_to_json_via_value!(bool, i32, i64, u32, u64, usize, f32, f64, String, &str);

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_value_to_json_resolves_getters() {
        let record = Value::object([
            ("name", Value::from("apple")),
            ("calories", Value::getter(|| Value::from(100))),
        ]);
        let json = record.to_json();

        let obj = json.as_object().unwrap();
        assert_eq!(obj.get("calories"), Some(&Value::from(100)));
        assert_eq!(obj.get("name"), Some(&Value::from("apple")));
    }

    #[test]
    fn test_non_finite_numbers_become_null() {
        let json = Value::array([1.0, f64::NAN, f64::INFINITY]).to_json();
        assert_eq!(json, Value::array([Value::from(1), Value::Null, Value::Null]));
    }

    #[test]
    fn test_primitives_and_containers() {
        assert_eq!(3i64.to_json(), Value::from(3));
        assert_eq!("hi".to_json(), Value::from("hi"));
        assert_eq!(None::<i32>.to_json(), Value::Null);
        assert_eq!(vec![1, 2].to_json(), Value::array([1, 2]));
    }
}
