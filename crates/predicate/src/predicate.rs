//! Compiled predicates.

use crate::expr::Expr;
use crate::shorthand::Shorthand;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use ordo_core::{Pattern, Result, Value};

/// A caller-supplied predicate body. Receives the projected value and its index.
pub type Callback = Rc<dyn Fn(&Value, usize) -> Value>;

/// A uniform `(value, index) -> Value` callable built from a [`Shorthand`].
#[derive(Clone)]
pub enum Predicate {
    /// Strict equality with a fixed value.
    Equals(Value),
    /// A parsed expression evaluated against the value.
    Expr(Expr),
    /// Pattern match against the value's string form.
    Pattern(Pattern),
    /// Every listed field must exist and satisfy its sub-predicate.
    Shape(Vec<(String, Predicate)>),
    /// Caller function, used as is.
    Func(Callback),
}

impl Predicate {
    /// Invokes the predicate. The result is a value so that predicates can
    /// double as key extractors.
    pub fn call(&self, value: &Value, index: usize) -> Value {
        match self {
            Predicate::Equals(expected) => Value::Bool(expected.strict_eq(&value.resolve())),
            Predicate::Expr(expr) => expr.eval(value),
            Predicate::Pattern(pattern) => Value::Bool(match value.resolve().as_ref() {
                Value::String(s) => pattern.is_match(s),
                other => pattern.is_match(&other.to_string()),
            }),
            Predicate::Shape(fields) => Value::Bool(matches_shape(fields, value, index)),
            Predicate::Func(f) => f(value, index),
        }
    }

    /// Invokes the predicate and reads the result as a boolean.
    pub fn test(&self, value: &Value, index: usize) -> bool {
        self.call(value, index).is_truthy()
    }
}

fn matches_shape(fields: &[(String, Predicate)], value: &Value, index: usize) -> bool {
    let value = value.resolve();
    if !matches!(value.as_ref(), Value::Object(_) | Value::Array(_)) {
        return false;
    }
    fields.iter().all(|(name, predicate)| match value.field(name) {
        Some(field) => predicate.test(&field, index),
        None => false,
    })
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equals(v) => f.debug_tuple("Equals").field(v).finish(),
            Predicate::Expr(e) => f.debug_tuple("Expr").field(e).finish(),
            Predicate::Pattern(p) => f.debug_tuple("Pattern").field(&p.source()).finish(),
            Predicate::Shape(fields) => f.debug_tuple("Shape").field(fields).finish(),
            Predicate::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Coerces a shorthand into a predicate.
///
/// ```rust
/// use ordo_core::Value;
/// use ordo_predicate::to_predicate;
///
/// let heavy = to_predicate("calories > 50").unwrap();
/// let apple = Value::object([("calories", 100)]);
/// assert!(heavy.test(&apple, 0));
///
/// let five = to_predicate(5).unwrap();
/// assert!(five.test(&Value::from(5), 0));
/// assert!(!five.test(&Value::from("5"), 0));
/// ```
pub fn to_predicate(shorthand: impl Into<Shorthand>) -> Result<Predicate> {
    shorthand.into().compile()
}
