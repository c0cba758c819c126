//! The accepted shorthand forms and their compilation into predicates.

use crate::expr::Expr;
use crate::predicate::{Callback, Predicate};
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use ordo_core::{Pattern, Result, Value};

/// Anything that can stand in for a predicate.
///
/// | form | meaning |
/// |---|---|
/// | `Value` | strict equality with the value |
/// | `Expr` | expression text, e.g. `"> 20"` or `"name.first"` |
/// | `Pattern` | match against the value's string form |
/// | `Shape` | field-wise match; string leaves mean equality |
/// | `Func` | used as is |
#[derive(Clone)]
pub enum Shorthand {
    Value(Value),
    Expr(String),
    Pattern(Pattern),
    Shape(Vec<(String, Shorthand)>),
    Func(Callback),
    /// An already compiled predicate.
    Compiled(Predicate),
}

impl Shorthand {
    /// Wraps a function returning anything convertible to a value.
    pub fn func<F, R>(f: F) -> Self
    where
        F: Fn(&Value, usize) -> R + 'static,
        R: Into<Value>,
    {
        Shorthand::Func(Rc::new(move |value: &Value, index: usize| f(value, index).into()))
    }

    /// Wraps a plain boolean test.
    pub fn test<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        Shorthand::Func(Rc::new(move |value: &Value, _| Value::Bool(f(value))))
    }

    /// Builds a shape matcher from field/shorthand pairs.
    ///
    /// String leaves are matched by strict equality rather than parsed.
    pub fn shape<K, S, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Shorthand>,
    {
        Shorthand::Shape(
            fields
                .into_iter()
                .map(|(name, leaf)| (name.into(), leaf.into().into_shape_leaf()))
                .collect(),
        )
    }

    fn into_shape_leaf(self) -> Self {
        match self {
            Shorthand::Expr(text) => Shorthand::Value(Value::String(text)),
            other => other,
        }
    }

    /// Compiles the shorthand.
    pub fn compile(self) -> Result<Predicate> {
        match self {
            Shorthand::Value(value) => Ok(Predicate::Equals(value)),
            Shorthand::Expr(text) => match Expr::parse(&text) {
                Ok(expr) => Ok(Predicate::Expr(expr)),
                Err(err) => {
                    tracing::debug!(input = %text, error = %err, "rejected shorthand expression");
                    Err(err.into_error(&text))
                }
            },
            Shorthand::Pattern(pattern) => Ok(Predicate::Pattern(pattern)),
            Shorthand::Shape(fields) => fields
                .into_iter()
                .map(|(name, leaf)| leaf.compile().map(|p| (name, p)))
                .collect::<Result<Vec<_>>>()
                .map(Predicate::Shape),
            Shorthand::Func(f) => Ok(Predicate::Func(f)),
            Shorthand::Compiled(p) => Ok(p),
        }
    }
}

impl fmt::Debug for Shorthand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shorthand::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Shorthand::Expr(s) => f.debug_tuple("Expr").field(s).finish(),
            Shorthand::Pattern(p) => f.debug_tuple("Pattern").field(&p.source()).finish(),
            Shorthand::Shape(fields) => f.debug_tuple("Shape").field(fields).finish(),
            Shorthand::Func(_) => f.write_str("Func(..)"),
            Shorthand::Compiled(p) => f.debug_tuple("Compiled").field(p).finish(),
        }
    }
}

impl From<&str> for Shorthand {
    fn from(text: &str) -> Self {
        Shorthand::Expr(text.to_string())
    }
}

impl From<String> for Shorthand {
    fn from(text: String) -> Self {
        Shorthand::Expr(text)
    }
}

impl From<&String> for Shorthand {
    fn from(text: &String) -> Self {
        Shorthand::Expr(text.clone())
    }
}

/// Objects become shape matchers; everything else is matched by equality.
impl From<Value> for Shorthand {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(obj) => Shorthand::Shape(
                obj.iter()
                    .map(|(name, leaf)| (name.to_string(), Shorthand::from(leaf.clone())))
                    .collect(),
            ),
            other => Shorthand::Value(other),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Shorthand {
                fn from(v: $t) -> Self {
                    Shorthand::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, i64, u32, u64, usize, f64);

impl From<Pattern> for Shorthand {
    fn from(pattern: Pattern) -> Self {
        Shorthand::Pattern(pattern)
    }
}

impl From<Predicate> for Shorthand {
    fn from(predicate: Predicate) -> Self {
        Shorthand::Compiled(predicate)
    }
}
