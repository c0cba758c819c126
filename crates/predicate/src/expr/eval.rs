//! Evaluation of parsed shorthand expressions against a value.

use super::parser::{CompareOp, Expr};
use core::cmp::Ordering;
use ordo_core::Value;

impl Expr {
    /// Evaluates the expression with `current` as the value under test.
    ///
    /// Missing properties evaluate to `Null`. `&&` and `||` yield the deciding
    /// operand rather than a boolean.
    pub fn eval(&self, current: &Value) -> Value {
        match self {
            Expr::Current => current.resolve().into_owned(),
            Expr::Path(segments) => current.path(segments.as_slice()),
            Expr::Literal(value) => value.clone(),
            Expr::Compare(left, op, right) => {
                Value::Bool(op.apply(&left.eval(current), &right.eval(current)))
            }
            Expr::And(left, right) => {
                let left = left.eval(current);
                if left.is_truthy() {
                    right.eval(current)
                } else {
                    left
                }
            }
            Expr::Or(left, right) => {
                let left = left.eval(current);
                if left.is_truthy() {
                    left
                } else {
                    right.eval(current)
                }
            }
            Expr::Not(inner) => Value::Bool(!inner.eval(current).is_truthy()),
        }
    }
}

impl CompareOp {
    /// Applies the operator to two evaluated operands.
    pub fn apply(self, left: &Value, right: &Value) -> bool {
        match self {
            CompareOp::Eq => left.loose_eq(right),
            CompareOp::Ne => !left.loose_eq(right),
            CompareOp::StrictEq => left.strict_eq(right),
            CompareOp::StrictNe => !left.strict_eq(right),
            CompareOp::Lt => left.compare(right) == Some(Ordering::Less),
            CompareOp::Le => matches!(left.compare(right), Some(Ordering::Less | Ordering::Equal)),
            CompareOp::Gt => left.compare(right) == Some(Ordering::Greater),
            CompareOp::Ge => {
                matches!(left.compare(right), Some(Ordering::Greater | Ordering::Equal))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(src: &str, value: &Value) -> Value {
        Expr::parse(src).unwrap().eval(value)
    }

    fn person() -> Value {
        Value::object([
            ("name", Value::object([("first", "Tobi"), ("last", "Holowaychuk")])),
            ("age", Value::from(2)),
            ("tags", Value::array(["ferret", "pet"])),
            ("admin", Value::from(false)),
        ])
    }

    #[test]
    fn test_eval_implicit_comparison() {
        assert_eq!(eval("> 20", &Value::from(30)), Value::Bool(true));
        assert_eq!(eval("> 20", &Value::from(10)), Value::Bool(false));
        assert_eq!(eval("<= 10", &Value::from(10)), Value::Bool(true));
        assert_eq!(eval("== '5'", &Value::from(5)), Value::Bool(true));
        assert_eq!(eval("=== '5'", &Value::from(5)), Value::Bool(false));
        assert_eq!(eval("!= null", &Value::Null), Value::Bool(false));
    }

    #[test]
    fn test_eval_path() {
        let tobi = person();
        assert_eq!(eval("name.first", &tobi), Value::from("Tobi"));
        assert_eq!(eval("tags[1]", &tobi), Value::from("pet"));
        assert_eq!(eval("tags.length", &tobi), Value::from(2));
        assert_eq!(eval("name.middle", &tobi), Value::Null);
        assert_eq!(eval("nickname.first", &tobi), Value::Null);
    }

    #[test]
    fn test_eval_comparison_over_path() {
        let tobi = person();
        assert_eq!(eval("age < 5", &tobi), Value::Bool(true));
        assert_eq!(eval("name.first == 'Tobi'", &tobi), Value::Bool(true));
        assert_eq!(eval("name.last !== 'Tobi'", &tobi), Value::Bool(true));
    }

    #[test]
    fn test_eval_logical_operands() {
        let tobi = person();
        assert_eq!(eval("admin || name.first", &tobi), Value::from("Tobi"));
        assert_eq!(eval("admin && name.first", &tobi), Value::Bool(false));
        assert_eq!(eval("!admin && age > 1", &tobi), Value::Bool(true));
        assert_eq!(eval("!(age > 1)", &tobi), Value::Bool(false));
    }

    #[test]
    fn test_eval_incomparable() {
        assert_eq!(eval("> 1", &Value::from("abc")), Value::Bool(false));
        assert_eq!(eval("< 1", &Value::from("abc")), Value::Bool(false));
        assert_eq!(eval("> 'a'", &Value::from("b")), Value::Bool(true));
    }
}
