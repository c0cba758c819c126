//! Sort direction and key ordering.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::str::FromStr;
use ordo_core::{Error, Result, Value};

/// Sort direction for key sorts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Applies the direction to an ascending ordering.
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Parses `asc`, `ascending`, `desc` or `descending`, ignoring ASCII case.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("asc") || s.eq_ignore_ascii_case("ascending") {
            Ok(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") || s.eq_ignore_ascii_case("descending") {
            Ok(Direction::Desc)
        } else {
            Err(Error::invalid_argument(format!("unknown sort direction {:?}", s)))
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Direction::parse(s)
    }
}

/// `true` is ascending.
impl From<bool> for Direction {
    fn from(ascending: bool) -> Self {
        if ascending {
            Direction::Asc
        } else {
            Direction::Desc
        }
    }
}

/// Negative numbers are descending.
impl From<i32> for Direction {
    fn from(sign: i32) -> Self {
        if sign < 0 {
            Direction::Desc
        } else {
            Direction::Asc
        }
    }
}

/// Returns the stable permutation that orders `keys` in `direction`.
///
/// Keys compare as strings when every key is a string and as numbers
/// otherwise, so a missing field (null) sorts as 0. Keys with no numeric
/// value are mutually tied and placed last in both directions. Equal keys
/// keep their relative order.
pub(crate) fn sorted_order(keys: &[Value], direction: Direction) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    let all_text = keys.iter().all(|k| k.resolve().as_str().is_some());
    if all_text {
        let text: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        order.sort_by(|&a, &b| direction.apply(text[a].cmp(&text[b])));
    } else {
        let numbers: Vec<f64> = keys.iter().map(Value::to_number).collect();
        order.sort_by(|&a, &b| compare_numbers(numbers[a], numbers[b], direction));
    }
    order
}

fn compare_numbers(a: f64, b: f64, direction: Direction) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => direction.apply(a.partial_cmp(&b).unwrap_or(Ordering::Equal)),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Returns the stable permutation that orders `keys` by [`Value::total_cmp`].
pub(crate) fn natural_order(keys: &[Value]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    order
}

/// Rearranges `items` so that position `i` holds the element previously at
/// `order[i]`.
pub(crate) fn apply_order<T>(items: &mut Vec<T>, order: &[usize]) {
    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(order.iter().filter_map(|&i| slots[i].take()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("asc").unwrap(), Direction::Asc);
        assert_eq!(Direction::parse("Ascending").unwrap(), Direction::Asc);
        assert_eq!("desc".parse::<Direction>().unwrap(), Direction::Desc);
        assert_eq!(Direction::parse(" descending ").unwrap(), Direction::Desc);
        assert!(matches!(
            Direction::parse("sideways"),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_direction_conversions() {
        assert_eq!(Direction::from(true), Direction::Asc);
        assert_eq!(Direction::from(false), Direction::Desc);
        assert_eq!(Direction::from(1), Direction::Asc);
        assert_eq!(Direction::from(-1), Direction::Desc);
        assert_eq!(Direction::default(), Direction::Asc);
    }

    #[test]
    fn test_sorted_order_is_stable() {
        let keys = vec![Value::from(2), Value::from(1), Value::from(2), Value::from(0)];
        assert_eq!(sorted_order(&keys, Direction::Asc), vec![3, 1, 0, 2]);
        assert_eq!(sorted_order(&keys, Direction::Desc), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_sorted_order_strings() {
        let keys = vec![Value::from("pear"), Value::from("apple"), Value::from("fig")];
        assert_eq!(sorted_order(&keys, Direction::Asc), vec![1, 2, 0]);
    }

    #[test]
    fn test_sorted_order_numeric_with_null() {
        let keys = vec![Value::from(-3), Value::Null, Value::from(2)];
        assert_eq!(sorted_order(&keys, Direction::Asc), vec![0, 1, 2]);
        assert_eq!(sorted_order(&keys, Direction::Desc), vec![2, 1, 0]);
    }

    #[test]
    fn test_sorted_order_mixed_compares_numerically() {
        let keys = vec![Value::from("10"), Value::from(9), Value::from(true)];
        assert_eq!(sorted_order(&keys, Direction::Asc), vec![2, 1, 0]);
    }

    #[test]
    fn test_sorted_order_incomparable_last() {
        let keys = vec![Value::from("x"), Value::from(3), Value::from(f64::NAN), Value::from(1)];
        assert_eq!(sorted_order(&keys, Direction::Asc), vec![3, 1, 0, 2]);
        assert_eq!(sorted_order(&keys, Direction::Desc), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_natural_order_ranks_types() {
        let keys = vec![Value::from("a"), Value::from(2), Value::Null];
        assert_eq!(natural_order(&keys), vec![2, 1, 0]);
    }

    #[test]
    fn test_apply_order() {
        let mut items = vec!['a', 'b', 'c'];
        apply_order(&mut items, &[2, 0, 1]);
        assert_eq!(items, vec!['c', 'a', 'b']);
    }
}
