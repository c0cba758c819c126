//! Query and aggregation operations.
//!
//! Every operation inspects elements through the array's accessor and takes
//! predicates and key extractors as [`Shorthand`]s. Operations producing a
//! new container build it with [`ObservableArray::derive`] and hand it to
//! [`ArrayLike::remake`], so wrapper types come back as themselves with the
//! accessor and context intact.

use crate::identity::IdentityKey;
use crate::observable::{resolve_index, ObservableArray};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};
use ordo_core::{Error, Result, Value};
use ordo_predicate::{to_predicate, Predicate, Shorthand};

/// A type backed by an observable array.
///
/// Implementing it is all a type needs to gain [`Enumerable`].
pub trait ArrayLike<T: Clone + 'static>: Sized {
    /// The backing array.
    fn array(&self) -> &ObservableArray<T>;

    /// Wraps an array derived from this one.
    fn remake(&self, array: ObservableArray<T>) -> Self;
}

impl<T: Clone + 'static> ArrayLike<T> for ObservableArray<T> {
    fn array(&self) -> &ObservableArray<T> {
        self
    }

    fn remake(&self, array: ObservableArray<T>) -> Self {
        array
    }
}

/// Non-mutating queries over any [`ArrayLike`].
pub trait Enumerable<T: Clone + 'static>: ArrayLike<T> {
    /// Calls `f(element, index)` for every element.
    fn each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&T, usize),
    {
        for (i, item) in self.array().items().iter().enumerate() {
            f(item, i);
        }
        self
    }

    /// Collects `f(key, index)` for every element.
    ///
    /// The element type becomes [`Value`], so the result uses the identity
    /// accessor; context and configuration carry over.
    fn map(&self, f: impl Into<Shorthand>) -> Result<ObservableArray<Value>> {
        let predicate = to_predicate(f)?;
        let array = self.array();
        let out: Vec<Value> = array
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| predicate.call(&array.key_of(item), i))
            .collect();
        Ok(array.derive_values(out))
    }

    /// Keeps the elements whose key passes `predicate`.
    fn filter(&self, predicate: impl Into<Shorthand>) -> Result<Self> {
        let predicate = to_predicate(predicate)?;
        Ok(retained(self, |key, i| predicate.test(key, i)))
    }

    /// Alias of [`filter`](Self::filter).
    fn select(&self, predicate: impl Into<Shorthand>) -> Result<Self> {
        self.filter(predicate)
    }

    /// Drops the elements whose key passes `predicate`.
    ///
    /// A plain value shorthand drops keys loosely equal (`==`) to it, so
    /// `reject(Value::Null)` drops nulls.
    fn reject(&self, predicate: impl Into<Shorthand>) -> Result<Self> {
        match predicate.into() {
            Shorthand::Value(sentinel) => Ok(retained(self, |key, _| !key.loose_eq(&sentinel))),
            other => {
                let predicate = to_predicate(other)?;
                Ok(retained(self, |key, i| !predicate.test(key, i)))
            }
        }
    }

    /// Drops elements whose key is null.
    fn compact(&self) -> Self {
        retained(self, |key, _| !key.loose_eq(&Value::Null))
    }

    /// Keeps the first element of every run of strictly equal keys.
    fn unique(&self) -> Self {
        deduplicated(self, |key, _| key.clone())
    }

    /// Like [`unique`](Self::unique), comparing `key(element key)` instead.
    fn unique_by(&self, key: impl Into<Shorthand>) -> Result<Self> {
        let predicate = to_predicate(key)?;
        Ok(deduplicated(self, |k, i| predicate.call(k, i)))
    }

    /// Returns the first element whose key passes `predicate`.
    fn find(&self, predicate: impl Into<Shorthand>) -> Result<Option<T>> {
        let predicate = to_predicate(predicate)?;
        let found = position(self, |key, i| predicate.test(key, i));
        Ok(found.and_then(|i| self.array().get(i)))
    }

    /// Returns the last element whose key passes `predicate`.
    fn find_last(&self, predicate: impl Into<Shorthand>) -> Result<Option<T>> {
        let predicate = to_predicate(predicate)?;
        let found = rposition(self, |key, i| predicate.test(key, i));
        Ok(found.and_then(|i| self.array().get(i)))
    }

    /// True if every key passes. Vacuously true when empty.
    fn every(&self, predicate: impl Into<Shorthand>) -> Result<bool> {
        let predicate = to_predicate(predicate)?;
        Ok(position(self, |key, i| !predicate.test(key, i)).is_none())
    }

    /// Alias of [`every`](Self::every).
    fn all(&self, predicate: impl Into<Shorthand>) -> Result<bool> {
        self.every(predicate)
    }

    /// True if some key passes.
    fn any(&self, predicate: impl Into<Shorthand>) -> Result<bool> {
        let predicate = to_predicate(predicate)?;
        Ok(position(self, |key, i| predicate.test(key, i)).is_some())
    }

    /// Alias of [`any`](Self::any).
    fn some(&self, predicate: impl Into<Shorthand>) -> Result<bool> {
        self.any(predicate)
    }

    /// True if no key passes.
    fn none(&self, predicate: impl Into<Shorthand>) -> Result<bool> {
        Ok(!self.any(predicate)?)
    }

    fn count(&self) -> usize {
        self.array().len()
    }

    /// Number of keys passing `predicate`.
    fn count_where(&self, predicate: impl Into<Shorthand>) -> Result<usize> {
        let predicate = to_predicate(predicate)?;
        let array = self.array();
        let n = array
            .items()
            .iter()
            .enumerate()
            .filter(|(i, item)| predicate.test(&array.key_of(item), *i))
            .count();
        Ok(n)
    }

    /// Index of the first key strictly equal to `target`, scanning from
    /// `from` (negative counts from the end).
    fn index_of(&self, target: &Value, from: Option<isize>) -> Option<usize> {
        let array = self.array();
        let items = array.items();
        let start = from.map_or(0, |f| resolve_index(f, items.len()));
        let target = target.resolve();
        let found = items
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, item)| array.key_of(item).resolve().strict_eq(&target))
            .map(|(i, _)| i);
        found
    }

    /// Index of the last key strictly equal to `target`, scanning backwards
    /// from `from` (negative counts from the end).
    fn last_index_of(&self, target: &Value, from: Option<isize>) -> Option<usize> {
        let array = self.array();
        let items = array.items();
        let len = items.len();
        let end = match from {
            None => len,
            Some(f) if f < 0 => {
                let back = f.unsigned_abs();
                if back > len {
                    return None;
                }
                len - back + 1
            }
            Some(f) => (f as usize).saturating_add(1).min(len),
        };
        let target = target.resolve();
        let found = items[..end]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, item)| array.key_of(item).resolve().strict_eq(&target))
            .map(|(i, _)| i);
        found
    }

    /// True if some key is strictly equal to `target`.
    fn has(&self, target: &Value) -> bool {
        self.index_of(target, None).is_some()
    }

    /// Alias of [`has`](Self::has).
    fn contains(&self, target: &Value) -> bool {
        self.has(target)
    }

    /// Folds keys left to right with `f(accumulator, key, index)`.
    ///
    /// Without `init` the first key seeds the fold; an empty array then
    /// yields [`Error::EmptyReduce`].
    fn reduce<F>(&self, mut f: F, init: Option<Value>) -> Result<Value>
    where
        F: FnMut(Value, Value, usize) -> Value,
    {
        let mut keys = self.array().keys().into_iter().enumerate();
        let mut acc = match init {
            Some(init) => init,
            None => keys.next().map(|(_, key)| key).ok_or(Error::EmptyReduce)?,
        };
        for (i, key) in keys {
            acc = f(acc, key, i);
        }
        Ok(acc)
    }

    /// Folds keys right to left; the last key seeds the fold without `init`.
    fn reduce_right<F>(&self, mut f: F, init: Option<Value>) -> Result<Value>
    where
        F: FnMut(Value, Value, usize) -> Value,
    {
        let mut keys = self.array().keys().into_iter().enumerate().rev();
        let mut acc = match init {
            Some(init) => init,
            None => keys.next().map(|(_, key)| key).ok_or(Error::EmptyReduce)?,
        };
        for (i, key) in keys {
            acc = f(acc, key, i);
        }
        Ok(acc)
    }

    /// Largest numeric key; `-inf` when empty. NaN keys are skipped.
    fn max(&self) -> f64 {
        numbers(self, None)
            .into_iter()
            .fold(f64::NEG_INFINITY, |best, n| if n > best { n } else { best })
    }

    /// Largest numeric `key(element key)`.
    fn max_by(&self, key: impl Into<Shorthand>) -> Result<f64> {
        let predicate = to_predicate(key)?;
        let best = numbers(self, Some(&predicate))
            .into_iter()
            .fold(f64::NEG_INFINITY, |best, n| if n > best { n } else { best });
        Ok(best)
    }

    /// Smallest numeric key; `+inf` when empty. NaN keys are skipped.
    fn min(&self) -> f64 {
        numbers(self, None)
            .into_iter()
            .fold(f64::INFINITY, |best, n| if n < best { n } else { best })
    }

    /// Smallest numeric `key(element key)`.
    fn min_by(&self, key: impl Into<Shorthand>) -> Result<f64> {
        let predicate = to_predicate(key)?;
        let best = numbers(self, Some(&predicate))
            .into_iter()
            .fold(f64::INFINITY, |best, n| if n < best { n } else { best });
        Ok(best)
    }

    /// Sum of numeric keys; 0 when empty.
    fn sum(&self) -> f64 {
        numbers(self, None).iter().sum()
    }

    fn sum_by(&self, key: impl Into<Shorthand>) -> Result<f64> {
        let predicate = to_predicate(key)?;
        Ok(numbers(self, Some(&predicate)).iter().sum())
    }

    /// Arithmetic mean of numeric keys; NaN when empty.
    fn mean(&self) -> f64 {
        let values = numbers(self, None);
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn mean_by(&self, key: impl Into<Shorthand>) -> Result<f64> {
        let predicate = to_predicate(key)?;
        let values = numbers(self, Some(&predicate));
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Alias of [`mean`](Self::mean).
    fn avg(&self) -> f64 {
        self.mean()
    }

    /// Alias of [`mean_by`](Self::mean_by).
    fn avg_by(&self, key: impl Into<Shorthand>) -> Result<f64> {
        self.mean_by(key)
    }

    fn first(&self) -> Option<T> {
        self.array().get(0)
    }

    /// Up to `n` leading elements, in order.
    fn first_n(&self, n: usize) -> Self {
        let array = self.array();
        let out = {
            let items = array.items();
            items[..n.min(items.len())].to_vec()
        };
        self.remake(array.derive(out))
    }

    /// Alias of [`find`](Self::find).
    fn first_where(&self, predicate: impl Into<Shorthand>) -> Result<Option<T>> {
        self.find(predicate)
    }

    fn last(&self) -> Option<T> {
        let array = self.array();
        array.len().checked_sub(1).and_then(|i| array.get(i))
    }

    /// Up to `n` trailing elements, in order.
    fn last_n(&self, n: usize) -> Self {
        let array = self.array();
        let out = {
            let items = array.items();
            items[items.len().saturating_sub(n)..].to_vec()
        };
        self.remake(array.derive(out))
    }

    /// Alias of [`find_last`](Self::find_last).
    fn last_where(&self, predicate: impl Into<Shorthand>) -> Result<Option<T>> {
        self.find_last(predicate)
    }

    /// Maps the string form of each key's `field` to its element.
    ///
    /// Falsy or missing fields are skipped; later elements overwrite earlier
    /// ones with the same field.
    fn hash(&self, field: &str) -> HashMap<String, T> {
        let array = self.array();
        let mut out = HashMap::new();
        for item in array.items().iter() {
            let Some(name) = array.key_of(item).field(field) else {
                continue;
            };
            if name.is_truthy() {
                out.insert(name.to_string(), item.clone());
            }
        }
        out
    }

    /// Splits the elements by `key(element key)`, in first-occurrence order.
    fn group_by(&self, key: impl Into<Shorthand>) -> Result<Vec<(Value, Self)>> {
        let predicate = to_predicate(key)?;
        let array = self.array();
        let mut groups: Vec<(Value, Vec<T>)> = Vec::new();
        let mut slots: HashMap<IdentityKey, usize> = HashMap::new();
        for (i, item) in array.items().iter().enumerate() {
            let group_key = predicate.call(&array.key_of(item), i);
            let slot = match IdentityKey::of(&group_key) {
                Some(id) => *slots.entry(id).or_insert_with(|| {
                    groups.push((group_key.clone(), Vec::new()));
                    groups.len() - 1
                }),
                None => {
                    groups.push((group_key.clone(), Vec::new()));
                    groups.len() - 1
                }
            };
            groups[slot].1.push(item.clone());
        }
        Ok(groups
            .into_iter()
            .map(|(group_key, items)| (group_key, self.remake(array.derive(items))))
            .collect())
    }

    /// Elements in `[start, end)`; negative bounds count from the end.
    fn slice(&self, start: isize, end: Option<isize>) -> Self {
        let array = self.array();
        let out = {
            let items = array.items();
            let len = items.len();
            let start = resolve_index(start, len);
            let end = end.map_or(len, |e| resolve_index(e, len));
            if start < end {
                items[start..end].to_vec()
            } else {
                Vec::new()
            }
        };
        self.remake(array.derive(out))
    }

    /// This array's elements followed by `other`.
    fn concat<I>(&self, other: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let array = self.array();
        let mut out = array.to_vec();
        out.extend(other);
        self.remake(array.derive(out))
    }

    /// String forms of the keys joined by `separator`; null keys are empty.
    fn join(&self, separator: &str) -> String {
        let mut out = String::new();
        for (i, key) in self.array().keys().iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            if !key.is_null() {
                out.push_str(&key.to_string());
            }
        }
        out
    }
}

impl<T: Clone + 'static, A: ArrayLike<T>> Enumerable<T> for A {}

fn retained<T, A, F>(this: &A, mut keep: F) -> A
where
    T: Clone + 'static,
    A: ArrayLike<T>,
    F: FnMut(&Value, usize) -> bool,
{
    let array = this.array();
    let out: Vec<T> = array
        .items()
        .iter()
        .enumerate()
        .filter(|(i, item)| keep(&array.key_of(item), *i))
        .map(|(_, item)| item.clone())
        .collect();
    this.remake(array.derive(out))
}

fn deduplicated<T, A, F>(this: &A, mut dedup_key: F) -> A
where
    T: Clone + 'static,
    A: ArrayLike<T>,
    F: FnMut(&Value, usize) -> Value,
{
    let array = this.array();
    let out: Vec<T> = {
        let items = array.items();
        // held for the whole pass: identity keys of composites are addresses
        let keys: Vec<Value> = items
            .iter()
            .enumerate()
            .map(|(i, item)| dedup_key(&array.key_of(item), i))
            .collect();
        let mut seen = HashSet::new();
        let kept: Vec<T> = items
            .iter()
            .zip(keys.iter())
            .filter(|(_, key)| IdentityKey::of(key).map_or(true, |id| seen.insert(id)))
            .map(|(item, _)| item.clone())
            .collect();
        kept
    };
    this.remake(array.derive(out))
}

fn position<T, A, F>(this: &A, mut test: F) -> Option<usize>
where
    T: Clone + 'static,
    A: ArrayLike<T>,
    F: FnMut(&Value, usize) -> bool,
{
    let array = this.array();
    let items = array.items();
    let found = items.iter().enumerate().position(|(i, item)| test(&array.key_of(item), i));
    found
}

fn rposition<T, A, F>(this: &A, mut test: F) -> Option<usize>
where
    T: Clone + 'static,
    A: ArrayLike<T>,
    F: FnMut(&Value, usize) -> bool,
{
    let array = this.array();
    let items = array.items();
    let found = items
        .iter()
        .enumerate()
        .rev()
        .find(|(i, item)| test(&array.key_of(item), *i))
        .map(|(i, _)| i);
    found
}

fn numbers<T, A>(this: &A, key: Option<&Predicate>) -> Vec<f64>
where
    T: Clone + 'static,
    A: ArrayLike<T>,
{
    this.array()
        .keys()
        .iter()
        .enumerate()
        .map(|(i, k)| match key {
            Some(predicate) => predicate.call(k, i).to_number(),
            None => k.to_number(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn nums(items: &[i32]) -> ObservableArray<i32> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_each_visits_in_order() {
        let array = nums(&[3, 4]);
        let mut seen = Vec::new();
        array.each(|n, i| seen.push((*n, i)));
        assert_eq!(seen, vec![(3, 0), (4, 1)]);
    }

    #[test]
    fn test_map() {
        let array = nums(&[1, 2, 3]);
        let doubled = array.map(Shorthand::func(|v: &Value, _| v.to_number() * 2.0)).unwrap();
        assert_eq!(doubled.to_vec(), vec![Value::from(2), Value::from(4), Value::from(6)]);
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn test_filter_and_reject() {
        let array = nums(&[1, 5, 10, 20]);
        assert_eq!(array.filter("> 4").unwrap().to_vec(), vec![5, 10, 20]);
        assert_eq!(array.select("< 4").unwrap().to_vec(), vec![1]);
        assert_eq!(array.reject("> 4").unwrap().to_vec(), vec![1]);
        assert_eq!(array.reject(10).unwrap().to_vec(), vec![1, 5, 20]);
        assert!(array.filter("> ").is_err());
    }

    #[test]
    fn test_reject_scalar_is_loose() {
        let array: ObservableArray<Value> =
            vec![Value::from(1), Value::from("1"), Value::from(2)].into();
        assert_eq!(array.reject(1).unwrap().to_vec(), vec![Value::from(2)]);
    }

    #[test]
    fn test_compact() {
        let array: ObservableArray<Value> =
            vec![Value::from(1), Value::Null, Value::from(0), Value::Null].into();
        assert_eq!(array.compact().to_vec(), vec![Value::from(1), Value::from(0)]);
    }

    #[test]
    fn test_unique() {
        let array = nums(&[1, 2, 4, 4, 4, 2, 1, 5, 0]);
        assert_eq!(array.unique().to_vec(), vec![1, 2, 4, 5, 0]);

        let by_parity = array
            .unique_by(Shorthand::func(|v: &Value, _| v.to_number() % 2.0))
            .unwrap();
        assert_eq!(by_parity.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_unique_keeps_nan() {
        let array: ObservableArray<f64> = vec![f64::NAN, 1.0, f64::NAN].into();
        assert_eq!(array.unique().len(), 3);
    }

    #[test]
    fn test_find() {
        let array = nums(&[1, 3, 5, 8, 20]);
        assert_eq!(array.find("> 4").unwrap(), Some(5));
        assert_eq!(array.find_last("> 4").unwrap(), Some(20));
        assert_eq!(array.find("> 100").unwrap(), None);
        assert_eq!(array.first_where(8).unwrap(), Some(8));
        assert_eq!(array.last_where("< 4").unwrap(), Some(3));
    }

    #[test]
    fn test_boolean_scans() {
        let array = nums(&[2, 4, 6]);
        assert!(array.every("> 1").unwrap());
        assert!(array.all(Shorthand::test(|v| v.to_number() % 2.0 == 0.0)).unwrap());
        assert!(!array.every("> 2").unwrap());
        assert!(array.any(4).unwrap());
        assert!(array.some("== 6").unwrap());
        assert!(array.none("> 10").unwrap());

        let empty = nums(&[]);
        assert!(empty.every("> 1").unwrap());
        assert!(!empty.any("> 1").unwrap());
    }

    #[test]
    fn test_count() {
        let array = nums(&[1, 2, 3, 4]);
        assert_eq!(array.count(), 4);
        assert_eq!(array.count_where("> 2").unwrap(), 2);
    }

    #[test]
    fn test_index_of() {
        let array = nums(&[1, 2, 3, 2, 1]);
        let two = Value::from(2);
        assert_eq!(array.index_of(&two, None), Some(1));
        assert_eq!(array.index_of(&two, Some(2)), Some(3));
        assert_eq!(array.index_of(&two, Some(-1)), None);
        assert_eq!(array.index_of(&Value::from("2"), None), None);

        assert_eq!(array.last_index_of(&two, None), Some(3));
        assert_eq!(array.last_index_of(&two, Some(2)), Some(1));
        assert_eq!(array.last_index_of(&two, Some(-3)), Some(1));
        assert_eq!(array.last_index_of(&two, Some(-10)), None);

        assert!(array.has(&Value::from(3)));
        assert!(!array.contains(&Value::from(9)));
    }

    #[test]
    fn test_reduce() {
        let array = nums(&[1, 2, 3, 4]);
        let add = |acc: Value, v: Value, _: usize| Value::from(acc.to_number() + v.to_number());
        assert_eq!(array.reduce(add, None).unwrap(), Value::from(10));
        assert_eq!(array.reduce(add, Some(Value::from(5))).unwrap(), Value::from(15));

        let digits = |acc: Value, v: Value, _: usize| Value::from(alloc::format!("{}{}", acc, v));
        assert_eq!(array.reduce_right(digits, None).unwrap(), Value::from("4321"));

        let empty = nums(&[]);
        assert_eq!(empty.reduce(add, None), Err(Error::EmptyReduce));
        assert_eq!(empty.reduce_right(add, Some(Value::Null)).unwrap(), Value::Null);
    }

    #[test]
    fn test_reduce_passes_indices() {
        let array = nums(&[10, 20, 30]);
        let mut seen = Vec::new();
        array
            .reduce(
                |acc, _, i| {
                    seen.push(i);
                    acc
                },
                None,
            )
            .unwrap();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_aggregates() {
        let array = nums(&[4, 1, 7]);
        assert_eq!(array.max(), 7.0);
        assert_eq!(array.min(), 1.0);
        assert_eq!(array.sum(), 12.0);
        assert_eq!(array.mean(), 4.0);
        assert_eq!(array.avg(), 4.0);
        assert_eq!(array.max_by(Shorthand::func(|v: &Value, _| -v.to_number())).unwrap(), -1.0);
    }

    #[test]
    fn test_aggregates_on_empty() {
        let empty = nums(&[]);
        assert_eq!(empty.max(), f64::NEG_INFINITY);
        assert_eq!(empty.min(), f64::INFINITY);
        assert_eq!(empty.sum(), 0.0);
        assert!(empty.mean().is_nan());
    }

    #[test]
    fn test_first_and_last() {
        let array = nums(&[1, 2, 3]);
        assert_eq!(array.first(), Some(1));
        assert_eq!(array.last(), Some(3));
        assert_eq!(array.first_n(2).to_vec(), vec![1, 2]);
        assert_eq!(array.last_n(2).to_vec(), vec![2, 3]);
        assert_eq!(array.first_n(10).to_vec(), vec![1, 2, 3]);
        assert_eq!(nums(&[]).first(), None);
        assert_eq!(nums(&[]).last(), None);
    }

    #[test]
    fn test_slice_concat_join() {
        let array = nums(&[1, 2, 3, 4]);
        assert_eq!(array.slice(1, Some(3)).to_vec(), vec![2, 3]);
        assert_eq!(array.slice(-2, None).to_vec(), vec![3, 4]);
        assert!(array.slice(3, Some(1)).is_empty());
        assert_eq!(array.concat([5, 6]).to_vec(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(array.join("-"), "1-2-3-4");
        assert_eq!(array.len(), 4);
    }

    #[test]
    fn test_group_by() {
        let array = nums(&[1, 2, 3, 4, 5]);
        let groups = array
            .group_by(Shorthand::func(|v: &Value, _| v.to_number() % 2.0 == 0.0))
            .unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Value::Bool(false));
        assert_eq!(groups[0].1.to_vec(), vec![1, 3, 5]);
        assert_eq!(groups[1].1.to_vec(), vec![2, 4]);
    }
}
