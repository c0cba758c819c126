//! The observable array container.
//!
//! Storage lives behind a `RefCell`, so every mutating operation takes
//! `&self`. The storage borrow is released before events are delivered: a
//! listener holding an `Rc` (or `Weak`) to the array may mutate it again, and
//! the nested call's events fire before the outer burst continues.
//!
//! Query operations and sort comparators run while the storage is borrowed;
//! they may read the array but must not mutate it.

use crate::accessor::{Accessor, Context};
use crate::config::{ArrayBuilder, ArrayConfig};
use crate::event::{ArrayEvent, EventKind, Mutation};
use crate::sort::{apply_order, natural_order, sorted_order, Direction};
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use core::cmp::Ordering;
use core::fmt;
use ordo_core::{Result, ToJson, Value};
use ordo_predicate::{to_predicate, Shorthand};
use ordo_reactive::{Emitter, ListenerId};

/// An ordered sequence that announces its mutations.
pub struct ObservableArray<T> {
    items: RefCell<Vec<T>>,
    events: Emitter<ArrayEvent<T>>,
    accessor: Accessor<T>,
    context: Option<Context>,
    config: ArrayConfig,
}

impl<T: Into<Value> + Clone + 'static> ObservableArray<T> {
    /// Creates an empty array with the identity accessor.
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Accessor::identity(), None, ArrayConfig::default())
    }

    /// Starts a builder with the identity accessor.
    pub fn builder() -> ArrayBuilder<T> {
        ArrayBuilder::new()
    }
}

impl<T: Into<Value> + Clone + 'static> Default for ObservableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> ObservableArray<T> {
    /// Creates an array whose queries inspect `accessor(element)`.
    pub fn with_accessor<I, F>(items: I, accessor: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> Value + 'static,
    {
        Self::from_parts(
            items.into_iter().collect(),
            Accessor::new(accessor),
            None,
            ArrayConfig::default(),
        )
    }

    pub(crate) fn from_parts(
        items: Vec<T>,
        accessor: Accessor<T>,
        context: Option<Context>,
        config: ArrayConfig,
    ) -> Self {
        Self {
            items: RefCell::new(items),
            events: Emitter::new(),
            accessor,
            context,
            config,
        }
    }

    /// Builds an independent array holding `items` that shares this array's
    /// accessor, context and configuration. Listeners are not carried over.
    pub fn derive(&self, items: Vec<T>) -> Self {
        Self::from_parts(
            items,
            self.accessor.clone(),
            self.context.clone(),
            self.config,
        )
    }

    /// Like [`derive`](Self::derive) for value elements; the accessor is reset
    /// to identity since the element type changes.
    pub fn derive_values(&self, items: Vec<Value>) -> ObservableArray<Value> {
        ObservableArray::from_parts(
            items,
            Accessor::identity(),
            self.context.clone(),
            self.config,
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Returns a clone of the element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().get(index).cloned()
    }

    /// Borrows the elements.
    pub fn items(&self) -> Ref<'_, [T]> {
        Ref::map(self.items.borrow(), Vec::as_slice)
    }

    /// Shallow copy of the elements as a plain vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    /// Runs the accessor on `item`.
    #[inline]
    pub fn key_of(&self, item: &T) -> Value {
        self.accessor.get(item)
    }

    /// Returns the key of the element at `index`.
    pub fn key(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).map(|item| self.accessor.get(item))
    }

    /// Returns the keys of every element, in order.
    pub fn keys(&self) -> Vec<Value> {
        self.items.borrow().iter().map(|item| self.accessor.get(item)).collect()
    }

    pub fn accessor(&self) -> &Accessor<T> {
        &self.accessor
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn config(&self) -> ArrayConfig {
        self.config
    }

    /// The underlying emitter, for name-based access.
    pub fn events(&self) -> &Emitter<ArrayEvent<T>> {
        &self.events
    }

    /// Subscribes to one kind of event.
    pub fn on<F>(&self, kind: EventKind, f: F) -> ListenerId
    where
        F: Fn(&ArrayEvent<T>) + 'static,
    {
        self.events.on(kind.as_str(), f)
    }

    /// Subscribes to the next event of one kind.
    pub fn once<F>(&self, kind: EventKind, f: F) -> ListenerId
    where
        F: Fn(&ArrayEvent<T>) + 'static,
    {
        self.events.once(kind.as_str(), f)
    }

    /// Unsubscribes one listener, or every listener of `kind` when `id` is `None`.
    pub fn off(&self, kind: EventKind, id: Option<ListenerId>) -> usize {
        self.events.off(kind.as_str(), id)
    }

    /// Subscribes to `add` events with `(item, index)`.
    pub fn on_add<F>(&self, f: F) -> ListenerId
    where
        F: Fn(&T, usize) + 'static,
    {
        self.on(EventKind::Add, move |event| {
            if let ArrayEvent::Add { item, index } = event {
                f(item, *index);
            }
        })
    }

    /// Subscribes to `remove` events with `(item, index)`.
    pub fn on_remove<F>(&self, f: F) -> ListenerId
    where
        F: Fn(&T, usize) + 'static,
    {
        self.on(EventKind::Remove, move |event| {
            if let ArrayEvent::Remove { item, index } = event {
                f(item, *index);
            }
        })
    }

    fn listening(&self, kind: EventKind) -> bool {
        self.events.has_listeners(kind.as_str())
    }

    /// Delivers `events` in order, then the coalescing change event.
    fn dispatch(&self, events: Vec<ArrayEvent<T>>, mutation: Mutation, changed: bool) {
        for event in &events {
            self.events.emit(event.kind().as_str(), event);
        }
        if changed && self.config.emit_change {
            self.events.emit(EventKind::Change.as_str(), &ArrayEvent::Change(mutation));
        }
    }

    fn add_events(&self, items: &[T], first_index: usize) -> Vec<ArrayEvent<T>> {
        if !self.listening(EventKind::Add) {
            return Vec::new();
        }
        items
            .iter()
            .enumerate()
            .map(|(offset, item)| ArrayEvent::Add {
                item: item.clone(),
                index: first_index + offset,
            })
            .collect()
    }

    /// Appends one element and returns the new length.
    pub fn push(&self, item: T) -> usize {
        self.push_many([item])
    }

    /// Appends elements left to right and returns the new length.
    ///
    /// Each element gets its own `add` event carrying its final index.
    pub fn push_many<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let added: Vec<T> = items.into_iter().collect();
        let count = added.len();
        let (len, events) = {
            let mut storage = self.items.borrow_mut();
            let events = self.add_events(&added, storage.len());
            storage.extend(added);
            (storage.len(), events)
        };
        tracing::trace!(op = "push", count, len, "array mutated");
        self.dispatch(events, Mutation::Push, count > 0);
        len
    }

    /// Removes and returns the last element. Nothing fires when empty.
    pub fn pop(&self) -> Option<T> {
        let (item, index) = {
            let mut storage = self.items.borrow_mut();
            let item = storage.pop()?;
            (item, storage.len())
        };
        tracing::trace!(op = "pop", len = index, "array mutated");
        self.dispatch(self.remove_event(&item, index), Mutation::Pop, true);
        Some(item)
    }

    /// Removes and returns the first element. Nothing fires when empty.
    pub fn shift(&self) -> Option<T> {
        let (item, len) = {
            let mut storage = self.items.borrow_mut();
            if storage.is_empty() {
                return None;
            }
            let item = storage.remove(0);
            (item, storage.len())
        };
        tracing::trace!(op = "shift", len, "array mutated");
        self.dispatch(self.remove_event(&item, 0), Mutation::Shift, true);
        Some(item)
    }

    fn remove_event(&self, item: &T, index: usize) -> Vec<ArrayEvent<T>> {
        if self.listening(EventKind::Remove) {
            alloc::vec![ArrayEvent::Remove {
                item: item.clone(),
                index,
            }]
        } else {
            Vec::new()
        }
    }

    /// Prepends one element and returns the new length.
    pub fn unshift(&self, item: T) -> usize {
        self.unshift_many([item])
    }

    /// Prepends elements, keeping their order, and returns the new length.
    ///
    /// `add` events report final positions starting at 0.
    pub fn unshift_many<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let added: Vec<T> = items.into_iter().collect();
        let count = added.len();
        let (len, events) = {
            let mut storage = self.items.borrow_mut();
            let events = self.add_events(&added, 0);
            storage.splice(0..0, added);
            (storage.len(), events)
        };
        tracing::trace!(op = "unshift", count, len, "array mutated");
        self.dispatch(events, Mutation::Unshift, count > 0);
        len
    }

    /// Removes `delete_count` elements starting at `start`, inserts `items`
    /// there, and returns the removed elements.
    ///
    /// A negative `start` counts from the end; both bounds are clamped to the
    /// array. `None` deletes everything from `start` on. Every `remove` event
    /// reports `start` as its index, since each removal shifts the tail left;
    /// `add` events then report each inserted element's final position.
    pub fn splice<I>(&self, start: isize, delete_count: Option<usize>, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let inserted: Vec<T> = items.into_iter().collect();
        let inserted_count = inserted.len();
        let (removed, start, events) = {
            let mut storage = self.items.borrow_mut();
            let len = storage.len();
            let start = resolve_index(start, len);
            let count = delete_count.map_or(len - start, |n| n.min(len - start));

            let add_events = self.add_events(&inserted, start);
            let removed: Vec<T> = storage.splice(start..start + count, inserted).collect();

            let mut events = Vec::new();
            if self.listening(EventKind::Remove) {
                events.extend(removed.iter().map(|item| ArrayEvent::Remove {
                    item: item.clone(),
                    index: start,
                }));
            }
            events.extend(add_events);
            (removed, start, events)
        };
        tracing::trace!(
            op = "splice",
            start,
            removed = removed.len(),
            inserted = inserted_count,
            "array mutated"
        );
        let changed = !removed.is_empty() || inserted_count > 0;
        self.dispatch(events, Mutation::Splice, changed);
        removed
    }

    /// Reverses the elements in place.
    pub fn reverse(&self) -> &Self {
        self.items.borrow_mut().reverse();
        tracing::trace!(op = "reverse", "array mutated");
        self.dispatch(alloc::vec![ArrayEvent::Reverse], Mutation::Reverse, true);
        self
    }

    /// Sorts by key in the total order of [`Value::total_cmp`].
    pub fn sort(&self) -> &Self {
        let order = natural_order(&self.keys());
        self.reorder(&order)
    }

    /// Sorts the raw elements with a comparator. The sort is stable.
    pub fn sort_by<F>(&self, mut compare: F) -> &Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let order = {
            let items = self.items.borrow();
            let mut order: Vec<usize> = (0..items.len()).collect();
            order.sort_by(|&a, &b| compare(&items[a], &items[b]));
            order
        };
        self.reorder(&order)
    }

    /// Sorts by a key derived from each element's accessor key.
    ///
    /// Keys are ordered lexicographically when all of them are strings and
    /// numerically otherwise, with null reading as 0. Keys without a numeric
    /// value tie with each other and go last. The sort is stable.
    ///
    /// ```rust
    /// use ordo_array::{Direction, ObservableArray};
    /// use ordo_core::Value;
    ///
    /// let fruits: ObservableArray<Value> = [("apple", 95), ("grape", 2), ("pear", 101)]
    ///     .into_iter()
    ///     .map(|(name, calories)| {
    ///         Value::object([("name", Value::from(name)), ("calories", Value::from(calories))])
    ///     })
    ///     .collect();
    ///
    /// fruits.sort_by_key("calories", Direction::Desc).unwrap();
    /// assert_eq!(fruits.key(0).unwrap().path(&["name"]), Value::from("pear"));
    /// ```
    pub fn sort_by_key(&self, key: impl Into<Shorthand>, direction: Direction) -> Result<&Self> {
        let predicate = to_predicate(key)?;
        let keys: Vec<Value> = self
            .keys()
            .iter()
            .enumerate()
            .map(|(i, k)| predicate.call(k, i))
            .collect();
        let order = sorted_order(&keys, direction);
        Ok(self.reorder(&order))
    }

    fn reorder(&self, order: &[usize]) -> &Self {
        apply_order(&mut *self.items.borrow_mut(), order);
        tracing::trace!(op = "sort", len = order.len(), "array mutated");
        self.dispatch(alloc::vec![ArrayEvent::Sort], Mutation::Sort, true);
        self
    }
}

/// Resolves a possibly negative position against `len`, clamped to `[0, len]`.
pub(crate) fn resolve_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        (index as usize).min(len)
    }
}

/// Clones are independent: same elements, accessor, context and
/// configuration, no listeners.
impl<T: Clone + 'static> Clone for ObservableArray<T> {
    fn clone(&self) -> Self {
        self.derive(self.to_vec())
    }
}

impl<T: PartialEq> PartialEq for ObservableArray<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.items.borrow() == *other.items.borrow()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.borrow().iter()).finish()
    }
}

/// String conversion over a snapshot of the accessor keys, not the raw
/// elements: keys are joined with `,` and null keys print as empty. With
/// the identity accessor the keys are the elements.
impl<T: Clone + 'static> fmt::Display for ObservableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if !key.is_null() {
                write!(f, "{}", key)?;
            }
        }
        Ok(())
    }
}

impl<T: ToJson> ToJson for ObservableArray<T> {
    fn to_json(&self) -> Value {
        Value::array(self.items.borrow().iter().map(ToJson::to_json))
    }
}

impl<T: Into<Value> + Clone + 'static> From<Vec<T>> for ObservableArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_parts(items, Accessor::identity(), None, ArrayConfig::default())
    }
}

impl<T: Into<Value> + Clone + 'static> FromIterator<T> for ObservableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ObservableArray<T> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.items.borrow().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;

    type Log = Rc<RefCell<Vec<String>>>;

    fn record<T: Clone + fmt::Display + 'static>(array: &ObservableArray<T>) -> Log {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        for kind in EventKind::ALL {
            let log = log.clone();
            array.on(kind, move |event| {
                let entry = match event {
                    ArrayEvent::Add { item, index } => alloc::format!("add({},{})", item, index),
                    ArrayEvent::Remove { item, index } => {
                        alloc::format!("remove({},{})", item, index)
                    }
                    ArrayEvent::Change(m) => alloc::format!("change:{}", m.as_str()),
                    other => other.kind().to_string(),
                };
                log.borrow_mut().push(entry);
            });
        }
        log
    }

    fn strings(items: &[&str]) -> ObservableArray<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_push() {
        let array = ObservableArray::new();
        let log = record(&array);

        assert_eq!(array.push(1), 1);
        assert_eq!(array.push_many([2, 3]), 3);
        assert_eq!(array.to_vec(), vec![1, 2, 3]);
        assert_eq!(
            *log.borrow(),
            vec!["add(1,0)", "change:push", "add(2,1)", "add(3,2)", "change:push"]
        );
    }

    #[test]
    fn test_push_nothing_is_silent() {
        let array: ObservableArray<i32> = ObservableArray::new();
        let log = record(&array);
        assert_eq!(array.push_many([]), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_pop() {
        let array = strings(&["1", "2"]);
        let log = record(&array);

        assert_eq!(array.pop().as_deref(), Some("2"));
        assert_eq!(array.to_vec(), vec!["1"]);
        assert_eq!(*log.borrow(), vec!["remove(2,1)", "change:pop"]);
    }

    #[test]
    fn test_pop_and_shift_on_empty() {
        let array: ObservableArray<i32> = ObservableArray::new();
        let log = record(&array);

        assert_eq!(array.pop(), None);
        assert_eq!(array.shift(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_shift() {
        let array = strings(&["a", "b", "c"]);
        let log = record(&array);

        assert_eq!(array.shift().as_deref(), Some("a"));
        assert_eq!(array.to_vec(), vec!["b", "c"]);
        assert_eq!(*log.borrow(), vec!["remove(a,0)", "change:shift"]);
    }

    #[test]
    fn test_unshift() {
        let array = ObservableArray::from(vec![3]);
        let log = record(&array);

        assert_eq!(array.unshift_many([1, 2]), 3);
        assert_eq!(array.unshift(0), 4);
        assert_eq!(array.to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(
            *log.borrow(),
            vec!["add(1,0)", "add(2,1)", "change:unshift", "add(0,0)", "change:unshift"]
        );
    }

    #[test]
    fn test_splice() {
        let array = strings(&["1", "2", "3", "4"]);
        let log = record(&array);

        let removed = array.splice(1, Some(2), ["2.".to_string(), "3.".to_string()]);
        assert_eq!(removed, vec!["2", "3"]);
        assert_eq!(array.to_vec(), vec!["1", "2.", "3.", "4"]);
        assert_eq!(
            *log.borrow(),
            vec!["remove(2,1)", "remove(3,1)", "add(2.,1)", "add(3.,2)", "change:splice"]
        );
    }

    #[test]
    fn test_splice_bounds() {
        let array = ObservableArray::from(vec![1, 2, 3, 4, 5]);

        assert_eq!(array.splice(-2, None, []), vec![4, 5]);
        assert_eq!(array.splice(10, Some(3), [9]), Vec::<i32>::new());
        assert_eq!(array.to_vec(), vec![1, 2, 3, 9]);
        assert_eq!(array.splice(-10, Some(1), []), vec![1]);
        assert_eq!(array.splice(1, Some(100), []), vec![3, 9]);
        assert_eq!(array.to_vec(), vec![2]);
    }

    #[test]
    fn test_splice_noop_is_silent() {
        let array = ObservableArray::from(vec![1, 2]);
        let log = record(&array);
        assert!(array.splice(1, Some(0), []).is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_reverse_and_sort() {
        let array = ObservableArray::from(vec![2, 3, 1]);
        let log = record(&array);

        assert_eq!(array.reverse().to_vec(), vec![1, 3, 2]);
        assert_eq!(array.sort().to_vec(), vec![1, 2, 3]);
        assert_eq!(array.sort_by(|a, b| b.cmp(a)).to_vec(), vec![3, 2, 1]);
        assert_eq!(
            *log.borrow(),
            vec!["reverse", "change:reverse", "sort", "change:sort", "sort", "change:sort"]
        );
    }

    #[test]
    fn test_sort_by_key_direction() {
        let array = ObservableArray::with_accessor(
            vec![("b", 2), ("a", 1), ("c", 2)],
            |p: &(&'static str, i32)| {
                Value::object([("name", Value::from(p.0)), ("n", Value::from(p.1))])
            },
        );

        array.sort_by_key("n", Direction::Desc).unwrap();
        assert_eq!(array.to_vec(), vec![("b", 2), ("c", 2), ("a", 1)]);

        array.sort_by_key("name", Direction::Asc).unwrap();
        assert_eq!(array.to_vec(), vec![("a", 1), ("b", 2), ("c", 2)]);

        assert!(array.sort_by_key("n >", Direction::Asc).is_err());
    }

    #[test]
    fn test_sort_by_key_missing_field_reads_as_zero() {
        let array = ObservableArray::with_accessor(
            vec![(1, Some(-3)), (2, None), (3, Some(2))],
            |p: &(i32, Option<i32>)| match p.1 {
                Some(rank) => Value::object([("rank", Value::from(rank))]),
                None => Value::object([("label", Value::from("unranked"))]),
            },
        );

        array.sort_by_key("rank", Direction::Asc).unwrap();
        assert_eq!(array.to_vec(), vec![(1, Some(-3)), (2, None), (3, Some(2))]);

        array.sort_by_key("rank", Direction::Desc).unwrap();
        assert_eq!(array.to_vec(), vec![(3, Some(2)), (2, None), (1, Some(-3))]);
    }

    #[test]
    fn test_change_event_can_be_disabled() {
        let array = ObservableArray::builder().items(vec![1]).emit_change(false).build();
        let log = record(&array);
        array.push(2);
        array.reverse();
        assert_eq!(*log.borrow(), vec!["add(2,1)", "reverse"]);
    }

    #[test]
    fn test_listener_observes_post_mutation_state() {
        let array = Rc::new(ObservableArray::from(vec![1, 2]));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&array);
        let seen_clone = seen.clone();
        array.on_remove(move |_, _| {
            if let Some(array) = weak.upgrade() {
                seen_clone.borrow_mut().push(array.len());
            }
        });

        array.pop();
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_reentrant_mutation_from_listener() {
        let array = Rc::new(ObservableArray::from(vec![0]));
        let log = record(&array);

        let weak = Rc::downgrade(&array);
        array.once(EventKind::Add, move |_| {
            if let Some(array) = weak.upgrade() {
                array.push(99);
            }
        });

        array.push(1);
        assert_eq!(array.to_vec(), vec![0, 1, 99]);
        // the nested push fires before the outer change event
        assert_eq!(
            *log.borrow(),
            vec!["add(1,1)", "add(99,2)", "change:push", "change:push"]
        );
    }

    #[test]
    fn test_off() {
        let array = ObservableArray::from(vec![1]);
        let count = Rc::new(RefCell::new(0));
        let count_clone = count.clone();
        let id = array.on_add(move |_, _| *count_clone.borrow_mut() += 1);

        array.push(2);
        assert_eq!(array.off(EventKind::Add, Some(id)), 1);
        array.push(3);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_derived_is_independent() {
        let array = ObservableArray::builder().items(vec![1, 2]).context("ctx").build();
        array.on_add(|_, _| {});

        let derived = array.derive(vec![5]);
        assert!(derived.accessor().ptr_eq(array.accessor()));
        assert!(derived.context().unwrap().ptr_eq(array.context().unwrap()));
        assert!(!derived.events().has_listeners("add"));

        derived.push(6);
        assert_eq!(array.to_vec(), vec![1, 2]);

        let copy = array.clone();
        copy.pop();
        assert_eq!(array.len(), 2);
        assert_ne!(copy, array);
    }

    #[test]
    fn test_conversions() {
        let array = ObservableArray::from(vec![Value::from(1), Value::Null, Value::from("x")]);
        assert_eq!(array.to_string(), "1,,x");

        let named = ObservableArray::with_accessor(
            vec![(1, "one"), (2, "two")],
            |p: &(i32, &'static str)| Value::from(p.1),
        );
        assert_eq!(named.to_string(), "one,two");
        assert_eq!(array.to_json(), Value::array([Value::from(1), Value::Null, Value::from("x")]));
        assert_eq!(alloc::format!("{:?}", ObservableArray::from(vec![1, 2])), "[1, 2]");

        let collected: ObservableArray<i32> = (1..=3).collect();
        assert_eq!(collected.keys(), vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(collected.get(1), Some(2));
        assert_eq!(collected.key(5), None);
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(-1, 4), 3);
        assert_eq!(resolve_index(-9, 4), 0);
        assert_eq!(resolve_index(2, 4), 2);
        assert_eq!(resolve_index(9, 4), 4);
    }
}
