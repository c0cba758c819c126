//! Change events emitted by mutating operations.

use core::fmt;

/// The mutating operation behind a `change` event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutation {
    Push,
    Pop,
    Shift,
    Unshift,
    Splice,
    Reverse,
    Sort,
}

impl Mutation {
    /// Returns the operation name.
    pub fn as_str(self) -> &'static str {
        match self {
            Mutation::Push => "push",
            Mutation::Pop => "pop",
            Mutation::Shift => "shift",
            Mutation::Unshift => "unshift",
            Mutation::Splice => "splice",
            Mutation::Reverse => "reverse",
            Mutation::Sort => "sort",
        }
    }
}

/// Event names an array emits under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Add,
    Remove,
    Reverse,
    Sort,
    /// Fired once per mutating call, after the specific events.
    Change,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Add,
        EventKind::Remove,
        EventKind::Reverse,
        EventKind::Sort,
        EventKind::Change,
    ];

    /// Returns the event name used on the emitter.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Add => "add",
            EventKind::Remove => "remove",
            EventKind::Reverse => "reverse",
            EventKind::Sort => "sort",
            EventKind::Change => "change",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notification. Dropped after delivery.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayEvent<T> {
    /// `item` now sits at `index`.
    Add { item: T, index: usize },
    /// `item` was removed; `index` is where it was reported from.
    Remove { item: T, index: usize },
    Reverse,
    Sort,
    Change(Mutation),
}

impl<T> ArrayEvent<T> {
    pub fn kind(&self) -> EventKind {
        match self {
            ArrayEvent::Add { .. } => EventKind::Add,
            ArrayEvent::Remove { .. } => EventKind::Remove,
            ArrayEvent::Reverse => EventKind::Reverse,
            ArrayEvent::Sort => EventKind::Sort,
            ArrayEvent::Change(_) => EventKind::Change,
        }
    }

    /// Returns the element carried by add/remove events.
    pub fn item(&self) -> Option<&T> {
        match self {
            ArrayEvent::Add { item, .. } | ArrayEvent::Remove { item, .. } => Some(item),
            _ => None,
        }
    }

    /// Returns the index carried by add/remove events.
    pub fn index(&self) -> Option<usize> {
        match self {
            ArrayEvent::Add { index, .. } | ArrayEvent::Remove { index, .. } => Some(*index),
            _ => None,
        }
    }
}
