//! Per-instance key extraction and construction context.

use alloc::rc::Rc;
use core::any::Any;
use core::fmt;
use ordo_core::Value;

/// Maps a stored element to the key every query operation inspects.
pub struct Accessor<T>(Rc<dyn Fn(&T) -> Value>);

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: 'static> Accessor<T> {
    /// Wraps a key function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> Value + 'static,
    {
        Self(Rc::new(f))
    }

    /// Extracts the key of `item`.
    #[inline]
    pub fn get(&self, item: &T) -> Value {
        (self.0)(item)
    }

    /// Returns true if both accessors share the same function.
    pub fn ptr_eq(&self, other: &Accessor<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Into<Value> + Clone + 'static> Accessor<T> {
    /// The default accessor: the element converted into a value.
    pub fn identity() -> Self {
        Self::new(|item: &T| item.clone().into())
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor(..)")
    }
}

/// Opaque construction context carried from an array into everything derived
/// from it.
#[derive(Clone)]
pub struct Context(Rc<dyn Any>);

impl Context {
    /// Wraps a context value.
    pub fn new<C: Any>(value: C) -> Self {
        Self(Rc::new(value))
    }

    /// Returns the context value if it has type `C`.
    pub fn downcast_ref<C: Any>(&self) -> Option<&C> {
        self.0.downcast_ref::<C>()
    }

    /// Returns true if both handles point to the same context.
    pub fn ptr_eq(&self, other: &Context) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Context(..)")
    }
}
