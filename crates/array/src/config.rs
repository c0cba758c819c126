//! Array configuration and builder.

use crate::accessor::{Accessor, Context};
use crate::observable::ObservableArray;
use alloc::vec::Vec;
use core::any::Any;
use ordo_core::Value;

/// Run-time options carried by an array and everything derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Fire a coalescing `change` event after each mutating call.
    pub emit_change: bool,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self { emit_change: true }
    }
}

/// Builder for observable arrays.
///
/// ```rust
/// use ordo_array::ObservableArray;
/// use ordo_core::Value;
///
/// let fruits = ObservableArray::builder()
///     .items(["apple", "pear"].map(String::from))
///     .context("produce")
///     .emit_change(false)
///     .build();
///
/// assert_eq!(fruits.len(), 2);
/// assert_eq!(fruits.context().and_then(|c| c.downcast_ref::<&str>()), Some(&"produce"));
/// assert_eq!(fruits.key(0), Some(Value::from("apple")));
/// ```
pub struct ArrayBuilder<T> {
    items: Vec<T>,
    accessor: Accessor<T>,
    context: Option<Context>,
    config: ArrayConfig,
}

impl<T: Into<Value> + Clone + 'static> ArrayBuilder<T> {
    /// Creates a builder using the identity accessor.
    pub fn new() -> Self {
        Self::with_accessor(Accessor::identity())
    }
}

impl<T: Into<Value> + Clone + 'static> Default for ArrayBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> ArrayBuilder<T> {
    /// Creates a builder for element types that need an explicit accessor.
    pub fn with_accessor(accessor: Accessor<T>) -> Self {
        Self {
            items: Vec::new(),
            accessor,
            context: None,
            config: ArrayConfig::default(),
        }
    }

    /// Appends initial elements. No events fire for them.
    pub fn items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(items);
        self
    }

    /// Replaces the accessor.
    pub fn accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Value + 'static,
    {
        self.accessor = Accessor::new(f);
        self
    }

    /// Attaches a construction context.
    pub fn context<C: Any>(mut self, context: C) -> Self {
        self.context = Some(Context::new(context));
        self
    }

    /// Sets whether the coalescing `change` event fires.
    pub fn emit_change(mut self, enabled: bool) -> Self {
        self.config.emit_change = enabled;
        self
    }

    /// Builds the array.
    pub fn build(self) -> ObservableArray<T> {
        ObservableArray::from_parts(self.items, self.accessor, self.context, self.config)
    }
}
