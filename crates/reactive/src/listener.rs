//! Registered listeners.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

/// Unique identifier for a registered listener.
pub type ListenerId = u64;

/// Callback type for event notifications.
pub type ListenerCallback<A> = Rc<dyn Fn(&A)>;

/// A callback registered for one event name.
pub struct Listener<A> {
    /// Unique identifier
    id: ListenerId,
    /// Callback to invoke on emit
    callback: ListenerCallback<A>,
    /// Whether the listener is dropped after its first delivery
    once: bool,
    /// Set once a once-listener has been delivered to
    spent: Cell<bool>,
}

impl<A> Listener<A> {
    /// Creates a new listener.
    pub fn new<F>(id: ListenerId, callback: F, once: bool) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self {
            id,
            callback: Rc::new(callback),
            once,
            spent: Cell::new(false),
        }
    }

    /// Returns the listener ID.
    #[inline]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns whether this listener only fires once.
    #[inline]
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Returns whether this listener can still be delivered to.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.spent.get()
    }

    /// Delivers `args` to the callback. Returns false if nothing was delivered.
    pub fn notify(&self, args: &A) -> bool {
        if self.spent.get() {
            return false;
        }
        if self.once {
            self.spent.set(true);
        }
        (self.callback)(args);
        true
    }
}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("once", &self.once)
            .field("spent", &self.spent.get())
            .finish()
    }
}
