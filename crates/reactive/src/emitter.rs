//! Named-event emitter.
//!
//! An [`Emitter`] is a cheap, clonable handle over a shared listener
//! registry. Listeners are delivered to in registration order. Each emit
//! works on a snapshot of the listener list, so callbacks may register or
//! remove listeners (or emit again) without affecting the burst in flight.

use crate::listener::{Listener, ListenerId};
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use hashbrown::HashMap;

struct Registry<A> {
    /// Listeners per event name, in registration order
    listeners: HashMap<String, Vec<Rc<Listener<A>>>>,
    /// Next listener ID to assign
    next_id: ListenerId,
}

/// Publish/subscribe registry keyed by event name.
pub struct Emitter<A> {
    registry: Rc<RefCell<Registry<A>>>,
}

impl<A> Clone for Emitter<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<A> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Emitter<A> {
    /// Creates an emitter with no listeners.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                listeners: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Registers `callback` for `event`.
    ///
    /// Returns the listener ID that can be used with [`Emitter::off`].
    pub fn on<F>(&self, event: &str, callback: F) -> ListenerId
    where
        F: Fn(&A) + 'static,
    {
        self.register(event, callback, false)
    }

    /// Registers `callback` for the next `event` only.
    pub fn once<F>(&self, event: &str, callback: F) -> ListenerId
    where
        F: Fn(&A) + 'static,
    {
        self.register(event, callback, true)
    }

    fn register<F>(&self, event: &str, callback: F, once: bool) -> ListenerId
    where
        F: Fn(&A) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;

        registry
            .listeners
            .entry(String::from(event))
            .or_default()
            .push(Rc::new(Listener::new(id, callback, once)));
        id
    }

    /// Removes listeners for `event`: the one with `id`, or all of them when
    /// `id` is `None`. Returns how many were removed.
    pub fn off(&self, event: &str, id: Option<ListenerId>) -> usize {
        let mut registry = self.registry.borrow_mut();
        let removed = match (registry.listeners.get_mut(event), id) {
            (None, _) => 0,
            (Some(list), Some(id)) => {
                let before = list.len();
                list.retain(|l| l.id() != id);
                before - list.len()
            }
            (Some(list), None) => {
                let count = list.len();
                list.clear();
                count
            }
        };
        if registry.listeners.get(event).map_or(false, Vec::is_empty) {
            registry.listeners.remove(event);
        }
        removed
    }

    /// Delivers `args` to every listener registered for `event`.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: &str, args: &A) -> usize {
        let snapshot = {
            let mut registry = self.registry.borrow_mut();
            let Some(list) = registry.listeners.get_mut(event) else {
                return 0;
            };
            let snapshot = list.clone();
            list.retain(|l| !l.is_once());
            if list.is_empty() {
                registry.listeners.remove(event);
            }
            snapshot
        };

        tracing::trace!(kind = event, listeners = snapshot.len(), "emit");

        snapshot.iter().filter(|l| l.notify(args)).count()
    }

    /// Returns the IDs of the listeners registered for `event`, in order.
    pub fn listeners(&self, event: &str) -> Vec<ListenerId> {
        self.registry
            .borrow()
            .listeners
            .get(event)
            .map(|list| list.iter().map(|l| l.id()).collect())
            .unwrap_or_default()
    }

    /// Returns true if any listener is registered for `event`.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Returns the number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry
            .borrow()
            .listeners
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Returns true if no listener is registered for any event.
    pub fn is_empty(&self) -> bool {
        self.registry.borrow().listeners.is_empty()
    }

    /// Removes every listener for every event.
    pub fn clear(&self) {
        self.registry.borrow_mut().listeners.clear();
    }
}

impl<A> fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let mut map = f.debug_map();
        for (event, list) in registry.listeners.iter() {
            map.entry(event, &list.len());
        }
        map.finish()
    }
}
