//! Ordo Reactive - named-event notification for ordo containers.
//!
//! This crate provides the publish/subscribe layer that observable
//! containers are built on.
//!
//! # Core Concepts
//!
//! - `Emitter`: registry of listeners keyed by event name
//! - `Listener`: a registered callback, optionally fired only once
//!
//! Emitting delivers to a snapshot of the listener list, in registration
//! order, and returns the number of listeners invoked.
//!
//! # Example
//!
//! ```rust
//! use ordo_reactive::Emitter;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let emitter = Emitter::new();
//! let total = Rc::new(Cell::new(0));
//!
//! let sink = total.clone();
//! let id = emitter.on("add", move |n: &i32| sink.set(sink.get() + n));
//!
//! emitter.emit("add", &2);
//! emitter.emit("add", &3);
//! emitter.off("add", Some(id));
//! emitter.emit("add", &100);
//!
//! assert_eq!(total.get(), 5);
//! ```

#![no_std]

extern crate alloc;

pub mod emitter;
pub mod listener;

pub use emitter::Emitter;
pub use listener::{Listener, ListenerCallback, ListenerId};
