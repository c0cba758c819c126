//! Ordo Array - an observable array with enumerable queries.
//!
//! This crate provides the container the other ordo crates exist for:
//!
//! - `ObservableArray`: an ordered sequence that fires `add`, `remove`,
//!   `reverse`, `sort` and `change` events as it is mutated
//! - `Accessor`: the projection from elements to the `Value` keys that
//!   sorting, queries and joins inspect
//! - `Enumerable`: filtering, searching, folding and aggregation over any
//!   `ArrayLike` type, taking predicates as shorthands
//!
//! # Example
//!
//! ```rust
//! use ordo_array::{Enumerable, ObservableArray};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let numbers: ObservableArray<i32> = vec![5, 1, 8].into();
//! let log = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = log.clone();
//! numbers.on_add(move |n, i| sink.borrow_mut().push((*n, i)));
//! numbers.push(13);
//!
//! assert_eq!(*log.borrow(), vec![(13, 3)]);
//! assert_eq!(numbers.filter("> 4").unwrap().to_vec(), vec![5, 8, 13]);
//! assert_eq!(numbers.max(), 13.0);
//! ```

#![no_std]

extern crate alloc;

pub mod accessor;
pub mod config;
pub mod enumerable;
pub mod event;
mod identity;
pub mod observable;
pub mod sort;

pub use accessor::{Accessor, Context};
pub use config::{ArrayBuilder, ArrayConfig};
pub use enumerable::{ArrayLike, Enumerable};
pub use event::{ArrayEvent, EventKind, Mutation};
pub use observable::ObservableArray;
pub use sort::Direction;

pub use ordo_core::{Error, Pattern, Result, Value};
pub use ordo_predicate::{to_predicate, Predicate, Shorthand};
