//! Ordo Core - value model, errors and pattern matching for ordo.
//!
//! This crate provides the foundational types shared by the ordo crates:
//!
//! - `Value`: the dynamic key space that accessors project elements into
//! - `Object` / `Getter`: records and computed fields inside a `Value`
//! - `Pattern`: a compiled regular-expression subset for pattern shorthands
//! - `ToJson`: conversion into plain serializable values
//! - `Error`: error types for ordo operations
//!
//! # Example
//!
//! ```rust
//! use ordo_core::{Pattern, Value};
//!
//! let fruit = Value::object([("name", Value::from("apple")), ("calories", Value::from(100))]);
//!
//! assert_eq!(fruit.path(&["name"]), Value::from("apple"));
//! assert_eq!(fruit.path(&["color", "hex"]), Value::Null);
//! assert!(Pattern::new("^app").unwrap().is_match("apple"));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod json;
pub mod pattern_match;
mod value;

pub use error::{Error, Result};
pub use json::ToJson;
pub use pattern_match::Pattern;
pub use value::{Getter, Object, Value};
