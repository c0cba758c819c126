//! Ordo Predicate - shorthand coercion for ordo queries.
//!
//! Query operations accept a [`Shorthand`] wherever a predicate or key
//! extractor is expected, and coerce it with [`to_predicate`]:
//!
//! - a plain value matches by strict equality
//! - a string is an expression: `"> 20"`, `"name.first"`, `"calories > 50 && ripe"`
//! - a [`Pattern`](ordo_core::Pattern) matches against the string form
//! - an object value (or [`Shorthand::shape`]) matches field by field
//! - a function is used as is
//!
//! # Example
//!
//! ```rust
//! use ordo_core::Value;
//! use ordo_predicate::{to_predicate, Shorthand};
//!
//! let grape = Value::object([("name", "grape"), ("color", "green")]);
//!
//! assert!(to_predicate(Shorthand::shape([("name", "grape")])).unwrap().test(&grape, 0));
//! assert_eq!(to_predicate("color").unwrap().call(&grape, 0), Value::from("green"));
//! ```

#![no_std]

extern crate alloc;

pub mod expr;
mod predicate;
mod shorthand;

pub use expr::{CompareOp, Expr, ParseError};
pub use predicate::{to_predicate, Callback, Predicate};
pub use shorthand::Shorthand;
