//! Expression shorthands such as `"> 20"`, `"name.first"` or `"age >= 18 && admin"`.

pub mod eval;
pub mod parser;

pub use parser::{CompareOp, Expr, ParseError};
