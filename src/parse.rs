//! Parse problems.

pub mod combinators;
pub mod equality;

pub use equality::{from_string, ParseError};
