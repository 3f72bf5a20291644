//! Core definitions relied upon by all slidekit-* crates: the shared error type,
//! the `Result` alias and argument verification helpers.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
