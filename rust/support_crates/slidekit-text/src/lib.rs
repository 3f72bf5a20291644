//! Human-readable formatting and small probing helpers used when reporting the
//! progress and results of an analysis pass.

pub mod fs;
pub mod hex;
pub mod number;
pub mod string_kind;
pub mod time;

pub use fs::{file_size, file_size_of, replace_extension};
pub use hex::is_hex_str;
pub use number::{byte_size_string, pretty_number};
pub use string_kind::{StringKind, character_length};
pub use time::time_string;
