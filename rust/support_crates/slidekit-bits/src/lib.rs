//! Bit-level helpers.

pub mod flag_sequence;

pub use flag_sequence::FlagSequence;
