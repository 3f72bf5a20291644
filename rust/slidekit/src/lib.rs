//! # Slidekit
//!
//! Support routines for binary-analysis plugins that walk large data sets item by
//! item and report on what they find.
//!
//! This crate is a single entry point re-exporting the component crates:
//!
//! * [`bytes`] - [`SlideBuffer`](bytes::SlideBuffer), the expanding aligned scratch
//!   buffer, together with its allocators and alignment helpers
//! * [`common`] - the shared error type and `Result` alias
//! * [`stopwatch`] - monotonic timestamps and a stopwatch
//! * [`text`] - time, number and byte-size formatting, hex and string-kind probes,
//!   file size and path helpers
//! * [`bits`] - sequential bit flag generation

pub use slidekit_bits as bits;
pub use slidekit_bytes as bytes;
pub use slidekit_common as common;
pub use slidekit_stopwatch as stopwatch;
pub use slidekit_text as text;
