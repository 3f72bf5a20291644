//! Reusable, aligned memory for processing large data sets item-by-item.
//!
//! The central type is [`SlideBuffer`]: an exclusively owned block of `T` elements
//! that grows on demand, keeps a fixed base alignment and amortizes reallocation by
//! over-allocating a fixed increment once it already holds storage. Callers that need
//! scratch space per item request it with [`SlideBuffer::acquire`] and reuse the same
//! block across items instead of allocating and freeing each time.
//!
//! # Modules
//!
//! - [`align`]: power-of-two rounding and alignment checks
//! - [`alloc`]: the [`BlockAllocator`](alloc::BlockAllocator) seam and its implementations
//! - [`slide_buffer`]: the expanding aligned buffer itself

pub mod align;
pub mod alloc;
pub mod slide_buffer;

pub use alloc::{BlockAllocator, CappedAllocator, Global};
pub use slide_buffer::{CacheAlignedSlideBuffer, SlideBuffer};

#[cfg(test)]
mod tests;
