//! Block allocators backing [`SlideBuffer`](crate::SlideBuffer).
//!
//! The buffer never talks to `std::alloc` directly. It goes through a
//! [`BlockAllocator`], which lets callers cap the memory a buffer may hold
//! ([`CappedAllocator`]) and lets tests inject allocation failures.

use std::alloc::Layout;
use std::ptr::NonNull;

/// A source of aligned, zero-initialized memory blocks that can be resized in place
/// or relocated.
///
/// # Safety
///
/// Implementors must guarantee that:
/// - A block returned by `allocate_zeroed` is at least `layout.size()` bytes long,
///   aligned to `layout.align()` and filled with zero bytes.
/// - A block returned by `reallocate` is at least `new_size` bytes long, keeps the
///   alignment of the original layout and holds the first `min(old, new_size)` bytes
///   of the original block unchanged. The bytes past the old size are unspecified.
/// - When `reallocate` returns `None`, the original block is still valid and owned
///   by the caller.
///
/// # Example
///
/// ```
/// use std::alloc::Layout;
/// use slidekit_bytes::{BlockAllocator, Global};
///
/// let layout = Layout::from_size_align(64, 16).unwrap();
/// let block = Global.allocate_zeroed(layout).unwrap();
/// let block = unsafe { Global.reallocate(block, layout, 256) }.unwrap();
/// unsafe { Global.deallocate(block, Layout::from_size_align(256, 16).unwrap()) };
/// ```
pub unsafe trait BlockAllocator {
    /// Allocates a zero-filled block described by `layout`, or `None` if the memory
    /// cannot be provided. `layout.size()` is never zero.
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Resizes the block at `ptr` to `new_size` bytes, possibly moving it.
    ///
    /// # Arguments
    ///
    /// * `ptr` - The block to resize.
    /// * `layout` - The layout `ptr` is currently allocated with.
    /// * `new_size` - The requested size in bytes; the alignment stays `layout.align()`.
    ///
    /// # Returns
    ///
    /// The resized block, or `None` if it cannot be provided. On `None` the
    /// original block is untouched and must still be released by the caller.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `layout`, and
    /// `Layout::from_size_align(new_size, layout.align())` must be valid with a
    /// non-zero size.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// Releases the block at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `layout` and must not be
    /// used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The process-wide allocator, through `std::alloc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Global;

unsafe impl BlockAllocator for Global {
    #[inline]
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert_ne!(layout.size(), 0);
        NonNull::new(unsafe { std::alloc::alloc_zeroed(layout) })
    }

    #[inline]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        debug_assert_ne!(new_size, 0);
        NonNull::new(unsafe { std::alloc::realloc(ptr.as_ptr(), layout, new_size) })
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

unsafe impl<A: BlockAllocator + ?Sized> BlockAllocator for &A {
    #[inline]
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate_zeroed(layout)
    }

    #[inline]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        unsafe { (**self).reallocate(ptr, layout, new_size) }
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// An allocator that refuses any single block larger than `limit` bytes.
///
/// Wrapping a buffer's allocator in `CappedAllocator` bounds the memory that buffer
/// can ever hold. A growth request past the cap fails like an out-of-memory
/// condition, so the buffer drops back to the unallocated state and the caller
/// may retry with a smaller request.
#[derive(Debug, Clone, Copy)]
pub struct CappedAllocator<A = Global> {
    inner: A,
    limit: usize,
}

impl CappedAllocator<Global> {
    /// Creates a capped allocator over the global allocator.
    pub fn new(limit: usize) -> CappedAllocator<Global> {
        Self::with_allocator(Global, limit)
    }
}

impl<A> CappedAllocator<A> {
    /// Creates a capped allocator over `inner`.
    pub fn with_allocator(inner: A, limit: usize) -> CappedAllocator<A> {
        CappedAllocator { inner, limit }
    }

    /// Returns the largest block size, in bytes, this allocator will provide.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the underlying allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

unsafe impl<A: BlockAllocator> BlockAllocator for CappedAllocator<A> {
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() > self.limit {
            return None;
        }
        self.inner.allocate_zeroed(layout)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if new_size > self.limit {
            return None;
        }
        unsafe { self.inner.reallocate(ptr, layout, new_size) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}
