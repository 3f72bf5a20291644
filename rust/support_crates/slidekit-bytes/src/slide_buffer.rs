//! `SlideBuffer`: an expanding, aligned, reusable block of elements.

use std::alloc::Layout;
use std::marker::PhantomData;
use std::ptr::NonNull;

use slidekit_common::{Error, Result};

use crate::alloc::{BlockAllocator, Global};

/// A growable block of `T` elements with a fixed base alignment, intended to be
/// reused across many items instead of allocating scratch space for each one.
///
/// The growth policy is fixed at compile time:
///
/// - `RESERVE`: elements allocated eagerly on construction (0 means none).
/// - `EXPAND`: elements added on top of a request once storage already exists.
///   The very first allocation is sized exactly to the request.
/// - `ALIGN`: the base alignment of the storage block in bytes. The effective
///   alignment is the larger of `ALIGN` and `T`'s own alignment.
///
/// Storage obtained through growth is zero-filled, so every element up to
/// [`capacity`](Self::capacity) is always initialized. Growth preserves the
/// existing elements at their indices.
///
/// A failed growth releases the storage: the buffer returns to the unallocated
/// state (capacity 0) and [`acquire`](Self::acquire) reports the failure.
///
/// # Example
///
/// ```
/// use slidekit_bytes::SlideBuffer;
///
/// let mut buf = SlideBuffer::<u32>::new();
/// let items = buf.acquire(10).unwrap();
/// items[..3].copy_from_slice(&[1, 2, 3]);
/// assert_eq!(buf.capacity(), 10);
///
/// // Growing an existing block adds the expand increment.
/// buf.acquire(2000).unwrap();
/// assert_eq!(buf.capacity(), 2000 + 1024);
/// assert_eq!(&buf.as_slice()[..3], &[1, 2, 3]);
/// ```
pub struct SlideBuffer<
    T,
    const RESERVE: usize = 0,
    const EXPAND: usize = 1024,
    const ALIGN: usize = 16,
    A: BlockAllocator = Global,
> {
    /// `None` iff `capacity == 0`.
    ptr: Option<NonNull<T>>,
    capacity: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

/// A [`SlideBuffer`] whose storage starts on a 64-byte (cache line) boundary.
pub type CacheAlignedSlideBuffer<T> = SlideBuffer<T, 0, 1024, 64>;

impl<T, const RESERVE: usize, const EXPAND: usize, const ALIGN: usize>
    SlideBuffer<T, RESERVE, EXPAND, ALIGN, Global>
where
    T: bytemuck::Pod,
{
    /// Creates a buffer over the global allocator, reserving `RESERVE` elements.
    ///
    /// If the initial reservation cannot be satisfied, the buffer is returned
    /// unallocated.
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<T, const RESERVE: usize, const EXPAND: usize, const ALIGN: usize, A>
    SlideBuffer<T, RESERVE, EXPAND, ALIGN, A>
where
    T: bytemuck::Pod,
    A: BlockAllocator,
{
    /// Creates a buffer over `alloc`, reserving `RESERVE` elements.
    ///
    /// # Arguments
    ///
    /// * `alloc` - The allocator providing every block this buffer will hold.
    ///   It is owned by the buffer; pass `&allocator` to share one.
    ///
    /// # Returns
    ///
    /// A buffer with `capacity() == RESERVE`, or an unallocated buffer
    /// (`capacity() == 0`) if the initial reservation cannot be satisfied.
    /// Construction itself never fails.
    pub fn new_in(alloc: A) -> Self {
        let mut buffer = SlideBuffer {
            ptr: None,
            capacity: 0,
            alloc,
            _marker: PhantomData,
        };
        if RESERVE > 0 {
            // Failure already left the buffer unallocated.
            let _ = buffer.acquire(RESERVE);
        }
        buffer
    }

    /// Ensures the buffer holds at least `wanted` elements and returns the whole
    /// storage (`capacity()` elements).
    ///
    /// When `wanted <= capacity()` this is O(1): the same block is returned without
    /// reallocation. Otherwise the block grows to `wanted` elements if nothing was
    /// allocated yet, or to `wanted + EXPAND` elements if it was. Elements
    /// `[0, old capacity)` keep their values, new elements are zero.
    ///
    /// # Arguments
    ///
    /// * `wanted` - The minimum number of elements the caller needs. `0` never
    ///   allocates and returns the current storage, empty if unallocated.
    ///
    /// # Returns
    ///
    /// The whole storage as a mutable slice of `capacity()` elements, where
    /// `capacity() >= wanted`. The slice borrows the buffer, so it cannot be
    /// held across the next call that may relocate the block.
    ///
    /// # Errors
    ///
    /// Returns an `AllocationFailure` error if the grown block cannot be allocated
    /// (or its size overflows). In that case the previous storage is released and
    /// the buffer is left unallocated.
    pub fn acquire(&mut self, wanted: usize) -> Result<&mut [T]> {
        if wanted > self.capacity {
            self.grow(wanted)?;
        }
        Ok(self.as_mut_slice())
    }

    /// Returns the storage as a slice of `capacity()` elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self.ptr {
            // SAFETY: the block holds `capacity` zero-initialized or written `T`
            // values, and every bit pattern is a valid `T`.
            Some(ptr) => unsafe { std::slice::from_raw_parts(ptr.as_ptr(), self.capacity) },
            None => &[],
        }
    }

    /// Returns the storage as a mutable slice of `capacity()` elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.ptr {
            // SAFETY: see `as_slice`; `&mut self` guarantees exclusive access.
            Some(ptr) => unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), self.capacity) },
            None => &mut [],
        }
    }

    /// Returns the storage viewed as raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Grows the block to fit at least `wanted` elements.
    #[cold]
    fn grow(&mut self, wanted: usize) -> Result<()> {
        let target = match self.ptr {
            None => Some(wanted),
            Some(_) => wanted.checked_add(EXPAND),
        };
        let Some((target, layout)) = target.and_then(|t| Self::layout_for(t).map(|l| (t, l)))
        else {
            let bytes = target.and_then(|t| t.checked_mul(std::mem::size_of::<T>()));
            return Err(self.fail(bytes));
        };

        let grown = match self.ptr {
            None => self.alloc.allocate_zeroed(layout),
            Some(ptr) => {
                let old_layout = self.current_layout();
                // SAFETY: `ptr` was provided by `self.alloc` for `old_layout`, and
                // `layout` was validated with the same alignment and a larger size.
                let grown = unsafe { self.alloc.reallocate(ptr.cast(), old_layout, layout.size()) };
                if let Some(p) = grown {
                    // SAFETY: the new block spans `layout.size()` bytes.
                    unsafe {
                        p.as_ptr()
                            .add(old_layout.size())
                            .write_bytes(0, layout.size() - old_layout.size());
                    }
                }
                grown
            }
        };

        match grown {
            Some(p) => {
                log::trace!(
                    "SlideBuffer: grow from {} to {} elements ({} bytes)",
                    self.capacity,
                    target,
                    layout.size()
                );
                self.ptr = Some(p.cast());
                self.capacity = target;
                Ok(())
            }
            None => Err(self.fail(Some(layout.size()))),
        }
    }

    /// Drops back to the unallocated state after a failed growth.
    #[cold]
    fn fail(&mut self, bytes: Option<usize>) -> Error {
        log::warn!(
            "SlideBuffer: failed to grow {} element buffer to {:?} bytes, releasing it",
            self.capacity,
            bytes
        );
        self.clear();
        Error::allocation_failure(bytes, Self::BLOCK_ALIGNMENT)
    }

    fn layout_for(count: usize) -> Option<Layout> {
        let size = count.checked_mul(std::mem::size_of::<T>())?;
        Layout::from_size_align(size, Self::BLOCK_ALIGNMENT).ok()
    }
}

impl<T, const RESERVE: usize, const EXPAND: usize, const ALIGN: usize, A>
    SlideBuffer<T, RESERVE, EXPAND, ALIGN, A>
where
    A: BlockAllocator,
{
    /// Effective alignment of the storage block.
    const BLOCK_ALIGNMENT: usize = {
        assert!(ALIGN.is_power_of_two(), "ALIGN must be a power of two");
        assert!(EXPAND > 0, "EXPAND must be positive");
        assert!(
            std::mem::size_of::<T>() != 0,
            "zero-sized element types are not supported"
        );
        if ALIGN > std::mem::align_of::<T>() {
            ALIGN
        } else {
            std::mem::align_of::<T>()
        }
    };

    /// Returns the number of elements the current storage holds (0 when unallocated).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the buffer currently owns storage.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Returns a pointer to the first element, or null when unallocated.
    ///
    /// The pointer is invalidated by the next growing [`acquire`](Self::acquire)
    /// or by [`clear`](Self::clear).
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.map_or(std::ptr::null(), |p| p.as_ptr() as *const T)
    }

    /// Returns a mutable pointer to the first element, or null when unallocated.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.map_or(std::ptr::null_mut(), |p| p.as_ptr())
    }

    /// Returns the base alignment, in bytes, of the storage block.
    #[inline]
    pub fn alignment(&self) -> usize {
        Self::BLOCK_ALIGNMENT
    }

    /// Returns the size of the storage block in bytes.
    #[inline]
    pub fn heap_size(&self) -> usize {
        self.capacity * std::mem::size_of::<T>()
    }

    /// Returns the allocator backing this buffer.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Releases the storage and resets the buffer to the unallocated state.
    ///
    /// Does nothing if the buffer holds no storage.
    pub fn clear(&mut self) {
        if let Some(ptr) = self.ptr {
            let layout = self.current_layout();
            self.ptr = None;
            // SAFETY: `ptr` was provided by `self.alloc` for `layout` and is no
            // longer reachable from `self`.
            unsafe { self.alloc.deallocate(ptr.cast(), layout) };
        }
        self.capacity = 0;
    }

    /// Layout of the block currently held.
    fn current_layout(&self) -> Layout {
        debug_assert!(self.ptr.is_some());
        // SAFETY: the same size and alignment passed `Layout::from_size_align`
        // when the block was allocated.
        unsafe { Layout::from_size_align_unchecked(self.heap_size(), Self::BLOCK_ALIGNMENT) }
    }
}

impl<T, const RESERVE: usize, const EXPAND: usize, const ALIGN: usize, A> Default
    for SlideBuffer<T, RESERVE, EXPAND, ALIGN, A>
where
    T: bytemuck::Pod,
    A: BlockAllocator + Default,
{
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, const RESERVE: usize, const EXPAND: usize, const ALIGN: usize, A> Drop
    for SlideBuffer<T, RESERVE, EXPAND, ALIGN, A>
where
    A: BlockAllocator,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const RESERVE: usize, const EXPAND: usize, const ALIGN: usize, A> std::fmt::Debug
    for SlideBuffer<T, RESERVE, EXPAND, ALIGN, A>
where
    A: BlockAllocator,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideBuffer")
            .field("ptr", &self.as_ptr())
            .field("capacity", &self.capacity)
            .field("alignment", &Self::BLOCK_ALIGNMENT)
            .field("reserve", &RESERVE)
            .field("expand", &EXPAND)
            .finish_non_exhaustive()
    }
}

// SAFETY: the buffer exclusively owns its block; moving it to another thread moves
// the elements and the allocator with it.
unsafe impl<T, const RESERVE: usize, const EXPAND: usize, const ALIGN: usize, A> Send
    for SlideBuffer<T, RESERVE, EXPAND, ALIGN, A>
where
    T: Send,
    A: BlockAllocator + Send,
{
}

// SAFETY: shared references only permit reads of the elements.
unsafe impl<T, const RESERVE: usize, const EXPAND: usize, const ALIGN: usize, A> Sync
    for SlideBuffer<T, RESERVE, EXPAND, ALIGN, A>
where
    T: Sync,
    A: BlockAllocator + Sync,
{
}
