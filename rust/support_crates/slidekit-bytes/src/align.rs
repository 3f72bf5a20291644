/// Aligns a number up to the next multiple of the specified alignment.
///
/// Returns `None` if rounding up overflows `usize`.
///
/// # Examples
///
/// ```
/// use slidekit_bytes::align::align_up;
///
/// assert_eq!(align_up(0, 16), Some(0));
/// assert_eq!(align_up(1, 16), Some(16));
/// assert_eq!(align_up(16, 16), Some(16));
/// assert_eq!(align_up(17, 16), Some(32));
/// assert_eq!(align_up(usize::MAX, 16), None);
/// ```
///
/// # Panics
///
/// This function will panic in debug builds if `alignment` is not a power of 2.
#[inline]
pub fn align_up(n: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment.is_power_of_two());
    n.checked_add(alignment - 1).map(|n| n & !(alignment - 1))
}

/// Aligns a number down to the previous multiple of the specified alignment.
///
/// # Examples
///
/// ```
/// use slidekit_bytes::align::align_down;
///
/// assert_eq!(align_down(0, 8), 0);
/// assert_eq!(align_down(7, 8), 0);
/// assert_eq!(align_down(9, 8), 8);
/// assert_eq!(align_down(16, 8), 16);
/// ```
///
/// # Panics
///
/// This function will panic in debug builds if `alignment` is not a power of 2.
#[inline]
pub fn align_down(n: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    n & !(alignment - 1)
}

/// Checks if a number lies exactly on an alignment boundary.
///
/// # Examples
///
/// ```
/// use slidekit_bytes::align::is_aligned;
///
/// assert!(is_aligned(0, 16));
/// assert!(is_aligned(48, 16));
/// assert!(!is_aligned(40, 16));
/// ```
///
/// # Panics
///
/// This function will panic in debug builds if `alignment` is not a power of 2.
#[inline]
pub fn is_aligned(n: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    (n & (alignment - 1)) == 0
}

/// Checks whether `ptr` is aligned to `alignment` bytes.
///
/// A null pointer is never considered aligned: it does not address storage.
#[inline]
pub fn is_ptr_aligned<T>(ptr: *const T, alignment: usize) -> bool {
    !ptr.is_null() && is_aligned(ptr as usize, alignment)
}
