/// Hands out consecutive single-bit `u32` flags: `1`, `2`, `4`, ... `1 << 31`.
///
/// Useful for assigning distinct flag values to a list of options at run time.
/// Once all 32 bits are used the sequence is exhausted and yields `None`.
///
/// ```
/// use slidekit_bits::FlagSequence;
///
/// let mut flags = FlagSequence::new();
/// assert_eq!(flags.first(), 1);
/// assert_eq!(flags.next_flag(), Some(2));
/// assert_eq!(flags.next_flag(), Some(4));
/// assert_eq!(flags.first(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct FlagSequence {
    index: u32,
}

impl FlagSequence {
    pub fn new() -> FlagSequence {
        FlagSequence::default()
    }

    /// Restarts the sequence and returns its first flag (`1`).
    pub fn first(&mut self) -> u32 {
        self.index = 1;
        1
    }

    /// Returns the next flag, or `None` once bit 31 has been handed out.
    pub fn next_flag(&mut self) -> Option<u32> {
        let flag = 1u32.checked_shl(self.index)?;
        self.index += 1;
        Some(flag)
    }

    /// Index of the bit the next call to [`next_flag`](Self::next_flag) returns.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl Iterator for FlagSequence {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.next_flag()
    }
}
