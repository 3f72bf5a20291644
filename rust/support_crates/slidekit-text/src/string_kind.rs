use slidekit_common::{Result, verify_arg};

/// Character width class of a string literal found in the analyzed binary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// 8-bit characters.
    #[default]
    C,
    /// 16-bit characters (UTF-16 / UCS-2).
    C16,
    /// 32-bit characters (UTF-32).
    C32,
}

impl StringKind {
    /// Maps a host string-type code to its kind.
    ///
    /// Only the low byte carries the width class; the higher bits encode the
    /// character encoding and are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the width class is not 0, 1 or 2.
    pub fn from_code(code: i32) -> Result<StringKind> {
        let width = code & 0xFF;
        verify_arg!(code, width <= 2);
        Ok(match width {
            0 => StringKind::C,
            1 => StringKind::C16,
            _ => StringKind::C32,
        })
    }

    /// Returns the size in bytes of one character unit.
    #[inline]
    pub fn bytes_per_unit(self) -> u32 {
        match self {
            StringKind::C => 1,
            StringKind::C16 => 2,
            StringKind::C32 => 4,
        }
    }

    /// Returns how many character units fit in `byte_count` bytes.
    #[inline]
    pub fn character_length(self, byte_count: u32) -> u32 {
        byte_count / self.bytes_per_unit()
    }
}

/// Returns the number of characters in a string of `byte_count` bytes whose host
/// type code is `code`.
pub fn character_length(code: i32, byte_count: u32) -> Result<u32> {
    Ok(StringKind::from_code(code)?.character_length(byte_count))
}
