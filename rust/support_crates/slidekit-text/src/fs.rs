use std::fs::File;
use std::path::{Path, PathBuf};

use slidekit_common::{Error, Result};

/// Returns the size in bytes of the file at `path`.
pub fn file_size(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| Error::io(path.display().to_string(), e))
}

/// Returns the size in bytes of an open file.
pub fn file_size_of(file: &File) -> Result<u64> {
    file.metadata()
        .map(|m| m.len())
        .map_err(|e| Error::io("open file", e))
}

/// Returns `path` with its extension replaced by `extension` (added if the path
/// has none). A leading `.` in `extension` is optional.
///
/// ```
/// use std::path::Path;
/// use slidekit_text::replace_extension;
///
/// assert_eq!(replace_extension("dump/target.idb", "sig"), Path::new("dump/target.sig"));
/// assert_eq!(replace_extension("target", ".log"), Path::new("target.log"));
/// ```
pub fn replace_extension(path: impl AsRef<Path>, extension: &str) -> PathBuf {
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    path.as_ref().with_extension(extension)
}
