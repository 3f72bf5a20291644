/// Returns `true` if `s` is a non-empty run of ASCII hex digits, optionally
/// prefixed with `0x` or `0X`.
///
/// ```
/// use slidekit_text::is_hex_str;
///
/// assert!(is_hex_str("DEADbeef"));
/// assert!(is_hex_str("0x401000"));
/// assert!(!is_hex_str("0x"));
/// assert!(!is_hex_str("sub_401000"));
/// ```
pub fn is_hex_str(s: &str) -> bool {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}
