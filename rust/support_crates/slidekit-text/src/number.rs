/// Formats `n` in decimal with `,` separating groups of three digits.
///
/// ```
/// use slidekit_text::pretty_number;
///
/// assert_eq!(pretty_number(0), "0");
/// assert_eq!(pretty_number(999), "999");
/// assert_eq!(pretty_number(1234567), "1,234,567");
/// ```
pub fn pretty_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

const UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Formats a byte count for display.
///
/// Counts below 1024 are printed exactly (`"1 byte"`, `"512 bytes"`); larger ones
/// use the largest binary unit in which the value is at least 1, with one decimal.
///
/// ```
/// use slidekit_text::byte_size_string;
///
/// assert_eq!(byte_size_string(1), "1 byte");
/// assert_eq!(byte_size_string(1023), "1023 bytes");
/// assert_eq!(byte_size_string(1536), "1.5 KB");
/// assert_eq!(byte_size_string(3 * 1024 * 1024), "3.0 MB");
/// ```
pub fn byte_size_string(size: u64) -> String {
    if size < 1024 {
        return if size == 1 {
            "1 byte".to_string()
        } else {
            format!("{size} bytes")
        };
    }

    let mut value = size as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
