use slidekit_stopwatch::{HOUR, MINUTE, TimeStamp};

/// Formats a duration in seconds using the largest sensible unit.
///
/// Durations of an hour or more are reported in hours, of a minute or more in
/// minutes, below 10 ms in milliseconds, and in seconds otherwise. Values always
/// carry two decimals.
///
/// ```
/// use slidekit_text::time_string;
///
/// assert_eq!(time_string(7200.0), "2.00 hours");
/// assert_eq!(time_string(90.0), "1.50 minutes");
/// assert_eq!(time_string(2.5), "2.50 seconds");
/// assert_eq!(time_string(0.004), "4.00 milliseconds");
/// ```
pub fn time_string(time: TimeStamp) -> String {
    if time >= HOUR {
        format!("{:.2} hours", time / HOUR)
    } else if time >= MINUTE {
        format!("{:.2} minutes", time / MINUTE)
    } else if time < 0.01 {
        format!("{:.2} milliseconds", time * 1000.0)
    } else {
        format!("{time:.2} seconds")
    }
}
