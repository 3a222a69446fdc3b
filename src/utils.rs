//! String helpers shared by the normalizer and the logging call sites.
//!
//! Two flavors of truncation live here and they are not interchangeable:
//! - [`truncate_chars`] enforces *storage* limits and counts characters, so a
//!   record field is never cut inside a multi-byte character.
//! - [`truncate_for_log`] shortens noisy response bodies for log output and
//!   counts bytes, appending how much was dropped.

/// Truncate a string to at most `max` characters.
///
/// Used by the field normalizer to enforce column limits before storage.
/// The limits are defined in characters, and cutting on a char boundary
/// keeps the result valid UTF-8 for any input.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of characters to keep
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("short", 255), "short");
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and
/// byte count indicator appended.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of bytes to keep
///
/// # Returns
///
/// The original string if shorter than `max`, otherwise a truncated version
/// with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}
