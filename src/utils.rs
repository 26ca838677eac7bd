//! Small string and time helpers shared by the extractors and the pipeline.

use chrono::{DateTime, Utc};

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_utc(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// The current wall-clock time, formatted with [`format_utc`].
///
/// Used for the `scraped_at` field of every new record.
pub fn utc_timestamp() -> String {
    format_utc(Utc::now())
}

/// Shorten article text for a debug preview.
///
/// # Arguments
///
/// * `s` - The text to preview
/// * `max` - Maximum number of bytes kept from `s`
///
/// # Returns
///
/// `s` unchanged when it fits, otherwise its first `max` bytes (moved back to
/// a char boundary) followed by `…(+N bytes)`.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Title-case a string word by word.
///
/// Every alphabetic character that follows a non-alphabetic one (or starts
/// the string) is upper-cased; the remaining alphabetic characters are
/// lower-cased. `"stock-markets"` becomes `"Stock-Markets"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
