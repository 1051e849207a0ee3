//! Whitespace handling shared by search and form validation.
//!
//! Browser form input treats U+FEFF (zero-width no-break space) as
//! whitespace; `char::is_whitespace` does not.

/// Byte-order mark / zero-width no-break space.
pub const BOM: char = '\u{feff}';

/// Whitespace as browser form input understands it.
pub fn is_input_whitespace(c: char) -> bool {
    c.is_whitespace() || c == BOM
}

/// Trim input whitespace from both ends.
pub fn trim_input(s: &str) -> &str {
    s.trim_matches(is_input_whitespace)
}

/// Trim input whitespace from the start.
pub fn trim_input_start(s: &str) -> &str {
    s.trim_start_matches(is_input_whitespace)
}
