//! Doctor name normalization
//!
//! Names arrive as `"<given> <surname> ..."`. The first character of every
//! word is upper-cased; everything else is kept as it was sent. When the
//! surname starts with `o'` (any case) the apostrophe also starts a new word,
//! so `o'brien` becomes `O'Brien`.

use crate::domain::NameError;

/// Word boundaries for ordinary names
const WHITESPACE_DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x0B', '\x0C'];

/// Word boundaries once the surname is an `O'` name
const APOSTROPHE_DELIMITERS: &[char] = &[' ', '\''];

/// Normalize the capitalization of a full name
///
/// The surname is the second space-separated token.
///
/// # Errors
///
/// Returns `NameError::MissingSurname` if the name contains no space.
///
/// # Example
///
/// ```
/// use slotsync::core::naming::normalize_name;
///
/// assert_eq!(normalize_name("conor o'brien").unwrap(), "Conor O'Brien");
/// assert_eq!(normalize_name("john doe").unwrap(), "John Doe");
/// ```
pub fn normalize_name(full_name: &str) -> Result<String, NameError> {
    let surname = full_name
        .split(' ')
        .nth(1)
        .ok_or_else(|| NameError::MissingSurname(full_name.to_string()))?;

    let delimiters = if surname.to_lowercase().starts_with("o'") {
        APOSTROPHE_DELIMITERS
    } else {
        WHITESPACE_DELIMITERS
    };

    Ok(capitalize_words(full_name, delimiters))
}

fn capitalize_words(input: &str, delimiters: &[char]) -> String {
    let mut output = String::with_capacity(input.len());
    let mut word_start = true;

    for c in input.chars() {
        if word_start {
            output.extend(c.to_uppercase());
        } else {
            output.push(c);
        }
        word_start = delimiters.contains(&c);
    }

    output
}
