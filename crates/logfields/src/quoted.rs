use crate::error::{FieldError, FieldResult};

/// Returns the text between the first and last characters of `raw`.
///
/// The removed characters are not checked, so `[x]`, `"x"` and `ax!`
/// all yield `x`. Character boundaries are respected, so multi-byte
/// delimiters are removed whole.
pub fn strip_delimiters(raw: &str) -> FieldResult<&str> {
    let mut chars = raw.chars();
    let first = chars.next();
    let last = chars.next_back();

    match (first, last) {
        (Some(open), Some(close)) => Ok(&raw[open.len_utf8()..raw.len() - close.len_utf8()]),
        _ => Err(FieldError::InvalidInput(format!(
            "expected at least 2 characters, got {}",
            raw.chars().count()
        ))),
    }
}

/// Like [`strip_delimiters`], but also requires the outer characters to be
/// exactly `open` and `close`.
pub fn strip_delimiters_checked(raw: &str, open: char, close: char) -> FieldResult<&str> {
    let inner = strip_delimiters(raw)?;
    if !raw.starts_with(open) || !raw.ends_with(close) {
        return Err(FieldError::InvalidInput(format!(
            "expected field wrapped in {}{}, got {:?}",
            open, close, raw
        )));
    }
    Ok(inner)
}
