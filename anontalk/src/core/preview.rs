//! Truncated thread content for list views.

use std::borrow::Cow;

/// Default number of characters shown before "show more".
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

/// Cut `content` to `limit` characters and append `...` when it is longer.
///
/// Counts chars, not bytes, so multi-byte text never splits a code point.
pub fn preview(content: &str, limit: usize) -> Cow<'_, str> {
    match content.char_indices().nth(limit) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &content[..cut], ELLIPSIS)),
        None => Cow::Borrowed(content),
    }
}

/// True if [`preview`] would shorten `content`.
pub fn is_truncated(content: &str, limit: usize) -> bool {
    content.chars().nth(limit).is_some()
}
