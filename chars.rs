//! Character classification and char-offset string helpers.
//!
//! Columns in this crate are char offsets, never byte offsets. The helpers
//! here do the byte/char translation in one place.

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  ch == '\n'
}

#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  ch.is_whitespace()
}

/// Number of chars in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
  s.chars().count()
}

/// Slice `s` between two char offsets. Offsets past the end clamp to the end.
pub fn char_slice(s: &str, from: usize, to: usize) -> &str {
  debug_assert!(from <= to);
  let start = byte_of_char(s, from);
  let end = byte_of_char(s, to.max(from));
  &s[start..end]
}

fn byte_of_char(s: &str, offset: usize) -> usize {
  s.char_indices()
    .nth(offset)
    .map(|(byte, _)| byte)
    .unwrap_or(s.len())
}
