//! Parser combinators.

use std::iter::Peekable;
use std::str::Chars;

/// Remove all following whitespace.
pub fn eat_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while let Some(c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else {
            break;
        }
    }
}

/// Parse a nonempty identifier: letters, digits, `_`, `.` and `'`.
pub fn parse_ident(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut out = String::new();

    while let Some(c) = chars.peek() {
        if c.is_alphanumeric() || matches!(c, '_' | '.' | '\'') {
            out.push(*c);
            chars.next();
        } else {
            break;
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Check that nothing but whitespace is left, returning the first
/// offending character otherwise.
pub fn expect_end(chars: &mut Peekable<Chars<'_>>) -> Result<(), char> {
    eat_whitespace(chars);
    match chars.next() {
        Some(c) => Err(c),
        None => Ok(()),
    }
}
