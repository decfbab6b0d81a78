//! Control character escaping for the line-oriented handlers

use crate::core::FieldValue;
use std::borrow::Cow;

fn is_control(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t')
}

/// Replace `\n`, `\r` and `\t` with their backslash forms so one entry
/// stays one line.
pub(crate) fn escape_control(s: &str) -> Cow<'_, str> {
    if !s.contains(is_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escaped rendering of a field value. String-like values are not copied
/// unless they need escaping.
pub(crate) fn escape_value(value: &FieldValue) -> Cow<'_, str> {
    match value.as_str() {
        Some(s) => escape_control(s),
        None => Cow::Owned(escape_control(&value.to_string()).into_owned()),
    }
}
