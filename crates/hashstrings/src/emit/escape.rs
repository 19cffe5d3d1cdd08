//! C literal rendering.

use hashstrings_core::{CharMap, MapEntry};
use std::fmt::Write as _;

/// Escape `text` for use inside a C string literal.
///
/// Quotes and backslashes get a backslash, common control characters use
/// their short escapes and any other byte outside printable ASCII becomes a
/// three-digit octal escape. Texts are bytes, not necessarily UTF-8.
#[must_use]
pub fn c_string(text: impl AsRef<[u8]>) -> String {
    let text = text.as_ref();
    let mut out = String::with_capacity(text.len());
    for &byte in text {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b' '..=b'~' => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    out
}

/// Describe one 9-bit code for the comment beside a packed map word.
///
/// Printable literals appear as character literals, other literals as hex
/// and symbol codes as the class name in parentheses.
#[must_use]
pub fn map_field(map: &CharMap, code: u16) -> String {
    match MapEntry::from_code(code) {
        MapEntry::Literal(b'\'') => " '\\''".to_string(),
        MapEntry::Literal(b'\\') => " '\\\\'".to_string(),
        MapEntry::Literal(byte) if byte.is_ascii_graphic() => format!(" '{}' ", char::from(byte)),
        MapEntry::Literal(byte) => format!(" 0x{byte:02X}"),
        MapEntry::Symbol(id) => map
            .class(id)
            .map_or_else(|| format!(" ({code})"), |class| format!(" ({})", class.name())),
    }
}
