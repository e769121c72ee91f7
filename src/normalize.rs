//! Character-level clean-up of extracted text.
//!
//! Runs before page-break inference: NFC normalization, removal of control
//! and private-use characters, fullwidth ASCII folding.

use unicode_normalization::UnicodeNormalization;

/// Normalizes raw extracted text.
///
/// Newlines are preserved, since the blank-run structure drives page-break
/// inference. A soft hyphen at the end of a line becomes a plain hyphen so the
/// page merger can still repair the word break; elsewhere it is dropped.
pub fn normalize_text(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.nfc().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{00AD}' {
            if matches!(chars.peek(), Some('\n' | '\r')) {
                result.push('-');
            }
            continue;
        }

        if is_control_char(c) || is_pua_char(c) {
            continue;
        }

        match normalize_fullwidth(c) {
            Some(normalized) => result.push(normalized),
            None => result.push(c),
        }
    }

    result
}

/// Characters that never carry text.
fn is_control_char(c: char) -> bool {
    matches!(
        c,
        '\0'
        | '\x0B'
        | '\x0C'
        | '\u{FEFF}' // BOM
        | '\u{FFFD}' // Replacement character
        | '\u{200B}' // Zero-width space
    )
}

/// Private Use Area code points, typically unmapped symbol-font glyphs.
fn is_pua_char(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}

fn normalize_fullwidth(c: char) -> Option<char> {
    match c {
        '\u{3000}' | '\u{00A0}' => Some(' '),
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(0x21 + (c as u32 - 0xFF01)),
        _ => None,
    }
}
