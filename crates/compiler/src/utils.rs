//! Codepoint classification shared by the lexer and the parser.
//!
//! The predicates follow the definitions in CSS Syntax Level 3, §4.2.

pub(crate) fn is_whitespace(c: char) -> bool {
    // the preprocessor has already folded CR, CRLF, and FF into LF
    matches!(c, ' ' | '\t' | '\n')
}

pub(crate) fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub(crate) fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

pub(crate) fn is_name(c: char) -> bool {
    is_name_start(c) || is_digit(c) || c == '-'
}

/// Whether `c` may not appear unescaped inside an unquoted url token.
pub(crate) fn is_non_printable(c: char) -> bool {
    matches!(c, '\0'..='\u{8}' | '\u{b}' | '\u{e}'..='\u{1f}' | '\u{7f}')
}

pub(crate) fn as_hex(c: char) -> u32 {
    c.to_digit(16).unwrap_or(0)
}
