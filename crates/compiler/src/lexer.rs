use std::{iter::Peekable, mem, str::Chars, sync::Arc};

use codemap::{File, Span};

use crate::{
    error::{DiagnosticKind, RawDiagnostic},
    utils::{as_hex, is_digit, is_name, is_name_start, is_non_printable, is_whitespace},
};

const FORM_FEED: char = '\x0C';
const UNICODE_REPLACEMENT: char = '\u{FFFD}';

/// A single preprocessed codepoint.
///
/// `pos` and `len` locate the codepoint in the original source, which may
/// differ from the normalized `kind` (a CRLF pair collapses to one LF).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Codepoint {
    pub kind: char,
    pos: u32,
    len: u32,
}

/// Normalizes raw input codepoints per CSS Syntax §3.3.
///
/// CRLF pairs, lone CR, and FF each become a single LF; NUL becomes
/// U+FFFD. Surrogates cannot occur in a `&str`, so no further replacement
/// is needed. This is a total function over any input.
struct Preprocessor<'a> {
    buf: Peekable<Chars<'a>>,
    cursor: u32,
}

impl<'a> Preprocessor<'a> {
    fn new(source: &'a str) -> Preprocessor<'a> {
        Self {
            buf: source.chars().peekable(),
            cursor: 0,
        }
    }
}

impl<'a> Iterator for Preprocessor<'a> {
    type Item = Codepoint;

    fn next(&mut self) -> Option<Codepoint> {
        let first = self.buf.next()?;
        let pos = self.cursor;
        let mut len = first.len_utf8() as u32;
        let kind = match first {
            FORM_FEED => '\n',
            '\r' => {
                if self.buf.peek() == Some(&'\n') {
                    self.buf.next();
                    len += 1;
                }
                '\n'
            }
            '\0' => UNICODE_REPLACEMENT,
            c => c,
        };
        self.cursor += len;
        Some(Codepoint { kind, pos, len })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.buf.size_hint()
    }
}

/// The normalized codepoint sequence, with single-codepoint reconsumption
/// and arbitrary lookahead.
pub(crate) struct Cursor {
    buf: Vec<Codepoint>,
    entire_span: Span,
    cursor: usize,
}

impl Cursor {
    fn new(buf: Vec<Codepoint>, entire_span: Span) -> Self {
        Cursor {
            buf,
            entire_span,
            cursor: 0,
        }
    }

    pub fn peek(&self) -> Option<Codepoint> {
        self.buf.get(self.cursor).copied()
    }

    /// Peeks `n` past the current position without advancing
    pub fn peek_n(&self, n: usize) -> Option<Codepoint> {
        self.buf.get(self.cursor + n).copied()
    }

    pub fn next(&mut self) -> Option<Codepoint> {
        self.buf.get(self.cursor).copied().map(|cp| {
            self.cursor += 1;
            cp
        })
    }

    /// Pushes the most recently consumed codepoint back onto the input
    pub fn reconsume(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Gets the span of the codepoint at the given index. If the index is
    /// out of bounds, it returns the span of the last codepoint. If the
    /// input is empty, it returns an empty span
    fn span_at_index(&self, idx: usize) -> Span {
        let (start, len) = match self.buf.get(idx) {
            Some(cp) => (cp.pos, cp.len),
            None => match self.buf.last() {
                Some(cp) => (cp.pos + cp.len, 0),
                None => (0, 0),
            },
        };

        self.entire_span
            .subspan(u64::from(start), u64::from(start + len))
    }

    pub fn span_from(&self, start: usize) -> Span {
        let start = self.span_at_index(start);
        let end = self.prev_span();

        start.merge(end)
    }

    pub fn prev_span(&self) -> Span {
        self.span_at_index(self.cursor.saturating_sub(1))
    }

    pub fn current_span(&self) -> Span {
        self.span_at_index(self.cursor)
    }
}

/// A single lexical token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

// https://www.w3.org/TR/css-syntax-3/#tokenization
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident(String),
    /// A function name. The opening parenthesis is part of the token; the
    /// matching close is not.
    Function(String),
    AtKeyword(String),
    Hash {
        value: String,
        /// Whether the value would itself be a valid identifier
        is_id: bool,
    },
    /// Value inside the quotes, with escapes resolved.
    String(String),
    BadString,
    Url(String),
    BadUrl,
    Delim(char),
    Number {
        value: f64,
        is_integer: bool,
        /// Whether the source spelled an explicit `+` or `-`
        has_sign: bool,
    },
    Percentage {
        value: f64,
    },
    Dimension {
        value: f64,
        is_integer: bool,
        unit: String,
    },
    Whitespace,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    Comma,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    /// Returned forever once the true end of input has been reached
    EndOfInput,
}

/// The tokenizer state machine.
///
/// Never fails: malformed constructs are resolved locally into substitute
/// tokens (`BadString`, `BadUrl`) or discarded spans, and a diagnostic is
/// recorded on the side channel. Every input yields a complete token
/// sequence terminating in `EndOfInput`.
pub(crate) struct Tokenizer {
    toks: Cursor,
    diagnostics: Vec<RawDiagnostic>,
}

impl Tokenizer {
    pub fn new_from_file(file: &Arc<File>) -> Self {
        let buf = Preprocessor::new(file.source()).collect();
        Tokenizer {
            toks: Cursor::new(buf, file.span),
            diagnostics: Vec::new(),
        }
    }

    pub fn take_diagnostics(&mut self) -> Vec<RawDiagnostic> {
        mem::take(&mut self.diagnostics)
    }

    fn diagnostic(&mut self, message: &str, span: Span) {
        self.diagnostics.push(RawDiagnostic {
            kind: DiagnosticKind::Tokenize,
            message: message.to_owned(),
            span,
        });
    }

    /// Consume the next token.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-token
    pub fn next_token(&mut self) -> Token {
        self.consume_comments();

        let start = self.toks.cursor();
        let first = match self.toks.next() {
            Some(cp) => cp,
            None => {
                return Token {
                    kind: TokenKind::EndOfInput,
                    span: self.toks.current_span(),
                }
            }
        };

        let kind = match first.kind {
            c if is_whitespace(c) => {
                while matches!(self.toks.peek(), Some(cp) if is_whitespace(cp.kind)) {
                    self.toks.next();
                }
                TokenKind::Whitespace
            }
            c @ ('"' | '\'') => self.consume_string(c),
            '#' => match (self.toks.peek(), self.toks.peek_n(1)) {
                (Some(c1), c2)
                    if is_name(c1.kind)
                        || (c1.kind == '\\' && c2.map_or(true, |c2| c2.kind != '\n')) =>
                {
                    let is_id = self.would_start_identifier();
                    TokenKind::Hash {
                        is_id,
                        value: self.consume_name(),
                    }
                }
                _ => TokenKind::Delim('#'),
            },
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '+' => {
                if self.would_start_number_after_sign() {
                    self.toks.reconsume();
                    self.consume_numeric()
                } else {
                    TokenKind::Delim('+')
                }
            }
            ',' => TokenKind::Comma,
            '-' => {
                if self.would_start_number_after_sign() {
                    self.toks.reconsume();
                    self.consume_numeric()
                } else if self.next_matches("->") {
                    self.toks.next();
                    self.toks.next();
                    TokenKind::Cdc
                } else if self.would_start_identifier_after_hyphen() {
                    self.toks.reconsume();
                    self.consume_ident_like()
                } else {
                    TokenKind::Delim('-')
                }
            }
            '.' => {
                if matches!(self.toks.peek(), Some(cp) if is_digit(cp.kind)) {
                    self.toks.reconsume();
                    self.consume_numeric()
                } else {
                    TokenKind::Delim('.')
                }
            }
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '<' => {
                if self.next_matches("!--") {
                    self.toks.next();
                    self.toks.next();
                    self.toks.next();
                    TokenKind::Cdo
                } else {
                    TokenKind::Delim('<')
                }
            }
            '@' => {
                if self.would_start_identifier() {
                    TokenKind::AtKeyword(self.consume_name())
                } else {
                    TokenKind::Delim('@')
                }
            }
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '\\' => {
                if !matches!(self.toks.peek(), Some(cp) if cp.kind == '\n') {
                    self.toks.reconsume();
                    self.consume_ident_like()
                } else {
                    self.diagnostic("invalid escape", self.toks.prev_span());
                    TokenKind::Delim('\\')
                }
            }
            c if is_digit(c) => {
                self.toks.reconsume();
                self.consume_numeric()
            }
            c if is_name_start(c) => {
                self.toks.reconsume();
                self.consume_ident_like()
            }
            c => TokenKind::Delim(c),
        };

        Token {
            kind,
            span: self.toks.span_from(start),
        }
    }

    fn next_matches(&self, s: &str) -> bool {
        for (idx, c) in s.chars().enumerate() {
            match self.toks.peek_n(idx) {
                Some(cp) if cp.kind == c => {}
                _ => return false,
            }
        }

        true
    }

    /// Whether the next codepoints would start an identifier.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier
    fn would_start_identifier(&self) -> bool {
        match self.toks.peek() {
            Some(c1) if c1.kind == '-' => match self.toks.peek_n(1) {
                Some(c2) if is_name_start(c2.kind) || c2.kind == '-' => true,
                Some(c2) if c2.kind == '\\' => {
                    self.toks.peek_n(2).map_or(true, |c3| c3.kind != '\n')
                }
                _ => false,
            },
            Some(c1) if is_name_start(c1.kind) => true,
            Some(c1) if c1.kind == '\\' => self.toks.peek_n(1).map_or(true, |c2| c2.kind != '\n'),
            _ => false,
        }
    }

    /// `would_start_identifier` with the leading `-` already consumed.
    fn would_start_identifier_after_hyphen(&self) -> bool {
        match self.toks.peek() {
            Some(c1) if is_name_start(c1.kind) || c1.kind == '-' => true,
            Some(c1) if c1.kind == '\\' => self.toks.peek_n(1).map_or(true, |c2| c2.kind != '\n'),
            _ => false,
        }
    }

    /// Whether the next codepoints continue a number, checked with the
    /// sign (or leading `.`/digit) already consumed.
    fn would_start_number_after_sign(&self) -> bool {
        match self.toks.peek() {
            Some(c1) if is_digit(c1.kind) => true,
            Some(c1) if c1.kind == '.' => {
                matches!(self.toks.peek_n(1), Some(c2) if is_digit(c2.kind))
            }
            _ => false,
        }
    }

    /// Whether the cursor sits on a `\` that begins a valid escape.
    fn starts_valid_escape(&self) -> bool {
        match self.toks.peek() {
            Some(c1) if c1.kind == '\\' => self.toks.peek_n(1).map_or(true, |c2| c2.kind != '\n'),
            _ => false,
        }
    }

    /// Consume `/* ... */` and `// ...` comments. Comments are discarded
    /// and never produce a token; an unterminated block comment is a parse
    /// error but tokenizing continues.
    fn consume_comments(&mut self) {
        loop {
            if self.next_matches("/*") {
                let start = self.toks.cursor();
                self.toks.next();
                self.toks.next();

                let mut closed = false;
                while let Some(cp) = self.toks.next() {
                    if cp.kind == '*' && matches!(self.toks.peek(), Some(c) if c.kind == '/') {
                        self.toks.next();
                        closed = true;
                        break;
                    }
                }

                if !closed {
                    self.diagnostic("unterminated comment", self.toks.span_from(start));
                }
            } else if self.next_matches("//") {
                // LESS line comment, discarded up to the next newline
                self.toks.next();
                self.toks.next();
                while matches!(self.toks.peek(), Some(cp) if cp.kind != '\n') {
                    self.toks.next();
                }
            } else {
                return;
            }
        }
    }

    /// Consume a string token, with the opening quote already consumed.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-string-token
    fn consume_string(&mut self, ending: char) -> TokenKind {
        let mut value = String::new();
        loop {
            let cp = match self.toks.next() {
                Some(cp) => cp,
                None => {
                    // EOF implicitly closes the string
                    self.diagnostic("unterminated string", self.toks.prev_span());
                    return TokenKind::String(value);
                }
            };

            match cp.kind {
                c if c == ending => return TokenKind::String(value),
                '\n' => {
                    self.diagnostic("newline in string", self.toks.prev_span());
                    self.toks.reconsume();
                    return TokenKind::BadString;
                }
                '\\' => match self.toks.peek() {
                    None => {}
                    Some(next) if next.kind == '\n' => {
                        // escaped newline, consumed without contributing
                        self.toks.next();
                    }
                    Some(..) => value.push(self.consume_escaped()),
                },
                c => value.push(c),
            }
        }
    }

    /// Consume an escaped codepoint, with the `\` already consumed and the
    /// escape known to be valid.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point
    fn consume_escaped(&mut self) -> char {
        let first = match self.toks.next() {
            Some(cp) => cp,
            None => {
                self.diagnostic("escape at end of input", self.toks.current_span());
                return UNICODE_REPLACEMENT;
            }
        };

        if !first.kind.is_ascii_hexdigit() {
            return first.kind;
        }

        let mut value = as_hex(first.kind);
        for _ in 0..5 {
            match self.toks.peek() {
                Some(cp) if cp.kind.is_ascii_hexdigit() => {
                    value = value * 16 + as_hex(cp.kind);
                    self.toks.next();
                }
                _ => break,
            }
        }

        if matches!(self.toks.peek(), Some(cp) if is_whitespace(cp.kind)) {
            self.toks.next();
        }

        match char::from_u32(value) {
            // from_u32 rejects surrogates and out-of-range values
            Some(c) if value != 0 => c,
            _ => UNICODE_REPLACEMENT,
        }
    }

    /// Consume a name, resolving escapes.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-name
    fn consume_name(&mut self) -> String {
        let mut value = String::new();
        loop {
            match self.toks.peek() {
                Some(cp) if is_name(cp.kind) => {
                    self.toks.next();
                    value.push(cp.kind);
                }
                Some(..) if self.starts_valid_escape() => {
                    self.toks.next();
                    value.push(self.consume_escaped());
                }
                _ => return value,
            }
        }
    }

    /// https://www.w3.org/TR/css-syntax-3/#consume-numeric-token
    fn consume_numeric(&mut self) -> TokenKind {
        let (value, is_integer, has_sign) = self.consume_number();

        if self.would_start_identifier() {
            TokenKind::Dimension {
                value,
                is_integer,
                unit: self.consume_name(),
            }
        } else if matches!(self.toks.peek(), Some(cp) if cp.kind == '%') {
            self.toks.next();
            TokenKind::Percentage { value }
        } else {
            TokenKind::Number {
                value,
                is_integer,
                has_sign,
            }
        }
    }

    /// https://www.w3.org/TR/css-syntax-3/#consume-number
    fn consume_number(&mut self) -> (f64, bool, bool) {
        let mut repr = String::new();
        let mut is_integer = true;
        let mut has_sign = false;

        if let Some(cp) = self.toks.peek() {
            if cp.kind == '+' || cp.kind == '-' {
                has_sign = true;
                repr.push(cp.kind);
                self.toks.next();
            }
        }

        self.consume_digits(&mut repr);

        if let (Some(c1), Some(c2)) = (self.toks.peek(), self.toks.peek_n(1)) {
            if c1.kind == '.' && is_digit(c2.kind) {
                is_integer = false;
                repr.push('.');
                self.toks.next();
                self.consume_digits(&mut repr);
            }
        }

        if matches!(self.toks.peek(), Some(c1) if c1.kind == 'e' || c1.kind == 'E') {
            match self.toks.peek_n(1) {
                Some(c2) if is_digit(c2.kind) => {
                    is_integer = false;
                    repr.push('e');
                    self.toks.next();
                    self.consume_digits(&mut repr);
                }
                Some(c2) if c2.kind == '+' || c2.kind == '-' => {
                    if matches!(self.toks.peek_n(2), Some(c3) if is_digit(c3.kind)) {
                        is_integer = false;
                        repr.push('e');
                        repr.push(c2.kind);
                        self.toks.next();
                        self.toks.next();
                        self.consume_digits(&mut repr);
                    }
                }
                _ => {}
            }
        }

        // the repr is a subset of Rust's float grammar, so this parse
        // cannot fail for non-empty input
        let value = repr.parse::<f64>().unwrap_or_default();

        (value, is_integer, has_sign)
    }

    fn consume_digits(&mut self, repr: &mut String) {
        while let Some(cp) = self.toks.peek() {
            if !is_digit(cp.kind) {
                break;
            }
            repr.push(cp.kind);
            self.toks.next();
        }
    }

    /// Consume an ident-like token.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token
    fn consume_ident_like(&mut self) -> TokenKind {
        let value = self.consume_name();

        if !matches!(self.toks.peek(), Some(cp) if cp.kind == '(') {
            return TokenKind::Ident(value);
        }

        self.toks.next();

        if !value.eq_ignore_ascii_case("url") {
            return TokenKind::Function(value);
        }

        // a quoted argument makes this a plain `url(...)` function call;
        // only the bare form becomes a url token. Whitespace ahead of a
        // quote is preserved for the function's argument list.
        while let (Some(c1), Some(c2)) = (self.toks.peek(), self.toks.peek_n(1)) {
            if is_whitespace(c1.kind) && is_whitespace(c2.kind) {
                self.toks.next();
            } else {
                break;
            }
        }

        match (self.toks.peek(), self.toks.peek_n(1)) {
            (Some(c1), _) if c1.kind == '"' || c1.kind == '\'' => TokenKind::Function(value),
            (Some(c1), Some(c2))
                if is_whitespace(c1.kind) && (c2.kind == '"' || c2.kind == '\'') =>
            {
                TokenKind::Function(value)
            }
            _ => self.consume_url(),
        }
    }

    /// Consume a url token, with `url(` already consumed.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-url-token
    fn consume_url(&mut self) -> TokenKind {
        let mut value = String::new();

        while matches!(self.toks.peek(), Some(cp) if is_whitespace(cp.kind)) {
            self.toks.next();
        }

        loop {
            let cp = match self.toks.next() {
                Some(cp) => cp,
                None => {
                    self.diagnostic("unterminated url", self.toks.prev_span());
                    return TokenKind::Url(value);
                }
            };

            match cp.kind {
                ')' => return TokenKind::Url(value),
                c if is_whitespace(c) => {
                    while matches!(self.toks.peek(), Some(cp) if is_whitespace(cp.kind)) {
                        self.toks.next();
                    }
                    return match self.toks.next() {
                        None => {
                            self.diagnostic("unterminated url", self.toks.prev_span());
                            TokenKind::Url(value)
                        }
                        Some(cp) if cp.kind == ')' => TokenKind::Url(value),
                        Some(..) => {
                            self.diagnostic("whitespace in url", self.toks.prev_span());
                            self.toks.reconsume();
                            self.consume_bad_url_remnants()
                        }
                    };
                }
                c @ ('"' | '\'' | '(') => {
                    self.diagnostic(
                        &format!("unexpected {:?} in url", c),
                        self.toks.prev_span(),
                    );
                    return self.consume_bad_url_remnants();
                }
                c if is_non_printable(c) => {
                    self.diagnostic("non-printable codepoint in url", self.toks.prev_span());
                    return self.consume_bad_url_remnants();
                }
                '\\' => {
                    if !matches!(self.toks.peek(), Some(cp) if cp.kind == '\n') {
                        value.push(self.consume_escaped());
                    } else {
                        self.diagnostic("invalid escape in url", self.toks.prev_span());
                        return self.consume_bad_url_remnants();
                    }
                }
                c => value.push(c),
            }
        }
    }

    /// Discard the remainder of a malformed url, up to the next `)` or the
    /// end of input.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url
    fn consume_bad_url_remnants(&mut self) -> TokenKind {
        loop {
            match self.toks.next() {
                None => return TokenKind::BadUrl,
                Some(cp) if cp.kind == ')' => return TokenKind::BadUrl,
                Some(cp) if cp.kind == '\\' => {
                    if !matches!(self.toks.peek(), Some(cp) if cp.kind == '\n') {
                        self.consume_escaped();
                    }
                }
                Some(..) => {}
            }
        }
    }
}
