use codemap::Span;

use crate::{
    ast::{BlockKind, StyleSheet},
    error::{DiagnosticKind, LessResult, RawDiagnostic},
    lexer::{Token, TokenKind, Tokenizer},
    Options,
};

mod declaration;
mod mixin;
mod stylesheet;
mod value;

/// The recursive-descent parser.
///
/// Consumes the token sequence with exactly one token of reconsumption,
/// implemented as an explicit pushback slot checked before pulling a new
/// token. All parse errors are non-fatal: the offending production is
/// discarded and scanning resumes at the next recoverable boundary. The
/// only fatal condition is exceeding the configured nesting depth.
pub(crate) struct Parser<'a> {
    toks: Tokenizer,
    pushback: Option<Token>,
    diagnostics: Vec<RawDiagnostic>,
    options: &'a Options<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(toks: Tokenizer, options: &'a Options<'a>) -> Self {
        Parser {
            toks,
            pushback: None,
            diagnostics: Vec::new(),
            options,
            depth: 0,
        }
    }

    pub fn __parse(mut self) -> LessResult<(StyleSheet, Vec<RawDiagnostic>)> {
        let stylesheet = self.parse_stylesheet()?;
        let diagnostics = self.finish();
        Ok((stylesheet, diagnostics))
    }

    pub fn __parse_declaration_list(mut self) -> LessResult<(StyleSheet, Vec<RawDiagnostic>)> {
        let items = self.parse_declaration_list()?;
        let diagnostics = self.finish();
        Ok((StyleSheet { items }, diagnostics))
    }

    fn finish(&mut self) -> Vec<RawDiagnostic> {
        let mut diagnostics = self.toks.take_diagnostics();
        diagnostics.append(&mut self.diagnostics);
        diagnostics.sort_by_key(|d| d.span.low());
        diagnostics
    }

    fn next_token(&mut self) -> Token {
        match self.pushback.take() {
            Some(tok) => tok,
            None => self.toks.next_token(),
        }
    }

    /// Push `tok` back onto the input, to be returned by the next call to
    /// `next_token`. At most one token may be pushed back at a time.
    fn reconsume(&mut self, tok: Token) {
        debug_assert!(self.pushback.is_none());
        self.pushback = Some(tok);
    }

    fn next_non_whitespace(&mut self) -> Token {
        loop {
            let tok = self.next_token();
            if tok.kind != TokenKind::Whitespace {
                return tok;
            }
        }
    }

    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.push(RawDiagnostic {
            kind: DiagnosticKind::Parse,
            message: message.into(),
            span,
        });
    }

    fn enter_nested(&mut self, span: Span) -> LessResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_nesting_depth {
            return Err(("maximum nesting depth exceeded.", span).into());
        }
        Ok(())
    }

    fn leave_nested(&mut self) {
        self.depth -= 1;
    }

    /// Discard tokens up to the next recoverable boundary: a top-level
    /// `;`, a skipped block, the close of the enclosing block, or end of
    /// input. Nested brackets are skipped whole.
    fn recover_statement(&mut self) -> LessResult<()> {
        loop {
            let tok = self.next_token();
            match tok.kind {
                TokenKind::Semicolon | TokenKind::EndOfInput => return Ok(()),
                TokenKind::RightBrace => {
                    self.reconsume(tok);
                    return Ok(());
                }
                TokenKind::LeftBrace => {
                    self.consume_simple_block(BlockKind::Brace, tok.span)?;
                    return Ok(());
                }
                _ => {
                    self.reconsume(tok);
                    self.consume_component_value()?;
                }
            }
        }
    }
}
