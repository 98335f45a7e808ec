use codemap::Span;

use crate::{
    ast::{BlockKind, ComponentValue, FunctionCall, SimpleBlock},
    error::LessResult,
    lexer::TokenKind,
    parse::Parser,
};

impl Parser<'_> {
    /// Consume a component value: a simple block, a function call, or any
    /// single token.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-component-value
    pub(super) fn consume_component_value(&mut self) -> LessResult<ComponentValue> {
        let tok = self.next_token();
        match tok.kind {
            TokenKind::LeftParen => Ok(ComponentValue::Block(
                self.consume_simple_block(BlockKind::Paren, tok.span)?,
            )),
            TokenKind::LeftBracket => Ok(ComponentValue::Block(
                self.consume_simple_block(BlockKind::Bracket, tok.span)?,
            )),
            TokenKind::LeftBrace => Ok(ComponentValue::Block(
                self.consume_simple_block(BlockKind::Brace, tok.span)?,
            )),
            TokenKind::Function(name) => Ok(ComponentValue::FunctionCall(
                self.consume_function(name, tok.span)?,
            )),
            _ => Ok(ComponentValue::Token(tok)),
        }
    }

    /// Consume a simple block, with the opening bracket already consumed.
    ///
    /// End of input implicitly closes the block and records a diagnostic.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-simple-block
    pub(super) fn consume_simple_block(
        &mut self,
        kind: BlockKind,
        open_span: Span,
    ) -> LessResult<SimpleBlock> {
        self.enter_nested(open_span)?;
        let mut values = Vec::new();
        loop {
            let tok = self.next_token();
            if kind.is_closed_by(&tok.kind) {
                break;
            }
            match tok.kind {
                TokenKind::EndOfInput => {
                    self.error(format!("expected \"{}\"", kind.close()), tok.span);
                    break;
                }
                _ => {
                    self.reconsume(tok);
                    values.push(self.consume_component_value()?);
                }
            }
        }
        self.leave_nested();
        Ok(SimpleBlock { kind, values })
    }

    /// Consume a function call, with the function token (which includes the
    /// opening parenthesis) already consumed.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-function
    pub(super) fn consume_function(
        &mut self,
        name: String,
        open_span: Span,
    ) -> LessResult<FunctionCall> {
        self.enter_nested(open_span)?;
        let mut arguments = Vec::new();
        loop {
            let tok = self.next_token();
            match tok.kind {
                TokenKind::RightParen => break,
                TokenKind::EndOfInput => {
                    self.error("expected \")\"", tok.span);
                    break;
                }
                _ => {
                    self.reconsume(tok);
                    arguments.push(self.consume_component_value()?);
                }
            }
        }
        self.leave_nested();
        Ok(FunctionCall {
            name: name.into(),
            arguments,
        })
    }

    /// Consume component values up to (and including) the next top-level
    /// `;`, or up to the close of the enclosing block or end of input.
    /// Separators inside blocks and function calls do not terminate the
    /// sequence. The result is trimmed of surrounding whitespace.
    pub(super) fn consume_value_sequence(&mut self) -> LessResult<Vec<ComponentValue>> {
        let mut values = Vec::new();
        loop {
            let tok = self.next_token();
            match tok.kind {
                TokenKind::Semicolon | TokenKind::EndOfInput => break,
                TokenKind::RightBrace => {
                    self.reconsume(tok);
                    break;
                }
                _ => {
                    self.reconsume(tok);
                    values.push(self.consume_component_value()?);
                }
            }
        }
        Ok(trim_whitespace(values))
    }
}

/// Strip leading and trailing whitespace tokens.
pub(super) fn trim_whitespace(mut values: Vec<ComponentValue>) -> Vec<ComponentValue> {
    while values.last().map_or(false, ComponentValue::is_whitespace) {
        values.pop();
    }
    let leading = values
        .iter()
        .take_while(|value| value.is_whitespace())
        .count();
    values.drain(..leading);
    values
}
