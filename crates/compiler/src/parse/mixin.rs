use std::mem;

use codemap::Span;

use crate::{
    ast::{BlockKind, ComponentValue, Item, SimpleBlock},
    error::LessResult,
    lexer::TokenKind,
    parse::{value::trim_whitespace, Parser},
};

impl Parser<'_> {
    /// Consume a mixin call or definition, with the prelude and the opening
    /// `(` of the argument list already consumed. What follows the argument
    /// list decides the production:
    ///
    /// * `;`, the close of the enclosing block, or end of input — a call
    /// * `[` — a call used as the base of a namespace lookup
    /// * `{` — a definition
    /// * `when` — a guarded definition
    pub(super) fn consume_mixin(
        &mut self,
        prelude: Vec<ComponentValue>,
        open_span: Span,
    ) -> LessResult<Option<Item>> {
        let arguments = self.consume_mixin_arguments(open_span)?;
        let tok = self.next_non_whitespace();
        match tok.kind {
            TokenKind::Semicolon | TokenKind::EndOfInput => {
                Ok(Some(Item::MixinCall { prelude, arguments }))
            }
            TokenKind::RightBrace => {
                self.reconsume(tok);
                Ok(Some(Item::MixinCall { prelude, arguments }))
            }
            TokenKind::LeftBracket => {
                self.reconsume(tok);
                self.consume_namespace_statement(Item::MixinCall { prelude, arguments })
            }
            TokenKind::LeftBrace => {
                let block = self.consume_simple_block(BlockKind::Brace, tok.span)?;
                Ok(Some(Item::MixinDefinition {
                    prelude,
                    arguments,
                    guard: None,
                    block,
                }))
            }
            TokenKind::Ident(ref word) if word == "when" => {
                match self.consume_guard()? {
                    Some((guard, block)) => Ok(Some(Item::MixinDefinition {
                        prelude,
                        arguments,
                        guard: Some(guard),
                        block,
                    })),
                    None => Ok(None),
                }
            }
            _ => {
                self.error("expected \";\" or \"{\"", tok.span);
                self.reconsume(tok);
                self.recover_statement()?;
                Ok(None)
            }
        }
    }

    /// Consume the component values of a mixin argument list up to the
    /// matching `)`, then split them into arguments.
    fn consume_mixin_arguments(&mut self, open_span: Span) -> LessResult<Vec<Vec<ComponentValue>>> {
        self.enter_nested(open_span)?;
        let mut flat = Vec::new();
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
                    flat.push(self.consume_component_value()?);
                }
            }
        }
        self.leave_nested();
        Ok(split_arguments(flat))
    }

    /// Consume a mixin guard, with the `when` keyword already consumed:
    /// the raw condition up to the opening `{`, followed by the
    /// definition's block.
    fn consume_guard(&mut self) -> LessResult<Option<(Vec<ComponentValue>, SimpleBlock)>> {
        let mut guard = Vec::new();
        loop {
            let tok = self.next_token();
            match tok.kind {
                TokenKind::LeftBrace => {
                    let block = self.consume_simple_block(BlockKind::Brace, tok.span)?;
                    return Ok(Some((trim_whitespace(guard), block)));
                }
                TokenKind::Semicolon | TokenKind::EndOfInput => {
                    self.error("expected \"{\" after mixin guard", tok.span);
                    return Ok(None);
                }
                _ => {
                    self.reconsume(tok);
                    guard.push(self.consume_component_value()?);
                }
            }
        }
    }
}

/// Whether every component of a prelude could be part of a mixin
/// selector: `.name` and `#name` segments, optionally separated by
/// whitespace or `>`, starting with `.` or `#`.
fn prelude_is_mixin_like(prelude: &[ComponentValue]) -> bool {
    if !matches!(
        prelude.first().and_then(ComponentValue::as_token),
        Some(TokenKind::Delim('.') | TokenKind::Hash { .. })
    ) {
        return false;
    }
    prelude.iter().all(|value| {
        matches!(
            value.as_token(),
            Some(
                TokenKind::Ident(..)
                    | TokenKind::Hash { .. }
                    | TokenKind::Whitespace
                    | TokenKind::Delim('.' | '>')
            )
        )
    })
}

/// Whether a qualified-rule prelude followed by a `(` token is the target
/// of a mixin argument list. The final segment must be a hash: an
/// identifier immediately followed by `(` tokenizes as a function and is
/// handled by [`prelude_is_mixin_prefix`] instead.
pub(super) fn prelude_is_mixin_shape(prelude: &[ComponentValue]) -> bool {
    matches!(
        prelude.last().and_then(ComponentValue::as_token),
        Some(TokenKind::Hash { .. })
    ) && prelude_is_mixin_like(prelude)
}

/// Whether a qualified-rule prelude followed by a function token named
/// `name` forms the mixin selector `....name(`: the function's name
/// completes a chain ending in `.`.
pub(super) fn prelude_is_mixin_prefix(prelude: &[ComponentValue]) -> bool {
    matches!(
        prelude.last().and_then(ComponentValue::as_token),
        Some(TokenKind::Delim('.'))
    ) && prelude_is_mixin_like(prelude)
}

/// Split a flat argument sequence on its separators.
///
/// Any top-level `;` promotes the whole list to semicolon separation,
/// letting individual arguments keep interior commas, as in
/// `.mixin(red, green; 2px)`. Otherwise arguments split on `,`.
fn split_arguments(flat: Vec<ComponentValue>) -> Vec<Vec<ComponentValue>> {
    let semicolon_separated = flat
        .iter()
        .any(|value| matches!(value.as_token(), Some(TokenKind::Semicolon)));
    let mut arguments = Vec::new();
    let mut current = Vec::new();
    for value in flat {
        let is_separator = match value.as_token() {
            Some(TokenKind::Semicolon) => true,
            Some(TokenKind::Comma) => !semicolon_separated,
            _ => false,
        };
        if is_separator {
            arguments.push(trim_whitespace(mem::take(&mut current)));
        } else {
            current.push(value);
        }
    }
    let current = trim_whitespace(current);
    if !current.is_empty() {
        arguments.push(current);
    }
    arguments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Tokenizer;

    fn components(input: &str) -> Vec<ComponentValue> {
        let mut map = codemap::CodeMap::new();
        let file = map.add_file("test.less".to_owned(), input.to_owned());
        let mut toks = Tokenizer::new_from_file(&file);

        let mut values = Vec::new();
        loop {
            let tok = toks.next_token();
            if tok.kind == TokenKind::EndOfInput {
                break;
            }
            values.push(ComponentValue::Token(tok));
        }
        values
    }

    #[test]
    fn comma_separated_arguments() {
        let arguments = split_arguments(components("1 , 2"));
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].len(), 1);
        assert_eq!(arguments[1].len(), 1);
    }

    #[test]
    fn semicolon_promotes_the_separator() {
        let arguments = split_arguments(components("a, b; c"));
        assert_eq!(arguments.len(), 2);
        // the first argument keeps its comma and interior whitespace
        assert_eq!(arguments[0].len(), 4);
        assert_eq!(arguments[1].len(), 1);
    }

    #[test]
    fn empty_argument_list() {
        assert!(split_arguments(Vec::new()).is_empty());
    }

    #[test]
    fn mixin_prelude_shapes() {
        assert!(prelude_is_mixin_prefix(&components(".")));
        assert!(prelude_is_mixin_prefix(&components("#ns > .")));
        assert!(prelude_is_mixin_shape(&components("#ns")));
        assert!(!prelude_is_mixin_prefix(&components("a.")));
        assert!(!prelude_is_mixin_shape(&components(".name")));
        assert!(!prelude_is_mixin_shape(&components("a #ns")));
    }
}
