use codemap::Span;

use crate::{
    ast::{BlockKind, ComponentValue, Item, Lookup, StyleSheet},
    common::Identifier,
    error::LessResult,
    lexer::{Token, TokenKind},
    parse::{
        mixin::{prelude_is_mixin_prefix, prelude_is_mixin_shape},
        value::trim_whitespace,
        Parser,
    },
};

impl Parser<'_> {
    /// Consume a list of rules at the top level of a stylesheet.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules
    pub(super) fn parse_stylesheet(&mut self) -> LessResult<StyleSheet> {
        let mut items = Vec::new();
        loop {
            let tok = self.next_token();
            match tok.kind {
                TokenKind::Whitespace | TokenKind::Cdo | TokenKind::Cdc => continue,
                TokenKind::EndOfInput => break,
                TokenKind::AtKeyword(name) => {
                    if let Some(item) = self.consume_less_at_rule(name.into(), tok.span)? {
                        items.push(item);
                    }
                }
                TokenKind::RightParen => self.error("unexpected \")\"", tok.span),
                TokenKind::RightBracket => self.error("unexpected \"]\"", tok.span),
                TokenKind::RightBrace => self.error("unexpected \"}\"", tok.span),
                _ => {
                    self.reconsume(tok);
                    if let Some(item) = self.consume_qualified_rule()? {
                        items.push(item);
                    }
                }
            }
        }
        Ok(StyleSheet { items })
    }

    /// Dispatch an at-keyword between the LESS productions and a plain CSS
    /// at-rule, based on the first token after the name:
    ///
    /// * `:` — variable declaration
    /// * `()` — variable call
    /// * `(` followed by anything else — CSS at-rule whose prelude begins
    ///   with a parenthesized block
    /// * `[` — namespace lookup rooted at the variable
    /// * `;` or end of input — error, the statement is discarded
    /// * anything else — CSS at-rule
    pub(super) fn consume_less_at_rule(
        &mut self,
        name: Identifier,
        name_span: Span,
    ) -> LessResult<Option<Item>> {
        let tok = self.next_non_whitespace();
        match tok.kind {
            TokenKind::Colon => {
                let value = self.consume_value_sequence()?;
                Ok(Some(Item::VariableDeclaration { name, value }))
            }
            TokenKind::LeftParen => {
                let next = self.next_token();
                if next.kind == TokenKind::RightParen {
                    self.consume_variable_call(name)
                } else {
                    // Not a variable call after all. The parenthesis opens
                    // an ordinary block at the start of an at-rule prelude,
                    // as in `@media (min-width: 100px)`.
                    self.reconsume(next);
                    let block = self.consume_simple_block(BlockKind::Paren, tok.span)?;
                    self.consume_css_at_rule(name, vec![ComponentValue::Block(block)])
                }
            }
            TokenKind::LeftBracket => {
                self.reconsume(tok);
                self.consume_namespace_statement(Item::VariableCall { name })
            }
            TokenKind::Semicolon | TokenKind::EndOfInput => {
                self.error(format!("expected \":\" after @{}", name), name_span);
                Ok(None)
            }
            _ => {
                self.reconsume(tok);
                self.consume_css_at_rule(name, Vec::new())
            }
        }
    }

    /// Consume a variable call, with `@name()` fully consumed. A bracket
    /// after the call chains into a namespace lookup.
    fn consume_variable_call(&mut self, name: Identifier) -> LessResult<Option<Item>> {
        let call = Item::VariableCall { name };
        let tok = self.next_non_whitespace();
        if tok.kind == TokenKind::LeftBracket {
            self.reconsume(tok);
            return self.consume_namespace_statement(call);
        }
        self.reconsume(tok);
        if self.expect_statement_end()? {
            Ok(Some(call))
        } else {
            Ok(None)
        }
    }

    /// Consume a namespace-lookup chain and the statement terminator
    /// following it, wrapping `value` as the chain's base.
    pub(super) fn consume_namespace_statement(&mut self, value: Item) -> LessResult<Option<Item>> {
        let mut lookups = Vec::new();
        loop {
            let tok = self.next_non_whitespace();
            if tok.kind != TokenKind::LeftBracket {
                self.reconsume(tok);
                break;
            }
            match self.consume_lookup_key()? {
                Some(key) => lookups.push(key),
                None => {
                    self.recover_statement()?;
                    return Ok(None);
                }
            }
        }
        let lookup = Item::NamespaceValue {
            value: Box::new(value),
            lookups,
        };
        if self.expect_statement_end()? {
            Ok(Some(lookup))
        } else {
            Ok(None)
        }
    }

    /// Consume one `[key]`, with the `[` already consumed. Returns `None`
    /// (after recording a diagnostic) if the key is malformed or the
    /// closing bracket is missing.
    fn consume_lookup_key(&mut self) -> LessResult<Option<Lookup>> {
        let tok = self.next_non_whitespace();
        let key = match tok.kind {
            TokenKind::RightBracket => return Ok(Some(Lookup::Last)),
            TokenKind::Ident(name) => Lookup::Ident(name.into()),
            TokenKind::AtKeyword(name) => Lookup::Variable(name.into()),
            // `@@variable` tokenizes as a delim followed by an at-keyword
            TokenKind::Delim('@') => {
                let next = self.next_token();
                match next.kind {
                    TokenKind::AtKeyword(name) => Lookup::VariableVariable(name.into()),
                    _ => {
                        self.error("invalid variable lookup", next.span);
                        return Ok(None);
                    }
                }
            }
            TokenKind::Delim('$') => {
                let next = self.next_token();
                match next.kind {
                    TokenKind::Ident(name) => Lookup::Property(name.into()),
                    TokenKind::AtKeyword(name) => Lookup::PropertyVariable(name.into()),
                    _ => {
                        self.error("invalid property lookup", next.span);
                        return Ok(None);
                    }
                }
            }
            _ => {
                self.error("invalid lookup", tok.span);
                return Ok(None);
            }
        };
        let close = self.next_non_whitespace();
        if close.kind == TokenKind::RightBracket {
            Ok(Some(key))
        } else {
            self.error("expected \"]\"", close.span);
            self.reconsume(close);
            Ok(None)
        }
    }

    /// Expect the end of a LESS statement: a `;`, the close of the
    /// enclosing block, or end of input. On anything else, records a
    /// diagnostic, discards up to the next boundary, and returns `false`.
    pub(super) fn expect_statement_end(&mut self) -> LessResult<bool> {
        let tok = self.next_non_whitespace();
        match tok.kind {
            TokenKind::Semicolon | TokenKind::EndOfInput => Ok(true),
            TokenKind::RightBrace => {
                self.reconsume(tok);
                Ok(true)
            }
            _ => {
                self.error("expected \";\"", tok.span);
                self.reconsume(tok);
                self.recover_statement()?;
                Ok(false)
            }
        }
    }

    /// Consume a plain CSS at-rule, with its name (and possibly the first
    /// prelude component) already consumed.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-at-rule
    fn consume_css_at_rule(
        &mut self,
        name: Identifier,
        mut prelude: Vec<ComponentValue>,
    ) -> LessResult<Option<Item>> {
        loop {
            let tok = self.next_token();
            match tok.kind {
                TokenKind::Semicolon | TokenKind::EndOfInput => {
                    return Ok(Some(Item::AtRule {
                        name,
                        prelude: trim_whitespace(prelude),
                        block: None,
                    }));
                }
                TokenKind::RightBrace => {
                    self.reconsume(tok);
                    return Ok(Some(Item::AtRule {
                        name,
                        prelude: trim_whitespace(prelude),
                        block: None,
                    }));
                }
                TokenKind::LeftBrace => {
                    let block = self.consume_simple_block(BlockKind::Brace, tok.span)?;
                    return Ok(Some(Item::AtRule {
                        name,
                        prelude: trim_whitespace(prelude),
                        block: Some(block),
                    }));
                }
                _ => {
                    self.reconsume(tok);
                    prelude.push(self.consume_component_value()?);
                }
            }
        }
    }

    /// Consume a qualified rule, or a mixin call or definition if an
    /// argument list opens while the prelude still looks like a mixin
    /// selector.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule
    fn consume_qualified_rule(&mut self) -> LessResult<Option<Item>> {
        let mut prelude: Vec<ComponentValue> = Vec::new();
        loop {
            let tok = self.next_token();
            match tok.kind {
                TokenKind::EndOfInput | TokenKind::Semicolon => {
                    self.error("expected \"{\"", tok.span);
                    return Ok(None);
                }
                TokenKind::RightBrace => {
                    // consume the brace so the caller does not see it again
                    self.error("expected \"{\"", tok.span);
                    return Ok(None);
                }
                TokenKind::LeftBrace => {
                    let block = self.consume_simple_block(BlockKind::Brace, tok.span)?;
                    return Ok(Some(Item::QualifiedRule {
                        prelude: trim_whitespace(prelude),
                        block,
                    }));
                }
                // `#ns(` reaches us as a hash followed by a parenthesis...
                TokenKind::LeftParen if prelude_is_mixin_shape(&prelude) => {
                    return self.consume_mixin(trim_whitespace(prelude), tok.span);
                }
                // ...but `.mixin(` arrives as a single function token, since
                // an identifier directly followed by `(` tokenizes as one
                TokenKind::Function(name) if prelude_is_mixin_prefix(&prelude) => {
                    prelude.push(ComponentValue::Token(Token {
                        kind: TokenKind::Ident(name),
                        span: tok.span,
                    }));
                    return self.consume_mixin(trim_whitespace(prelude), tok.span);
                }
                _ => {
                    self.reconsume(tok);
                    prelude.push(self.consume_component_value()?);
                }
            }
        }
    }
}
