use crate::{
    ast::{ComponentValue, Item},
    common::Identifier,
    error::LessResult,
    lexer::TokenKind,
    parse::Parser,
};

impl Parser<'_> {
    /// Consume a list of declarations, the grammar used inside style
    /// rules. At-keywords dispatch through the same LESS at-rule logic as
    /// the top level, so variable declarations and nested at-rules both
    /// work here.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations
    pub(super) fn parse_declaration_list(&mut self) -> LessResult<Vec<Item>> {
        let mut items = Vec::new();
        loop {
            let tok = self.next_token();
            match tok.kind {
                TokenKind::Whitespace | TokenKind::Semicolon => continue,
                TokenKind::EndOfInput => break,
                TokenKind::AtKeyword(name) => {
                    if let Some(item) = self.consume_less_at_rule(name.into(), tok.span)? {
                        items.push(item);
                    }
                }
                TokenKind::Ident(name) => {
                    if let Some(item) = self.consume_declaration(name.into())? {
                        items.push(item);
                    }
                }
                // stray closers are consumed here; `recover_statement`
                // leaves a `}` for its caller, so falling through to the
                // recovery arm below would see the same token forever
                TokenKind::RightParen => self.error("unexpected \")\"", tok.span),
                TokenKind::RightBracket => self.error("unexpected \"]\"", tok.span),
                TokenKind::RightBrace => self.error("unexpected \"}\"", tok.span),
                _ => {
                    self.error("expected a declaration", tok.span);
                    self.reconsume(tok);
                    self.recover_statement()?;
                }
            }
        }
        Ok(items)
    }

    /// Consume a declaration, with its name already consumed.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-declaration
    fn consume_declaration(&mut self, name: Identifier) -> LessResult<Option<Item>> {
        let tok = self.next_non_whitespace();
        if tok.kind != TokenKind::Colon {
            self.error("expected \":\"", tok.span);
            self.reconsume(tok);
            self.recover_statement()?;
            return Ok(None);
        }

        let mut value = self.consume_value_sequence()?;
        let important = strip_important(&mut value);

        Ok(Some(Item::Declaration {
            name,
            value,
            important,
        }))
    }
}

/// Detect and remove a trailing `!important` (with optional whitespace
/// between the `!` and the keyword). The keyword match is ASCII
/// case-insensitive.
fn strip_important(value: &mut Vec<ComponentValue>) -> bool {
    let last = match value.last().and_then(ComponentValue::as_token) {
        Some(TokenKind::Ident(word)) => word,
        _ => return false,
    };
    if !last.eq_ignore_ascii_case("important") {
        return false;
    }

    let mut bang = value.len() - 1;
    loop {
        if bang == 0 {
            return false;
        }
        bang -= 1;
        if !value[bang].is_whitespace() {
            break;
        }
    }
    if !matches!(value[bang].as_token(), Some(TokenKind::Delim('!'))) {
        return false;
    }

    value.truncate(bang);
    while value.last().map_or(false, ComponentValue::is_whitespace) {
        value.pop();
    }
    true
}
