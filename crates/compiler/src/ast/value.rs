use crate::{
    common::Identifier,
    lexer::{Token, TokenKind},
};

/// The bracket kind of a simple block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BlockKind {
    Paren,
    Bracket,
    Brace,
}

impl BlockKind {
    pub const fn close(self) -> char {
        match self {
            BlockKind::Paren => ')',
            BlockKind::Bracket => ']',
            BlockKind::Brace => '}',
        }
    }

    /// Whether `kind` is the closing token matching this bracket.
    pub(crate) fn is_closed_by(self, kind: &TokenKind) -> bool {
        matches!(
            (self, kind),
            (BlockKind::Paren, TokenKind::RightParen)
                | (BlockKind::Bracket, TokenKind::RightBracket)
                | (BlockKind::Brace, TokenKind::RightBrace)
        )
    }
}

/// The atomic unit of unstructured values and preludes.
///
/// Values and preludes are deliberately left unparsed at this stage; a
/// later stage re-parses them against value-specific grammars.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentValue {
    Token(Token),
    Block(SimpleBlock),
    FunctionCall(FunctionCall),
}

impl ComponentValue {
    /// The token kind, if this value is a plain token.
    pub fn as_token(&self) -> Option<&TokenKind> {
        match self {
            ComponentValue::Token(tok) => Some(&tok.kind),
            _ => None,
        }
    }

    /// Whether this value is a whitespace token.
    pub fn is_whitespace(&self) -> bool {
        matches!(self.as_token(), Some(TokenKind::Whitespace))
    }
}

/// An opening bracket, its contained component values, and the matching
/// closing bracket.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleBlock {
    pub kind: BlockKind,
    pub values: Vec<ComponentValue>,
}

/// A function token and its argument component values, terminated by `)`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub name: Identifier,
    pub arguments: Vec<ComponentValue>,
}
