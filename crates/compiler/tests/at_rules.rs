#![cfg(test)]

use moss_compiler::{BlockKind, ComponentValue, Item, TokenKind};


#[test]
fn at_rule_with_prelude_and_block() {
    let items = items!("@media screen { a { color: red; } }");
    assert_eq!(items.len(), 1);
    match &items[0] {
        Item::AtRule {
            name,
            prelude,
            block,
        } => {
            assert_eq!(*name, "media");
            assert_eq!(prelude.len(), 1);
            assert!(matches!(
                prelude[0].as_token(),
                Some(TokenKind::Ident(word)) if word == "screen"
            ));
            assert!(block.is_some());
        }
        item => panic!("expected at-rule, got {:?}", item),
    }
}

#[test]
fn at_rule_prelude_opening_with_parenthesis() {
    // a `(` that does not complete `()` is an ordinary prelude block,
    // not a variable call
    let items = items!("@media (min-width: 100px) { }");
    match &items[0] {
        Item::AtRule {
            name,
            prelude,
            block,
        } => {
            assert_eq!(*name, "media");
            match &prelude[0] {
                ComponentValue::Block(inner) => {
                    assert_eq!(inner.kind, BlockKind::Paren);
                    assert!(!inner.values.is_empty());
                }
                value => panic!("expected a parenthesized block, got {:?}", value),
            }
            assert!(block.is_some());
        }
        item => panic!("expected at-rule, got {:?}", item),
    }
}

#[test]
fn at_rule_without_block() {
    let items = items!("@import \"library.less\";");
    match &items[0] {
        Item::AtRule {
            name,
            prelude,
            block,
        } => {
            assert_eq!(*name, "import");
            assert!(matches!(
                prelude[0].as_token(),
                Some(TokenKind::String(path)) if path == "library.less"
            ));
            assert!(block.is_none());
        }
        item => panic!("expected at-rule, got {:?}", item),
    }
}

#[test]
fn at_rule_terminated_by_eof() {
    let items = items!("@charset \"utf-8\"");
    assert!(matches!(
        &items[0],
        Item::AtRule { block: None, .. }
    ));
}

#[test]
fn at_rule_prelude_with_function() {
    let items = items!("@supports selector(a > b) { }");
    match &items[0] {
        Item::AtRule { prelude, .. } => {
            assert!(prelude
                .iter()
                .any(|value| matches!(value, ComponentValue::FunctionCall(..))));
        }
        item => panic!("expected at-rule, got {:?}", item),
    }
}

#[test]
fn cdo_and_cdc_are_skipped_at_top_level() {
    let items = items!("<!-- @a: 1; -->");
    assert_eq!(items.len(), 1);
    assert!(matches!(&items[0], Item::VariableDeclaration { .. }));
}

#[test]
fn unclosed_at_rule_block() {
    let (items, messages) = recovered!("@media screen { a { } ");
    assert_eq!(items.len(), 1);
    assert!(matches!(&items[0], Item::AtRule { block: Some(..), .. }));
    assert_eq!(messages, vec!["expected \"}\""]);
}
