#![cfg(test)]

use moss_compiler::{ComponentValue, Item, Lookup, TokenKind};


fn mixin_call(input: &'static str) -> (Vec<ComponentValue>, Vec<Vec<ComponentValue>>) {
    match items!(input).remove(0) {
        Item::MixinCall { prelude, arguments } => (prelude, arguments),
        item => panic!("expected mixin call, got {:?}", item),
    }
}

#[test]
fn mixin_call_without_arguments() {
    let (prelude, arguments) = mixin_call(".mixin();");
    assert_eq!(prelude.len(), 2);
    assert!(matches!(
        prelude[0].as_token(),
        Some(TokenKind::Delim('.'))
    ));
    assert!(matches!(
        prelude[1].as_token(),
        Some(TokenKind::Ident(name)) if name == "mixin"
    ));
    assert!(arguments.is_empty());
}

#[test]
fn mixin_call_with_comma_separated_arguments() {
    let (_, arguments) = mixin_call(".mixin(1, 2);");
    assert_eq!(arguments.len(), 2);
    assert!(matches!(
        arguments[0][0].as_token(),
        Some(TokenKind::Number { value, .. }) if *value == 1.0
    ));
    assert!(matches!(
        arguments[1][0].as_token(),
        Some(TokenKind::Number { value, .. }) if *value == 2.0
    ));
}

#[test]
fn semicolon_promotes_argument_separator() {
    // the first argument keeps its interior comma
    let (_, arguments) = mixin_call(".mixin(red, green; 2px);");
    assert_eq!(arguments.len(), 2);
    assert!(arguments[0]
        .iter()
        .any(|value| matches!(value.as_token(), Some(TokenKind::Comma))));
    assert!(matches!(
        arguments[1][0].as_token(),
        Some(TokenKind::Dimension { unit, .. }) if unit == "px"
    ));
}

#[test]
fn trailing_separator_does_not_add_an_argument() {
    let (_, arguments) = mixin_call(".mixin(1, 2,);");
    assert_eq!(arguments.len(), 2);
}

#[test]
fn hash_led_mixin_call() {
    let (prelude, arguments) = mixin_call("#ns > .mixin(1);");
    assert!(matches!(
        prelude[0].as_token(),
        Some(TokenKind::Hash { value, .. }) if value == "ns"
    ));
    assert_eq!(arguments.len(), 1);
}

#[test]
fn mixin_call_at_eof() {
    let (_, arguments) = mixin_call(".mixin(1)");
    assert_eq!(arguments.len(), 1);
}

#[test]
fn lookup_after_mixin_call() {
    let items = items!("#outer.inner(@x)[key];");
    match &items[0] {
        Item::NamespaceValue { value, lookups } => {
            assert!(matches!(**value, Item::MixinCall { .. }));
            assert_eq!(*lookups, vec![Lookup::Ident("key".into())]);
        }
        item => panic!("expected namespace lookup, got {:?}", item),
    }
}

#[test]
fn mixin_definition() {
    let items = items!(".bordered(@width) { border: solid @width; }");
    match &items[0] {
        Item::MixinDefinition {
            prelude,
            arguments,
            guard,
            block,
        } => {
            assert_eq!(prelude.len(), 2);
            assert_eq!(arguments.len(), 1);
            assert!(matches!(
                arguments[0][0].as_token(),
                Some(TokenKind::AtKeyword(name)) if name == "width"
            ));
            assert!(guard.is_none());
            assert!(!block.values.is_empty());
        }
        item => panic!("expected mixin definition, got {:?}", item),
    }
}

#[test]
fn guarded_mixin_definition() {
    let items = items!(".scaled(@f) when (@f > 0) { width: @f; }");
    match &items[0] {
        Item::MixinDefinition { guard, .. } => {
            let guard = guard.as_ref().expect("expected a guard");
            assert_eq!(guard.len(), 1);
            assert!(matches!(guard[0], ComponentValue::Block(..)));
        }
        item => panic!("expected mixin definition, got {:?}", item),
    }
}

#[test]
fn guard_with_multiple_conditions() {
    let items = items!(".m(@a) when (@a > 0) and (@a < 10) { }");
    match &items[0] {
        Item::MixinDefinition { guard, .. } => {
            let guard = guard.as_ref().expect("expected a guard");
            // two parenthesized conditions joined by `and`
            assert_eq!(
                guard
                    .iter()
                    .filter(|value| matches!(value, ComponentValue::Block(..)))
                    .count(),
                2
            );
        }
        item => panic!("expected mixin definition, got {:?}", item),
    }
}

#[test]
fn selector_with_pseudo_class_is_not_a_mixin() {
    // `(` after a non-mixin prelude stays part of the selector
    let items = items!("a:not(.b) { }");
    assert!(matches!(&items[0], Item::QualifiedRule { .. }));
}

#[test]
fn guard_without_block_is_discarded() {
    let (items, messages) = recovered!(".m(@a) when (@a > 0); .ok() {}");
    assert_eq!(items.len(), 1);
    assert!(matches!(&items[0], Item::MixinDefinition { .. }));
    assert_eq!(messages, vec!["expected \"{\" after mixin guard"]);
}

#[test]
fn unclosed_argument_list() {
    let (items, messages) = recovered!(".mixin(1");
    assert_eq!(items.len(), 1);
    assert!(matches!(&items[0], Item::MixinCall { .. }));
    assert_eq!(messages, vec!["expected \")\""]);
}
