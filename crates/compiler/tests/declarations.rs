#![cfg(test)]

use moss_compiler::{Item, Options, TokenKind};


macro_rules! declarations {
    ($input:expr) => {{
        let output = moss_compiler::parse_declarations(
            String::from($input),
            &Options::default().quiet(true),
        )
        .unwrap_or_else(|e| panic!("failed to parse on {:?}: {}", $input, e));
        (output.stylesheet.items, output.diagnostics)
    }};
}

#[test]
fn basic_declaration_list() {
    let (items, diagnostics) = declarations!("color: red; width: 10px");
    assert!(diagnostics.is_empty());
    assert_eq!(items.len(), 2);
    match &items[0] {
        Item::Declaration {
            name,
            value,
            important,
        } => {
            assert_eq!(*name, "color");
            assert_eq!(value.len(), 1);
            assert!(!important);
        }
        item => panic!("expected declaration, got {:?}", item),
    }
}

#[test]
fn important_is_stripped_from_the_value() {
    let (items, _) = declarations!("color: red !important;");
    match &items[0] {
        Item::Declaration {
            value, important, ..
        } => {
            assert!(*important);
            assert_eq!(value.len(), 1);
            assert!(matches!(
                value[0].as_token(),
                Some(TokenKind::Ident(word)) if word == "red"
            ));
        }
        item => panic!("expected declaration, got {:?}", item),
    }
}

#[test]
fn important_with_interior_whitespace_and_case() {
    let (items, _) = declarations!("color: red ! IMPORTANT;");
    assert!(matches!(
        &items[0],
        Item::Declaration {
            important: true,
            ..
        }
    ));
}

#[test]
fn bang_alone_is_not_important() {
    let (items, _) = declarations!("content: \"!\" important;");
    assert!(matches!(
        &items[0],
        Item::Declaration {
            important: false,
            ..
        }
    ));
}

#[test]
fn variable_declaration_in_declaration_list() {
    let (items, diagnostics) = declarations!("@width: 10px; width: @width;");
    assert!(diagnostics.is_empty());
    assert_eq!(items.len(), 2);
    assert!(matches!(&items[0], Item::VariableDeclaration { .. }));
    assert!(matches!(&items[1], Item::Declaration { .. }));
}

#[test]
fn nested_at_rule_in_declaration_list() {
    let (items, diagnostics) = declarations!("color: red; @media screen { color: blue; }");
    assert!(diagnostics.is_empty());
    assert_eq!(items.len(), 2);
    assert!(matches!(&items[1], Item::AtRule { block: Some(..), .. }));
}

#[test]
fn empty_declarations_are_skipped() {
    let (items, diagnostics) = declarations!(";; color: red ;;");
    assert!(diagnostics.is_empty());
    assert_eq!(items.len(), 1);
}

#[test]
fn missing_colon_recovers_at_the_next_declaration() {
    let (items, diagnostics) = declarations!("color red; width: 10px");
    assert_eq!(items.len(), 1);
    assert!(matches!(
        &items[0],
        Item::Declaration { name, .. } if *name == "width"
    ));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "expected \":\"");
}

#[test]
fn unexpected_token_recovers_at_the_next_declaration() {
    let (items, diagnostics) = declarations!("4px; color: red");
    assert_eq!(items.len(), 1);
    assert_eq!(diagnostics[0].message, "expected a declaration");
}

#[test]
fn stray_close_brace_is_consumed() {
    let (items, diagnostics) = declarations!("} color: red;");
    assert_eq!(items.len(), 1);
    assert!(matches!(&items[0], Item::Declaration { .. }));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "unexpected \"}\"");
}

#[test]
fn missing_colon_before_close_brace() {
    let (items, diagnostics) = declarations!("color }");
    assert!(items.is_empty());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].message, "expected \":\"");
    assert_eq!(diagnostics[1].message, "unexpected \"}\"");
}

#[test]
fn custom_property_like_value_keeps_its_tokens() {
    let (items, _) = declarations!("grid-template: \"a b\" 1fr / auto;");
    match &items[0] {
        Item::Declaration { value, .. } => {
            assert!(value
                .iter()
                .any(|v| matches!(v.as_token(), Some(TokenKind::String(..)))));
            assert!(value
                .iter()
                .any(|v| matches!(v.as_token(), Some(TokenKind::Delim('/')))));
        }
        item => panic!("expected declaration, got {:?}", item),
    }
}
