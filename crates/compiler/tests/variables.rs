#![cfg(test)]

use moss_compiler::{Item, Lookup, TokenKind};


#[test]
fn basic_variable_declaration() {
    let items = items!("@width: 10px;");
    assert_eq!(items.len(), 1);
    match &items[0] {
        Item::VariableDeclaration { name, value } => {
            assert_eq!(*name, "width");
            assert_eq!(value.len(), 1);
            assert!(matches!(
                value[0].as_token(),
                Some(TokenKind::Dimension {
                    value,
                    is_integer: true,
                    unit,
                }) if *value == 10.0 && unit == "px"
            ));
        }
        item => panic!("expected variable declaration, got {:?}", item),
    }
}

#[test]
fn variable_value_is_left_unparsed() {
    let items = items!("@transition: color 0.3s ease-in-out;");
    match &items[0] {
        Item::VariableDeclaration { name, value } => {
            assert_eq!(*name, "transition");
            // tokens are kept raw, whitespace intact, ends trimmed
            assert_eq!(value.len(), 5);
            assert!(matches!(
                value[0].as_token(),
                Some(TokenKind::Ident(word)) if word == "color"
            ));
            assert!(value[1].is_whitespace());
            assert!(!value[4].is_whitespace());
        }
        item => panic!("expected variable declaration, got {:?}", item),
    }
}

#[test]
fn variable_declaration_whitespace_around_colon() {
    let items = items!("@a : 1 ;");
    match &items[0] {
        Item::VariableDeclaration { name, value } => {
            assert_eq!(*name, "a");
            assert_eq!(value.len(), 1);
        }
        item => panic!("expected variable declaration, got {:?}", item),
    }
}

#[test]
fn variable_declaration_ends_at_eof() {
    let items = items!("@a: 1");
    assert_eq!(items.len(), 1);
    assert!(matches!(&items[0], Item::VariableDeclaration { .. }));
}

#[test]
fn variable_call() {
    let items = items!("@detached();");
    assert_eq!(
        items,
        vec![Item::VariableCall {
            name: "detached".into(),
        }]
    );
}

#[test]
fn variable_call_at_eof() {
    let items = items!("@detached()");
    assert_eq!(
        items,
        vec![Item::VariableCall {
            name: "detached".into(),
        }]
    );
}

#[test]
fn basic_namespace_lookup() {
    let items = items!("@config[width];");
    assert_eq!(
        items,
        vec![Item::NamespaceValue {
            value: Box::new(Item::VariableCall {
                name: "config".into(),
            }),
            lookups: vec![Lookup::Ident("width".into())],
        }]
    );
}

#[test]
fn all_lookup_forms() {
    let lookup = |input: &'static str| match items!(input).remove(0) {
        Item::NamespaceValue { mut lookups, .. } => lookups.remove(0),
        item => panic!("expected namespace lookup, got {:?}", item),
    };

    assert_eq!(lookup("@c[];"), Lookup::Last);
    assert_eq!(lookup("@c[key];"), Lookup::Ident("key".into()));
    assert_eq!(lookup("@c[@v];"), Lookup::Variable("v".into()));
    assert_eq!(lookup("@c[$p];"), Lookup::Property("p".into()));
    assert_eq!(lookup("@c[@@v];"), Lookup::VariableVariable("v".into()));
    assert_eq!(lookup("@c[$@p];"), Lookup::PropertyVariable("p".into()));
}

#[test]
fn chained_lookups() {
    let items = items!("@outer[inner][@leaf];");
    match &items[0] {
        Item::NamespaceValue { lookups, .. } => {
            assert_eq!(
                *lookups,
                vec![Lookup::Ident("inner".into()), Lookup::Variable("leaf".into())]
            );
        }
        item => panic!("expected namespace lookup, got {:?}", item),
    }
}

#[test]
fn whitespace_inside_lookup_brackets() {
    let items = items!("@c[ key ];");
    match &items[0] {
        Item::NamespaceValue { lookups, .. } => {
            assert_eq!(*lookups, vec![Lookup::Ident("key".into())]);
        }
        item => panic!("expected namespace lookup, got {:?}", item),
    }
}

#[test]
fn whitespace_between_chained_lookups() {
    let items = items!("@outer[a] [b];");
    match &items[0] {
        Item::NamespaceValue { lookups, .. } => {
            assert_eq!(
                *lookups,
                vec![Lookup::Ident("a".into()), Lookup::Ident("b".into())]
            );
        }
        item => panic!("expected namespace lookup, got {:?}", item),
    }
}

#[test]
fn whitespace_before_lookup_brackets() {
    let items = items!("@detached() [last];");
    assert_eq!(
        items,
        vec![Item::NamespaceValue {
            value: Box::new(Item::VariableCall {
                name: "detached".into(),
            }),
            lookups: vec![Lookup::Ident("last".into())],
        }]
    );
}

#[test]
fn lookup_after_variable_call() {
    let items = items!("@detached()[last];");
    assert_eq!(
        items,
        vec![Item::NamespaceValue {
            value: Box::new(Item::VariableCall {
                name: "detached".into(),
            }),
            lookups: vec![Lookup::Ident("last".into())],
        }]
    );
}

#[test]
fn lone_variable_is_discarded() {
    let (items, messages) = recovered!("@foo;");
    assert!(items.is_empty());
    assert_eq!(messages, vec!["expected \":\" after @foo"]);
}

#[test]
fn parsing_continues_after_discarded_variable() {
    let (items, _) = recovered!("@foo; @bar: 1;");
    assert_eq!(items.len(), 1);
    assert!(matches!(
        &items[0],
        Item::VariableDeclaration { name, .. } if *name == "bar"
    ));
}

#[test]
fn malformed_lookup_is_discarded() {
    let (items, messages) = recovered!("@c[1px]; @ok: 1;");
    assert_eq!(items.len(), 1);
    assert!(matches!(&items[0], Item::VariableDeclaration { .. }));
    assert_eq!(messages, vec!["invalid lookup"]);
}

#[test]
fn unclosed_lookup_is_discarded() {
    let (items, messages) = recovered!("@c[key 1px; @ok: 1;");
    assert_eq!(items.len(), 1);
    assert!(messages.contains(&"expected \"]\"".to_owned()));
}

#[test]
fn missing_semicolon_after_variable_call() {
    let (items, messages) = recovered!("@a() @b();");
    assert!(items.is_empty());
    assert_eq!(messages, vec!["expected \";\""]);
}
