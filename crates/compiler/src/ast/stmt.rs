use crate::{
    ast::{ComponentValue, SimpleBlock},
    common::Identifier,
};

/// The root of a parsed stylesheet: an ordered sequence of top-level
/// productions.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSheet {
    pub items: Vec<Item>,
}

/// A single production.
///
/// The error-tolerant grammar permits most production kinds at the top
/// level even though only rules and declarations are semantically
/// meaningful to later stages.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    /// Regular CSS at-rule.
    AtRule {
        name: Identifier,
        prelude: Vec<ComponentValue>,
        block: Option<SimpleBlock>,
    },
    /// Regular CSS qualified rule.
    QualifiedRule {
        prelude: Vec<ComponentValue>,
        block: SimpleBlock,
    },
    /// Regular CSS declaration.
    Declaration {
        name: Identifier,
        value: Vec<ComponentValue>,
        important: bool,
    },
    /// LESS variable declaration (e.g. `@width: 10px;`).
    VariableDeclaration {
        name: Identifier,
        value: Vec<ComponentValue>,
    },
    /// LESS variable call (e.g. `@ruleset();`). Takes no arguments.
    VariableCall { name: Identifier },
    /// LESS namespace lookup (e.g. `@config[width]` or `#lib.colors[@primary]`).
    ///
    /// Wraps a previously constructed variable or mixin call as its base.
    NamespaceValue {
        value: Box<Item>,
        lookups: Vec<Lookup>,
    },
    /// LESS mixin call statement (e.g. `.mixin(1, 2);`).
    MixinCall {
        prelude: Vec<ComponentValue>,
        arguments: Vec<Vec<ComponentValue>>,
    },
    /// LESS mixin declaration (e.g. `.mixin(@size) when (@size > 0) { ... }`).
    MixinDefinition {
        prelude: Vec<ComponentValue>,
        arguments: Vec<Vec<ComponentValue>>,
        guard: Option<Vec<ComponentValue>>,
        block: SimpleBlock,
    },
}

/// A single key in a namespace-lookup chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// `[]`, the last declared value
    Last,
    /// `[key]`
    Ident(Identifier),
    /// `[@variable]`
    Variable(Identifier),
    /// `[$property]`
    Property(Identifier),
    /// `[@@variable]`
    VariableVariable(Identifier),
    /// `[$@property]`
    PropertyVariable(Identifier),
}
