/*!
This crate provides the front end of a LESS compiler: a CSS Syntax
Level 3 tokenizer extended with the LESS grammar, and an error-tolerant
recursive-descent parser producing an AST of rules, declarations,
variables, and mixins.

Parsing never fails on malformed input. Errors are resolved locally,
the offending construct is discarded, and a [`Diagnostic`] is recorded;
the only fatal error is exceeding the configured nesting depth. Values
and preludes are left as raw component values for later stages to
interpret.

```rust
fn main() -> Result<(), Box<moss_compiler::Error>> {
    let output = moss_compiler::parse(
        "@width: 10px; .box { width: @width; }".to_owned(),
        &moss_compiler::Options::default(),
    )?;
    assert_eq!(output.stylesheet.items.len(), 2);
    assert!(output.diagnostics.is_empty());
    Ok(())
}
```
*/

#![warn(clippy::all, clippy::cargo)]
#![deny(missing_debug_implementations)]
#![allow(
    clippy::use_self,
    clippy::module_name_repetitions,
    clippy::single_match,
    clippy::wildcard_imports,
    clippy::too_many_lines
)]

use std::path::Path;
use std::sync::Arc;

use codemap::CodeMap;

pub use crate::{
    ast::*,
    common::Identifier,
    error::{Diagnostic, DiagnosticKind, LessError as Error, LessResult as Result},
    lexer::{Token, TokenKind},
    logger::{Logger, NullLogger, StdLogger},
    options::Options,
};
use crate::{
    error::{LessError, LessResult, RawDiagnostic},
    lexer::Tokenizer,
    parse::Parser,
};

mod ast;
mod common;
mod error;
mod interner;
mod lexer;
mod logger;
mod options;
mod parse;
mod utils;

/// The result of a successful parse: the best-effort AST together with
/// the diagnostics recorded along the way.
#[derive(Debug)]
pub struct ParseOutput {
    pub stylesheet: StyleSheet,
    pub diagnostics: Vec<Diagnostic>,
}

fn raw_to_parse_error(map: &CodeMap, err: LessError) -> Box<LessError> {
    let (message, span) = err.raw();
    Box::new(LessError::from_loc(message, map.look_up_span(span)))
}

fn resolve_output(
    map: &CodeMap,
    stylesheet: StyleSheet,
    raw: Vec<RawDiagnostic>,
    options: &Options,
) -> ParseOutput {
    let mut diagnostics = Vec::with_capacity(raw.len());
    for diagnostic in raw {
        if !options.quiet {
            options
                .logger
                .warning(map.look_up_span(diagnostic.span), &diagnostic.message);
        }
        diagnostics.push(diagnostic.resolve(map));
    }
    ParseOutput {
        stylesheet,
        diagnostics,
    }
}

/// Parse a stylesheet from a string
///
/// Diagnostics reference the file name `stdin`; use
/// [`parse_with_file_name`] to attribute them to a real path.
#[inline]
pub fn parse(input: String, options: &Options) -> LessResult<ParseOutput> {
    parse_with_file_name(input, "stdin", options)
}

/// Parse a stylesheet from a string, attributing diagnostics to
/// `file_name`
pub fn parse_with_file_name<P: AsRef<Path>>(
    input: String,
    file_name: P,
    options: &Options,
) -> LessResult<ParseOutput> {
    let mut map = CodeMap::new();
    let file: Arc<codemap::File> =
        map.add_file(file_name.as_ref().to_string_lossy().into_owned(), input);
    let tokenizer = Tokenizer::new_from_file(&file);

    let (stylesheet, raw) = Parser::new(tokenizer, options)
        .__parse()
        .map_err(|e| raw_to_parse_error(&map, *e))?;

    Ok(resolve_output(&map, stylesheet, raw, options))
}

/// Parse the contents of a style rule: a list of declarations,
/// variable declarations, and nested statements
///
/// This is the entry point for embedders handling fragments such as
/// HTML `style` attributes.
pub fn parse_declarations(input: String, options: &Options) -> LessResult<ParseOutput> {
    let mut map = CodeMap::new();
    let file: Arc<codemap::File> = map.add_file("stdin".to_owned(), input);
    let tokenizer = Tokenizer::new_from_file(&file);

    let (stylesheet, raw) = Parser::new(tokenizer, options)
        .__parse_declaration_list()
        .map_err(|e| raw_to_parse_error(&map, *e))?;

    Ok(resolve_output(&map, stylesheet, raw, options))
}
