/*!
This crate provides the front end of a [LESS](https://lesscss.org/) compiler:
a CSS Syntax Level 3 tokenizer and an error-tolerant recursive-descent
parser, extended with the LESS grammar for variables, namespace lookups,
and mixins.

Malformed input never aborts a parse. The offending construct is
discarded, a diagnostic is recorded alongside the AST, and parsing
resumes at the next statement boundary.

## Use as library
```
fn main() -> Result<(), Box<moss::Error>> {
    let output = moss::parse(
        "@width: 10px; .box { width: @width; }".to_owned(),
        &moss::Options::default(),
    )?;
    assert_eq!(output.stylesheet.items.len(), 2);
    Ok(())
}
```

## Use as binary
```bash
cargo install moss
moss input.less
```
*/

#![warn(clippy::all, clippy::cargo, clippy::dbg_macro)]
#![deny(missing_debug_implementations)]
#![allow(clippy::use_self, clippy::module_name_repetitions)]

pub use moss_compiler::*;
