use std::fmt;

use crate::interner::InternedString;

/// An interned identifier.
///
/// Used for every name the AST retains: at-keywords, declaration and
/// variable names, function names, and namespace-lookup keys. Unlike
/// CSS custom properties, LESS identifiers are case sensitive and are
/// interned verbatim.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(InternedString);

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identifier").field(&self.resolve()).finish()
    }
}

impl Identifier {
    /// The identifier's text, resolved out of the interner.
    pub fn resolve(self) -> String {
        self.0.resolve()
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Identifier {
        Identifier(InternedString::get_or_intern(s))
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Identifier {
        Identifier(InternedString::get_or_intern(s))
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0.equals_str(other)
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0.equals_str(other)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
