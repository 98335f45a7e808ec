use std::error::Error;
use std::fmt::{self, Display};
use std::io;

use codemap::{CodeMap, Span, SpanLoc};

/// The result type used throughout the parser.
///
/// Errors are boxed as they are large and the happy path is overwhelmingly
/// more common.
pub type LessResult<T> = Result<T, Box<LessError>>;

/// A fatal error
///
/// Almost nothing the parser encounters is fatal: malformed input is
/// resolved into substitute tokens or discarded productions and surfaced
/// as [`Diagnostic`]s. `LessError` is reserved for the conditions that do
/// abort a parse, such as exceeding the configured nesting depth, and for
/// I/O failures at the rim.
#[derive(Debug)]
pub struct LessError {
    kind: LessErrorKind,
}

#[derive(Debug)]
enum LessErrorKind {
    /// A raw error containing only a message and a span, constructed deep
    /// inside the parser where no `CodeMap` is available to resolve it
    Raw(String, Span),
    ParseError {
        message: String,
        loc: SpanLoc,
    },
    IoError(io::Error),
    FmtError(fmt::Error),
}

impl LessError {
    pub(crate) fn raw(self) -> (String, Span) {
        match self.kind {
            LessErrorKind::Raw(string, span) => (string, span),
            _ => unreachable!("raw errors are resolved exactly once"),
        }
    }

    pub(crate) fn from_loc(message: String, loc: SpanLoc) -> Self {
        LessError {
            kind: LessErrorKind::ParseError { message, loc },
        }
    }
}

impl Display for LessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LessErrorKind::ParseError { message, loc } => {
                let line = loc.begin.line + 1;
                let col = loc.begin.column + 1;
                let padding = " ".repeat(format!("{}", line).len() + 1);
                writeln!(f, "Error: {}", message)?;
                writeln!(f, "{}|", padding)?;
                writeln!(f, "{} | {}", line, loc.file.source_line(loc.begin.line))?;
                writeln!(
                    f,
                    "{}| {}{}",
                    padding,
                    " ".repeat(loc.begin.column),
                    "^".repeat((loc.end.column.max(loc.begin.column + 1)) - loc.begin.column)
                )?;
                writeln!(f, "{}|", padding)?;
                writeln!(f, "./{}:{}:{}", loc.file.name(), line, col)?;
                Ok(())
            }
            LessErrorKind::IoError(err) => write!(f, "Error: {}", err),
            LessErrorKind::FmtError(err) => write!(f, "Error: {}", err),
            LessErrorKind::Raw(message, ..) => write!(f, "Error: {}", message),
        }
    }
}

impl From<io::Error> for Box<LessError> {
    #[inline]
    fn from(error: io::Error) -> Box<LessError> {
        Box::new(LessError {
            kind: LessErrorKind::IoError(error),
        })
    }
}

impl From<fmt::Error> for Box<LessError> {
    #[inline]
    fn from(error: fmt::Error) -> Box<LessError> {
        Box::new(LessError {
            kind: LessErrorKind::FmtError(error),
        })
    }
}

impl From<(&str, Span)> for Box<LessError> {
    #[inline]
    fn from(error: (&str, Span)) -> Box<LessError> {
        Box::new(LessError {
            kind: LessErrorKind::Raw(error.0.to_owned(), error.1),
        })
    }
}

impl From<(String, Span)> for Box<LessError> {
    #[inline]
    fn from(error: (String, Span)) -> Box<LessError> {
        Box::new(LessError {
            kind: LessErrorKind::Raw(error.0, error.1),
        })
    }
}

impl Error for LessError {
    fn description(&self) -> &str {
        "LESS parsing error"
    }
}

/// Which stage produced a diagnostic
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DiagnosticKind {
    /// A malformed token: an unterminated string, comment, or url
    Tokenize,
    /// A production whose required grammar was violated and which was
    /// discarded during error recovery
    Parse,
}

/// A non-fatal parse error
///
/// Diagnostics are collected on a side channel and returned alongside the
/// AST; they never abort the parse.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub loc: SpanLoc,
}

/// A diagnostic whose span has not yet been resolved against a `CodeMap`.
#[derive(Clone, Debug)]
pub(crate) struct RawDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
}

impl RawDiagnostic {
    pub fn resolve(self, map: &CodeMap) -> Diagnostic {
        Diagnostic {
            kind: self.kind,
            message: self.message,
            loc: map.look_up_span(self.span),
        }
    }
}
