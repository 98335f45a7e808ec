use crate::{Logger, StdLogger};

pub(crate) const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Configuration for parsing
///
/// The simplest usage is `moss_compiler::Options::default()`; however, a
/// builder pattern is also exposed to offer more control.
#[derive(Debug)]
pub struct Options<'a> {
    pub(crate) logger: &'a dyn Logger,
    pub(crate) quiet: bool,
    pub(crate) max_nesting_depth: usize,
}

impl Default for Options<'_> {
    #[inline]
    fn default() -> Self {
        Self {
            logger: &StdLogger,
            quiet: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl<'a> Options<'a> {
    /// This option allows you to define how parse diagnostics should be handled
    ///
    /// By default, [`StdLogger`] is used, which writes all events to standard error.
    #[must_use]
    #[inline]
    pub fn logger(mut self, logger: &'a dyn Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Whether to silence diagnostics
    ///
    /// When set to `true`, diagnostics are still collected and returned
    /// alongside the AST, but are no longer forwarded to the logger.
    ///
    /// By default, this value is `false`.
    #[must_use]
    #[inline]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// The maximum bracket-nesting depth the parser will recurse into
    ///
    /// Recursion depth is bounded by the bracket nesting of the source, so
    /// this limit guards against adversarial input. Exceeding it aborts the
    /// parse with an error.
    ///
    /// By default, this value is `512`.
    #[must_use]
    #[inline]
    pub const fn max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}
