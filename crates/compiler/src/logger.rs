use codemap::SpanLoc;
use std::fmt::Debug;

/// Sink for log messages
pub trait Logger: Debug {
    /// Logs a non-fatal parse diagnostic
    fn warning(&self, location: SpanLoc, message: &str);
}

/// Logs events to standard error
#[derive(Debug)]
pub struct StdLogger;

impl Logger for StdLogger {
    #[inline]
    fn warning(&self, location: SpanLoc, message: &str) {
        eprintln!(
            "Warning: {}\n    ./{}:{}:{}",
            message,
            location.file.name(),
            location.begin.line + 1,
            location.begin.column + 1
        );
    }
}

/// Discards all log events
#[derive(Debug)]
pub struct NullLogger;

impl Logger for NullLogger {
    #[inline]
    fn warning(&self, _location: SpanLoc, _message: &str) {}
}
