//! Where failed queries report to.

/// A write-only channel for human-readable error messages.
///
/// Implementations must not panic.
pub trait DiagnosticSink {
    /// Reports one message.
    fn emit(&self, message: &str);
}

/// The default sink, which forwards every message to `log::error!`.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, message: &str) {
        error!("{}", message);
    }
}

impl<'a, S: DiagnosticSink + ?Sized> DiagnosticSink for &'a S {
    fn emit(&self, message: &str) {
        (**self).emit(message)
    }
}
