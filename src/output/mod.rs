//! Console output for the install workflow
//!
//! This module provides:
//! - The [`Reporter`] seam used by the pipeline for user-facing messages
//! - A text reporter with colored severity markers
//! - Summary lines for installed packages

mod summary;
mod text;

pub use summary::{summary_lines, SummaryLine};
pub use text::{render_line, render_shell, TextReporter};

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// The marker printed before the message
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Info => "i) ",
            Severity::Warning | Severity::Error => "!) ",
        }
    }
}

/// Sink for user-facing messages
pub trait Reporter: Send + Sync {
    /// Report a message with the given severity
    fn report(&self, severity: Severity, message: &str);

    /// Echo a command line that is about to be spawned
    fn shell(&self, args: &[String]);

    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }
}
