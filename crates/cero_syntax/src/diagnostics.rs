//! Diagnostic locations and reporters.
//!
//! The lexer and parser never print anything themselves. They hand each diagnostic to a [`Reporter`] along with the
//! [`CodeLocation`] it refers to. Reporters decide what to do with it: the CLI prints it, tests collect it.

use std::fmt;

use cero_core::lang::messages::{self, Message, MessageArgs, MessageLevel};

/// A location in Cero source code.
///
/// Diagnostics about a whole file (for example a file that cannot be opened) use line 0 and column 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeLocation {
    pub path: String,
    pub line: u32,
    pub column: u32,
}

impl CodeLocation {
    pub fn new(path: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// Location referring to an entire file.
    pub fn whole_file(path: impl Into<String>) -> Self {
        Self::new(path, 0, 0)
    }

    /// Only line and column, as `[line:column]`.
    pub fn short(&self) -> String {
        format!("[{}:{}]", self.line, self.column)
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

/// Sink for diagnostics.
///
/// Implementors only provide [`Reporter::handle_report`]; [`Reporter::report`] formats the catalog message first.
pub trait Reporter {
    /// Receive an already formatted diagnostic.
    fn handle_report(&mut self, location: &CodeLocation, level: MessageLevel, text: String);

    /// Format `message` with `args` and forward it at the message's default level.
    ///
    /// ## Panics
    /// Panics if the number of arguments does not match the message's placeholders. That is a bug in the caller.
    fn report(&mut self, location: &CodeLocation, message: Message, args: MessageArgs) {
        assert!(
            args.valid_for(message),
            "incorrect number of message arguments for {message:?}"
        );
        let text = messages::format_message(message, &args);
        self.handle_report(location, message.default_level(), text);
    }
}

/// A diagnostic as received by a reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: CodeLocation,
    pub level: MessageLevel,
    pub text: String,
}

impl Diagnostic {
    /// The diagnostic a reporter would receive for `message` at `location`.
    pub fn from_message(location: CodeLocation, message: Message, args: MessageArgs) -> Self {
        Self {
            location,
            level: message.default_level(),
            text: messages::format_message(message, &args),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.level, self.text)
    }
}

/// Reporter that keeps every diagnostic in arrival order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.level == MessageLevel::Error).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl Reporter for CollectingReporter {
    fn handle_report(&mut self, location: &CodeLocation, level: MessageLevel, text: String) {
        self.diagnostics.push(Diagnostic {
            location: location.clone(),
            level,
            text,
        });
    }
}
