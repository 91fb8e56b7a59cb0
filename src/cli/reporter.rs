//! Terminal output for diagnostics.

use std::io::{self, IsTerminal};

use cero_core::lang::messages::MessageLevel;
use cero_syntax::diagnostics::{CodeLocation, Reporter};

/// Reporter that prints each diagnostic to stderr as it arrives and counts them by level.
#[derive(Debug)]
pub struct ConsoleReporter {
    color: bool,
    errors: usize,
    warnings: usize,
}

impl ConsoleReporter {
    /// Colors are used only when stderr is a terminal.
    pub fn new() -> Self {
        Self::with_color(io::stderr().is_terminal())
    }

    pub fn with_color(color: bool) -> Self {
        Self {
            color,
            errors: 0,
            warnings: 0,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn handle_report(&mut self, location: &CodeLocation, level: MessageLevel, text: String) {
        match level {
            MessageLevel::Error => self.errors += 1,
            MessageLevel::Warning => self.warnings += 1,
            MessageLevel::Help | MessageLevel::Note => {}
        }
        eprint!("{}", render(location, level, &text, self.color));
    }
}

/// Format one diagnostic: a `level: text` header, then an arrow to the location.
///
/// Whole-file locations (line 0) print the path alone.
pub fn render(location: &CodeLocation, level: MessageLevel, text: &str, color: bool) -> String {
    let (bold, level_color, cyan, reset) = if color {
        let level_color = match level {
            MessageLevel::Error => "\x1b[31m",
            MessageLevel::Warning => "\x1b[33m",
            MessageLevel::Help | MessageLevel::Note => "\x1b[36m",
        };
        ("\x1b[1m", level_color, "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "", "")
    };

    let place = if location.line == 0 {
        location.path.clone()
    } else {
        location.to_string()
    };

    format!("{bold}{level_color}{level}{reset}{bold}: {text}{reset}\n  {cyan}-->{reset} {place}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let location = CodeLocation::new("main.ce", 3, 7);
        assert_eq!(
            render(&location, MessageLevel::Error, "expected a `;`, but found `}`", false),
            "error: expected a `;`, but found `}`\n  --> main.ce:3:7\n"
        );
    }

    #[test]
    fn test_render_whole_file() {
        let location = CodeLocation::whole_file("gone.ce");
        assert_eq!(
            render(&location, MessageLevel::Error, "file not found", false),
            "error: file not found\n  --> gone.ce\n"
        );
    }

    #[test]
    fn test_render_colored_warning() {
        let location = CodeLocation::new("a.ce", 1, 1);
        let out = render(&location, MessageLevel::Warning, "block comment must be closed with `*/`", true);
        assert!(out.starts_with("\x1b[1m\x1b[33mwarning\x1b[0m"));
        assert!(out.contains("\x1b[36m-->\x1b[0m a.ce:1:1"));
    }

    #[test]
    fn test_counts_by_level() {
        let mut reporter = ConsoleReporter::with_color(false);
        let location = CodeLocation::new("a.ce", 1, 1);
        reporter.handle_report(&location, MessageLevel::Warning, "w".to_string());
        reporter.handle_report(&location, MessageLevel::Error, "e".to_string());
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.warning_count(), 1);
        assert!(reporter.has_errors());
    }
}
