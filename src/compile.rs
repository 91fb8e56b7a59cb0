//! Build driver for a single source file.
//!
//! Sequences the front end: lock the source, lex it, parse the tokens. Every problem, including a file that cannot be
//! opened, goes to the caller's [`Reporter`]; nothing here fails with an error value.
//!
//! ## Examples
//! ```rust
//! use cero::compile::{BuildConfig, build_source_with_config};
//! use cero_syntax::diagnostics::CollectingReporter;
//! use cero_syntax::source::Source;
//!
//! let source = Source::from_string("main() {\n\treturn 0;\n}\n", "main.ce");
//! let mut reporter = CollectingReporter::new();
//! let summary = build_source_with_config(&source, &mut reporter, &BuildConfig::default().with_tab_size(8));
//! assert_eq!(summary.map(|s| s.definitions), Some(1));
//! assert!(!reporter.has_errors());
//! ```

use cero_core::lang::messages::{Message, MessageArgs};
use cero_syntax::diagnostics::{CodeLocation, Reporter};
use cero_syntax::lexer::{self, LexerFlags};
use cero_syntax::parser;
use cero_syntax::source::{DEFAULT_TAB_SIZE, Source, SourceError, SourceView};

/// Options for one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// Tab width used for the columns of reported locations.
    pub tab_size: u8,
    pub lexer_flags: LexerFlags,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            lexer_flags: LexerFlags::NONE,
        }
    }
}

impl BuildConfig {
    pub fn with_tab_size(mut self, tab_size: u8) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_emit_comments(mut self, emit_comments: bool) -> Self {
        self.lexer_flags = self.lexer_flags.with_emit_comments(emit_comments);
        self
    }
}

/// What a successful lock-lex-parse run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// Tokens lexed, including the end-of-file token.
    pub tokens: usize,
    /// Top-level definitions the parser kept.
    pub definitions: usize,
}

/// Lock `source`, reporting `file_not_found` or `could_not_open_file` against the whole file if that fails.
pub fn lock_source<'a>(source: &Source<'a>, reporter: &mut dyn Reporter) -> Option<SourceView<'a>> {
    match source.lock() {
        Ok(view) => Some(view),
        Err(err) => {
            let location = CodeLocation::whole_file(source.path());
            match err {
                SourceError::NotFound { .. } => {
                    reporter.report(&location, Message::FileNotFound, MessageArgs::none());
                }
                SourceError::Open { source: io_err, .. } => {
                    reporter.report(&location, Message::CouldNotOpenFile, MessageArgs::from(io_err.to_string()));
                }
            }
            None
        }
    }
}

/// Build `source` with the default configuration.
pub fn build_source(source: &Source<'_>, reporter: &mut dyn Reporter) -> Option<BuildSummary> {
    build_source_with_config(source, reporter, &BuildConfig::default())
}

/// Lex and parse `source`, reporting every diagnostic to `reporter`.
///
/// Returns `None` only if the source could not be opened. Syntax errors still produce a summary.
#[tracing::instrument(skip_all, fields(path = source.path()))]
pub fn build_source_with_config(
    source: &Source<'_>,
    reporter: &mut dyn Reporter,
    config: &BuildConfig,
) -> Option<BuildSummary> {
    let view = lock_source(source, reporter)?;
    let tokens = lexer::run_lexer(&view, reporter, config.lexer_flags, config.tab_size);
    let ast = parser::run_parser(&tokens, &view, reporter, config.tab_size);

    // Semantic analysis is not part of the front end yet; the tree is only counted.
    let summary = BuildSummary {
        tokens: tokens.len(),
        definitions: ast.definitions().len(),
    };
    tracing::debug!(definitions = summary.definitions, tokens = summary.tokens, "built source");
    Some(summary)
}
