//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::{Path, PathBuf};

use cero_syntax::ast;
use cero_syntax::lexer::{self, TokenKind};
use cero_syntax::parser;
use cero_syntax::source::Source;

use super::reporter::ConsoleReporter;
use super::{CliError, CliResult, ExitCode};
use crate::compile::{BuildConfig, build_source_with_config, lock_source};

fn source_for(path: &Path) -> Source<'static> {
    Source::from_file(path.to_string_lossy())
}

/// Turn the reporter's error count into the command's outcome.
fn finish(reporter: &ConsoleReporter) -> CliResult<ExitCode> {
    match reporter.error_count() {
        0 => Ok(ExitCode::SUCCESS),
        1 => Err(CliError::failure("aborting due to 1 previous error")),
        n => Err(CliError::failure(format!("aborting due to {n} previous errors"))),
    }
}

// ============================================================================
// Build
// ============================================================================

/// Lex and parse every file, printing diagnostics as they are found.
///
/// All files are processed even if an earlier one has errors.
pub fn build_files(files: &[PathBuf], config: &BuildConfig) -> CliResult<ExitCode> {
    let mut reporter = ConsoleReporter::new();
    for file in files {
        let source = source_for(file);
        build_source_with_config(&source, &mut reporter, config);
    }
    finish(&reporter)
}

// ============================================================================
// Debug output
// ============================================================================

/// Tokenize and display tokens, one per line.
pub fn lex_file(file: &Path, config: &BuildConfig) -> CliResult<ExitCode> {
    let mut reporter = ConsoleReporter::new();
    let source = source_for(file);
    let Some(view) = lock_source(&source, &mut reporter) else {
        return finish(&reporter);
    };

    let tokens = lexer::run_lexer(&view, &mut reporter, config.lexer_flags, config.tab_size);
    for token in &tokens {
        let location = token.locate(&view, config.tab_size);
        if token.kind == TokenKind::EndOfFile {
            println!("{:<10} {:?}", location.short(), token.kind);
        } else {
            println!("{:<10} {:?} {}", location.short(), token.kind, token.text(&view));
        }
    }
    finish(&reporter)
}

/// Parse and display the AST.
pub fn parse_file(file: &Path, config: &BuildConfig) -> CliResult<ExitCode> {
    let mut reporter = ConsoleReporter::new();
    let source = source_for(file);
    let Some(view) = lock_source(&source, &mut reporter) else {
        return finish(&reporter);
    };

    let tokens = lexer::run_lexer(&view, &mut reporter, config.lexer_flags, config.tab_size);
    let tree = parser::run_parser(&tokens, &view, &mut reporter, config.tab_size);
    print!("{}", ast::dump(&tree, &view, config.tab_size));
    finish(&reporter)
}
