#![no_main]

use cero_syntax::diagnostics::CollectingReporter;
use cero_syntax::lexer::{self, LexerFlags};
use cero_syntax::parser;
use cero_syntax::source::{DEFAULT_TAB_SIZE, Source};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Raw bytes are fine: the lexer reports invalid UTF-8 instead of rejecting it.
    let source = Source::from_bytes(data, "fuzz.ce");
    let Ok(view) = source.lock() else {
        return;
    };
    let mut reporter = CollectingReporter::new();
    let flags = LexerFlags::NONE.with_emit_comments(data.first().is_some_and(|b| b & 1 == 1));
    let tokens = lexer::run_lexer(&view, &mut reporter, flags, DEFAULT_TAB_SIZE);
    let _ = parser::run_parser(&tokens, &view, &mut reporter, DEFAULT_TAB_SIZE);
});
