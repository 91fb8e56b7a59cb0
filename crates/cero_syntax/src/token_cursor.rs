//! Read cursor over a [`TokenStream`].
//!
//! The parser never indexes the stream directly; it peeks and advances through a [`TokenCursor`]. Comment tokens (only
//! present when the lexer was asked to keep them) are skipped transparently.

use crate::lexer::{Token, TokenKind, TokenStream};
use crate::source::SourceOffset;

/// Iterates over a token stream. Sticks at the end-of-file token once it reaches it.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    /// A cursor at the first non-comment token of `stream`.
    ///
    /// ## Panics
    /// Panics if `stream` is empty, which the lexer never produces.
    pub fn new(stream: &'t TokenStream) -> Self {
        let tokens = stream.tokens();
        assert!(
            tokens.last().is_some_and(|token| token.kind == TokenKind::EndOfFile),
            "token stream must end with an end-of-file token"
        );
        let mut cursor = Self { tokens, pos: 0 };
        cursor.skip_comments();
        cursor
    }

    /// The current token.
    pub fn peek(&self) -> Token {
        self.tokens[self.pos]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    pub fn peek_offset(&self) -> SourceOffset {
        self.tokens[self.pos].offset
    }

    /// The token after the current one, or the current token if it is the end of file.
    pub fn peek_ahead(&self) -> Token {
        if self.peek_kind() == TokenKind::EndOfFile {
            return self.peek();
        }
        let mut at = self.pos + 1;
        while self.tokens[at].kind.is_comment() {
            at += 1;
        }
        self.tokens[at]
    }

    /// Return the current token and advance past it.
    pub fn next(&mut self) -> Token {
        let token = self.peek();
        self.advance();
        token
    }

    /// Advance if the current token is of kind `kind`.
    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance and return the current token if it is of kind `kind`.
    pub fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        let token = self.peek();
        if token.kind == kind {
            self.advance();
            Some(token)
        } else {
            None
        }
    }

    /// Move to the next token. Does nothing at the end of file.
    pub fn advance(&mut self) {
        if self.peek_kind() != TokenKind::EndOfFile {
            self.pos += 1;
            self.skip_comments();
        }
    }

    fn skip_comments(&mut self) {
        while self.tokens[self.pos].kind.is_comment() {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingReporter;
    use crate::lexer::{LexerFlags, run_lexer};
    use crate::source::{DEFAULT_TAB_SIZE, Source};

    fn lex_with_comments(text: &str) -> TokenStream {
        let source = Source::from_string(text, "test");
        let view = source.lock().unwrap();
        let mut reporter = CollectingReporter::new();
        run_lexer(&view, &mut reporter, LexerFlags::NONE.with_emit_comments(true), DEFAULT_TAB_SIZE)
    }

    #[test]
    fn test_cursor_sticks_at_end_of_file() {
        let stream = lex_with_comments("a");
        let mut cursor = TokenCursor::new(&stream);
        assert_eq!(cursor.next().kind, TokenKind::Identifier);
        assert_eq!(cursor.peek_kind(), TokenKind::EndOfFile);
        assert_eq!(cursor.peek_ahead().kind, TokenKind::EndOfFile);
        cursor.advance();
        assert_eq!(cursor.next().kind, TokenKind::EndOfFile);
        assert_eq!(cursor.peek_offset(), 1);
    }

    #[test]
    fn test_cursor_skips_comments() {
        let stream = lex_with_comments("/* lead */ a // mid\n /* x */ b");
        let mut cursor = TokenCursor::new(&stream);
        assert_eq!(cursor.peek_offset(), 11);
        assert_eq!(cursor.peek_ahead().offset, 29);
        cursor.advance();
        assert_eq!(cursor.peek_offset(), 29);
    }

    #[test]
    fn test_match_helpers() {
        let stream = lex_with_comments("( )");
        let mut cursor = TokenCursor::new(&stream);
        assert!(!cursor.match_kind(TokenKind::RParen));
        assert!(cursor.match_kind(TokenKind::LParen));
        assert!(cursor.match_token(TokenKind::LParen).is_none());
        assert_eq!(cursor.match_token(TokenKind::RParen).map(|t| t.offset), Some(2));
    }
}
