//! Quoted literals and comments.

use cero_core::lang::messages::{Message, MessageArgs};

use super::{Lexer, TokenKind};

impl Lexer<'_, '_> {
    /// Scan a string or character literal up to its closing `quote`.
    ///
    /// A backslash escapes the next quote, so `\"` stays inside the literal while `\\"` closes it. A newline or the end
    /// of input ends an unterminated literal, which is reported there and still becomes a token.
    pub(super) fn on_quote(&mut self, quote: u8, kind: TokenKind) {
        let offset = self.offset_and_advance();
        let mut ignore_quote = false;

        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    let at = self.offset();
                    self.report(at, Message::MissingClosingQuote, MessageArgs::none());
                    break;
                }
                Some(b'\\') => {
                    ignore_quote = !ignore_quote;
                    self.advance();
                }
                Some(byte) if byte == quote && !ignore_quote => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    ignore_quote = false;
                    self.advance();
                }
            }
        }

        let length = self.length_since(offset);
        self.put_variable(kind, offset, length);
    }

    /// `//` up to, not including, the end of the line.
    pub(super) fn on_line_comment(&mut self) {
        let offset = self.offset();
        self.pos += 2;

        while let Some(byte) = self.peek() {
            if byte == b'\n' {
                break;
            }
            self.advance();
        }

        if self.flags.emit_comments {
            let length = self.length_since(offset);
            self.put_variable(TokenKind::LineComment, offset, length);
        }
    }

    /// `/* ... */`, where comments nest.
    pub(super) fn on_block_comment(&mut self) {
        let offset = self.offset();
        self.pos += 2;
        let mut depth = 1u32;

        loop {
            match (self.peek(), self.peek_at(1)) {
                (None, _) => {
                    self.report(offset, Message::UnterminatedBlockComment, MessageArgs::none());
                    break;
                }
                (Some(b'/'), Some(b'*')) => {
                    depth += 1;
                    self.pos += 2;
                }
                (Some(b'*'), Some(b'/')) => {
                    self.pos += 2;
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => self.advance(),
            }
        }

        if self.flags.emit_comments {
            let length = self.length_since(offset);
            self.put_variable(TokenKind::BlockComment, offset, length);
        }
    }
}
