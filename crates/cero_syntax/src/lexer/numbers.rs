//! Numeric literal scanning.
//!
//! Whitespace between digits is a grouping separator (`1 000 000`) and is part of the literal, but whitespace after the
//! last digit is not. Binary and octal literals accept every decimal digit so that a later stage can point at the bad
//! digit instead of the lexer splitting the literal.

use super::{Lexer, TokenKind, is_whitespace};
use crate::source::SourceOffset;

fn is_decimal_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

fn is_hexadecimal_digit(byte: u8) -> bool {
    byte.is_ascii_hexdigit()
}

impl Lexer<'_, '_> {
    pub(super) fn on_zero(&mut self) {
        let offset = self.offset_and_advance();

        let kind = if self.match_byte(b'x') {
            TokenKind::HexIntLiteral
        } else if self.match_byte(b'b') {
            TokenKind::BinIntLiteral
        } else if self.match_byte(b'o') {
            TokenKind::OctIntLiteral
        } else {
            self.handle_decimal_literal(offset);
            return;
        };

        let is_digit = match kind {
            TokenKind::HexIntLiteral => is_hexadecimal_digit,
            _ => is_decimal_digit,
        };
        let length = self.consume_digit_sequence(offset, is_digit);
        self.put_variable(kind, offset, length);
    }

    pub(super) fn on_nonzero(&mut self) {
        let offset = self.offset_and_advance();
        self.handle_decimal_literal(offset);
    }

    /// `.` followed by digits is a float like `.375`; otherwise it's a plain dot.
    pub(super) fn on_dot(&mut self) {
        let offset = self.offset_and_advance();
        let length = self.consume_digit_sequence(offset, is_decimal_digit);

        if length > 1 {
            self.put_variable(TokenKind::FloatLiteral, offset, length);
        } else {
            self.put(TokenKind::Dot, offset);
        }
    }

    fn handle_decimal_literal(&mut self, offset: SourceOffset) {
        let length = self.consume_digit_sequence(offset, is_decimal_digit);

        if self.peek() != Some(b'.') {
            self.put_variable(TokenKind::DecIntLiteral, offset, length);
            return;
        }

        let dot_offset = self.offset_and_advance();
        let length_after_dot = self.consume_digit_sequence(dot_offset, is_decimal_digit);

        if length_after_dot > 1 {
            let length = dot_offset - offset + length_after_dot;
            self.put_variable(TokenKind::FloatLiteral, offset, length);
        } else {
            // `1.foo` is member access on an integer.
            self.put_variable(TokenKind::DecIntLiteral, offset, length);
            self.put(TokenKind::Dot, dot_offset);
        }
    }

    /// Consume digits accepted by `is_digit`, allowing whitespace between them.
    ///
    /// Returns the length from `offset` through the last digit. Trailing whitespace is consumed but not counted.
    fn consume_digit_sequence(&mut self, offset: SourceOffset, is_digit: fn(u8) -> bool) -> u32 {
        while let Some(mut byte) = self.peek() {
            if is_digit(byte) {
                self.advance();
                continue;
            }

            if !is_whitespace(byte) {
                break;
            }

            let length = self.length_since(offset);
            self.advance();

            while let Some(next) = self.peek() {
                byte = next;
                if !is_whitespace(byte) {
                    break;
                }
                self.advance();
            }

            if !is_digit(byte) {
                return length;
            }

            self.advance();
        }

        self.length_since(offset)
    }
}
