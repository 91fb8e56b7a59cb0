//! Lexer for the Cero programming language.
//!
//! A single forward pass over the source bytes. Each token is routed by its first byte:
//! - whitespace is skipped
//! - letters and `_` start words, which are keywords or identifiers
//! - digits and `.` start numeric literals
//! - quotes start string and character literals
//! - `/` starts a comment or a division operator
//! - bytes with the high bit set start Unicode identifiers
//!
//! Everything else is punctuation or an invalid character.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, TokenStream, LexerFlags)
//! - `numbers` - Numeric literal scanning
//! - `strings` - Quoted literals and comments
//! - `unicode` - UTF-8 decoding and identifier classification
//!
//! ## Notes
//! - Lexical errors are reported and scanning continues. The stream always ends with an end-of-file token.
//! - Sources larger than [`SOURCE_SIZE_MAX`] are not scanned at all.

mod numbers;
mod strings;
pub mod tokens;
mod unicode;

pub use tokens::{LexerFlags, Token, TokenKind, TokenStream};

use cero_core::lang::keywords;
use cero_core::lang::messages::{Message, MessageArgs};

use crate::diagnostics::{CodeLocation, Reporter};
use crate::source::{DEFAULT_TAB_SIZE, SOURCE_SIZE_MAX, SourceOffset, SourceView};

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for Cero source code.
pub struct Lexer<'s, 'r> {
    source: &'s SourceView<'s>,
    text: &'s [u8],
    pos: usize,
    tokens: TokenStream,
    reporter: &'r mut dyn Reporter,
    flags: LexerFlags,
    tab_size: u8,
}

impl<'s, 'r> Lexer<'s, 'r> {
    pub fn new(source: &'s SourceView<'s>, reporter: &'r mut dyn Reporter, flags: LexerFlags, tab_size: u8) -> Self {
        let text = source.text();
        Self {
            source,
            text,
            pos: 0,
            // Upper bound on the token count, capped so huge inputs don't reserve everything up front.
            tokens: TokenStream::with_capacity(text.len().min(1 << 16) + 1),
            reporter,
            flags,
            tab_size,
        }
    }

    /// Tokenize the entire source.
    pub fn tokenize(mut self) -> TokenStream {
        // Offsets of larger sources would not fit the offset range.
        if self.text.len() <= SOURCE_SIZE_MAX as usize {
            while let Some(byte) = self.peek() {
                self.handle_next_byte(byte);
            }
        } else {
            self.reporter.report(
                &CodeLocation::whole_file(self.source.path()),
                Message::SourceFileTooLarge,
                MessageArgs::from(SOURCE_SIZE_MAX),
            );
        }

        let offset = self.offset();
        self.tokens.put(Token::fixed(TokenKind::EndOfFile, offset));
        self.tokens
    }

    // ========================================================================
    // Core byte handling
    // ========================================================================

    fn peek(&self) -> Option<u8> {
        self.text.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.text.get(self.pos + ahead).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn offset(&self) -> SourceOffset {
        self.pos as SourceOffset
    }

    fn offset_and_advance(&mut self) -> SourceOffset {
        let offset = self.offset();
        self.advance();
        offset
    }

    fn length_since(&self, offset: SourceOffset) -> u32 {
        self.offset() - offset
    }

    fn put(&mut self, kind: TokenKind, offset: SourceOffset) {
        self.tokens.put(Token::fixed(kind, offset));
    }

    fn put_variable(&mut self, kind: TokenKind, offset: SourceOffset, length: u32) {
        self.tokens.put(Token::new(kind, offset, length));
    }

    fn report(&mut self, offset: SourceOffset, message: Message, args: MessageArgs) {
        let location = self.source.locate(offset, self.tab_size);
        self.reporter.report(&location, message, args);
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn handle_next_byte(&mut self, byte: u8) {
        match byte {
            b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r' => self.advance(),

            b'A'..=b'Z' | b'_' => self.on_word(false),
            b'a'..=b'z' => self.on_word(!keywords::tails_for(byte).is_empty()),

            b'0' => self.on_zero(),
            b'1'..=b'9' => self.on_nonzero(),

            b'"' => self.on_quote(b'"', TokenKind::StringLiteral),
            b'\'' => self.on_quote(b'\'', TokenKind::CharLiteral),

            b'(' => self.on_one_byte(TokenKind::LParen),
            b')' => self.on_one_byte(TokenKind::RParen),
            b'[' => self.on_one_byte(TokenKind::LBracket),
            b']' => self.on_one_byte(TokenKind::RBracket),
            b'{' => self.on_one_byte(TokenKind::LBrace),
            b'}' => self.on_one_byte(TokenKind::RBrace),
            b',' => self.on_one_byte(TokenKind::Comma),
            b';' => self.on_one_byte(TokenKind::Semicolon),
            b'^' => self.on_one_byte(TokenKind::Caret),
            b'<' => self.on_left_angle(),
            b'>' => self.on_right_angle(),
            b'.' => self.on_dot(),
            b':' => self.on_colon(),
            b'=' => self.on_equals(),
            b'+' => self.on_plus(),
            b'-' => self.on_minus(),
            b'*' => self.on_with_eq(TokenKind::Star, TokenKind::StarEq),
            b'/' => self.on_slash(),
            b'%' => self.on_with_eq(TokenKind::Percent, TokenKind::PercentEq),
            b'&' => self.on_doubling(
                b'&',
                [TokenKind::Ampersand, TokenKind::AmpersandEq, TokenKind::AndAnd, TokenKind::AndAndEq],
            ),
            b'|' => self.on_doubling(
                b'|',
                [TokenKind::Pipe, TokenKind::PipeEq, TokenKind::PipePipe, TokenKind::PipePipeEq],
            ),
            b'~' => self.on_with_eq(TokenKind::Tilde, TokenKind::TildeEq),
            b'!' => self.on_with_eq(TokenKind::Bang, TokenKind::BangEq),

            0x80..=0xff => self.on_unicode(),

            _ => {
                let offset = self.offset_and_advance();
                self.report(offset, Message::InvalidCharacter, MessageArgs::from(u32::from(byte)));
            }
        }
    }

    // ========================================================================
    // Words
    // ========================================================================

    fn on_word(&mut self, maybe_keyword: bool) {
        let offset = self.offset_and_advance();
        self.consume_word();
        let length = self.length_since(offset);

        if maybe_keyword && length as usize <= keywords::MAX_KEYWORD_LEN {
            let word = &self.text[offset as usize..self.pos];
            if let Some(id) = keywords::lookup(word) {
                self.put(TokenKind::Keyword(id), offset);
                return;
            }
        }

        self.put_variable(TokenKind::Identifier, offset, length);
    }

    /// Consume ASCII identifier bytes and XID_Continue code points.
    fn consume_word(&mut self) {
        while let Some(byte) = self.peek() {
            if is_ascii_identifier_byte(byte) {
                self.advance();
            } else if byte.is_ascii() {
                break;
            } else {
                match unicode::decode(&self.text[self.pos..]) {
                    Some((c, len)) if unicode::is_identifier_continue(c) => self.pos += len,
                    _ => break,
                }
            }
        }
    }

    fn on_unicode(&mut self) {
        let offset = self.offset();
        match unicode::decode(&self.text[self.pos..]) {
            Some((c, len)) if unicode::is_identifier_start(c) => {
                self.pos += len;
                self.consume_word();
                let length = self.length_since(offset);
                self.put_variable(TokenKind::Identifier, offset, length);
            }
            Some((_, len)) => {
                let packed = unicode::pack_le(&self.text[self.pos..self.pos + len]);
                self.pos += len;
                self.report(offset, Message::InvalidCharacter, MessageArgs::from(packed));
            }
            None => {
                let lead = self.text[self.pos];
                self.advance();
                self.report(offset, Message::InvalidCharacter, MessageArgs::from(u32::from(lead)));
            }
        }
    }

    // ========================================================================
    // Punctuation
    // ========================================================================

    fn on_one_byte(&mut self, kind: TokenKind) {
        let offset = self.offset_and_advance();
        self.put(kind, offset);
    }

    /// `x` or `x=`.
    fn on_with_eq(&mut self, plain: TokenKind, with_eq: TokenKind) {
        let offset = self.offset_and_advance();
        let kind = if self.match_byte(b'=') { with_eq } else { plain };
        self.put(kind, offset);
    }

    /// `x`, `x=`, `xx` or `xx=`, given in that order.
    fn on_doubling(&mut self, byte: u8, [single, single_eq, double, double_eq]: [TokenKind; 4]) {
        let offset = self.offset_and_advance();
        let kind = if self.match_byte(byte) {
            if self.match_byte(b'=') { double_eq } else { double }
        } else if self.match_byte(b'=') {
            single_eq
        } else {
            single
        };
        self.put(kind, offset);
    }

    fn on_left_angle(&mut self) {
        self.on_doubling(
            b'<',
            [TokenKind::LAngle, TokenKind::LAngleEq, TokenKind::LAngleAngle, TokenKind::LAngleAngleEq],
        );
    }

    fn on_right_angle(&mut self) {
        let offset = self.offset_and_advance();

        if self.match_byte(b'>') {
            if self.match_byte(b'=') {
                self.put(TokenKind::RAngleAngleEq, offset);
            } else {
                // Two tokens, so the parser can tell shifts from closing generic brackets.
                self.put(TokenKind::RAngle, offset);
                self.put(TokenKind::RAngle, offset + 1);
            }
        } else if self.match_byte(b'=') {
            self.put(TokenKind::RAngleEq, offset);
        } else {
            self.put(TokenKind::RAngle, offset);
        }
    }

    fn on_colon(&mut self) {
        let offset = self.offset_and_advance();
        let kind = if self.match_byte(b':') { TokenKind::ColonColon } else { TokenKind::Colon };
        self.put(kind, offset);
    }

    fn on_equals(&mut self) {
        let offset = self.offset_and_advance();
        let kind = if self.match_byte(b'=') {
            TokenKind::EqEq
        } else if self.match_byte(b'>') {
            TokenKind::ThickArrow
        } else {
            TokenKind::Eq
        };
        self.put(kind, offset);
    }

    fn on_plus(&mut self) {
        let offset = self.offset_and_advance();
        let kind = if self.match_byte(b'+') {
            TokenKind::PlusPlus
        } else if self.match_byte(b'=') {
            TokenKind::PlusEq
        } else {
            TokenKind::Plus
        };
        self.put(kind, offset);
    }

    fn on_minus(&mut self) {
        let offset = self.offset_and_advance();
        let kind = if self.match_byte(b'>') {
            TokenKind::ThinArrow
        } else if self.match_byte(b'-') {
            TokenKind::MinusMinus
        } else if self.match_byte(b'=') {
            TokenKind::MinusEq
        } else {
            TokenKind::Minus
        };
        self.put(kind, offset);
    }

    fn on_slash(&mut self) {
        match self.peek_at(1) {
            Some(b'/') => self.on_line_comment(),
            Some(b'*') => self.on_block_comment(),
            _ => self.on_with_eq(TokenKind::Slash, TokenKind::SlashEq),
        }
    }
}

fn is_ascii_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Whitespace as the lexer sees it. Unlike [`u8::is_ascii_whitespace`] this includes vertical tab.
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Lex `source` into a token stream, reporting lexical errors to `reporter`.
#[tracing::instrument(skip_all, fields(path = source.path(), bytes = source.len()))]
pub fn run_lexer(source: &SourceView<'_>, reporter: &mut dyn Reporter, flags: LexerFlags, tab_size: u8) -> TokenStream {
    let tokens = Lexer::new(source, reporter, flags, tab_size).tokenize();
    tracing::debug!(tokens = tokens.len(), "lexed source");
    tokens
}

/// Lex with default flags and tab size.
pub fn lex(source: &SourceView<'_>, reporter: &mut dyn Reporter) -> TokenStream {
    run_lexer(source, reporter, LexerFlags::NONE, DEFAULT_TAB_SIZE)
}
