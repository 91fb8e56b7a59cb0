//! Token types for the Cero lexer.
//!
//! A [`Token`] is a small `Copy` value: a kind, a byte offset, and a length that is only set for variable-length tokens
//! (identifiers, literals, comments). Fixed-length tokens derive their text from their kind. Tokens never own source
//! text; resolving it needs the [`SourceView`] they were lexed from.
//!
//! ## Notes
//! - Keyword tokens carry stable [`KeywordId`]s from `cero_core::lang`.
//! - `>>` is never a token: the lexer emits two adjacent `>` tokens and the parser decides what they mean.

use std::borrow::Cow;

use cero_core::lang::keywords::{self, KeywordId};

use crate::diagnostics::CodeLocation;
use crate::source::{SourceOffset, SourceView};

// ============================================================================
// TOKEN KINDS
// ============================================================================

/// Category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Variable-length ==========
    Identifier,
    LineComment,
    BlockComment,
    DecIntLiteral,
    HexIntLiteral,
    BinIntLiteral,
    OctIntLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,

    // ========== Keywords ==========
    Keyword(KeywordId),

    // ========== One character ==========
    Dot,
    Comma,
    Colon,
    Semicolon,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LAngle,
    RAngle,
    Eq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Ampersand,
    Pipe,
    Tilde,
    Caret,
    Bang,

    // ========== Two characters ==========
    ThinArrow,
    ThickArrow,
    ColonColon,
    PlusPlus,
    MinusMinus,
    LAngleAngle,
    AndAnd,
    PipePipe,
    EqEq,
    BangEq,
    LAngleEq,
    RAngleEq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpersandEq,
    PipeEq,
    TildeEq,

    // ========== Three characters ==========
    LAngleAngleEq,
    RAngleAngleEq,
    AndAndEq,
    PipePipeEq,

    EndOfFile,
}

impl TokenKind {
    /// Whether tokens of this kind record their own length.
    pub fn is_variable_length(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::LineComment
                | TokenKind::BlockComment
                | TokenKind::DecIntLiteral
                | TokenKind::HexIntLiteral
                | TokenKind::BinIntLiteral
                | TokenKind::OctIntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Fixed spelling of keywords and punctuation. Empty for variable-length kinds and end of file.
    pub fn spelling(self) -> &'static str {
        match self {
            TokenKind::Keyword(id) => keywords::as_str(id),
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LAngle => "<",
            TokenKind::RAngle => ">",
            TokenKind::Eq => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::Tilde => "~",
            TokenKind::Caret => "^",
            TokenKind::Bang => "!",
            TokenKind::ThinArrow => "->",
            TokenKind::ThickArrow => "=>",
            TokenKind::ColonColon => "::",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::LAngleAngle => "<<",
            TokenKind::AndAnd => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::EqEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::LAngleEq => "<=",
            TokenKind::RAngleEq => ">=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::AmpersandEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::TildeEq => "~=",
            TokenKind::LAngleAngleEq => "<<=",
            TokenKind::RAngleAngleEq => ">>=",
            TokenKind::AndAndEq => "&&=",
            TokenKind::PipePipeEq => "||=",
            TokenKind::Identifier
            | TokenKind::LineComment
            | TokenKind::BlockComment
            | TokenKind::DecIntLiteral
            | TokenKind::HexIntLiteral
            | TokenKind::BinIntLiteral
            | TokenKind::OctIntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::CharLiteral
            | TokenKind::StringLiteral
            | TokenKind::EndOfFile => "",
        }
    }

    /// How a token of this kind is described in a diagnostic. `{}` is replaced by the token's text.
    pub fn message_format(self) -> &'static str {
        match self {
            TokenKind::Identifier => "name `{}`",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::DecIntLiteral
            | TokenKind::HexIntLiteral
            | TokenKind::BinIntLiteral
            | TokenKind::OctIntLiteral => "integer literal `{}`",
            TokenKind::FloatLiteral => "floating-point literal `{}`",
            TokenKind::CharLiteral => "character literal {}",
            TokenKind::StringLiteral => "string literal {}",
            TokenKind::EndOfFile => "end of file",
            _ => "`{}`",
        }
    }
}

// ============================================================================
// TOKENS
// ============================================================================

/// A unit of lexical analysis: a view (offset and length) into the source it was lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: SourceOffset,
    /// Only nonzero for variable-length tokens.
    pub length: u32,
}

impl Token {
    pub const fn new(kind: TokenKind, offset: SourceOffset, length: u32) -> Self {
        Self { kind, offset, length }
    }

    /// A keyword or punctuation token, whose length is implied by its kind.
    pub const fn fixed(kind: TokenKind, offset: SourceOffset) -> Self {
        Self::new(kind, offset, 0)
    }

    /// Text of the token: the lexeme for variable-length tokens, the fixed spelling otherwise.
    ///
    /// Meaningless unless `source` is the view this token was lexed from.
    pub fn text<'s>(&self, source: &'s SourceView<'_>) -> Cow<'s, str> {
        if self.length > 0 {
            source.slice(self.offset, self.length)
        } else {
            Cow::Borrowed(self.kind.spelling())
        }
    }

    /// Rendering of this token used as a diagnostic argument, e.g. ``name `foo` `` or `` `;` ``.
    pub fn describe(&self, source: &SourceView<'_>) -> String {
        let format = self.kind.message_format();
        if format.contains("{}") {
            format.replacen("{}", &self.text(source), 1)
        } else {
            format.to_string()
        }
    }

    pub fn locate(&self, source: &SourceView<'_>, tab_size: u8) -> CodeLocation {
        source.locate(self.offset, tab_size)
    }
}

// ============================================================================
// TOKEN STREAM
// ============================================================================

/// Ordered tokens produced by the lexer, always terminated by exactly one [`TokenKind::EndOfFile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn put(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Number of tokens, including the end-of-file token.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false for a stream produced by the lexer.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Options controlling what the lexer emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerFlags {
    /// Keep comments as tokens instead of skipping them.
    pub emit_comments: bool,
}

impl LexerFlags {
    pub const NONE: Self = Self { emit_comments: false };

    pub fn with_emit_comments(mut self, emit_comments: bool) -> Self {
        self.emit_comments = emit_comments;
        self
    }
}
