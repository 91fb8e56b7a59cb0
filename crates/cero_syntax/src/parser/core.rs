/// Parser core types and the definition loop.
///
/// This chunk defines the [`Parser`] type, the internal failure sentinel and the precedence ladder shared by the
/// other parser chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a single module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParseError;

type ParseResult<T> = Result<T, ParseError>;

/// Binding strength of expression tails, weakest first.
///
/// A tail is only folded into the current expression when its precedence is strictly greater than the level the
/// expression is being parsed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Statement,
    Assignment,
    Logical,
    Comparison,
    AdditiveOrBit,
    Multiplicative,
    Prefix,
    Postfix,
}

/// Deepest nesting of blocks and expressions the parser descends into.
///
/// Every level costs a few stack frames; past this depth the construct is reported and skipped like any other syntax
/// error.
const MAX_NESTING_DEPTH: u32 = 256;

/// Smallest and largest AST arena block, in nodes.
const AST_BLOCK_LEN_MIN: usize = 16;
const AST_BLOCK_LEN_MAX: usize = 1 << 14;

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and never backtracks; it looks at most one token ahead.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'t, 's, 'r> {
    cursor: TokenCursor<'t>,
    source: &'s SourceView<'s>,
    reporter: &'r mut dyn Reporter,
    tab_size: u8,
    depth: u32,
    ast: Ast,
}

impl<'t, 's, 'r> Parser<'t, 's, 'r> {
    /// Create a parser over `tokens`, which must have been lexed from `source`.
    pub fn new(
        tokens: &'t TokenStream,
        source: &'s SourceView<'s>,
        reporter: &'r mut dyn Reporter,
        tab_size: u8,
    ) -> Self {
        let block_len = tokens.len().clamp(AST_BLOCK_LEN_MIN, AST_BLOCK_LEN_MAX);
        Self {
            cursor: TokenCursor::new(tokens),
            source,
            reporter,
            tab_size,
            depth: 0,
            ast: Ast::with_block_len(block_len),
        }
    }

    /// Parse every definition up to the end of file.
    pub fn parse(mut self) -> Ast {
        while !self.cursor.match_kind(TokenKind::EndOfFile) {
            match self.parse_definition() {
                Ok(definition) => self.ast.push_definition(definition),
                Err(ParseError) => self.recover_at_definition_level(),
            }
        }
        self.ast
    }
}
