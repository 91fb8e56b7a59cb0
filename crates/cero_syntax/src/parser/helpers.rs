/// Expectation helpers, diagnostics and error recovery.
///
/// Every syntax error is reported here, always at the current token and with that token's description as the only
/// argument.
impl Parser<'_, '_, '_> {
    // ========================================================================
    // Expectations
    // ========================================================================

    /// Consume a token of `kind`, or report `message` and fail.
    fn expect(&mut self, kind: TokenKind, message: Message) -> ParseResult<()> {
        if self.cursor.match_kind(kind) {
            Ok(())
        } else {
            self.report_expected(message);
            Err(ParseError)
        }
    }

    /// Consume an identifier as a name. Reports `message` and returns an empty name if there is none.
    fn expect_identifier(&mut self, message: Message) -> AstName {
        match self.cursor.match_token(TokenKind::Identifier) {
            Some(token) => AstName::new(token.offset, token.length),
            None => {
                self.report_expected(message);
                AstName::default()
            }
        }
    }

    fn report_expected(&mut self, message: Message) {
        let token = self.cursor.peek();
        let location = token.locate(self.source, self.tab_size);
        let found = token.describe(self.source);
        self.reporter.report(&location, message, MessageArgs::from(found));
    }

    /// Run `parse` one nesting level deeper, failing once [`MAX_NESTING_DEPTH`] is reached.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            let location = self.cursor.peek().locate(self.source, self.tab_size);
            self.reporter.report(&location, Message::NestingTooDeep, MessageArgs::from(MAX_NESTING_DEPTH));
            return Err(ParseError);
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Skip to the start of the next definition or the end of file.
    ///
    /// Always consumes at least one token, so a definition that fails on its first token cannot stall the parser.
    fn recover_at_definition_level(&mut self) {
        let start = self.cursor.peek_offset();
        loop {
            self.cursor.advance();
            if matches!(
                self.cursor.peek_kind(),
                TokenKind::Keyword(KeywordId::Public | KeywordId::Private | KeywordId::Struct | KeywordId::Enum)
                    | TokenKind::EndOfFile
            ) {
                break;
            }
        }
        tracing::debug!(from = start, to = self.cursor.peek_offset(), "recovered at definition level");
    }

    /// Skip past the next `;`, or up to the `}` closing the current block.
    ///
    /// Returns `true` if the end of file was reached instead, meaning the block is never closed.
    fn recover_at_statement_level(&mut self) -> bool {
        let start = self.cursor.peek_offset();
        loop {
            match self.cursor.peek_kind() {
                TokenKind::EndOfFile => {
                    tracing::debug!(from = start, "statement recovery reached end of file");
                    return true;
                }
                TokenKind::Semicolon => {
                    self.cursor.advance();
                    break;
                }
                TokenKind::RBrace => break,
                _ => self.cursor.advance(),
            }
        }
        tracing::debug!(from = start, to = self.cursor.peek_offset(), "recovered at statement level");
        false
    }
}
