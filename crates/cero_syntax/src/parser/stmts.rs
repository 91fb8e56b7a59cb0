/// Blocks and statements.
impl Parser<'_, '_, '_> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// Statements up to and including the closing `}`. The opening `{` is already consumed.
    fn parse_block(&mut self) -> NodeList {
        let mut statements = NodeList::EMPTY;

        while !self.cursor.match_kind(TokenKind::RBrace) {
            match self.parse_statement() {
                Ok(statement) => self.ast.push(&mut statements, statement),
                Err(ParseError) => {
                    if self.recover_at_statement_level() {
                        break;
                    }
                }
            }
        }

        statements
    }

    /// A nested block, or an expression terminated by `;`.
    fn parse_statement(&mut self) -> ParseResult<NodeId> {
        self.nested(|parser| {
            if parser.cursor.peek_kind() == TokenKind::LBrace {
                return Ok(parser.on_block());
            }

            let expr = parser.parse_expression(Precedence::Statement)?;
            parser.expect(TokenKind::Semicolon, Message::ExpectSemicolon)?;
            Ok(expr)
        })
    }
}
