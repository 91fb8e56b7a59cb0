/// Definition parsing.
///
/// Only function definitions exist so far. `struct` and `enum` are reserved and act as recovery points.
impl Parser<'_, '_, '_> {
    // ========================================================================
    // Definitions
    // ========================================================================

    fn parse_definition(&mut self) -> ParseResult<NodeId> {
        let offset = self.cursor.peek_offset();

        let access = if self.cursor.match_kind(TokenKind::Keyword(KeywordId::Private)) {
            AccessModifier::Private
        } else if self.cursor.match_kind(TokenKind::Keyword(KeywordId::Public)) {
            AccessModifier::Public
        } else {
            AccessModifier::None
        };

        match self.cursor.match_token(TokenKind::Identifier) {
            Some(name) => self.parse_function_definition(offset, access, AstName::new(name.offset, name.length)),
            None => {
                self.report_expected(Message::ExpectFunctionStructOrEnum);
                Err(ParseError)
            }
        }
    }

    /// `name(params) -> outputs { statements }`, after the name has been consumed.
    fn parse_function_definition(
        &mut self,
        offset: SourceOffset,
        access: AccessModifier,
        name: AstName,
    ) -> ParseResult<NodeId> {
        self.expect(TokenKind::LParen, Message::ExpectParenAfterFunctionName)?;
        let parameters = self.parse_function_parameters()?;
        let outputs = self.parse_function_outputs();

        self.expect(TokenKind::LBrace, Message::ExpectBraceBeforeFunctionBody)?;
        let statements = self.parse_block();

        let definition = FunctionDefinition {
            access,
            name,
            parameters,
            outputs,
            statements,
        };
        Ok(self.ast.alloc(offset, AstNodeKind::FunctionDefinition(definition)))
    }

    fn parse_function_parameters(&mut self) -> ParseResult<NodeList> {
        let mut parameters = NodeList::EMPTY;

        if !self.cursor.match_kind(TokenKind::RParen) {
            loop {
                let parameter = self.parse_function_parameter()?;
                self.ast.push(&mut parameters, parameter);
                if !self.cursor.match_kind(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, Message::ExpectParenAfterParameters)?;
        }

        Ok(parameters)
    }

    fn parse_function_parameter(&mut self) -> ParseResult<NodeId> {
        let offset = self.cursor.peek_offset();
        let ty = self.parse_type(Message::ExpectParameterType)?;
        let name = self.expect_identifier(Message::ExpectParameterName);

        // A broken signature makes everything after it noise, so give up on the whole definition.
        if name.is_empty() {
            return Err(ParseError);
        }

        Ok(self.ast.alloc(offset, AstNodeKind::FunctionParameter { ty, name }))
    }

    /// `-> T, U`. A missing output type is reported but does not abandon the definition.
    fn parse_function_outputs(&mut self) -> NodeList {
        let mut outputs = NodeList::EMPTY;

        if self.cursor.match_kind(TokenKind::ThinArrow) {
            loop {
                let offset = self.cursor.peek_offset();
                let ty = self.parse_type(Message::ExpectReturnType).ok();
                let output = self.ast.alloc(
                    offset,
                    AstNodeKind::FunctionOutput {
                        ty,
                        name: AstName::default(),
                    },
                );
                self.ast.push(&mut outputs, output);
                if !self.cursor.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        outputs
    }

    /// Types are plain names for now.
    fn parse_type(&mut self, message: Message) -> ParseResult<NodeId> {
        if self.cursor.peek_kind() == TokenKind::Identifier {
            Ok(self.on_identifier())
        } else {
            self.report_expected(message);
            Err(ParseError)
        }
    }
}
