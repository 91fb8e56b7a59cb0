/// Expression parsing by precedence climbing.
///
/// An expression is one head (a token that can start an expression) followed by any number of tails (infix and
/// postfix tokens). A tail is folded in while its precedence is strictly greater than the level being parsed. Binary
/// operators parse their right operand at their own level, which makes them left-associative.
///
/// ## Notes
/// - `>` followed by an adjacent `>` is a right shift and consumes both tokens. With anything in between it is a
///   comparison.
/// - Binary, postfix and call nodes take their offset from the left operand.
/// - Each expression and statement counts one nesting level towards [`MAX_NESTING_DEPTH`].
impl Parser<'_, '_, '_> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<NodeId> {
        let Some(head) = lookup_head_rule(self.cursor.peek_kind()) else {
            self.report_expected(Message::ExpectExpression);
            return Err(ParseError);
        };

        self.nested(|parser| {
            let mut expr = parser.parse_head(head)?;
            while let Some(tail) = parser.next_tail_rule(precedence) {
                expr = parser.parse_tail(tail, expr)?;
            }
            Ok(expr)
        })
    }

    fn is_expression_next(&self) -> bool {
        lookup_head_rule(self.cursor.peek_kind()).is_some()
    }

    /// The tail at the cursor, if it binds tighter than `current`.
    fn next_tail_rule(&self, current: Precedence) -> Option<TailRule> {
        let (precedence, rule) = self.lookup_tail_rule()?;
        (current < precedence).then_some(rule)
    }

    fn lookup_tail_rule(&self) -> Option<(Precedence, TailRule)> {
        use BinaryOperator as Op;
        use Precedence::*;

        let token = self.cursor.peek();
        match token.kind {
            TokenKind::Eq => binary_rule(Assignment, Op::Assign),
            TokenKind::PlusEq => binary_rule(Assignment, Op::AddAssign),
            TokenKind::MinusEq => binary_rule(Assignment, Op::SubAssign),
            TokenKind::StarEq => binary_rule(Assignment, Op::MulAssign),
            TokenKind::SlashEq => binary_rule(Assignment, Op::DivAssign),
            TokenKind::PercentEq => binary_rule(Assignment, Op::RemAssign),
            TokenKind::AmpersandEq => binary_rule(Assignment, Op::BitAndAssign),
            TokenKind::PipeEq => binary_rule(Assignment, Op::BitOrAssign),
            TokenKind::TildeEq => binary_rule(Assignment, Op::XorAssign),
            TokenKind::LAngleAngleEq => binary_rule(Assignment, Op::ShlAssign),
            TokenKind::RAngleAngleEq => binary_rule(Assignment, Op::ShrAssign),
            TokenKind::AndAndEq => binary_rule(Assignment, Op::LogicAndAssign),
            TokenKind::PipePipeEq => binary_rule(Assignment, Op::LogicOrAssign),
            TokenKind::AndAnd => binary_rule(Logical, Op::LogicAnd),
            TokenKind::PipePipe => binary_rule(Logical, Op::LogicOr),
            TokenKind::EqEq => binary_rule(Comparison, Op::Eq),
            TokenKind::BangEq => binary_rule(Comparison, Op::Neq),
            TokenKind::LAngle => binary_rule(Comparison, Op::Less),
            TokenKind::LAngleEq => binary_rule(Comparison, Op::LessEq),
            TokenKind::RAngleEq => binary_rule(Comparison, Op::GreaterEq),
            TokenKind::RAngle => {
                let next = self.cursor.peek_ahead();
                if next.kind == TokenKind::RAngle && next.offset == token.offset + 1 {
                    binary_rule(AdditiveOrBit, Op::Shr)
                } else {
                    binary_rule(Comparison, Op::Greater)
                }
            }
            TokenKind::Plus => binary_rule(AdditiveOrBit, Op::Add),
            TokenKind::Minus => binary_rule(AdditiveOrBit, Op::Sub),
            TokenKind::Ampersand => binary_rule(AdditiveOrBit, Op::BitAnd),
            TokenKind::Pipe => binary_rule(AdditiveOrBit, Op::BitOr),
            TokenKind::Tilde => binary_rule(AdditiveOrBit, Op::BitXor),
            TokenKind::LAngleAngle => binary_rule(AdditiveOrBit, Op::Shl),
            TokenKind::Star => binary_rule(Multiplicative, Op::Mul),
            TokenKind::Slash => binary_rule(Multiplicative, Op::Div),
            TokenKind::Percent => binary_rule(Multiplicative, Op::Rem),
            TokenKind::Caret => Some((Postfix, TailRule::Postfix(UnaryOperator::Deref))),
            TokenKind::PlusPlus => Some((Postfix, TailRule::Postfix(UnaryOperator::PostIncrement))),
            TokenKind::MinusMinus => Some((Postfix, TailRule::Postfix(UnaryOperator::PostDecrement))),
            TokenKind::LParen => Some((Postfix, TailRule::Call)),
            _ => None,
        }
    }

    // ========================================================================
    // Heads
    // ========================================================================

    fn parse_head(&mut self, rule: HeadRule) -> ParseResult<NodeId> {
        match rule {
            HeadRule::Identifier => Ok(self.on_identifier()),
            HeadRule::Literal(kind) => Ok(self.on_literal(kind)),
            HeadRule::Block => Ok(self.on_block()),
            HeadRule::Return => self.on_return(),
            HeadRule::Prefix(op) => self.on_prefix_operator(op),
        }
    }

    fn on_identifier(&mut self) -> NodeId {
        let token = self.cursor.next();
        self.ast.alloc(token.offset, AstNodeKind::IdentExpr { length: token.length })
    }

    fn on_literal(&mut self, kind: LiteralKind) -> NodeId {
        let token = self.cursor.next();
        self.ast.alloc(
            token.offset,
            AstNodeKind::LiteralExpr {
                kind,
                length: token.length,
            },
        )
    }

    fn on_block(&mut self) -> NodeId {
        let token = self.cursor.next();
        let statements = self.parse_block();
        self.ast.alloc(token.offset, AstNodeKind::BlockExpr { statements })
    }

    /// `return` with zero or more comma-separated values.
    fn on_return(&mut self) -> ParseResult<NodeId> {
        let token = self.cursor.next();
        let mut values = NodeList::EMPTY;

        if self.is_expression_next() {
            loop {
                let value = self.parse_expression(Precedence::Statement)?;
                self.ast.push(&mut values, value);
                if !self.cursor.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(self.ast.alloc(token.offset, AstNodeKind::ReturnExpr { values }))
    }

    fn on_prefix_operator(&mut self, op: UnaryOperator) -> ParseResult<NodeId> {
        let token = self.cursor.next();
        let operand = self.parse_expression(Precedence::Prefix)?;
        Ok(self.ast.alloc(token.offset, AstNodeKind::UnaryExpr { op, operand }))
    }

    // ========================================================================
    // Tails
    // ========================================================================

    fn parse_tail(&mut self, rule: TailRule, left: NodeId) -> ParseResult<NodeId> {
        match rule {
            TailRule::Binary(op) => self.on_binary_operator(op, left),
            TailRule::Postfix(op) => Ok(self.on_postfix_operator(op, left)),
            TailRule::Call => self.on_call(left),
        }
    }

    fn on_binary_operator(&mut self, op: BinaryOperator, left: NodeId) -> ParseResult<NodeId> {
        self.cursor.advance();
        if op == BinaryOperator::Shr {
            // second half of `>>`
            self.cursor.advance();
        }

        let offset = self.ast[left].offset;
        let right = self.parse_expression(right_operand_precedence(op))?;
        Ok(self.ast.alloc(offset, AstNodeKind::BinaryExpr { op, left, right }))
    }

    fn on_postfix_operator(&mut self, op: UnaryOperator, operand: NodeId) -> NodeId {
        self.cursor.advance();
        let offset = self.ast[operand].offset;
        self.ast.alloc(offset, AstNodeKind::UnaryExpr { op, operand })
    }

    fn on_call(&mut self, callee: NodeId) -> ParseResult<NodeId> {
        self.cursor.advance();
        let mut args = NodeList::EMPTY;

        if !self.cursor.match_kind(TokenKind::RParen) {
            loop {
                let arg = self.parse_expression(Precedence::Statement)?;
                self.ast.push(&mut args, arg);
                if !self.cursor.match_kind(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen, Message::ExpectClosingParenInCall)?;
        }

        let offset = self.ast[callee].offset;
        Ok(self.ast.alloc(offset, AstNodeKind::CallExpr { callee, args }))
    }
}

/// What an expression starting with a given token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadRule {
    Identifier,
    Literal(LiteralKind),
    Block,
    Return,
    Prefix(UnaryOperator),
}

/// What a token following a complete expression does to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TailRule {
    Binary(BinaryOperator),
    Postfix(UnaryOperator),
    Call,
}

fn lookup_head_rule(kind: TokenKind) -> Option<HeadRule> {
    let rule = match kind {
        TokenKind::Identifier => HeadRule::Identifier,
        TokenKind::DecIntLiteral => HeadRule::Literal(LiteralKind::DecInt),
        TokenKind::HexIntLiteral => HeadRule::Literal(LiteralKind::HexInt),
        TokenKind::BinIntLiteral => HeadRule::Literal(LiteralKind::BinInt),
        TokenKind::OctIntLiteral => HeadRule::Literal(LiteralKind::OctInt),
        TokenKind::FloatLiteral => HeadRule::Literal(LiteralKind::Float),
        TokenKind::CharLiteral => HeadRule::Literal(LiteralKind::Char),
        TokenKind::StringLiteral => HeadRule::Literal(LiteralKind::String),
        TokenKind::LBrace => HeadRule::Block,
        TokenKind::Keyword(KeywordId::Return) => HeadRule::Return,
        TokenKind::Ampersand => HeadRule::Prefix(UnaryOperator::AddrOf),
        TokenKind::Minus => HeadRule::Prefix(UnaryOperator::Negate),
        TokenKind::Tilde => HeadRule::Prefix(UnaryOperator::BitNot),
        TokenKind::Bang => HeadRule::Prefix(UnaryOperator::LogicNot),
        TokenKind::PlusPlus => HeadRule::Prefix(UnaryOperator::PreIncrement),
        TokenKind::MinusMinus => HeadRule::Prefix(UnaryOperator::PreDecrement),
        _ => return None,
    };
    Some(rule)
}

fn binary_rule(precedence: Precedence, op: BinaryOperator) -> Option<(Precedence, TailRule)> {
    Some((precedence, TailRule::Binary(op)))
}

/// Level at which the right operand of `op` is parsed.
fn right_operand_precedence(op: BinaryOperator) -> Precedence {
    use BinaryOperator::*;

    match op {
        Add | Sub | BitAnd | BitOr | BitXor | Shl | Shr => Precedence::AdditiveOrBit,
        Mul | Div | Rem => Precedence::Multiplicative,
        Eq | Neq | Less | LessEq | Greater | GreaterEq => Precedence::Comparison,
        LogicAnd | LogicOr => Precedence::Logical,
        Assign | AddAssign | SubAssign | MulAssign | DivAssign | RemAssign | BitAndAssign | BitOrAssign | XorAssign
        | ShlAssign | ShrAssign | LogicAndAssign | LogicOrAssign => Precedence::Assignment,
    }
}
