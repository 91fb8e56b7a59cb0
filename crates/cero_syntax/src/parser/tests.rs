#[cfg(test)]
/// Parser unit tests.
///
/// These cover the expression grammar, the shape of the tree and the two recovery levels. Error tests compare the full
/// sequence of reported diagnostics so that cascades show up as extra entries.
mod tests {
    use super::*;
    use crate::diagnostics::CollectingReporter;
    use crate::lexer::{LexerFlags, run_lexer};
    use crate::source::Source;
    use cero_core::lang::messages::format_message;

    fn parse_with_flags(text: &str, flags: LexerFlags) -> (String, Ast, CollectingReporter) {
        let source = Source::from_string(text, "test.ce");
        let view = source.lock().unwrap();
        let mut reporter = CollectingReporter::new();
        let tokens = run_lexer(&view, &mut reporter, flags, DEFAULT_TAB_SIZE);
        let ast = run_parser(&tokens, &view, &mut reporter, DEFAULT_TAB_SIZE);
        let dumped = dump(&ast, &view, DEFAULT_TAB_SIZE);
        (dumped, ast, reporter)
    }

    fn parse_str(text: &str) -> (String, Ast, CollectingReporter) {
        parse_with_flags(text, LexerFlags::NONE)
    }

    fn parse_clean(text: &str) -> (String, Ast) {
        let (dumped, ast, reporter) = parse_str(text);
        assert!(reporter.is_empty(), "unexpected diagnostics: {:?}", reporter.diagnostics());
        (dumped, ast)
    }

    fn assert_diagnostics(text: &str, expected: &[(u32, u32, Message, &str)]) {
        let (_, _, reporter) = parse_str(text);
        let actual: Vec<(u32, u32, String)> = reporter
            .diagnostics()
            .iter()
            .map(|d| (d.location.line, d.location.column, d.text.clone()))
            .collect();
        let expected: Vec<(u32, u32, String)> = expected
            .iter()
            .map(|&(line, column, message, found)| (line, column, format_message(message, &MessageArgs::from(found))))
            .collect();
        assert_eq!(actual, expected);
    }

    /// The single statement of the single function in `ast`.
    fn only_statement(ast: &Ast) -> NodeId {
        let definitions = ast.definitions();
        assert_eq!(definitions.len(), 1);
        match ast[definitions[0]].kind {
            AstNodeKind::FunctionDefinition(function) => {
                let statements = ast.list(&function.statements);
                assert_eq!(statements.len(), 1);
                statements[0]
            }
            other => panic!("expected function definition, got {other:?}"),
        }
    }

    fn binary(ast: &Ast, id: NodeId) -> (BinaryOperator, NodeId, NodeId) {
        match ast[id].kind {
            AstNodeKind::BinaryExpr { op, left, right } => (op, left, right),
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    // ========================================================================
    // Definitions
    // ========================================================================

    #[test]
    fn test_parse_empty_function() {
        let source = Source::from_string("main() {}", "test.ce");
        let view = source.lock().unwrap();
        let mut reporter = CollectingReporter::new();
        let tokens = run_lexer(&view, &mut reporter, LexerFlags::NONE, DEFAULT_TAB_SIZE);
        let ast = run_parser(&tokens, &view, &mut reporter, DEFAULT_TAB_SIZE);
        assert!(reporter.is_empty());

        let definitions = ast.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(ast[definitions[0]].offset, 0);
        let AstNodeKind::FunctionDefinition(function) = ast[definitions[0]].kind else {
            panic!("expected function definition, got {:?}", ast[definitions[0]].kind);
        };
        assert_eq!(function.access, AccessModifier::None);
        assert_eq!(ast.name_text(function.name, &view), "main");
        assert!(ast.list(&function.parameters).is_empty());
        assert!(ast.list(&function.outputs).is_empty());
        assert!(ast.list(&function.statements).is_empty());
    }

    #[test]
    fn test_parse_empty_source() {
        let (dumped, ast) = parse_clean("");
        assert!(ast.definitions().is_empty());
        assert_eq!(dumped, "Root\n");
    }

    #[test]
    fn test_access_modifiers() {
        let (_, ast) = parse_clean("private a() {}\npublic b() {}\nc() {}");
        let access: Vec<AccessModifier> = ast
            .definitions()
            .iter()
            .map(|&id| match ast[id].kind {
                AstNodeKind::FunctionDefinition(function) => function.access,
                other => panic!("expected function definition, got {other:?}"),
            })
            .collect();
        assert_eq!(access, [AccessModifier::Private, AccessModifier::Public, AccessModifier::None]);
        // the definition starts at its access modifier
        assert_eq!(ast[ast.definitions()[1]].offset, 15);
    }

    #[test]
    fn test_dump_function_with_signature() {
        let (dumped, _) = parse_clean("add(int32 a, int32 b) -> int32 {\n\treturn a + b * 2;\n}\n");
        insta::assert_snapshot!(dumped, @r"
        Root
          FunctionDefinition `add` access=none [1:1]
            parameters
              FunctionParameter `a` [1:5]
                IdentExpr `int32` [1:5]
              FunctionParameter `b` [1:14]
                IdentExpr `int32` [1:14]
            outputs
              FunctionOutput [1:26]
                IdentExpr `int32` [1:26]
            statements
              ReturnExpr [2:5]
                BinaryExpr add [2:12]
                  IdentExpr `a` [2:12]
                  BinaryExpr mul [2:16]
                    IdentExpr `b` [2:16]
                    LiteralExpr dec_int `2` [2:20]
        ");
    }

    #[test]
    fn test_multiple_outputs() {
        let (_, ast) = parse_clean("f() -> int32, bool { return 1, true; }");
        let function = match ast[ast.definitions()[0]].kind {
            AstNodeKind::FunctionDefinition(function) => function,
            other => panic!("expected function definition, got {other:?}"),
        };
        assert_eq!(ast.list(&function.outputs).len(), 2);
        match ast[only_statement(&ast)].kind {
            AstNodeKind::ReturnExpr { values } => assert_eq!(ast.list(&values).len(), 2),
            other => panic!("expected return, got {other:?}"),
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_operator_precedence() {
        let (_, ast) = parse_clean(
            "baz(int32 a, int32 b, int32 c, int32 d) -> bool {\n\
             \treturn a + b == b + c && b + c != c + d && a < c && a > d;\n}\n",
        );
        let value = match ast[only_statement(&ast)].kind {
            AstNodeKind::ReturnExpr { values } => ast.list(&values)[0],
            other => panic!("expected return, got {other:?}"),
        };

        let (op, left, greater) = binary(&ast, value);
        assert_eq!(op, BinaryOperator::LogicAnd);
        assert_eq!(binary(&ast, greater).0, BinaryOperator::Greater);

        let (op, left, less) = binary(&ast, left);
        assert_eq!(op, BinaryOperator::LogicAnd);
        assert_eq!(binary(&ast, less).0, BinaryOperator::Less);

        let (op, eq, neq) = binary(&ast, left);
        assert_eq!(op, BinaryOperator::LogicAnd);
        assert_eq!(binary(&ast, neq).0, BinaryOperator::Neq);

        let (op, sum, _) = binary(&ast, eq);
        assert_eq!(op, BinaryOperator::Eq);
        assert_eq!(binary(&ast, sum).0, BinaryOperator::Add);
    }

    #[test]
    fn test_binary_operators_are_left_associative() {
        let (_, ast) = parse_clean("f() { a - b - c; }");
        let (op, left, right) = binary(&ast, only_statement(&ast));
        assert_eq!(op, BinaryOperator::Sub);
        assert_eq!(binary(&ast, left).0, BinaryOperator::Sub);
        assert!(matches!(ast[right].kind, AstNodeKind::IdentExpr { .. }));
    }

    #[test]
    fn test_assignment_binds_loosest() {
        let (_, ast) = parse_clean("f() { x += a * b || c; }");
        let (op, _, right) = binary(&ast, only_statement(&ast));
        assert_eq!(op, BinaryOperator::AddAssign);
        let (op, left, _) = binary(&ast, right);
        assert_eq!(op, BinaryOperator::LogicOr);
        assert_eq!(binary(&ast, left).0, BinaryOperator::Mul);
    }

    #[test]
    fn test_adjacent_angles_are_shift_right() {
        let (_, ast) = parse_clean("f() { a >> b + c; }");
        // `>>` shares a level with `+`, so the two fold left to right
        let (op, shift, _) = binary(&ast, only_statement(&ast));
        assert_eq!(op, BinaryOperator::Add);
        let (op, left, right) = binary(&ast, shift);
        assert_eq!(op, BinaryOperator::Shr);
        assert!(matches!(ast[left].kind, AstNodeKind::IdentExpr { .. }));
        assert!(matches!(ast[right].kind, AstNodeKind::IdentExpr { .. }));
        assert_eq!(ast[shift].offset, 6);
    }

    #[test]
    fn test_separated_angles_are_not_a_shift() {
        assert_diagnostics("f() { a > > b; }", &[(1, 11, Message::ExpectExpression, "`>`")]);
        let (_, ast) = parse_clean("f() { a > b; }");
        assert_eq!(binary(&ast, only_statement(&ast)).0, BinaryOperator::Greater);
    }

    #[test]
    fn test_shift_assign_is_one_token() {
        let (_, ast) = parse_clean("f() { a >>= 2; a <<= 1; }");
        let function = match ast[ast.definitions()[0]].kind {
            AstNodeKind::FunctionDefinition(function) => function,
            other => panic!("expected function definition, got {other:?}"),
        };
        let ops: Vec<BinaryOperator> = ast.list(&function.statements).iter().map(|&id| binary(&ast, id).0).collect();
        assert_eq!(ops, [BinaryOperator::ShrAssign, BinaryOperator::ShlAssign]);
    }

    #[test]
    fn test_prefix_and_postfix_operators() {
        let (dumped, _) = parse_clean("f() { -x^++; !&y; foo(1, \"s\")(); }");
        insta::assert_snapshot!(dumped, @r#"
        Root
          FunctionDefinition `f` access=none [1:1]
            statements
              UnaryExpr negate [1:7]
                UnaryExpr post_increment [1:8]
                  UnaryExpr deref [1:8]
                    IdentExpr `x` [1:8]
              UnaryExpr logic_not [1:14]
                UnaryExpr addr_of [1:15]
                  IdentExpr `y` [1:16]
              CallExpr [1:19]
                CallExpr [1:19]
                  IdentExpr `foo` [1:19]
                  arguments
                    LiteralExpr dec_int `1` [1:23]
                    LiteralExpr string `"s"` [1:26]
        "#);
    }

    #[test]
    fn test_nested_block_needs_no_semicolon() {
        let (_, ast) = parse_clean("f() { { x; } }");
        match ast[only_statement(&ast)].kind {
            AstNodeKind::BlockExpr { statements } => assert_eq!(ast.list(&statements).len(), 1),
            other => panic!("expected block, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_return() {
        let (_, ast) = parse_clean("f() { return; }");
        match ast[only_statement(&ast)].kind {
            AstNodeKind::ReturnExpr { values } => assert!(values.is_empty()),
            other => panic!("expected return, got {other:?}"),
        }
    }

    #[test]
    fn test_literal_kinds() {
        let (_, ast) = parse_clean("f() { return 1, 0x1, 0b1, 0o1, 1.5, 'c', \"s\"; }");
        let values = match ast[only_statement(&ast)].kind {
            AstNodeKind::ReturnExpr { values } => values,
            other => panic!("expected return, got {other:?}"),
        };
        let kinds: Vec<LiteralKind> = ast
            .list(&values)
            .iter()
            .map(|&id| match ast[id].kind {
                AstNodeKind::LiteralExpr { kind, .. } => kind,
                other => panic!("expected literal, got {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            [
                LiteralKind::DecInt,
                LiteralKind::HexInt,
                LiteralKind::BinInt,
                LiteralKind::OctInt,
                LiteralKind::Float,
                LiteralKind::Char,
                LiteralKind::String,
            ]
        );
    }

    #[test]
    fn test_comment_tokens_are_skipped() {
        let text = "/* doc */ f(/* a */) { // note\n\tx; }";
        let (with_comments, _, reporter) = parse_with_flags(text, LexerFlags::NONE.with_emit_comments(true));
        assert!(reporter.is_empty());
        let (without_comments, _) = parse_clean(text);
        assert_eq!(with_comments, without_comments);
    }

    // ========================================================================
    // Errors and recovery
    // ========================================================================

    #[test]
    fn test_expect_function_struct_or_enum() {
        assert_diagnostics(
            "\nmain() {\n}\n\n() {\n}\n\nfoo() {\n}\n",
            &[(5, 1, Message::ExpectFunctionStructOrEnum, "`(`")],
        );
    }

    #[test]
    fn test_expect_paren_after_function_name() {
        assert_diagnostics("\nmain) {\n}\n", &[(2, 5, Message::ExpectParenAfterFunctionName, "`)`")]);
    }

    #[test]
    fn test_expect_parameter_type() {
        assert_diagnostics(
            "\nfoo(, bool x) -> bool {\n\treturn x;\n}\n",
            &[(2, 5, Message::ExpectParameterType, "`,`")],
        );
    }

    #[test]
    fn test_expect_parameter_name() {
        assert_diagnostics(
            "\nfoo(bool, bool x) -> bool {\n\treturn x;\n}\n",
            &[(2, 9, Message::ExpectParameterName, "`,`")],
        );
    }

    #[test]
    fn test_expect_paren_after_parameters() {
        assert_diagnostics(
            "\nprivate foo(bool x -> bool {\n\treturn x;\n}\n\nprivate goo(bool x} -> bool {\n\treturn x;\n}\n",
            &[
                (2, 20, Message::ExpectParenAfterParameters, "`->`"),
                (6, 19, Message::ExpectParenAfterParameters, "`}`"),
            ],
        );
    }

    #[test]
    fn test_expect_return_type() {
        assert_diagnostics(
            "\nprivate foo(bool x) -> {\n\treturn x;\n}\n\nprivate goo() -> % {\n}\n",
            &[
                (2, 24, Message::ExpectReturnType, "`{`"),
                (6, 18, Message::ExpectReturnType, "`%`"),
                (6, 18, Message::ExpectBraceBeforeFunctionBody, "`%`"),
            ],
        );
    }

    #[test]
    fn test_missing_return_type_keeps_definition() {
        let (dumped, ast, reporter) = parse_str("f() -> {}");
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(ast.definitions().len(), 1);
        assert!(dumped.contains("<missing type>"));
    }

    #[test]
    fn test_expect_brace_before_function_body() {
        assert_diagnostics(
            "\nfoo(bool x) -> bool\n\treturn x;\n}\n\npublic goo() -> void\n}\n\npublic hoo() -< void {\n}\n",
            &[
                (3, 5, Message::ExpectBraceBeforeFunctionBody, "`return`"),
                (7, 1, Message::ExpectBraceBeforeFunctionBody, "`}`"),
                (9, 14, Message::ExpectBraceBeforeFunctionBody, "`-`"),
            ],
        );
    }

    #[test]
    fn test_expect_expression() {
        assert_diagnostics(
            "\na() {\n    ]\n}\n\nc() {\n\tfoo(\n}\n\nb() {\n    += x\n}\n\nfoo() {\n}\n",
            &[
                (3, 5, Message::ExpectExpression, "`]`"),
                (8, 1, Message::ExpectExpression, "`}`"),
                (11, 5, Message::ExpectExpression, "`+=`"),
            ],
        );
    }

    #[test]
    fn test_expect_semicolon() {
        assert_diagnostics(
            "\na() {\n    return 0\n}\n\nb() {\n    return 0;\n}\n",
            &[(4, 1, Message::ExpectSemicolon, "`}`")],
        );
    }

    #[test]
    fn test_expect_closing_paren_in_call() {
        assert_diagnostics(
            "\nfoo(int32 _) {\n}\n\nf() {\n\tfoo(1\n}\n\ng() {\n\tfoo(2);\n}\n",
            &[(7, 1, Message::ExpectClosingParenInCall, "`}`")],
        );
    }

    #[test]
    fn test_statement_recovery_keeps_later_statements() {
        let (_, ast, reporter) = parse_str("f() {\n\t];\n\tx;\n}");
        assert_eq!(reporter.error_count(), 1);
        assert!(matches!(ast[only_statement(&ast)].kind, AstNodeKind::IdentExpr { .. }));
    }

    #[test]
    fn test_unclosed_block_stops_at_end_of_file() {
        assert_diagnostics("f() {\n\tx", &[(2, 6, Message::ExpectSemicolon, "end of file")]);
        let (_, ast, _) = parse_str("f() {\n\tx");
        assert_eq!(ast.definitions().len(), 1);
    }

    #[test]
    fn test_definition_recovery_stops_at_reserved_keywords() {
        assert_diagnostics(
            "1 struct 2 enum x() {}",
            &[
                (1, 1, Message::ExpectFunctionStructOrEnum, "integer literal `1`"),
                (1, 3, Message::ExpectFunctionStructOrEnum, "`struct`"),
                (1, 12, Message::ExpectFunctionStructOrEnum, "`enum`"),
            ],
        );
    }

    #[test]
    fn test_errors_describe_found_token() {
        assert_diagnostics(
            "f() { return 1 \"s\" }",
            &[(1, 16, Message::ExpectSemicolon, "string literal \"s\"")],
        );
        assert_diagnostics("f(bool x, y z", &[(1, 14, Message::ExpectParenAfterParameters, "end of file")]);
    }

    // ========================================================================
    // Nesting limit
    // ========================================================================

    #[test]
    fn test_deeply_nested_blocks_are_reported() {
        let text = format!("f() {{ {}{} }}", "{".repeat(20_000), "}".repeat(20_000));
        // the 257th inner `{` is one level too deep; the first unmatched `}` then ends up at top level
        assert_diagnostics(
            &text,
            &[
                (1, 263, Message::NestingTooDeep, "256"),
                (1, 20_264, Message::ExpectFunctionStructOrEnum, "`}`"),
            ],
        );
        let (_, ast, _) = parse_str(&text);
        assert_eq!(ast.definitions().len(), 1);
    }

    #[test]
    fn test_deeply_nested_prefix_operators_are_reported() {
        let text = format!("f() {{ {}x; y; }}", "!".repeat(200_000));
        assert_diagnostics(&text, &[(1, 262, Message::NestingTooDeep, "256")]);

        // recovery resumes after the `;`
        let (_, ast, _) = parse_str(&text);
        let statement = only_statement(&ast);
        assert!(matches!(ast[statement].kind, AstNodeKind::IdentExpr { .. }));
    }

    #[test]
    fn test_nesting_up_to_the_limit_is_accepted() {
        let text = format!("f() {{ {}x; }}", "!".repeat(200));
        let (_, ast) = parse_clean(&text);
        let mut node = only_statement(&ast);
        let mut negations = 0;
        while let AstNodeKind::UnaryExpr { op, operand } = ast[node].kind {
            assert_eq!(op, UnaryOperator::LogicNot);
            negations += 1;
            node = operand;
        }
        assert_eq!(negations, 200);
    }

    #[test]
    fn test_long_operator_chain_is_not_nested() {
        // left-associative chains are built in a loop, so their length is not limited
        let text = format!("f() {{ {}a; }}", "a + ".repeat(3_000));
        let (dumped, ast) = parse_clean(&text);
        assert_eq!(ast.node_count(), 1 + 3_000 * 2 + 1);
        assert_eq!(dumped.lines().count(), 3 + 3_000 * 2 + 1);
        assert!(dumped.ends_with("IdentExpr `a` [1:12007]\n"));
    }
}
