/// Parse `tokens` into an [`Ast`], reporting syntax errors to `reporter`.
///
/// ## Parameters
/// - `tokens`: Token stream produced by [`crate::lexer::run_lexer`] from `source`.
/// - `tab_size`: Tab width used for the columns of reported locations.
#[tracing::instrument(skip_all, fields(path = source.path(), token_count = tokens.len()))]
pub fn run_parser(tokens: &TokenStream, source: &SourceView<'_>, reporter: &mut dyn Reporter, tab_size: u8) -> Ast {
    let ast = Parser::new(tokens, source, reporter, tab_size).parse();
    tracing::debug!(definitions = ast.definitions().len(), nodes = ast.node_count(), "parsed source");
    ast
}

/// Parse with the default tab size.
pub fn parse(tokens: &TokenStream, source: &SourceView<'_>, reporter: &mut dyn Reporter) -> Ast {
    run_parser(tokens, source, reporter, DEFAULT_TAB_SIZE)
}
