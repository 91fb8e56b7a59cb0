#![forbid(unsafe_code)]
//! Syntax frontend for the Cero language: source text, lexer, token cursor, parser, AST, diagnostics.
//!
//! The pipeline is `Source` → [`source::SourceView`] → [`lexer::TokenStream`] → [`ast::Ast`]. Each stage reports
//! problems to a [`diagnostics::Reporter`] instead of failing, so one pass over a file finds as many errors as possible.
//!
//! ## Notes
//! - This crate is syntax-only: it does not resolve names or check types.
//! - Keyword identity and the diagnostic catalog come from `cero_core::lang`.
//! - Tokens and AST nodes store byte offsets, not text. Resolving text or locations needs the source view they came from.
//!
//! ## Examples
//! ```rust
//! use cero_syntax::diagnostics::CollectingReporter;
//! use cero_syntax::source::Source;
//! use cero_syntax::{lexer, parser};
//!
//! let source = Source::from_string("f() { x = 1; }", "f.ce");
//! let view = source.lock().unwrap();
//! let mut reporter = CollectingReporter::new();
//! let tokens = lexer::lex(&view, &mut reporter);
//! let ast = parser::parse(&tokens, &view, &mut reporter);
//! assert_eq!(ast.definitions().len(), 1);
//! ```
//!
//! ## See also
//! - `cero_core::arena` for the storage behind the AST.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token_cursor;
