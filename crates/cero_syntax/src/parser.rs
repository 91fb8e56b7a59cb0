//! Parser for the Cero programming language.
//!
//! Turns a [`TokenStream`] into an [`Ast`]. Definitions and statements are parsed by recursive descent, expressions by
//! precedence climbing over a head table (tokens that can start an expression) and a tail table (infix and postfix
//! tokens with their precedence).
//!
//! ## Notes
//! - Syntax errors go to a [`Reporter`]; the parser always returns a tree with whatever it could recover.
//! - A malformed definition is abandoned and parsing resumes at the next `public`, `private`, `struct` or `enum`. A
//!   malformed statement is abandoned up to the next `;` or the `}` closing its block.
//! - `>>` arrives as two `>` tokens. Adjacent ones in expression position are a shift.
//!
//! ## Examples
//!
//! ```rust
//! use cero_syntax::diagnostics::CollectingReporter;
//! use cero_syntax::source::Source;
//! use cero_syntax::{lexer, parser};
//!
//! let source = Source::from_string("main() {\n\treturn 1 + 2;\n}\n", "main.ce");
//! let view = source.lock().unwrap();
//! let mut reporter = CollectingReporter::new();
//! let tokens = lexer::lex(&view, &mut reporter);
//! let ast = parser::parse(&tokens, &view, &mut reporter);
//! assert_eq!(ast.definitions().len(), 1);
//! assert!(reporter.is_empty());
//! ```

use cero_core::lang::keywords::KeywordId;
use cero_core::lang::messages::{Message, MessageArgs};

use crate::ast::*;
use crate::diagnostics::Reporter;
use crate::lexer::{TokenKind, TokenStream};
use crate::source::{DEFAULT_TAB_SIZE, SourceOffset, SourceView};
use crate::token_cursor::TokenCursor;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
