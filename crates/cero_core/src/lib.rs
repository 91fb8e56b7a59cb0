#![forbid(unsafe_code)]
//! Foundation crate for the Cero compiler: arena storage and canonical language vocabulary.
//!
//! Everything else in the compiler builds on the types here. The syntax crate allocates its AST in an [`arena::Arena`],
//! recognizes keywords through [`lang::keywords`], and reports diagnostics from the [`lang::messages`] catalog.
//!
//! ## Notes
//!
//! - This is a “core” crate: **no IO**, no global state, and no syntax-specific types.
//! - Registries are `const` tables so the lexer can consult them without any runtime setup.
//!
//! ## Examples
//! ```rust
//! use cero_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("while"), Some(KeywordId::While));
//! assert_eq!(keywords::as_str(KeywordId::Return), "return");
//! ```

pub mod arena;
pub mod lang;
