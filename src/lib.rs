#![forbid(unsafe_code)]
//! Cero Programming Language Compiler
//!
//! This crate provides the compiler driver: it sequences the syntax front end from `cero_syntax` over source files
//! and exposes it as the `cero` command-line tool.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: A panic means a compiler bug, such as a diagnostic reported with the wrong number of
//!   arguments. Those are `assert!`s with a message saying what went wrong.

pub mod cli;
pub mod compile;

pub use cero_syntax::{ast, diagnostics, lexer, parser, source};
pub use compile::{BuildConfig, BuildSummary, build_source, build_source_with_config};
