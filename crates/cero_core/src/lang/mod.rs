//! Cero language vocabulary registries.
//!
//! Callers work with stable IDs ([`keywords::KeywordId`], [`messages::Message`]) and look up spellings and metadata via
//! registry tables instead of scattering string checks across the compiler.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.

pub mod keywords;
pub mod messages;
