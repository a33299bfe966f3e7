//! Turnlens Core
//!
//! Foundational error types and text primitives for the Turnlens workspace.
//! This crate has zero dependencies on analysis-level code.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `text` - Tokenization and sentence splitting shared by all analyzers
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond thiserror/serde_json** - keeps build times minimal
//! 2. **Pure helpers** - no state, no I/O; analysis never raises
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod text;

pub use error::{CoreError, CoreResult};
pub use text::{sentence_units, shared_token_count, token_set, SENTENCE_DELIMITER};
