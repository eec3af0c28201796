//! Tetris rules (workspace facade crate).
//!
//! Re-exports the rules core and shared types under one name, and hosts the
//! headless replay used by the `tetris-rules` binary.

pub use tetris_rules_core as core;
pub use tetris_rules_types as types;

pub mod replay;
