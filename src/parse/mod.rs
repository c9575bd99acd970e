// src/parse/mod.rs

//! Tokenizer for template lines.
//!
//! - [`lexer`] holds the line state machine and the two single-kind scans
//!   used by later resolution passes.
//! - [`escape`] holds the backtick escaping rules they all share.
//! - [`token`] holds the token types.

pub mod escape;
pub mod lexer;
pub mod token;

pub use escape::Grammar;
pub use lexer::{LexError, Scan, Tokenized, tokenize, tokenize_env_vars, tokenize_executables};
pub use token::{Token, TokenKind};
