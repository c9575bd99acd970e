#![allow(dead_code)]

pub use reqtmpl_test_utils::builders::texts;
pub use reqtmpl_test_utils::{SectionsBuilder, init_tracing, with_timeout};

use reqtmpl::parse::{Token, TokenKind};

/// `(kind, content)` pairs, for compact token assertions.
pub fn kinds_and_contents(tokens: &[Token]) -> Vec<(TokenKind, String)> {
    tokens.iter().map(|t| (t.kind, t.content.clone())).collect()
}
