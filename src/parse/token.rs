// src/parse/token.rs

use std::ops::Range;

/// Token kinds produced by the line lexer.
///
/// The declaration order doubles as the recognition ceiling passed to
/// [`tokenize`](super::tokenize): a kind is only recognised when it is `<=`
/// the ceiling. `Text` recognises comments only, `Executable` adds `$(..)`,
/// `EnvVar` adds `${..}` on top of that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// Unterminated reference; always paired with a [`LexError`](super::LexError).
    Error,
    /// `# ...` up to the end of the line.
    Comment,
    /// Literal text.
    Text,
    /// `$(...)`.
    Executable,
    /// `${...}`.
    EnvVar,
}

/// A classified, contiguous span of one template line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Unescaped value: the text itself, the variable name, the command line,
    /// or the comment body.
    pub content: String,
    /// The exact substring of the line this token covers, escapes included.
    pub raw: String,
    /// Byte range of `raw` in the line.
    pub span: Range<usize>,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, content: String, line: &str, span: Range<usize>) -> Self {
        Self {
            kind,
            content,
            raw: line[span.clone()].to_string(),
            span,
        }
    }
}
