// src/parse/escape.rs

//! Backtick escaping shared by every lexer pass.
//!
//! A backtick right before `#`, `${` or `$(` (and before the closing `}` or
//! `)` of a reference) turns the structural prefix into literal text. A
//! backslash in front of that backtick (`` \` ``) cancels the escape and
//! stands for a literal backtick.

pub const COMMENT_PREFIX: &str = "#";
pub const ENV_VAR_PREFIX: &str = "${";
pub const EXECUTABLE_PREFIX: &str = "$(";

const ESCAPE: char = '`';
const ESCAPED_BACKTICK: &str = "\\`";

/// Which structural prefixes a lexer pass recognises.
///
/// Text unescaping is parameterised by the same set, so a pass only ever
/// removes the escapes it is responsible for and later passes still see
/// theirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    pub comment: bool,
    pub env_var: bool,
    pub executable: bool,
}

impl Grammar {
    pub const ENV_VARS: Grammar = Grammar {
        comment: false,
        env_var: true,
        executable: false,
    };

    pub const EXECUTABLES: Grammar = Grammar {
        comment: false,
        env_var: false,
        executable: true,
    };
}

/// True when `rest` starts with `prefix` and the prefix is not escaped by
/// the tail of `prev`.
pub fn is_start_of_token(prefix: &str, prev: &str, rest: &str) -> bool {
    rest.starts_with(prefix) && !is_escaped(prev)
}

/// True when the character following `prev` is escaped.
pub fn is_escaped(prev: &str) -> bool {
    prev.ends_with(ESCAPE) && !prev.ends_with(ESCAPED_BACKTICK)
}

/// Unescape a run of literal text lying between recognised tokens.
///
/// `has_next_token` tells whether a token follows this text; only then is a
/// trailing `` \` `` collapsed into a plain backtick (it was the escape
/// cancelling marker for that token).
pub fn unescape_text(content: &str, grammar: Grammar, has_next_token: bool) -> String {
    let mut out = content.to_string();

    if grammar.env_var {
        out = out.replace("`${", ENV_VAR_PREFIX);
    }
    if grammar.executable {
        out = out.replace("`$(", EXECUTABLE_PREFIX);
    }
    if grammar.comment {
        out = out.replace("`#", COMMENT_PREFIX);
    }

    if has_next_token {
        collapse_trailing_backtick(&mut out);
    }
    out
}

/// Unescape the inside of `${...}`.
pub fn unescape_env_var(inner: &str) -> String {
    let mut out = inner.replace("`}", "}");
    collapse_trailing_backtick(&mut out);
    out
}

/// Unescape the inside of `$(...)`.
///
/// `` `) `` becomes `)` outside quoted spans; quoted spans are copied as-is.
/// Quote tracking follows the lexer: a quote opens when none is open and
/// closes on the same character unless it is preceded by a backslash.
pub fn unescape_executable(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut unquoted = String::new();
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;

    for ch in inner.chars() {
        match quote {
            None if ch == '"' || ch == '\'' => {
                out.push_str(&unquoted.replace("`)", ")"));
                unquoted.clear();
                out.push(ch);
                quote = Some(ch);
            }
            None => unquoted.push(ch),
            Some(q) => {
                out.push(ch);
                if ch == q && prev != Some('\\') {
                    quote = None;
                }
            }
        }
        prev = Some(ch);
    }

    out.push_str(&unquoted.replace("`)", ")"));
    collapse_trailing_backtick(&mut out);
    out
}

fn collapse_trailing_backtick(content: &mut String) {
    if content.ends_with(ESCAPED_BACKTICK) {
        content.truncate(content.len() - ESCAPED_BACKTICK.len());
        content.push(ESCAPE);
    }
}
