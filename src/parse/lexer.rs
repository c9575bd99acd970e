// src/parse/lexer.rs

//! Line lexer for the template mini-language.
//!
//! The lexer is an explicit state machine. [`Lexer::step`] is a pure
//! transition: given the current state and a position in the line it returns
//! the next state, how many bytes were consumed and which tokens (if any)
//! were completed. [`Lexer::finish`] handles end of line.
//!
//! Every token keeps the exact slice it was cut from in `raw`, so the tokens
//! of a line always concatenate back to the line.

use thiserror::Error;

use super::escape::{
    COMMENT_PREFIX, ENV_VAR_PREFIX, EXECUTABLE_PREFIX, Grammar, is_start_of_token,
    unescape_env_var, unescape_executable, unescape_text,
};
use super::token::{Token, TokenKind};

/// Lexical error for one line. The payload is the unterminated fragment as
/// the user wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Missing closing bracket for environment variable: {0}")]
    MissingClosingBracket(String),

    #[error("Unterminated quote sequence for executable: {0}")]
    UnterminatedQuote(String),

    #[error("Missing closing parenthesis for executable: {0}")]
    MissingClosingParenthesis(String),
}

/// Result of [`tokenize`]: the tokens plus the line's fatal, if any.
///
/// When `error` is set the last token is a [`TokenKind::Error`] covering the
/// unterminated fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub error: Option<LexError>,
}

/// Result of the single-kind scans ([`tokenize_env_vars`],
/// [`tokenize_executables`]).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scan {
    pub tokens: Vec<Token>,
    /// At least one token of the scanned kind was found.
    pub found: bool,
}

/// Tokenize one line, recognising token kinds up to `ceiling`.
///
/// Comments are always recognised and end the line: nothing after a comment
/// is ever tokenized.
pub fn tokenize(line: &str, ceiling: TokenKind) -> Tokenized {
    let grammar = Grammar {
        comment: true,
        env_var: ceiling >= TokenKind::EnvVar,
        executable: ceiling >= TokenKind::Executable,
    };
    Lexer::new(line, grammar).run()
}

/// Scan comment-free content for `${...}` references only.
pub fn tokenize_env_vars(line: &str) -> Result<Scan, LexError> {
    scan(line, Grammar::ENV_VARS, TokenKind::EnvVar)
}

/// Scan comment-free content for `$(...)` references only.
pub fn tokenize_executables(line: &str) -> Result<Scan, LexError> {
    scan(line, Grammar::EXECUTABLES, TokenKind::Executable)
}

fn scan(line: &str, grammar: Grammar, kind: TokenKind) -> Result<Scan, LexError> {
    let Tokenized { tokens, error } = Lexer::new(line, grammar).run();
    if let Some(err) = error {
        return Err(err);
    }
    let found = tokens.iter().any(|t| t.kind == kind);
    Ok(Scan { tokens, found })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text { start: usize },
    EnvVar { start: usize },
    Executable { start: usize, quote: Option<char> },
    Comment,
}

#[derive(Debug)]
struct Step {
    next: State,
    consumed: usize,
    emitted: Vec<Token>,
}

impl Step {
    fn advance(next: State, consumed: usize) -> Self {
        Self {
            next,
            consumed,
            emitted: Vec::new(),
        }
    }
}

struct Lexer<'a> {
    line: &'a str,
    grammar: Grammar,
}

impl<'a> Lexer<'a> {
    fn new(line: &'a str, grammar: Grammar) -> Self {
        Self { line, grammar }
    }

    fn run(&self) -> Tokenized {
        let mut tokens = Vec::new();
        let mut state = State::Text { start: 0 };
        let mut pos = 0;

        while pos < self.line.len() {
            let step = self.step(state, pos);
            tokens.extend(step.emitted);
            state = step.next;
            pos += step.consumed;
        }

        let (tail, error) = self.finish(state);
        tokens.extend(tail);
        Tokenized { tokens, error }
    }

    fn step(&self, state: State, pos: usize) -> Step {
        let prev = &self.line[..pos];
        let rest = &self.line[pos..];
        let ch = rest.chars().next().unwrap_or_default();

        match state {
            State::Text { start } => self.step_text(start, pos, prev, rest, ch),
            State::EnvVar { start } => self.step_env_var(start, pos, prev, rest, ch),
            State::Executable { start, quote } => {
                self.step_executable(start, quote, pos, prev, rest, ch)
            }
            State::Comment => Step::advance(State::Comment, rest.len()),
        }
    }

    fn step_text(&self, start: usize, pos: usize, prev: &str, rest: &str, ch: char) -> Step {
        let opened = if self.grammar.env_var && is_start_of_token(ENV_VAR_PREFIX, prev, rest) {
            Some((State::EnvVar { start: pos }, ENV_VAR_PREFIX.len()))
        } else if self.grammar.executable && is_start_of_token(EXECUTABLE_PREFIX, prev, rest) {
            Some((State::Executable { start: pos, quote: None }, EXECUTABLE_PREFIX.len()))
        } else if self.grammar.comment && is_start_of_token(COMMENT_PREFIX, prev, rest) {
            Some((State::Comment, rest.len()))
        } else {
            None
        };

        let Some((next, consumed)) = opened else {
            return Step::advance(State::Text { start }, ch.len_utf8());
        };

        let mut emitted = Vec::new();
        if start < pos {
            emitted.push(self.text_token(start, pos, true));
        }
        if next == State::Comment {
            let body = rest[COMMENT_PREFIX.len()..].to_string();
            emitted.push(Token::new(TokenKind::Comment, body, self.line, pos..self.line.len()));
        }

        Step {
            next,
            consumed,
            emitted,
        }
    }

    fn step_env_var(&self, start: usize, pos: usize, prev: &str, rest: &str, ch: char) -> Step {
        if !is_start_of_token("}", prev, rest) {
            return Step::advance(State::EnvVar { start }, ch.len_utf8());
        }

        let inner = &self.line[start + ENV_VAR_PREFIX.len()..pos];
        let token = Token::new(
            TokenKind::EnvVar,
            unescape_env_var(inner),
            self.line,
            start..pos + 1,
        );
        Step {
            next: State::Text { start: pos + 1 },
            consumed: 1,
            emitted: vec![token],
        }
    }

    fn step_executable(
        &self,
        start: usize,
        quote: Option<char>,
        pos: usize,
        prev: &str,
        rest: &str,
        ch: char,
    ) -> Step {
        let quote = match quote {
            None if ch == '"' || ch == '\'' => Some(ch),
            Some(q) if ch == q && !prev.ends_with('\\') => None,
            other => other,
        };

        if quote.is_some() || !is_start_of_token(")", prev, rest) {
            return Step::advance(State::Executable { start, quote }, ch.len_utf8());
        }

        let inner = &self.line[start + EXECUTABLE_PREFIX.len()..pos];
        let token = Token::new(
            TokenKind::Executable,
            unescape_executable(inner),
            self.line,
            start..pos + 1,
        );
        Step {
            next: State::Text { start: pos + 1 },
            consumed: 1,
            emitted: vec![token],
        }
    }

    fn finish(&self, state: State) -> (Option<Token>, Option<LexError>) {
        let end = self.line.len();

        match state {
            State::Text { start } if start < end => (Some(self.text_token(start, end, false)), None),
            State::Text { .. } | State::Comment => (None, None),
            State::EnvVar { start } => {
                let fragment = self.line[start..].to_string();
                (
                    Some(self.error_token(start)),
                    Some(LexError::MissingClosingBracket(fragment)),
                )
            }
            State::Executable { start, quote } => {
                let fragment = self.line[start..].to_string();
                let error = if quote.is_some() {
                    LexError::UnterminatedQuote(fragment)
                } else {
                    LexError::MissingClosingParenthesis(fragment)
                };
                (Some(self.error_token(start)), Some(error))
            }
        }
    }

    fn text_token(&self, start: usize, end: usize, has_next_token: bool) -> Token {
        let content = unescape_text(&self.line[start..end], self.grammar, has_next_token);
        Token::new(TokenKind::Text, content, self.line, start..end)
    }

    fn error_token(&self, start: usize) -> Token {
        Token::new(TokenKind::Error, String::new(), self.line, start..self.line.len())
    }
}
