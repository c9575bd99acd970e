// src/exec/args.rs

//! Quote-aware argument splitting.

use std::mem;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Unterminated quote sequence: {0}")]
    UnterminatedQuote(String),
}

/// Split a command line into whitespace-separated arguments.
///
/// A `'...'` or `"..."` span is part of one argument even when it contains
/// whitespace; the quotes themselves are dropped. Inside a span, a backslash
/// directly before the span's own quote character yields a literal quote.
/// Any other backslash is kept as-is.
pub fn split_args(line: &str) -> Result<Vec<String>, ArgsError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match quote {
            Some(q) if ch == '\\' && chars.peek() == Some(&q) => {
                chars.next();
                current.push(q);
            }
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch.is_whitespace() => {
                if in_arg {
                    args.push(mem::take(&mut current));
                    in_arg = false;
                }
            }
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_arg = true;
            }
            None => {
                current.push(ch);
                in_arg = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ArgsError::UnterminatedQuote(line.to_string()));
    }
    if in_arg {
        args.push(current);
    }
    Ok(args)
}

/// Re-join arguments that a naive split on spaces cut inside a `quote` span.
///
/// An argument starting with `quote` but not ending with it absorbs the
/// following arguments (re-inserting the separating space) up to and
/// including the first one that ends with `quote`. An unterminated span
/// absorbs the rest. Quote characters are left in place.
pub fn unsplit_on_separator(args: Vec<String>, quote: char) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        if !arg.starts_with(quote) || is_wrapped(&arg, quote) {
            out.push(arg);
            continue;
        }

        let mut joined = arg;
        for next in iter.by_ref() {
            joined.push(' ');
            joined.push_str(&next);
            if next.ends_with(quote) {
                break;
            }
        }
        out.push(joined);
    }

    out
}

/// Split a rendered command on single spaces, repair quoted spans, then drop
/// the empty pieces left by repeated spaces and strip the wrapping quotes.
pub fn split_command_line(line: &str) -> Vec<String> {
    let pieces: Vec<String> = line.split(' ').map(str::to_string).collect();
    let pieces = unsplit_on_separator(pieces, '"');
    let pieces = unsplit_on_separator(pieces, '\'');

    pieces
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(strip_wrapping_quotes)
        .collect()
}

fn is_wrapped(arg: &str, quote: char) -> bool {
    arg.len() > quote.len_utf8() && arg.starts_with(quote) && arg.ends_with(quote)
}

fn strip_wrapping_quotes(arg: String) -> String {
    for quote in ['"', '\''] {
        if is_wrapped(&arg, quote) {
            return arg[1..arg.len() - 1].to_string();
        }
    }
    arg
}
