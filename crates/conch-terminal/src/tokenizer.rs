//! Splits a raw input line into argument tokens.
//!
//! - Unquoted words are separated by spaces.
//! - `"..."` is taken verbatim as one token, spaces included.
//! - `*name*` is replaced by the value of variable `name`, as one token.
//!
//! Empty tokens (from consecutive spaces, `""`, or an empty variable) are
//! dropped. A quote or variable span with no closing delimiter runs to the
//! end of the line without complaint.

use std::str::CharIndices;

use crate::diagnostics::DiagnosticSink;
use crate::variables::VariableStore;

/// A token together with where its source text ends in the raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offset just past the token's source (after a closing delimiter).
    pub end: usize,
}

/// Split `raw` into tokens, substituting variables from `vars`.
///
/// An undefined variable is reported to `diag` and substitutes to nothing.
pub fn separate(raw: &str, vars: &VariableStore, diag: &mut dyn DiagnosticSink) -> Vec<String> {
    scan(raw, vars, diag).into_iter().map(|t| t.text).collect()
}

/// Like [`separate`], but keeps source offsets.
pub fn scan(raw: &str, vars: &VariableStore, diag: &mut dyn DiagnosticSink) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = raw.char_indices();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => {
                flush(&mut tokens, &mut current, i);
                let (text, end) = take_span(&mut chars, '"', raw.len());
                tokens.push(Token { text, end });
            },
            '*' => {
                flush(&mut tokens, &mut current, i);
                let (name, end) = take_span(&mut chars, '*', raw.len());
                let text = match vars.get(&name) {
                    Ok(value) => value.to_string(),
                    Err(e) => {
                        diag.error(&e.to_string());
                        String::new()
                    },
                };
                tokens.push(Token { text, end });
            },
            ' ' => flush(&mut tokens, &mut current, i),
            _ => current.push(ch),
        }
    }
    flush(&mut tokens, &mut current, raw.len());

    tokens.into_iter().filter(|t| !t.text.is_empty()).collect()
}

fn flush(tokens: &mut Vec<Token>, current: &mut String, end: usize) {
    tokens.push(Token {
        text: std::mem::take(current),
        end,
    });
}

/// Consume characters up to and including `delim`.
///
/// Returns the enclosed text and the offset just past the delimiter, or the
/// end of input if the span is unterminated.
fn take_span(chars: &mut CharIndices<'_>, delim: char, len: usize) -> (String, usize) {
    let mut text = String::new();
    for (i, ch) in chars.by_ref() {
        if ch == delim {
            return (text, i + delim.len_utf8());
        }
        text.push(ch);
    }
    (text, len)
}
