//! Typed command arguments.
//!
//! Each position in a command signature is an [`ArgumentType`]. Parsing a
//! token against it yields an [`ArgValue`] or fails.

use std::fmt;

use conch_types::error::{Result, ShellError};

use crate::diagnostics::DiagnosticSink;
use crate::tokenizer;
use crate::variables::VariableStore;

/// Type name reported by fixed keyword arguments.
pub const KEYWORD: &str = "keyword";

/// One position of a command signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentType {
    /// A literal route segment, matched exactly.
    Fixed(String),
    /// Any token, taken as-is.
    Text { label: String },
    /// A base-10 integer within `min..=max`.
    Int { min: i64, max: i64, label: String },
}

/// A successfully parsed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Keyword(String),
    Text(String),
    Int(i64),
}

impl ArgumentType {
    pub fn fixed(keyword: impl Into<String>) -> Self {
        Self::Fixed(keyword.into())
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::Text {
            label: label.into(),
        }
    }

    pub fn int(min: i64, max: i64, label: impl Into<String>) -> Self {
        Self::Int {
            min,
            max,
            label: label.into(),
        }
    }

    /// Convert one token, or `None` if it doesn't fit this type.
    pub fn parse(&self, token: &str) -> Option<ArgValue> {
        match self {
            Self::Fixed(keyword) => (keyword == token).then(|| ArgValue::Keyword(keyword.clone())),
            Self::Text { .. } => Some(ArgValue::Text(token.to_string())),
            Self::Int { min, max, .. } => token
                .parse::<i64>()
                .ok()
                .filter(|n| (*min..=*max).contains(n))
                .map(ArgValue::Int),
        }
    }

    /// Type name used in help text and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Fixed(_) => KEYWORD,
            Self::Text { .. } => "string",
            Self::Int { .. } => "int",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Fixed(_) => KEYWORD,
            Self::Text { label } | Self::Int { label, .. } => label,
        }
    }

    /// The literal text of a fixed argument.
    pub fn keyword(&self) -> Option<&str> {
        match self {
            Self::Fixed(keyword) => Some(keyword.as_str()),
            _ => None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(keyword) => write!(f, "{keyword}"),
            Self::Text { label } => write!(f, "<string: {label}>"),
            Self::Int { min, max, label } => write!(f, "<int {min}-{max}: {label}>"),
        }
    }
}

impl ArgValue {
    /// The value as text. Integers are formatted in base 10.
    pub fn as_text(&self) -> String {
        match self {
            Self::Keyword(s) | Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Keyword(s) | Self::Text(s) => Some(s.as_str()),
            Self::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// Tokenize `raw` and convert every token against `signature`.
pub fn parse_arguments(
    raw: &str,
    signature: &[ArgumentType],
    vars: &VariableStore,
    diag: &mut dyn DiagnosticSink,
) -> Result<Vec<ArgValue>> {
    let tokens = tokenizer::separate(raw, vars, diag);
    convert(&tokens, signature)
}

/// Convert already-split tokens against `signature`.
pub fn convert(tokens: &[String], signature: &[ArgumentType]) -> Result<Vec<ArgValue>> {
    if tokens.len() != signature.len() {
        return Err(ShellError::ArgumentCountMismatch {
            expected: signature.len(),
            found: tokens.len(),
        });
    }

    tokens
        .iter()
        .zip(signature)
        .enumerate()
        .map(|(i, (token, arg))| {
            arg.parse(token)
                .ok_or_else(|| ShellError::ArgumentTypeMismatch {
                    position: i + 1,
                    expected: arg.type_name().to_string(),
                })
        })
        .collect()
}
