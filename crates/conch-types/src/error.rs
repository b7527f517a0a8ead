//! Error types for conch.

use std::io;

/// Errors produced by the conch shell.
///
/// Everything except `Io` is local to one input line: the read loop reports
/// it and moves on to the next prompt.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("no command with this name: {0}")]
    UnknownCommandName(String),

    #[error("no command with this syntax: {0}")]
    NoMatchingSignature(String),

    #[error("incorrect number of arguments supplied: expected {expected}, found {found}")]
    ArgumentCountMismatch { expected: usize, found: usize },

    #[error("incorrect argument type supplied at position {position}, argument must be type of <{expected}>")]
    ArgumentTypeMismatch { position: usize, expected: String },

    #[error("variable with the same name already exists: {0}")]
    DuplicateVariableName(String),

    #[error("no variable with this name found: {0}")]
    UndefinedVariable(String),

    #[error("invalid variable name '{0}': only alphabetical characters and '_' allowed")]
    InvalidVariableName(String),

    #[error("could not register command '{command}': conflicts with existing '{existing}'")]
    ConflictingCommandRegistration { command: String, existing: String },

    #[error("could not register command '{command}' into the '{group}' command group")]
    GroupNameMismatch { command: String, group: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_display() {
        let e = ShellError::UnknownCommandName("frob".into());
        assert_eq!(format!("{e}"), "no command with this name: frob");
    }

    #[test]
    fn type_mismatch_names_position_and_type() {
        let e = ShellError::ArgumentTypeMismatch {
            position: 2,
            expected: "int".into(),
        };
        let msg = format!("{e}");
        assert!(msg.contains("position 2"));
        assert!(msg.contains("<int>"));
    }

    #[test]
    fn count_mismatch_display() {
        let e = ShellError::ArgumentCountMismatch {
            expected: 2,
            found: 1,
        };
        assert_eq!(
            format!("{e}"),
            "incorrect number of arguments supplied: expected 2, found 1"
        );
    }

    #[test]
    fn conflict_names_existing_command() {
        let e = ShellError::ConflictingCommandRegistration {
            command: "cmd a".into(),
            existing: "cmd a".into(),
        };
        assert!(format!("{e}").contains("existing 'cmd a'"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "gone");
        let e: ShellError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: ShellError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(ShellError::UndefinedVariable("x".into()));
        assert!(r.is_err());
    }
}
