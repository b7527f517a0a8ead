//! Shell configuration loaded from TOML.
//!
//! ```toml
//! prompt = "> "
//! show_clock = false
//! debug_level = 2
//!
//! [variables]
//! greeting = "hello world"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShellError};

/// Highest accepted diagnostic verbosity.
pub const MAX_DEBUG_LEVEL: u8 = 3;

/// Runtime configuration for a shell session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Text printed before each input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Prefix the prompt with the current UTC time.
    #[serde(default = "yes")]
    pub show_clock: bool,
    /// Initial diagnostic verbosity (0 = silent, 3 = everything).
    #[serde(default = "default_debug_level")]
    pub debug_level: u8,
    /// Variables defined before the first prompt.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

fn default_prompt() -> String {
    "$ ".to_string()
}
fn yes() -> bool {
    true
}
fn default_debug_level() -> u8 {
    MAX_DEBUG_LEVEL
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            show_clock: true,
            debug_level: MAX_DEBUG_LEVEL,
            variables: BTreeMap::new(),
        }
    }
}

impl ShellConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ShellConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded shell config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.debug_level > MAX_DEBUG_LEVEL {
            return Err(ShellError::Config(format!(
                "debug_level must be between 0 and {MAX_DEBUG_LEVEL}, got {}",
                self.debug_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ShellConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.prompt, "$ ");
        assert!(config.show_clock);
        assert_eq!(config.debug_level, 3);
    }

    #[test]
    fn full_document() {
        let text = r#"
            prompt = "> "
            show_clock = false
            debug_level = 1

            [variables]
            greeting = "hello world"
            user_name = "kim"
        "#;
        let config = ShellConfig::from_toml_str(text).unwrap();
        assert_eq!(config.prompt, "> ");
        assert!(!config.show_clock);
        assert_eq!(config.debug_level, 1);
        assert_eq!(config.variables.len(), 2);
        assert_eq!(config.variables["greeting"], "hello world");
    }

    #[test]
    fn debug_level_out_of_range() {
        let err = ShellConfig::from_toml_str("debug_level = 4").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = ShellConfig::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(matches!(err, ShellError::TomlParse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ShellConfig::load(Path::new("/nonexistent/conch.toml")).unwrap_err();
        assert!(matches!(err, ShellError::Io(_)));
    }
}
