//! Named string variables, substituted into input with `*name*`.

use conch_types::error::{Result, ShellError};

/// A single shell variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

/// Flat, insertion-ordered set of variables with unique names.
#[derive(Debug, Default)]
pub struct VariableStore {
    variables: Vec<Variable>,
}

/// Whether `name` is a legal variable name (`^[a-zA-Z_]+$`).
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == '_')
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a new variable.
    pub fn add(&mut self, name: &str, value: &str) -> Result<()> {
        if !is_valid_name(name) {
            return Err(ShellError::InvalidVariableName(name.to_string()));
        }
        if self.position(name).is_some() {
            return Err(ShellError::DuplicateVariableName(name.to_string()));
        }
        self.variables.push(Variable {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    /// Look up a variable's value.
    pub fn get(&self, name: &str) -> Result<&str> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
            .ok_or_else(|| ShellError::UndefinedVariable(name.to_string()))
    }

    /// Overwrite an existing variable.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let idx = self
            .position(name)
            .ok_or_else(|| ShellError::UndefinedVariable(name.to_string()))?;
        self.variables[idx].value = value.to_string();
        Ok(())
    }

    /// Delete a variable, returning its last value.
    pub fn remove(&mut self, name: &str) -> Result<String> {
        let idx = self
            .position(name)
            .ok_or_else(|| ShellError::UndefinedVariable(name.to_string()))?;
        Ok(self.variables.remove(idx).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }
}
