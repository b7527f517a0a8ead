//! Commands, command groups, and the context handlers run in.

use std::fmt;

use conch_types::error::{Result, ShellError};

use crate::argument::{self, ArgValue, ArgumentType};
use crate::diagnostics::DiagnosticSink;
use crate::registry::CommandRegistry;
use crate::variables::VariableStore;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to the shell loop to stop reading input.
    Exit,
}

/// Shared mutable state passed to every handler.
pub struct ShellContext<'a> {
    /// The registry the command was dispatched from.
    pub registry: &'a CommandRegistry,
    /// Session variables.
    pub variables: &'a mut VariableStore,
    /// Where diagnostics go.
    pub diagnostics: &'a mut dyn DiagnosticSink,
}

/// Handler invoked with the parsed values of every signature position.
pub type Handler = Box<dyn Fn(&[ArgValue], &mut ShellContext<'_>) -> Result<CommandOutput>>;

const NO_DESCRIPTION: &str = "no description";

/// A named command with a typed signature.
pub struct Command {
    name: String,
    arguments: Vec<ArgumentType>,
    handler: Handler,
    description: String,
    hidden: bool,
}

impl Command {
    pub fn new<F>(name: impl Into<String>, arguments: Vec<ArgumentType>, handler: F) -> Self
    where
        F: Fn(&[ArgValue], &mut ShellContext<'_>) -> Result<CommandOutput> + 'static,
    {
        Self {
            name: name.into(),
            arguments,
            handler: Box::new(handler),
            description: NO_DESCRIPTION.to_string(),
            hidden: false,
        }
    }

    /// Set the one-line description shown by `help command`.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Keep the command out of help listings. It still dispatches.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[ArgumentType] {
        &self.arguments
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Usage line, e.g. `var add <string: name> <string: value>`.
    pub fn usage(&self) -> String {
        let mut out = self.name.clone();
        for arg in &self.arguments {
            out.push(' ');
            out.push_str(&arg.to_string());
        }
        out
    }

    /// Parse `raw` (everything after the command name) and invoke the handler.
    ///
    /// The handler is not called if parsing fails.
    pub fn run(&self, raw: &str, ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
        let values = argument::parse_arguments(
            raw,
            &self.arguments,
            &*ctx.variables,
            &mut *ctx.diagnostics,
        )?;
        self.invoke(&values, ctx)
    }

    /// Call the handler with already-parsed values.
    pub fn invoke(&self, values: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
        (self.handler)(values, ctx)
    }

    /// Whether this command is selected for the given argument tokens.
    ///
    /// The arity must match and the leading run of fixed arguments must
    /// equal the corresponding tokens. Positions after the first non-fixed
    /// argument are left to the full parse.
    pub fn routes(&self, args: &[String]) -> bool {
        self.arguments.len() == args.len()
            && self
                .arguments
                .iter()
                .zip(args)
                .take_while(|(arg, _)| arg.is_fixed())
                .all(|(arg, token)| arg.keyword() == Some(token.as_str()))
    }

    /// Whether the two signatures cannot be told apart at dispatch time.
    ///
    /// True when the arity is equal and every position is either the same
    /// keyword in both or a non-keyword in both.
    pub fn conflicts_with(&self, other: &Command) -> bool {
        self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(&other.arguments)
                .all(|(a, b)| match (a.keyword(), b.keyword()) {
                    (Some(ka), Some(kb)) => ka == kb,
                    (None, None) => true,
                    _ => false,
                })
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .field("description", &self.description)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// The overloads registered under one command name.
#[derive(Debug)]
pub struct CommandGroup {
    name: String,
    commands: Vec<Command>,
}

impl CommandGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// A group is hidden when every member is.
    pub fn is_hidden(&self) -> bool {
        self.commands.iter().all(Command::is_hidden)
    }

    /// Append an overload, rejecting a foreign name or an indistinguishable signature.
    pub fn add_command(&mut self, command: Command) -> Result<()> {
        if command.name() != self.name {
            return Err(ShellError::GroupNameMismatch {
                command: command.usage(),
                group: self.name.clone(),
            });
        }
        if let Some(existing) = self.commands.iter().find(|c| c.conflicts_with(&command)) {
            return Err(ShellError::ConflictingCommandRegistration {
                command: command.usage(),
                existing: existing.usage(),
            });
        }
        log::debug!("registered '{}'", command.usage());
        self.commands.push(command);
        Ok(())
    }

    /// First member, in registration order, that routes the given tokens.
    pub fn resolve(&self, args: &[String]) -> Option<&Command> {
        self.commands.iter().find(|c| c.routes(args))
    }
}
