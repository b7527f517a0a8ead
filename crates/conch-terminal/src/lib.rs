//! Command shell core.
//!
//! Input lines are split into tokens, matched against a registry of named
//! commands with typed argument signatures, converted into typed values,
//! and handed to the command's handler. Commands sharing a name form a
//! group and are told apart by arity and leading keyword arguments.

pub mod argument;
mod builtins;
pub mod command;
pub mod diagnostics;
mod registry;
pub mod shell;
pub mod tokenizer;
pub mod variables;

/// Typed argument values and signature positions.
pub use argument::{ArgValue, ArgumentType};
/// Register the help, exit, var, and debug commands into a registry.
pub use builtins::register_builtins;
/// A single command, its overload group, output, and handler context.
pub use command::{Command, CommandGroup, CommandOutput, ShellContext};
/// Where the shell reports diagnostics.
pub use diagnostics::{DiagnosticSink, LogSink, RecordingSink, Severity};
/// Registry of command groups with dispatch.
pub use registry::CommandRegistry;
/// The read loop and its input source.
pub use shell::{BufLineReader, LineReader, Shell};
/// Session variable storage.
pub use variables::VariableStore;
