//! Command registry and line dispatch.

use std::collections::HashMap;

use conch_types::error::{Result, ShellError};

use crate::command::{Command, CommandGroup, CommandOutput, ShellContext};
use crate::diagnostics::{DiagnosticSink, RecordingSink};
use crate::tokenizer;
use crate::variables::VariableStore;

/// Registry of command groups, keyed by name, in registration order.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    groups: Vec<CommandGroup>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, creating its group on first use.
    pub fn register(&mut self, command: Command) -> Result<()> {
        if let Some(&idx) = self.index.get(command.name()) {
            return self.groups[idx].add_command(command);
        }
        let mut group = CommandGroup::new(command.name());
        group.add_command(command)?;
        self.index.insert(group.name().to_string(), self.groups.len());
        self.groups.push(group);
        Ok(())
    }

    pub fn group(&self, name: &str) -> Option<&CommandGroup> {
        self.index.get(name).map(|&idx| &self.groups[idx])
    }

    /// All groups in registration order.
    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    /// Total number of registered commands across all groups.
    pub fn command_count(&self) -> usize {
        self.groups.iter().map(|g| g.commands().len()).sum()
    }

    /// Find the command selected by a name and its argument tokens.
    ///
    /// Within a group the first registered match wins, so overlapping
    /// signatures must be registered most specific first.
    pub fn resolve(&self, name: &str, args: &[String]) -> Result<&Command> {
        let group = self
            .group(name)
            .ok_or_else(|| ShellError::UnknownCommandName(name.to_string()))?;
        group.resolve(args).ok_or_else(|| {
            let mut line = name.to_string();
            for arg in args {
                line.push(' ');
                line.push_str(arg);
            }
            ShellError::NoMatchingSignature(line)
        })
    }

    /// Parse and execute one input line.
    ///
    /// The line is split once to pick the command, then everything after
    /// the command name is parsed again against the chosen signature.
    pub fn execute(
        &self,
        line: &str,
        variables: &mut VariableStore,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<CommandOutput> {
        // Routing reports are held back; the full parse repeats them.
        let mut routing = RecordingSink::new();
        let tokens = tokenizer::scan(line, variables, &mut routing);
        let Some((first, rest)) = tokens.split_first() else {
            replay(&routing, diagnostics);
            return Ok(CommandOutput::None);
        };
        let args: Vec<String> = rest.iter().map(|t| t.text.clone()).collect();

        let command = match self.resolve(&first.text, &args) {
            Ok(command) => command,
            Err(e) => {
                replay(&routing, diagnostics);
                return Err(e);
            },
        };
        let raw_args = &line[first.end..];
        log::debug!("dispatching '{}' with '{}'", command.usage(), raw_args.trim());

        let mut ctx = ShellContext {
            registry: self,
            variables,
            diagnostics,
        };
        command.run(raw_args, &mut ctx)
    }
}

fn replay(from: &RecordingSink, to: &mut dyn DiagnosticSink) {
    for (severity, message) in from.reports() {
        to.report(*severity, message);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::argument::{ArgValue, ArgumentType};
    use crate::diagnostics::{RecordingSink, Severity};

    /// Registry whose handlers record the values they were called with.
    fn recording_registry(commands: Vec<(&str, Vec<ArgumentType>)>) -> (CommandRegistry, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut reg = CommandRegistry::new();
        for (name, args) in commands {
            let log = Rc::clone(&log);
            let cmd = Command::new(name, args, move |values, _| {
                let rendered: Vec<String> = values.iter().map(ArgValue::as_text).collect();
                log.borrow_mut().push(rendered.join("|"));
                Ok(CommandOutput::None)
            });
            reg.register(cmd).unwrap();
        }
        (reg, log)
    }

    fn run(reg: &CommandRegistry, line: &str) -> Result<CommandOutput> {
        let mut vars = VariableStore::new();
        let mut sink = RecordingSink::new();
        reg.execute(line, &mut vars, &mut sink)
    }

    #[test]
    fn register_groups_by_name() {
        let (reg, _) = recording_registry(vec![
            ("help", vec![]),
            ("help", vec![ArgumentType::fixed("list")]),
            ("exit", vec![]),
        ]);
        assert_eq!(reg.groups().len(), 2);
        assert_eq!(reg.command_count(), 3);
        assert_eq!(reg.group("help").unwrap().commands().len(), 2);
        let names: Vec<&str> = reg.groups().iter().map(CommandGroup::name).collect();
        assert_eq!(names, vec!["help", "exit"]);
    }

    #[test]
    fn conflicting_registration_rejected() {
        let mut reg = CommandRegistry::new();
        reg.register(Command::new("cmd", vec![ArgumentType::fixed("a")], |_, _| {
            Ok(CommandOutput::None)
        }))
        .unwrap();
        let err = reg
            .register(Command::new("cmd", vec![ArgumentType::fixed("a")], |_, _| {
                Ok(CommandOutput::None)
            }))
            .unwrap_err();
        assert!(matches!(err, ShellError::ConflictingCommandRegistration { .. }));
    }

    #[test]
    fn keyword_overloads_dispatch_independently() {
        let (reg, log) = recording_registry(vec![
            ("cmd", vec![ArgumentType::fixed("a")]),
            ("cmd", vec![ArgumentType::fixed("b")]),
        ]);
        run(&reg, "cmd a ").unwrap();
        run(&reg, "cmd b ").unwrap();
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn unknown_name() {
        let (reg, _) = recording_registry(vec![("exit", vec![])]);
        let err = run(&reg, "frob").unwrap_err();
        assert!(matches!(err, ShellError::UnknownCommandName(ref n) if n == "frob"));
    }

    #[test]
    fn no_matching_signature() {
        let (reg, log) = recording_registry(vec![(
            "pair",
            vec![ArgumentType::text("a"), ArgumentType::text("b")],
        )]);
        let err = run(&reg, "pair one").unwrap_err();
        assert!(matches!(err, ShellError::NoMatchingSignature(ref l) if l == "pair one"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn wrong_value_type_does_not_invoke() {
        let (reg, log) = recording_registry(vec![(
            "debug",
            vec![ArgumentType::fixed("level"), ArgumentType::int(0, 3, "level")],
        )]);
        let err = run(&reg, "debug level 7").unwrap_err();
        assert!(matches!(err, ShellError::ArgumentTypeMismatch { position: 2, .. }));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn keyword_positions_are_passed_to_handler() {
        let (reg, log) = recording_registry(vec![(
            "var",
            vec![ArgumentType::fixed("add"), ArgumentType::text("name"), ArgumentType::text("value")],
        )]);
        run(&reg, "var add x hello ").unwrap();
        assert_eq!(*log.borrow(), vec!["add|x|hello"]);
    }

    #[test]
    fn quoted_argument_survives_reparse() {
        let (reg, log) = recording_registry(vec![(
            "say",
            vec![ArgumentType::text("message")],
        )]);
        run(&reg, "say \"hello big world\"").unwrap();
        assert_eq!(*log.borrow(), vec!["hello big world"]);
    }

    #[test]
    fn quoted_command_name_and_leading_blanks() {
        let (reg, log) = recording_registry(vec![("say", vec![ArgumentType::text("m")])]);
        run(&reg, "   \"say\" hi").unwrap();
        assert_eq!(*log.borrow(), vec!["hi"]);
    }

    #[test]
    fn blank_line_is_a_no_op() {
        let (reg, _) = recording_registry(vec![]);
        assert_eq!(run(&reg, "   ").unwrap(), CommandOutput::None);
    }

    #[test]
    fn first_registered_overlap_wins() {
        let (reg, log) = recording_registry(vec![
            ("cmd", vec![ArgumentType::text("any")]),
            ("cmd", vec![ArgumentType::fixed("a")]),
        ]);
        run(&reg, "cmd a").unwrap();
        assert_eq!(*log.borrow(), vec!["a"]);
        let cmd = reg.resolve("cmd", &["a".to_string()]).unwrap();
        assert!(!cmd.arguments()[0].is_fixed());
    }

    #[test]
    fn variable_substitution_in_arguments() {
        let (reg, log) = recording_registry(vec![("say", vec![ArgumentType::text("m")])]);
        let mut vars = VariableStore::new();
        vars.add("greeting", "hello there").unwrap();
        let mut sink = RecordingSink::new();
        reg.execute("say *greeting*", &mut vars, &mut sink).unwrap();
        assert_eq!(*log.borrow(), vec!["hello there"]);
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn undefined_variable_reported_when_routing_fails() {
        let mut reg = CommandRegistry::new();
        crate::builtins::register_builtins(&mut reg).unwrap();
        let mut vars = VariableStore::new();
        let mut sink = RecordingSink::new();

        let err = reg.execute("var add x *missing*", &mut vars, &mut sink).unwrap_err();
        assert!(matches!(err, ShellError::NoMatchingSignature(_)));
        let errors = sink.messages(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("missing"));

        sink.clear();
        assert!(reg.execute("*nope* list", &mut vars, &mut sink).is_err());
        assert_eq!(sink.messages(Severity::Error).len(), 1);

        sink.clear();
        assert_eq!(reg.execute("*gone*", &mut vars, &mut sink).unwrap(), CommandOutput::None);
        assert_eq!(sink.messages(Severity::Error).len(), 1);
    }

    #[test]
    fn undefined_variable_reported_once() {
        let (reg, log) = recording_registry(vec![
            ("say", vec![]),
            ("say", vec![ArgumentType::text("m")]),
        ]);
        let mut vars = VariableStore::new();
        let mut sink = RecordingSink::new();
        reg.execute("say *missing*", &mut vars, &mut sink).unwrap();
        assert_eq!(*log.borrow(), vec![""]);
        assert_eq!(sink.messages(Severity::Error).len(), 1);
    }
}
