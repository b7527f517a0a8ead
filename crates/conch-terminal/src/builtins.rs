//! Built-in commands: help, exit, var, debug.

use conch_types::error::{Result, ShellError};

use crate::argument::{ArgValue, ArgumentType};
use crate::command::{Command, CommandOutput, ShellContext};
use crate::registry::CommandRegistry;

/// Register every built-in command into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) -> Result<()> {
    reg.register(Command::new("exit", vec![], exit).with_description("exits the shell"))?;

    reg.register(
        Command::new("help", vec![], help)
            .with_description("helps you understand the commands and the shell"),
    )?;
    reg.register(
        Command::new("help", vec![ArgumentType::fixed("command"), ArgumentType::text("command_name")], help_command)
            .with_description("gives help to supplied command"),
    )?;
    reg.register(
        Command::new("help", vec![ArgumentType::fixed("list")], help_list)
            .with_description("lists all available commands"),
    )?;

    reg.register(
        Command::new("var", vec![ArgumentType::fixed("delete"), ArgumentType::text("name")], var_delete)
            .with_description("removes a variable"),
    )?;
    reg.register(
        Command::new(
            "var",
            vec![ArgumentType::fixed("add"), ArgumentType::text("name"), ArgumentType::text("value")],
            var_add,
        )
        .with_description("creates a new variable"),
    )?;
    reg.register(
        Command::new(
            "var",
            vec![ArgumentType::fixed("set"), ArgumentType::text("name"), ArgumentType::text("value")],
            var_set,
        )
        .with_description("sets an existing variable"),
    )?;
    reg.register(
        Command::new("var", vec![ArgumentType::fixed("list")], var_list)
            .with_description("lists all available variables"),
    )?;

    reg.register(
        Command::new("debug", vec![ArgumentType::fixed("level"), ArgumentType::int(0, 3, "level")], debug_level)
            .with_description("sets the diagnostic verbosity (0 silent, 3 everything)"),
    )?;
    reg.register(
        Command::new("debug", vec![ArgumentType::fixed("info"), ArgumentType::text("message")], debug_info)
            .with_description("prints an info message into the console"),
    )?;
    reg.register(
        Command::new("debug", vec![ArgumentType::fixed("warn"), ArgumentType::text("message")], debug_warn)
            .with_description("prints a warning message into the console"),
    )?;
    reg.register(
        Command::new("debug", vec![ArgumentType::fixed("error"), ArgumentType::text("message")], debug_error)
            .with_description("prints an error message into the console"),
    )?;

    Ok(())
}

/// Value at `idx` as text, or a count error if the slice is too short.
fn text_arg(values: &[ArgValue], idx: usize) -> Result<String> {
    values
        .get(idx)
        .map(ArgValue::as_text)
        .ok_or(ShellError::ArgumentCountMismatch {
            expected: idx + 1,
            found: values.len(),
        })
}

// ---------------------------------------------------------------------------
// exit / help
// ---------------------------------------------------------------------------

fn exit(_args: &[ArgValue], _ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    Ok(CommandOutput::Exit)
}

fn help(_args: &[ArgValue], _ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    Ok(CommandOutput::Text(
        "Welcome to conch.\n  \
         Syntax of every command is <command_name> <args...>\n  \
         For a list of commands type 'help list'\n  \
         For more help for a specific command type 'help command <command_name>'\n  \
         To exit type 'exit'"
            .to_string(),
    ))
}

fn help_list(_args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    let mut out = String::from("Available commands:");
    for group in ctx.registry.groups().iter().filter(|g| !g.is_hidden()) {
        out.push_str(&format!("\n  {}", group.name()));
    }
    Ok(CommandOutput::Text(out))
}

fn help_command(args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    let name = text_arg(args, 1)?;
    let usages: Vec<String> = ctx
        .registry
        .group(&name)
        .map(|group| {
            group
                .commands()
                .iter()
                .filter(|c| !c.is_hidden())
                .map(|c| format!("   {}  - {}", c.usage(), c.description()))
                .collect()
        })
        .unwrap_or_default();

    if usages.is_empty() {
        return Err(ShellError::UnknownCommandName(name));
    }
    Ok(CommandOutput::Text(format!(
        "Usages for '{name}':\n{}",
        usages.join("\n")
    )))
}

// ---------------------------------------------------------------------------
// var
// ---------------------------------------------------------------------------

fn var_list(_args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    if ctx.variables.is_empty() {
        return Ok(CommandOutput::None);
    }
    let lines: Vec<String> = ctx
        .variables
        .iter()
        .map(|v| format!("{}: {}", v.name, v.value))
        .collect();
    Ok(CommandOutput::Text(lines.join("\n")))
}

fn var_add(args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    ctx.variables.add(&text_arg(args, 1)?, &text_arg(args, 2)?)?;
    Ok(CommandOutput::None)
}

fn var_set(args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    ctx.variables.set(&text_arg(args, 1)?, &text_arg(args, 2)?)?;
    Ok(CommandOutput::None)
}

fn var_delete(args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    ctx.variables.remove(&text_arg(args, 1)?)?;
    Ok(CommandOutput::None)
}

// ---------------------------------------------------------------------------
// debug
// ---------------------------------------------------------------------------

fn debug_level(args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    let level = args
        .get(1)
        .and_then(ArgValue::as_int)
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| ShellError::ArgumentTypeMismatch {
            position: 2,
            expected: "int".to_string(),
        })?;
    ctx.diagnostics.set_level(level);
    Ok(CommandOutput::None)
}

fn debug_info(args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    ctx.diagnostics.info(&text_arg(args, 1)?);
    Ok(CommandOutput::None)
}

fn debug_warn(args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    ctx.diagnostics.warn(&text_arg(args, 1)?);
    Ok(CommandOutput::None)
}

fn debug_error(args: &[ArgValue], ctx: &mut ShellContext<'_>) -> Result<CommandOutput> {
    ctx.diagnostics.error(&text_arg(args, 1)?);
    Ok(CommandOutput::None)
}
