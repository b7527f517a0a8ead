//! The interactive read loop.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use conch_types::config::ShellConfig;
use conch_types::error::Result;

use crate::command::CommandOutput;
use crate::diagnostics::DiagnosticSink;
use crate::registry::CommandRegistry;
use crate::variables::VariableStore;

/// Source of input lines.
pub trait LineReader {
    /// Next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// [`LineReader`] over any buffered reader (stdin, a byte slice, a file).
#[derive(Debug)]
pub struct BufLineReader<B> {
    inner: B,
}

impl<B: BufRead> BufLineReader<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

impl<B: BufRead> LineReader for BufLineReader<B> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// A shell session: registry, variables, and loop state.
#[derive(Debug)]
pub struct Shell {
    registry: CommandRegistry,
    variables: VariableStore,
    config: ShellConfig,
    running: bool,
}

impl Shell {
    /// Build a session, seeding variables from the config.
    pub fn new(registry: CommandRegistry, config: ShellConfig) -> Result<Self> {
        let mut variables = VariableStore::new();
        for (name, value) in &config.variables {
            variables.add(name, value)?;
        }
        Ok(Self {
            registry,
            variables,
            config,
            running: false,
        })
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the loop to finish after the current line.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Execute a single line against this session.
    pub fn execute_line(
        &mut self,
        line: &str,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<CommandOutput> {
        self.registry
            .execute(line, &mut self.variables, diagnostics)
    }

    /// Read, dispatch, and print until `exit` or end of input.
    ///
    /// Command errors are reported to `diagnostics` and the loop carries on.
    /// Only failures of the reader or writer end it with an error.
    pub fn run(
        &mut self,
        reader: &mut dyn LineReader,
        out: &mut dyn Write,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        diagnostics.set_level(self.config.debug_level);
        self.running = true;

        while self.running {
            self.write_prompt(out)?;
            let Some(line) = reader.read_line()? else {
                log::debug!("end of input");
                writeln!(out)?;
                break;
            };

            match self.execute_line(&line, diagnostics) {
                Ok(CommandOutput::Text(text)) => writeln!(out, "{text}")?,
                Ok(CommandOutput::None) => {},
                Ok(CommandOutput::Exit) => self.stop(),
                Err(e) => diagnostics.error(&e.to_string()),
            }
        }

        self.running = false;
        out.flush()?;
        Ok(())
    }

    fn write_prompt(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.config.show_clock {
            write!(out, "[{}]: ", clock_now())?;
        }
        write!(out, "{}", self.config.prompt)?;
        out.flush()
    }
}

/// Current UTC time of day as `HH:MM:SS`.
fn clock_now() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_clock(secs)
}

fn format_clock(epoch_secs: u64) -> String {
    let day = epoch_secs % 86400;
    format!("{:02}:{:02}:{:02}", day / 3600, (day % 3600) / 60, day % 60)
}
