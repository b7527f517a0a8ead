//! Diagnostic sink: where the shell reports errors, warnings and notes.

use conch_types::config::MAX_DEBUG_LEVEL;

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warn,
    Info,
}

impl Severity {
    /// Lowest verbosity level at which this severity is shown.
    pub fn min_level(self) -> u8 {
        match self {
            Severity::Error => 1,
            Severity::Warn => 2,
            Severity::Info => 3,
        }
    }
}

/// Receiver for shell diagnostics.
///
/// The verbosity level filters reports: 0 shows nothing, 1 errors,
/// 2 errors and warnings, 3 everything.
pub trait DiagnosticSink {
    /// Current verbosity level.
    fn level(&self) -> u8;

    /// Change the verbosity level. Values above 3 are clamped.
    fn set_level(&mut self, level: u8);

    /// Deliver a message that already passed the level filter.
    fn emit(&mut self, severity: Severity, message: &str);

    /// Report a message, subject to the verbosity level.
    fn report(&mut self, severity: Severity, message: &str) {
        if self.level() >= severity.min_level() {
            self.emit(severity, message);
        }
    }

    fn error(&mut self, message: &str) {
        self.report(Severity::Error, message);
    }

    fn warn(&mut self, message: &str) {
        self.report(Severity::Warn, message);
    }

    fn info(&mut self, message: &str) {
        self.report(Severity::Info, message);
    }
}

/// Sink that forwards reports to the `log` facade.
#[derive(Debug)]
pub struct LogSink {
    level: u8,
}

impl LogSink {
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(MAX_DEBUG_LEVEL),
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(MAX_DEBUG_LEVEL)
    }
}

impl DiagnosticSink for LogSink {
    fn level(&self) -> u8 {
        self.level
    }

    fn set_level(&mut self, level: u8) {
        self.level = level.min(MAX_DEBUG_LEVEL);
    }

    fn emit(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => log::error!(target: "conch", "{message}"),
            Severity::Warn => log::warn!(target: "conch", "{message}"),
            Severity::Info => log::info!(target: "conch", "{message}"),
        }
    }
}

/// Sink that keeps every report in memory.
#[derive(Debug)]
pub struct RecordingSink {
    level: u8,
    reports: Vec<(Severity, String)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            level: MAX_DEBUG_LEVEL,
            reports: Vec::new(),
        }
    }

    /// All reports that passed the level filter, oldest first.
    pub fn reports(&self) -> &[(Severity, String)] {
        &self.reports
    }

    /// Messages reported with the given severity.
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for RecordingSink {
    fn level(&self) -> u8 {
        self.level
    }

    fn set_level(&mut self, level: u8) {
        self.level = level.min(MAX_DEBUG_LEVEL);
    }

    fn emit(&mut self, severity: Severity, message: &str) {
        self.reports.push((severity, message.to_string()));
    }
}
