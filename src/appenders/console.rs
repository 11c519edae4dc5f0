//! Console appender implementation

use crate::core::{Appender, LogEntry, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Standard stream a `ConsoleAppender` writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

pub struct ConsoleAppender {
    target: ConsoleTarget,
    use_colors: bool,
}

impl ConsoleAppender {
    /// Plain lines on stderr
    pub fn new() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
            use_colors: false,
        }
    }

    pub fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
            use_colors: false,
        }
    }

    pub fn with_target(target: ConsoleTarget) -> Self {
        Self {
            target,
            use_colors: false,
        }
    }

    /// Colour whole lines by level
    ///
    /// Meant for `OutputFormat::Text` on a terminal; escape codes would make
    /// JSON lines unparseable.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_context_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::new().with_colors(true);
    /// ```
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    #[cfg(feature = "console")]
    fn decorate(&self, entry: &LogEntry, line: &str) -> String {
        use colored::Colorize;

        if self.use_colors {
            line.color(entry.level.color_code()).to_string()
        } else {
            line.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn decorate(&self, _entry: &LogEntry, line: &str) -> String {
        line.to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry, line: &str) -> Result<()> {
        let output = self.decorate(entry, line);

        match self.target {
            ConsoleTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", output)?,
            ConsoleTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", output)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
