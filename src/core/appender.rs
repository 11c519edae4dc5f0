//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A single output sink owned by a `Logger`
///
/// The logger renders the line; the appender only decides where it goes.
/// `entry` is passed along so sinks can route or colour by level.
pub trait Appender: Send {
    fn append(&mut self, entry: &LogEntry, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
