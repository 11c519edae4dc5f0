//! Appender over any `io::Write`, plus a shareable in-memory buffer

use crate::core::{Appender, LogEntry, Result};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Writes one line per entry to the wrapped writer
///
/// # Example
///
/// ```
/// use rust_context_logger::appenders::{SharedBuffer, WriterAppender};
/// use rust_context_logger::{LogContext, LogLevel, Logger};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::with_appender(WriterAppender::new(buffer.clone()));
/// logger.emit(LogLevel::Info, "captured", LogContext::new());
///
/// assert!(buffer.contents().contains("\"msg\":\"captured\""));
/// ```
pub struct WriterAppender<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&mut self, _entry: &LogEntry, line: &str) -> Result<()> {
        // Line and terminator in a single `write_all`; `SharedBuffer` takes it
        // under one lock, other writers may still split it
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        self.writer.write_all(&buf)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}

/// Cloneable in-memory sink; every clone sees the same bytes
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
