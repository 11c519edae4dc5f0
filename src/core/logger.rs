//! Structured logger backend
//!
//! `Logger` takes a level, a message and a field mapping, renders one line in
//! its configured format and writes it to its single appender. The contextual
//! loggers in [`crate::request`] and [`crate::actor`] forward every call here.

use super::{
    appender::Appender,
    error::Result,
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    timestamp::TimestampFormat,
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;

/// Called after a fatal entry has been written; must not return
pub type ExitHandler = fn(i32) -> !;

/// Process exit status used after a fatal entry
pub const FATAL_EXIT_CODE: i32 = 1;

pub struct Logger {
    min_level: LogLevel,
    output_format: OutputFormat,
    timestamp_format: TimestampFormat,
    appender: Mutex<Box<dyn Appender>>,
    /// Metrics for observability (written, dropped, filtered)
    metrics: LoggerMetrics,
    exit_handler: ExitHandler,
}

impl Logger {
    /// JSON lines on stderr at `Info` and above
    #[must_use]
    pub fn new() -> Self {
        Self::with_appender(ConsoleAppender::new())
    }

    #[must_use]
    pub fn with_appender<A: Appender + 'static>(appender: A) -> Self {
        Self {
            min_level: LogLevel::Info,
            output_format: OutputFormat::Json,
            timestamp_format: TimestampFormat::default(),
            appender: Mutex::new(Box::new(appender)),
            metrics: LoggerMetrics::new(),
            exit_handler: std::process::exit,
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_context_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .output_format(OutputFormat::Text)
    ///     .build();
    /// assert!(logger.is_enabled(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Write the entry through the appender with panic isolation
    ///
    /// A failing or panicking sink never reaches the caller; the entry is
    /// counted as dropped instead.
    fn write_entry(&self, entry: &LogEntry) {
        let line = self.output_format.format(entry, &self.timestamp_format);
        let mut appender = self.appender.lock();

        let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(entry, &line)
        }));

        match append_result {
            Ok(Ok(())) => {
                self.metrics.record_logged();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                self.metrics.record_dropped();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}",
                    appender.name(),
                    panic_msg
                );
                self.metrics.record_dropped();
            }
        }
    }

    /// Nothing may stay buffered once the caller is about to be stopped,
    /// whether or not the terminal entry itself was written
    fn flush_before_exit(&self) {
        let mut appender = self.appender.lock();
        if let Err(e) = appender.flush() {
            eprintln!("[LOGGER ERROR] Appender '{}' flush failed: {}", appender.name(), e);
        }
    }

    /// Emit one entry with the given fields
    ///
    /// Entries below the minimum level are discarded. `Fatal` and `Panic`
    /// never return: the former calls the exit handler after writing, the
    /// latter unwinds with the message as payload.
    pub fn emit(&self, level: LogLevel, message: impl AsRef<str>, context: LogContext) {
        match level {
            LogLevel::Fatal => self.fatal(message, context),
            LogLevel::Panic => self.panic(message, context),
            _ => self.write_if_enabled(level, message.as_ref(), context),
        }
    }

    fn write_if_enabled(&self, level: LogLevel, message: &str, context: LogContext) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let entry = LogEntry::new(level, message).with_context(context);
        self.write_entry(&entry);
    }

    /// Write a fatal entry, then terminate through the exit handler
    pub fn fatal(&self, message: impl AsRef<str>, context: LogContext) -> ! {
        self.write_if_enabled(LogLevel::Fatal, message.as_ref(), context);
        self.flush_before_exit();
        (self.exit_handler)(FATAL_EXIT_CODE)
    }

    /// Write a panic entry, then unwind with the message as payload
    pub fn panic(&self, message: impl AsRef<str>, context: LogContext) -> ! {
        let message = message.as_ref().to_string();
        self.write_if_enabled(LogLevel::Panic, &message, context);
        self.flush_before_exit();
        std::panic::panic_any(message)
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }

    /// Replace the sink, flushing the previous one first
    pub fn set_appender<A: Appender + 'static>(&mut self, appender: A) {
        let mut previous = std::mem::replace(self.appender.get_mut(), Box::new(appender));
        if let Err(e) = previous.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush replaced appender: {}", e);
        }
    }

    pub fn appender_name(&self) -> String {
        self.appender.lock().name().to_string()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("output_format", &self.output_format)
            .field("timestamp_format", &self.timestamp_format)
            .field("appender", &self.appender_name())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.appender.get_mut().flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_context_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .timestamp_format(TimestampFormat::UnixMillis)
///     .appender(WriterAppender::new(buffer.clone()))
///     .build();
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    output_format: OutputFormat,
    timestamp_format: TimestampFormat,
    appender: Option<Box<dyn Appender>>,
    exit_handler: ExitHandler,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            output_format: OutputFormat::Json,
            timestamp_format: TimestampFormat::default(),
            appender: None,
            exit_handler: std::process::exit,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set the sink; the last call wins
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    pub(crate) fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appender = Some(appender);
        self
    }

    /// Override what happens after a fatal entry (default: `std::process::exit`)
    #[must_use = "builder methods return a new value"]
    pub fn exit_handler(mut self, handler: ExitHandler) -> Self {
        self.exit_handler = handler;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let appender = self
            .appender
            .unwrap_or_else(|| Box::new(ConsoleAppender::new()));

        Logger {
            min_level: self.min_level,
            output_format: self.output_format,
            timestamp_format: self.timestamp_format,
            appender: Mutex::new(appender),
            metrics: LoggerMetrics::new(),
            exit_handler: self.exit_handler,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::{SharedBuffer, WriterAppender};
    use crate::core::LoggerError;

    fn buffered(min_level: LogLevel) -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .min_level(min_level)
            .appender(WriterAppender::new(buffer.clone()))
            .build();
        (logger, buffer)
    }

    fn exit_by_panicking(code: i32) -> ! {
        panic!("exit called with {}", code)
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build();

        assert_eq!(logger.min_level(), LogLevel::Info);
        assert_eq!(logger.output_format(), OutputFormat::Json);
        assert_eq!(logger.appender_name(), "console");
    }

    #[test]
    fn test_emit_writes_one_json_line() {
        let (logger, buffer) = buffered(LogLevel::Info);

        logger.emit(
            LogLevel::Info,
            "hello",
            LogContext::new().with_field("request_id", "r1"),
        );

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["msg"], "hello");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["request_id"], "r1");
        assert_eq!(logger.metrics().total_logged(), 1);
    }

    #[test]
    fn test_entries_below_min_level_are_filtered() {
        let (logger, buffer) = buffered(LogLevel::Info);

        logger.emit(LogLevel::Debug, "hidden", LogContext::new());
        logger.emit(LogLevel::Trace, "hidden", LogContext::new());
        logger.emit(LogLevel::Warn, "shown", LogContext::new());

        assert_eq!(buffer.lines().len(), 1);
        assert_eq!(logger.metrics().filtered_count(), 2);
    }

    #[test]
    fn test_panic_level_writes_then_unwinds() {
        let (logger, buffer) = buffered(LogLevel::Info);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.emit(LogLevel::Panic, "boom", LogContext::new().with_field("tag", "t"));
        }));

        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("boom"));

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["level"], "panic");
        assert_eq!(parsed["tag"], "t");
    }

    #[test]
    fn test_fatal_writes_then_calls_exit_handler() {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .appender(WriterAppender::new(buffer.clone()))
            .exit_handler(exit_by_panicking)
            .build();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.fatal("going down", LogContext::new());
        }));

        let payload = result.unwrap_err();
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("exit called with 1")
        );
        assert!(buffer.contents().contains("\"level\":\"fatal\""));
    }

    #[test]
    fn test_filtered_terminal_levels_still_terminate() {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .min_level(LogLevel::Panic)
            .appender(WriterAppender::new(buffer.clone()))
            .exit_handler(exit_by_panicking)
            .build();

        let fatal = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.emit(LogLevel::Fatal, "filtered", LogContext::new());
        }));

        assert!(fatal.is_err());
        assert!(buffer.is_empty());
        assert_eq!(logger.metrics().filtered_count(), 1);
    }

    #[test]
    fn test_sink_is_flushed_before_exit_even_when_filtered() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        struct FlushCounter(Arc<AtomicUsize>);

        impl Appender for FlushCounter {
            fn append(&mut self, _entry: &LogEntry, _line: &str) -> Result<()> {
                Ok(())
            }

            fn flush(&mut self) -> Result<()> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }

            fn name(&self) -> &str {
                "flush-counter"
            }
        }

        let flushes = Arc::new(AtomicUsize::new(0));
        let logger = Logger::builder()
            .min_level(LogLevel::Panic)
            .appender(FlushCounter(Arc::clone(&flushes)))
            .exit_handler(exit_by_panicking)
            .build();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.fatal("filtered", LogContext::new());
        }));
        assert_eq!(flushes.load(Ordering::SeqCst), 1);

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("written", LogContext::new());
        }));
        assert_eq!(flushes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failing_appender_is_counted_not_propagated() {
        struct FailingAppender;

        impl Appender for FailingAppender {
            fn append(&mut self, _entry: &LogEntry, _line: &str) -> Result<()> {
                Err(LoggerError::other("Simulated failure"))
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "failing"
            }
        }

        let logger = Logger::with_appender(FailingAppender);
        logger.emit(LogLevel::Error, "lost", LogContext::new());

        assert_eq!(logger.metrics().dropped_count(), 1);
        assert_eq!(logger.metrics().total_logged(), 0);
    }

    #[test]
    fn test_panicking_appender_is_isolated() {
        struct PanickingAppender;

        impl Appender for PanickingAppender {
            fn append(&mut self, _entry: &LogEntry, _line: &str) -> Result<()> {
                panic!("sink exploded")
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "panicking"
            }
        }

        let logger = Logger::with_appender(PanickingAppender);
        logger.emit(LogLevel::Info, "still returns", LogContext::new());

        assert_eq!(logger.metrics().dropped_count(), 1);
    }

    #[test]
    fn test_set_appender_redirects_output() {
        let (mut logger, first) = buffered(LogLevel::Info);
        let second = SharedBuffer::new();

        logger.emit(LogLevel::Info, "one", LogContext::new());
        logger.set_appender(WriterAppender::new(second.clone()));
        logger.emit(LogLevel::Info, "two", LogContext::new());

        assert_eq!(first.lines().len(), 1);
        assert_eq!(second.lines().len(), 1);
        assert!(second.contents().contains("\"msg\":\"two\""));
    }

    #[test]
    fn test_text_output_format() {
        let (mut logger, buffer) = buffered(LogLevel::Info);
        logger.set_output_format(OutputFormat::Text);

        logger.emit(LogLevel::Warn, "careful", LogContext::new().with_field("tag", "t1"));

        let line = buffer.contents();
        assert!(line.contains("level=warning"));
        assert!(line.contains("msg=careful") || line.contains("msg=\"careful\""));
        assert!(line.contains("tag=t1"));
    }

    #[test]
    fn test_logger_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}
