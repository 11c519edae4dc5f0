//! Per-request logger
//!
//! A `RequestLogger` is bound to one request id for its whole life and turns
//! each [`EventRecord`] into a fixed set of fields before handing it to its
//! backend.

use crate::core::{LogContext, LogLevel, Logger, Result};
use crate::event::{keys, EventRecord};
use crate::id::{IdentifierSource, UuidSource};

/// Key carrying the bound request id on every line
pub const REQUEST_ID_KEY: &str = "request_id";
/// Key carrying the acting user's id on every line
pub const ACTOR_ID_KEY: &str = "actor_id";
pub const TAG_KEY: &str = "tag";

/// Event keys copied to the line under their own name
const FORWARDED_KEYS: [&str; 9] = [
    keys::DURATION,
    keys::REQUEST_IP,
    keys::REQUEST_REMOTE_ADDR,
    keys::REQUEST_URI,
    keys::REQUEST_PATTERN,
    keys::REQUEST_USER_AGENT,
    keys::RESPONSE_CODE,
    keys::RESPONSE_BYTES,
    keys::TAG,
];

/// Logger for one inbound request
///
/// # Example
///
/// ```
/// use rust_context_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = RequestLogger::with_request_id("abc-123")
///     .with_backend(Logger::with_appender(WriterAppender::new(buffer.clone())));
///
/// logger.warn(
///     &EventRecord::new()
///         .with_field("tag", "t1")
///         .with_field("message", "oops")
///         .with_field("response_code", 500),
/// );
///
/// let line: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
/// assert_eq!(line["request_id"], "abc-123");
/// assert_eq!(line["level"], "warning");
/// ```
#[derive(Debug)]
pub struct RequestLogger {
    request_id: String,
    backend: Logger,
}

impl RequestLogger {
    /// Bind a freshly generated request id
    pub fn new() -> Result<Self> {
        Self::with_id_source(&UuidSource)
    }

    pub fn with_id_source(source: &dyn IdentifierSource) -> Result<Self> {
        Ok(Self::with_request_id(source.generate()?))
    }

    /// Bind a caller-supplied id, used verbatim
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            backend: Logger::new(),
        }
    }

    #[must_use]
    pub fn with_backend(mut self, backend: Logger) -> Self {
        self.backend = backend;
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn backend(&self) -> &Logger {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut Logger {
        &mut self.backend
    }

    /// Field mapping for one call; `user_id` is reported as `actor_id`
    pub fn fields(&self, event: &EventRecord) -> LogContext {
        let mut context = LogContext::new().with_field(REQUEST_ID_KEY, self.request_id.as_str());

        for key in FORWARDED_KEYS {
            context.add_field(key, event.value_or_null(key));
        }
        context.add_field(ACTOR_ID_KEY, event.value_or_null(keys::USER_ID));

        context
    }

    pub fn log(&self, level: LogLevel, event: &EventRecord) {
        self.backend.emit(level, event.message_text(), self.fields(event));
    }

    pub fn trace(&self, event: &EventRecord) {
        self.log(LogLevel::Trace, event);
    }

    pub fn debug(&self, event: &EventRecord) {
        self.log(LogLevel::Debug, event);
    }

    pub fn info(&self, event: &EventRecord) {
        self.log(LogLevel::Info, event);
    }

    pub fn warn(&self, event: &EventRecord) {
        self.log(LogLevel::Warn, event);
    }

    pub fn error(&self, event: &EventRecord) {
        self.log(LogLevel::Error, event);
    }

    /// Log, then terminate the process through the backend
    pub fn fatal(&self, event: &EventRecord) -> ! {
        self.backend.fatal(event.message_text(), self.fields(event))
    }

    /// Log, then unwind with the message as panic payload
    pub fn panic(&self, event: &EventRecord) -> ! {
        self.backend.panic(event.message_text(), self.fields(event))
    }
}
