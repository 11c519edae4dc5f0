//! Per-actor logger
//!
//! An `ActorLogger` tags each line with a request id, a caller-chosen tag and,
//! once known, the id of the acting user. Unlike [`crate::RequestLogger`] it
//! takes a free-form message instead of an event record.

use crate::core::{FieldValue, LogContext, LogLevel, Logger, Result};
use crate::event::EventRecord;
use crate::id::{IdentifierSource, UuidSource};
use crate::request::{RequestLogger, ACTOR_ID_KEY, REQUEST_ID_KEY, TAG_KEY};

/// Ordered message operands for one call
///
/// Rendered by concatenation, with a single space between two adjacent
/// operands when neither is a string.
///
/// ```
/// use rust_context_logger::MessageArgs;
///
/// let args = MessageArgs::from("retry ").with(3).with(4).with(" left");
/// assert_eq!(args.render(), "retry 3 4 left");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageArgs(Vec<FieldValue>);

impl MessageArgs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, arg: impl Into<FieldValue>) -> Self {
        self.0.push(arg.into());
        self
    }

    pub fn push(&mut self, arg: impl Into<FieldValue>) {
        self.0.push(arg.into());
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut previous: Option<&FieldValue> = None;

        for arg in &self.0 {
            if let Some(prev) = previous {
                if !prev.is_string() && !arg.is_string() {
                    out.push(' ');
                }
            }
            match arg {
                FieldValue::String(s) => out.push_str(s),
                other => out.push_str(&other.to_string()),
            }
            previous = Some(arg);
        }

        out
    }
}

impl From<&str> for MessageArgs {
    fn from(s: &str) -> Self {
        Self(vec![FieldValue::from(s)])
    }
}

impl From<String> for MessageArgs {
    fn from(s: String) -> Self {
        Self(vec![FieldValue::String(s)])
    }
}

impl From<&String> for MessageArgs {
    fn from(s: &String) -> Self {
        Self(vec![FieldValue::String(s.clone())])
    }
}

impl From<FieldValue> for MessageArgs {
    fn from(value: FieldValue) -> Self {
        Self(vec![value])
    }
}

/// Each element is one operand
impl From<Vec<FieldValue>> for MessageArgs {
    fn from(args: Vec<FieldValue>) -> Self {
        Self(args)
    }
}

/// The whole record becomes a single map operand
impl From<&EventRecord> for MessageArgs {
    fn from(event: &EventRecord) -> Self {
        Self(vec![FieldValue::Object(
            event.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        )])
    }
}

/// Logger for an application actor or session
///
/// # Example
///
/// ```
/// use rust_context_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let mut logger = ActorLogger::new(None)
///     .unwrap()
///     .with_backend(Logger::with_appender(WriterAppender::new(buffer.clone())));
///
/// logger.set_actor_id("u9");
/// logger.error("LOGIN", "bad password");
///
/// let line: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
/// assert_eq!(line["actor_id"], "u9");
/// assert_eq!(line["tag"], "LOGIN");
/// assert_eq!(line["msg"], "bad password");
/// ```
#[derive(Debug)]
pub struct ActorLogger {
    request_id: String,
    actor_id: Option<String>,
    backend: Logger,
}

impl ActorLogger {
    /// Bind a freshly generated request id
    pub fn new(actor_id: Option<String>) -> Result<Self> {
        Self::with_id_source(&UuidSource, actor_id)
    }

    pub fn with_id_source(source: &dyn IdentifierSource, actor_id: Option<String>) -> Result<Self> {
        Ok(Self::with_request_id(source.generate()?, actor_id))
    }

    /// Bind a request id received from upstream
    pub fn with_request_id(request_id: impl Into<String>, actor_id: Option<String>) -> Self {
        Self {
            request_id: request_id.into(),
            actor_id,
            backend: Logger::new(),
        }
    }

    /// Continue the call chain of `request` under the same request id
    ///
    /// The backend is not shared; a default one is used unless
    /// [`with_backend`](Self::with_backend) is called.
    pub fn from_request(request: &RequestLogger, actor_id: Option<String>) -> Self {
        Self::with_request_id(request.request_id(), actor_id)
    }

    #[must_use]
    pub fn with_backend(mut self, backend: Logger) -> Self {
        self.backend = backend;
        self
    }

    pub fn set_actor_id(&mut self, actor_id: impl Into<String>) {
        self.actor_id = Some(actor_id.into());
    }

    pub fn clear_actor_id(&mut self) {
        self.actor_id = None;
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    pub fn backend(&self) -> &Logger {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut Logger {
        &mut self.backend
    }

    pub fn fields(&self, tag: &str) -> LogContext {
        LogContext::new()
            .with_field(REQUEST_ID_KEY, self.request_id.as_str())
            .with_field(TAG_KEY, tag)
            .with_field(ACTOR_ID_KEY, self.actor_id.as_deref())
    }

    pub fn log(&self, level: LogLevel, tag: &str, message: impl Into<MessageArgs>) {
        self.backend.emit(level, message.into().render(), self.fields(tag));
    }

    pub fn trace(&self, tag: &str, message: impl Into<MessageArgs>) {
        self.log(LogLevel::Trace, tag, message);
    }

    pub fn debug(&self, tag: &str, message: impl Into<MessageArgs>) {
        self.log(LogLevel::Debug, tag, message);
    }

    pub fn info(&self, tag: &str, message: impl Into<MessageArgs>) {
        self.log(LogLevel::Info, tag, message);
    }

    pub fn warn(&self, tag: &str, message: impl Into<MessageArgs>) {
        self.log(LogLevel::Warn, tag, message);
    }

    pub fn error(&self, tag: &str, message: impl Into<MessageArgs>) {
        self.log(LogLevel::Error, tag, message);
    }

    pub fn fatal(&self, tag: &str, message: impl Into<MessageArgs>) -> ! {
        self.backend.fatal(message.into().render(), self.fields(tag))
    }

    pub fn panic(&self, tag: &str, message: impl Into<MessageArgs>) -> ! {
        self.backend.panic(message.into().render(), self.fields(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::{SharedBuffer, WriterAppender};

    fn capture(actor_id: Option<&str>) -> (ActorLogger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let backend = Logger::builder()
            .min_level(LogLevel::Trace)
            .appender(WriterAppender::new(buffer.clone()))
            .build();
        let logger = ActorLogger::with_request_id("req-1", actor_id.map(String::from))
            .with_backend(backend);
        (logger, buffer)
    }

    fn last_line(buffer: &SharedBuffer) -> serde_json::Value {
        let lines = buffer.lines();
        serde_json::from_str(lines.last().unwrap()).unwrap()
    }

    #[test]
    fn test_fields_are_exactly_three() {
        let (logger, _) = capture(Some("1234"));
        let fields = logger.fields("Log Test");

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("request_id"), Some(&FieldValue::from("req-1")));
        assert_eq!(fields.get("tag"), Some(&FieldValue::from("Log Test")));
        assert_eq!(fields.get("actor_id"), Some(&FieldValue::from("1234")));
    }

    #[test]
    fn test_unset_actor_is_null() {
        let (logger, buffer) = capture(None);
        logger.info("T", "msg");

        let line = last_line(&buffer);
        assert!(line["actor_id"].is_null());
        assert_eq!(line["tag"], "T");
        assert_eq!(line["request_id"], "req-1");
    }

    #[test]
    fn test_set_and_clear_actor_id() {
        let (mut logger, buffer) = capture(None);

        logger.set_actor_id("u9");
        logger.error("LOGIN", "bad password");
        let line = last_line(&buffer);
        assert_eq!(line["actor_id"], "u9");
        assert_eq!(line["level"], "error");
        assert_eq!(line["msg"], "bad password");

        logger.clear_actor_id();
        logger.warn("LOGOUT", "bye");
        assert!(last_line(&buffer)["actor_id"].is_null());
        assert_eq!(logger.actor_id(), None);
    }

    #[test]
    fn test_render_spacing() {
        assert_eq!(MessageArgs::new().render(), "");
        assert_eq!(MessageArgs::from("a").with("b").render(), "ab");
        assert_eq!(MessageArgs::new().with(1).with(2).render(), "1 2");
        assert_eq!(MessageArgs::new().with(1).with("x").with(2).render(), "1x2");
        assert_eq!(
            MessageArgs::new().with(true).with(FieldValue::Null).render(),
            "true null"
        );
    }

    #[test]
    fn test_event_record_as_message() {
        let (logger, buffer) = capture(Some("1234"));
        let event = EventRecord::new().with_field("tag", "tag_value");

        logger.debug("Log Test", &event);

        let line = last_line(&buffer);
        assert_eq!(line["msg"], r#"{"tag":"tag_value"}"#);
        assert_eq!(line["level"], "debug");
    }

    #[test]
    fn test_from_request_inherits_id() {
        let request = RequestLogger::with_request_id("upstream-7");
        let actor = ActorLogger::from_request(&request, Some("u1".to_string()));

        assert_eq!(actor.request_id(), "upstream-7");
        assert_eq!(actor.actor_id(), Some("u1"));
    }

    #[test]
    fn test_generated_request_id() {
        let a = ActorLogger::new(None).unwrap();
        let b = ActorLogger::new(Some("x".into())).unwrap();

        assert_eq!(a.request_id().len(), 36);
        assert_ne!(a.request_id(), b.request_id());
    }

    #[test]
    fn test_panic_emits_before_unwinding() {
        let (logger, buffer) = capture(Some("u2"));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("CRASH", MessageArgs::from("state ").with(42));
        }));

        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("state 42"));
        let line = last_line(&buffer);
        assert_eq!(line["level"], "panic");
        assert_eq!(line["actor_id"], "u2");
        assert_eq!(line["tag"], "CRASH");
    }
}
