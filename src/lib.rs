//! # Rust Context Logger
//!
//! A contextual structured-logging facade. Each logger is bound to a request
//! id for its whole life and stamps it, together with a fixed set of context
//! fields, on every line it writes.
//!
//! ## Features
//!
//! - **Request logging**: [`RequestLogger`] maps an [`EventRecord`] of HTTP
//!   metadata onto a fixed eleven-field shape
//! - **Actor logging**: [`ActorLogger`] tags free-form messages with a request
//!   id, a tag and the acting user
//! - **Structured output**: line-delimited JSON by default, logfmt-style text
//!   on request
//! - **Pluggable sinks**: console, file, or any `Write` implementation
//!
//! ## Example
//!
//! ```
//! use rust_context_logger::prelude::*;
//!
//! let buffer = SharedBuffer::new();
//! let backend = Logger::builder()
//!     .min_level(LogLevel::Debug)
//!     .appender(WriterAppender::new(buffer.clone()))
//!     .build();
//!
//! let logger = RequestLogger::with_request_id("abc-123").with_backend(backend);
//! logger.info(
//!     &EventRecord::new()
//!         .with_field("tag", "http")
//!         .with_field("message", "request served")
//!         .with_field("response_code", 200),
//! );
//!
//! let line: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
//! assert_eq!(line["request_id"], "abc-123");
//! assert_eq!(line["response_code"], 200);
//! assert!(line["actor_id"].is_null());
//! ```

pub mod actor;
pub mod appenders;
pub mod core;
pub mod event;
pub mod id;
pub mod macros;
pub mod request;

pub mod prelude {
    pub use crate::actor::{ActorLogger, MessageArgs};
    pub use crate::appenders::{
        ConsoleAppender, ConsoleTarget, FileAppender, SharedBuffer, WriterAppender,
    };
    pub use crate::core::{
        Appender, FieldValue, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, OutputTarget, Result,
        TimestampFormat,
    };
    pub use crate::event::EventRecord;
    pub use crate::id::{IdentifierSource, UuidSource};
    pub use crate::request::RequestLogger;
}

pub use actor::{ActorLogger, MessageArgs};
pub use appenders::{ConsoleAppender, ConsoleTarget, FileAppender, SharedBuffer, WriterAppender};
pub use self::core::{
    Appender, ExitHandler, FieldValue, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, OutputTarget, Result,
    TimestampFormat, FATAL_EXIT_CODE,
};
pub use event::EventRecord;
pub use id::{IdentifierSource, UuidSource};
pub use request::RequestLogger;
