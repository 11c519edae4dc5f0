//! Logging macros for `ActorLogger` calls with several message operands.
//!
//! Each operand is converted with `FieldValue::from` and the operands are
//! joined by [`MessageArgs::render`](crate::MessageArgs::render).
//!
//! # Examples
//!
//! ```
//! use rust_context_logger::prelude::*;
//! use rust_context_logger::info;
//!
//! let logger = ActorLogger::with_request_id("req-1", None);
//!
//! info!(logger, "BOOT", "Server started");
//!
//! let port = 8080;
//! info!(logger, "BOOT", "listening on port ", port);
//! ```

/// Log operands at an explicit level.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let logger = ActorLogger::with_request_id("req-1", None);
/// use rust_context_logger::log;
/// log!(logger, LogLevel::Info, "JOB", "Simple message");
/// log!(logger, LogLevel::Error, "JOB", "Error code: ", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $tag:expr, $($arg:expr),+ $(,)?) => {
        $logger.log(
            $level,
            $tag,
            $crate::MessageArgs::from(vec![$($crate::FieldValue::from($arg)),+]),
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $tag:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $tag, $($arg),+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $tag:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $tag, $($arg),+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $tag:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $tag, $($arg),+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $tag:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $tag, $($arg),+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $tag:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $tag, $($arg),+)
    };
}

/// Log a fatal message, then exit through the backend's exit handler.
///
/// ```no_run
/// # use rust_context_logger::prelude::*;
/// # let logger = ActorLogger::with_request_id("req-1", None);
/// use rust_context_logger::fatal;
/// fatal!(logger, "DB", "Unable to recover: ", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $tag:expr, $($arg:expr),+ $(,)?) => {
        $logger.fatal(
            $tag,
            $crate::MessageArgs::from(vec![$($crate::FieldValue::from($arg)),+]),
        )
    };
}

/// Log a panic-level message, then unwind with the message as payload.
#[macro_export]
macro_rules! panic_log {
    ($logger:expr, $tag:expr, $($arg:expr),+ $(,)?) => {
        $logger.panic(
            $tag,
            $crate::MessageArgs::from(vec![$($crate::FieldValue::from($arg)),+]),
        )
    };
}
