//! The logger implementation itself.

use log::Log;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::builder::LoggerBuilder;
use crate::format::{format_log, format_log_line, LogBuffer};
use crate::message::{passes_filter, LogMask, LogMessageType};
use crate::target::OutputTargetImpl;

/// A logger. Renders messages into a fixed-size buffer and writes them to its output target
/// synchronously on the calling thread. Construct one using [`Logger::new()`] or the
/// [`LoggerBuilder`].
///
/// A logger can be registered as the global logger with
/// [`set_global_logger()`][crate::set_global_logger()]. Dropping a registered logger unregisters
/// it.
pub struct Logger {
    /// The enabled message types as [`LogMask`] bits.
    mask: AtomicU32,
    /// Messages are rendered before this is locked, so formatting a message that logs itself
    /// cannot deadlock.
    output_target: Mutex<OutputTargetImpl>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("mask", &self.logging_mask())
            .field("output_target", &self.output_target)
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        crate::global::clear_if_registered(self);
    }
}

impl Logger {
    /// A logger with every message type enabled, writing to the target selected by the `DEVLOG`
    /// environment variable or to the platform default.
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn from_parts(mask: LogMask, output_target: OutputTargetImpl) -> Self {
        Self {
            mask: AtomicU32::new(mask.bits()),
            output_target: Mutex::new(output_target),
        }
    }

    pub fn logging_mask(&self) -> LogMask {
        LogMask::from_bits_truncate(self.mask.load(Ordering::Relaxed))
    }

    pub fn set_logging_mask(&self, mask: LogMask) {
        self.mask.store(mask.bits(), Ordering::Relaxed);
    }

    /// Whether a message of this type would be written. Debug messages are never written in
    /// release builds.
    pub fn is_enabled(&self, message_type: LogMessageType) -> bool {
        passes_filter(self.logging_mask(), message_type, cfg!(debug_assertions))
    }

    /// Render and write a message if its type is enabled. Use [`log_message!`][crate::log_message]
    /// for `format!()`-style arguments. Never fails, overly long messages are truncated and write
    /// errors are ignored.
    pub fn log_message(&self, message_type: LogMessageType, args: fmt::Arguments<'_>) {
        if !self.is_enabled(message_type) {
            return;
        }

        self.write_rendered(&format_log(message_type, args), message_type);
    }

    fn write_rendered(&self, message: &LogBuffer, message_type: LogMessageType) {
        self.output_target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_message(message, message_type);
    }

    pub fn flush(&self) {
        self.output_target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
    }
}

/// The message type a `log` record is written as. Records other than errors and debug messages
/// are written as text.
fn message_type_for(level: log::Level) -> LogMessageType {
    match level {
        log::Level::Error => LogMessageType::Error,
        log::Level::Warn | log::Level::Info => LogMessageType::Text,
        log::Level::Debug | log::Level::Trace => LogMessageType::Debug,
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.is_enabled(message_type_for(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let message_type = message_type_for(record.level());
        if !self.is_enabled(message_type) {
            return;
        }

        // `log` records are whole lines, even when written as text
        self.write_rendered(&format_log_line(message_type, *record.args()), message_type);
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}
