//! A small synchronous logger. Messages are rendered with a prefix that depends on their
//! [`LogMessageType`] into a fixed-size buffer, filtered through a per-logger [`LogMask`], and
//! written to STDOUT, the Windows debugger, or Android's system log depending on the platform and
//! on whether the message is a debug message. Debug messages are never written in release builds.
//!
//! The free functions and macros like [`log_error!`] write to the global logger, which is empty
//! until one is registered with [`set_global_logger()`]:
//!
//! ```
//! use std::sync::Arc;
//!
//! let logger = Arc::new(devlog::Logger::new());
//! devlog::set_global_logger(Some(&logger));
//!
//! devlog::log_text!("Starting up\n");
//! devlog::log_error!("Could not open '{}'", "config.toml");
//! ```

mod builder;
mod format;
mod global;
mod logger;
mod macros;
mod message;
mod target;

pub use builder::{LoggerBuilder, OutputTarget, ParseOutputTargetError};
pub use format::{format_log, LogBuffer, MAX_LOG_MESSAGE_SIZE};
pub use global::{
    default_logger, global_logger, install_log_facade, log, log_error, log_text,
    set_global_logger,
};
#[cfg(debug_assertions)]
pub use global::{log_assert, log_debug, log_debug_text};
pub use log::SetLoggerError;
pub use logger::Logger;
pub use message::{LogMask, LogMessageType};
pub use target::DEVLOG_ENV;
