//! The global logger slot and the free logging functions that write to it.

use log::{LevelFilter, Log, SetLoggerError};
use once_cell::sync::{Lazy, OnceCell};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::logger::Logger;
use crate::message::LogMessageType;

/// The logger the free functions write to. This does not keep the logger alive. Dropping the
/// registered logger empties the slot.
static GLOBAL_LOGGER: RwLock<Option<Weak<Logger>>> = RwLock::new(None);

/// Created on first use and never dropped. Safe to request this before anything else has been set
/// up.
static DEFAULT_LOGGER: Lazy<Arc<Logger>> = Lazy::new(|| Arc::new(Logger::new()));

/// Set once [`LOG_FACADE`] has been handed to [`log::set_logger()`].
static LOG_FACADE_INSTALLED: OnceCell<()> = OnceCell::new();
static LOG_FACADE: GlobalLogFacade = GlobalLogFacade;

/// Replace the global logger, or clear it with `None`. Only a weak reference is stored, so the
/// caller stays responsible for keeping the logger alive. With no global logger the free logging
/// functions do nothing.
pub fn set_global_logger(logger: Option<&Arc<Logger>>) {
    *GLOBAL_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner) = logger.map(Arc::downgrade);
}

/// The current global logger, if one is registered and still alive. Unlike
/// [`default_logger()`] this never creates a logger.
pub fn global_logger() -> Option<Arc<Logger>> {
    GLOBAL_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .and_then(Weak::upgrade)
}

/// The process wide default logger. This is created on first use and is separate from the global
/// logger slot. Register it with `set_global_logger(Some(default_logger()))` to have the free
/// functions use it.
pub fn default_logger() -> &'static Arc<Logger> {
    &DEFAULT_LOGGER
}

/// Called when a logger is dropped. Empties the global slot if it refers to `logger`.
pub(crate) fn clear_if_registered(logger: &Logger) {
    let mut slot = GLOBAL_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let registered = slot
        .as_ref()
        .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), logger));
    if registered {
        *slot = None;
    }
}

/// Write a message of any type to the global logger. Does nothing if there is no global logger.
pub fn log(message_type: LogMessageType, args: fmt::Arguments<'_>) {
    // The slot's lock must be released before the logger is used, since dropping the last
    // reference to it locks the slot again
    if let Some(logger) = global_logger() {
        logger.log_message(message_type, args);
    }
}

/// Write [`LogMessageType::Text`] to the global logger.
pub fn log_text(args: fmt::Arguments<'_>) {
    log(LogMessageType::Text, args);
}

/// Write [`LogMessageType::Error`] to the global logger.
pub fn log_error(args: fmt::Arguments<'_>) {
    log(LogMessageType::Error, args);
}

/// Write [`LogMessageType::DebugText`] to the global logger. Only exists in debug builds.
#[cfg(debug_assertions)]
pub fn log_debug_text(args: fmt::Arguments<'_>) {
    log(LogMessageType::DebugText, args);
}

/// Write [`LogMessageType::Debug`] to the global logger. Only exists in debug builds.
#[cfg(debug_assertions)]
pub fn log_debug(args: fmt::Arguments<'_>) {
    log(LogMessageType::Debug, args);
}

/// Write [`LogMessageType::Assert`] to the global logger. Only exists in debug builds.
#[cfg(debug_assertions)]
pub fn log_assert(args: fmt::Arguments<'_>) {
    log(LogMessageType::Assert, args);
}

/// Forwards records from the `log` crate's macros to whatever the global logger is at the time.
struct GlobalLogFacade;

impl Log for GlobalLogFacade {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        global_logger().is_some_and(|logger| logger.enabled(metadata))
    }

    fn log(&self, record: &log::Record) {
        if let Some(logger) = global_logger() {
            logger.log(record);
        }
    }

    fn flush(&self) {
        if let Some(logger) = global_logger() {
            Log::flush(&*logger);
        }
    }
}

/// Route the `log` crate's macros to the global logger. Installing the facade a second time only
/// updates the maximum level. Fails if another `log` implementation has already been installed.
pub fn install_log_facade(max_level: LevelFilter) -> Result<(), SetLoggerError> {
    LOG_FACADE_INSTALLED.get_or_try_init(|| log::set_logger(&LOG_FACADE))?;
    log::set_max_level(max_level);

    Ok(())
}
