//! `format!()`-style macros for writing to a specific logger or to the global logger.
//!
//! The debug macros compile to nothing in release builds. Their arguments are still type checked,
//! but never evaluated.

/// Write a message of the given [`LogMessageType`][crate::LogMessageType] to a logger.
///
/// ```
/// use devlog::{log_message, LogMessageType, Logger};
///
/// let logger = Logger::new();
/// log_message!(logger, LogMessageType::Error, "x={}", 5);
/// ```
#[macro_export]
macro_rules! log_message {
    ($logger:expr, $message_type:expr, $($arg:tt)+) => {
        $logger.log_message($message_type, ::std::format_args!($($arg)+))
    };
}

/// Write text to the global logger, without a prefix or a trailing newline.
#[macro_export]
macro_rules! log_text {
    ($($arg:tt)+) => {
        $crate::log_text(::std::format_args!($($arg)+))
    };
}

/// Write an error to the global logger.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::log_error(::std::format_args!($($arg)+))
    };
}

/// Write debug-only text to the global logger, without a prefix or a trailing newline. Does
/// nothing in release builds.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! log_debug_text {
    ($($arg:tt)+) => {
        $crate::log_debug_text(::std::format_args!($($arg)+))
    };
}

/// Write debug-only text to the global logger, without a prefix or a trailing newline. Does
/// nothing in release builds.
#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! log_debug_text {
    ($($arg:tt)+) => {{
        if false {
            let _ = ::std::format_args!($($arg)+);
        }
    }};
}

/// Write a debug message to the global logger. Does nothing in release builds.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::log_debug(::std::format_args!($($arg)+))
    };
}

/// Write a debug message to the global logger. Does nothing in release builds.
#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {{
        if false {
            let _ = ::std::format_args!($($arg)+);
        }
    }};
}

/// Write a failed assertion to the global logger. Does nothing in release builds.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! log_assert {
    ($($arg:tt)+) => {
        $crate::log_assert(::std::format_args!($($arg)+))
    };
}

/// Write a failed assertion to the global logger. Does nothing in release builds.
#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! log_assert {
    ($($arg:tt)+) => {{
        if false {
            let _ = ::std::format_args!($($arg)+);
        }
    }};
}
