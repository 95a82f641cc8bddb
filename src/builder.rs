//! A builder interface for the logger.

use log::SetLoggerError;
use std::error::Error;
use std::fmt::{Debug, Display};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use crate::logger::Logger;
use crate::message::LogMask;
use crate::target::OutputTargetImpl;

/// Constructs a [`Logger`].
#[derive(Default, Debug)]
pub struct LoggerBuilder {
    /// The message types the logger starts out with. Can still be changed on the logger.
    mask: LogMask,
    /// An explicitly set output target. If this is `None`, the `DEVLOG` environment variable or the
    /// platform default decides.
    output_target: Option<OutputTarget>,
}

/// Determines where the logger should write its output. If no explicit target is chosen, then the
/// `DEVLOG` environment variable is parsed using [`FromStr`]. If that isn't set either, a platform
/// dependent default is used. On Windows that writes regular messages to STDOUT if the process has
/// a console and sends everything else to the debugger. On Android everything goes to the system
/// log. Elsewhere everything goes to STDOUT.
pub enum OutputTarget {
    /// Write directly to STDOUT. Parsed from `stdout`.
    Stdout,
    /// Output to the Windows debugger using `OutputDebugStringW()`. Parsed from `debugger` or
    /// `windbg`.
    #[cfg(windows)]
    Debugger,
    /// Output to the Android system log. Parsed from `syslog` or `logcat`.
    #[cfg(target_os = "android")]
    SystemLog,
    /// Write to an arbitrary writer. Every message is written here, debug messages included.
    Writer(Box<dyn Write + Send>),
}

impl Debug for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("Stdout"),
            #[cfg(windows)]
            OutputTarget::Debugger => f.write_str("Debugger"),
            #[cfg(target_os = "android")]
            OutputTarget::SystemLog => f.write_str("SystemLog"),
            OutputTarget::Writer(_) => f.debug_tuple("Writer").field(&"<writer>").finish(),
        }
    }
}

/// An error raised when parsing an [`OutputTarget`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutputTargetError {
    /// The name doesn't match any target.
    Unknown(String),
    /// The target exists, but not on this platform.
    Unsupported(&'static str),
}

impl Error for ParseOutputTargetError {}

impl Display for ParseOutputTargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseOutputTargetError::Unknown(name) => write!(f, "Unknown output target '{name}'"),
            ParseOutputTargetError::Unsupported(name) => {
                write!(f, "The '{name}' output target is not available on this platform")
            }
        }
    }
}

impl FromStr for OutputTarget {
    type Err = ParseOutputTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("stdout") {
            return Ok(OutputTarget::Stdout);
        }
        if s.eq_ignore_ascii_case("debugger") || s.eq_ignore_ascii_case("windbg") {
            #[cfg(windows)]
            return Ok(OutputTarget::Debugger);
            #[cfg(not(windows))]
            return Err(ParseOutputTargetError::Unsupported("debugger"));
        }
        if s.eq_ignore_ascii_case("syslog") || s.eq_ignore_ascii_case("logcat") {
            #[cfg(target_os = "android")]
            return Ok(OutputTarget::SystemLog);
            #[cfg(not(target_os = "android"))]
            return Err(ParseOutputTargetError::Unsupported("syslog"));
        }

        Err(ParseOutputTargetError::Unknown(s.to_owned()))
    }
}

impl LoggerBuilder {
    /// Create a builder for a logger with every message type enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the logger's initial logging mask. Debug messages are still dropped in release builds,
    /// even if they are enabled here.
    pub fn with_mask(mut self, mask: LogMask) -> Self {
        self.mask = mask;
        self
    }

    /// Explicitly set the output target for the logger. This is normally decided by the `DEVLOG`
    /// environment variable.
    pub fn with_output_target(mut self, target: OutputTarget) -> Self {
        self.output_target = Some(target);
        self
    }

    /// Construct the logger. The logger is not registered anywhere, see
    /// [`set_global_logger()`][crate::set_global_logger()].
    pub fn build(self) -> Logger {
        let output_target = match self.output_target {
            Some(target) => OutputTargetImpl::from_target(target),
            None => OutputTargetImpl::default_from_environment(),
        };

        Logger::from_parts(self.mask, output_target)
    }

    /// Construct the logger, register it as the global logger, and route the `log` crate's macros
    /// to it. The global logger only holds a weak reference, so the returned logger needs to be
    /// kept alive for as long as it should be used. Fails if some other `log` implementation has
    /// already been installed.
    pub fn build_global(self) -> Result<Arc<Logger>, SetLoggerError> {
        crate::global::install_log_facade(log::LevelFilter::Trace)?;

        let logger = Arc::new(self.build());
        crate::global::set_global_logger(Some(&logger));

        Ok(logger)
    }
}
