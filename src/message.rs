//! Message types, logging masks, and the severity filter.

use std::fmt::Display;
use std::ops::{BitOr, BitOrAssign};

/// The kind of a log message. This determines the message's prefix, whether a trailing newline is
/// added, and whether the message is considered a debug message. Debug messages are never emitted
/// in release builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogMessageType {
    /// Regular text, written as is.
    Text,
    /// An error, prefixed with `Error: `.
    Error,
    /// Debug-only text, written as is.
    DebugText,
    /// A debug message, prefixed with `Debug: `.
    Debug,
    /// A failed assertion, prefixed with `Assert: `.
    Assert,
}

impl LogMessageType {
    /// All message types.
    pub const ALL: [LogMessageType; 5] = [
        LogMessageType::Text,
        LogMessageType::Error,
        LogMessageType::DebugText,
        LogMessageType::Debug,
        LogMessageType::Assert,
    ];

    /// This type's bit in a [`LogMask`].
    pub const fn bit(self) -> u32 {
        match self {
            LogMessageType::Text => 1 << 0,
            LogMessageType::Error => 1 << 1,
            LogMessageType::DebugText => 1 << 8,
            LogMessageType::Debug => 1 << 9,
            LogMessageType::Assert => 1 << 10,
        }
    }

    /// The literal prefix written in front of the message.
    pub const fn prefix(self) -> &'static str {
        match self {
            LogMessageType::Error => "Error: ",
            LogMessageType::Debug => "Debug: ",
            LogMessageType::Assert => "Assert: ",
            LogMessageType::Text | LogMessageType::DebugText => "",
        }
    }

    /// Whether a newline is appended after the message. Only the prefixed types get one.
    pub const fn adds_newline(self) -> bool {
        !self.prefix().is_empty()
    }

    /// Whether this is a debug message. These are suppressed in release builds and are routed to
    /// the debugger rather than to STDOUT where the platform has a dedicated debug channel.
    pub const fn is_debug(self) -> bool {
        matches!(
            self,
            LogMessageType::DebugText | LogMessageType::Debug | LogMessageType::Assert
        )
    }
}

impl Display for LogMessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogMessageType::Text => "text",
            LogMessageType::Error => "error",
            LogMessageType::DebugText => "debug text",
            LogMessageType::Debug => "debug",
            LogMessageType::Assert => "assert",
        };

        f.write_str(name)
    }
}

/// A set of enabled [`LogMessageType`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogMask(u32);

impl LogMask {
    /// Nothing gets logged.
    pub const NONE: LogMask = LogMask(0);
    /// [`LogMessageType::Text`] and [`LogMessageType::Error`].
    pub const REGULAR: LogMask =
        LogMask(LogMessageType::Text.bit() | LogMessageType::Error.bit());
    /// All debug message types.
    pub const DEBUG: LogMask = LogMask(
        LogMessageType::DebugText.bit() | LogMessageType::Debug.bit() | LogMessageType::Assert.bit(),
    );
    /// Everything gets logged. This is the default.
    pub const ALL: LogMask = LogMask(LogMask::REGULAR.0 | LogMask::DEBUG.0);

    /// Construct a mask from raw bits. Bits that don't belong to any message type are dropped.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        LogMask(bits & LogMask::ALL.0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, message_type: LogMessageType) -> bool {
        self.0 & message_type.bit() != 0
    }

    pub const fn with(self, message_type: LogMessageType) -> Self {
        LogMask(self.0 | message_type.bit())
    }

    pub const fn without(self, message_type: LogMessageType) -> Self {
        LogMask(self.0 & !message_type.bit())
    }
}

impl Default for LogMask {
    fn default() -> Self {
        LogMask::ALL
    }
}

impl From<LogMessageType> for LogMask {
    fn from(message_type: LogMessageType) -> Self {
        LogMask(message_type.bit())
    }
}

impl BitOr for LogMask {
    type Output = LogMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        LogMask(self.0 | rhs.0)
    }
}

impl BitOr<LogMessageType> for LogMask {
    type Output = LogMask;

    fn bitor(self, rhs: LogMessageType) -> Self::Output {
        self.with(rhs)
    }
}

impl BitOrAssign for LogMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Whether a message of type `message_type` passes `mask` in a build where `debug_build` is the
/// value of `debug_assertions`. Debug messages never pass in release builds, regardless of the
/// mask.
pub(crate) const fn passes_filter(
    mask: LogMask,
    message_type: LogMessageType,
    debug_build: bool,
) -> bool {
    if !mask.contains(message_type) {
        return false;
    }

    debug_build || !message_type.is_debug()
}
