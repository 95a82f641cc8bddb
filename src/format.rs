//! Rendering log messages into a fixed-size buffer.

use std::fmt::{self, Debug, Write};

use crate::message::LogMessageType;

/// The size of the buffer a message is rendered into. A rendered message contains at most
/// `MAX_LOG_MESSAGE_SIZE - 1` bytes, anything past that is truncated.
pub const MAX_LOG_MESSAGE_SIZE: usize = 2048;

/// A rendered log message living on the stack. Produced by [`format_log()`].
pub struct LogBuffer {
    bytes: [u8; MAX_LOG_MESSAGE_SIZE],
    len: usize,
    prefix_len: usize,
    truncated: bool,
}

impl LogBuffer {
    fn new() -> Self {
        Self {
            bytes: [0; MAX_LOG_MESSAGE_SIZE],
            len: 0,
            prefix_len: 0,
            truncated: false,
        }
    }

    /// The entire rendered message, including the prefix and the trailing newline.
    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied into the buffer
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The message type's prefix, e.g. `Error: `.
    pub fn prefix(&self) -> &str {
        &self.as_str()[..self.prefix_len]
    }

    /// Everything after the prefix.
    pub fn body(&self) -> &str {
        &self.as_str()[self.prefix_len..]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the formatted text did not fit and was cut off.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Append as much of `s` as fits in `limit` bytes total without splitting a character.
    fn push_bounded(&mut self, s: &str, limit: usize) {
        let available = limit.saturating_sub(self.len);
        let mut take = s.len().min(available);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        if take < s.len() {
            self.truncated = true;
        }

        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
    }
}

impl Debug for LogBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogBuffer")
            .field("text", &self.as_str())
            .field("prefix_len", &self.prefix_len)
            .field("truncated", &self.truncated)
            .finish()
    }
}

/// A [`fmt::Write`] adapter that silently drops everything past `limit`. Never fails, so a long
/// message can't interrupt formatting halfway through an argument.
struct BoundedWriter<'a> {
    buffer: &'a mut LogBuffer,
    limit: usize,
}

impl Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_bounded(s, self.limit);

        Ok(())
    }
}

/// Render a message of type `message_type` into a [`LogBuffer`]. The result is the type's prefix,
/// followed by the formatted arguments, followed by a newline for the prefixed types. The text
/// never exceeds `MAX_LOG_MESSAGE_SIZE - 1` bytes. If it would, the formatted arguments are
/// truncated while the prefix and the newline are kept.
pub fn format_log(message_type: LogMessageType, args: fmt::Arguments<'_>) -> LogBuffer {
    render(message_type, args, message_type.adds_newline())
}

/// Like [`format_log()`], but always ends the message with a newline, even for types that
/// normally don't get one. Used for `log` records, which are always whole lines.
pub(crate) fn format_log_line(
    message_type: LogMessageType,
    args: fmt::Arguments<'_>,
) -> LogBuffer {
    render(message_type, args, true)
}

fn render(message_type: LogMessageType, args: fmt::Arguments<'_>, newline: bool) -> LogBuffer {
    const TEXT_LIMIT: usize = MAX_LOG_MESSAGE_SIZE - 1;

    let mut buffer = LogBuffer::new();
    buffer.push_bounded(message_type.prefix(), TEXT_LIMIT);
    buffer.prefix_len = buffer.len;

    // The newline always fits
    let body_limit = if newline { TEXT_LIMIT - 1 } else { TEXT_LIMIT };
    match args.as_str() {
        Some(literal) => buffer.push_bounded(literal, body_limit),
        None => {
            let mut writer = BoundedWriter {
                buffer: &mut buffer,
                limit: body_limit,
            };
            // `BoundedWriter` never fails, an error can only come from a broken `Display` impl
            let _ = writer.write_fmt(args);
        }
    }

    if newline {
        buffer.push_bounded("\n", TEXT_LIMIT);
    }

    buffer
}
