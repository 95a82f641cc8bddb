//! Adapters for logging to a windows debugger. Split off into a module to avoid littering `#[cfg]`
//! attributes all over the place.

use std::io::Write;

use windows::core::PCWSTR;
use windows::Win32::System::Diagnostics::Debug::OutputDebugStringW;

/// A [`Write`] implementation that sends text to the Windows debugger using
/// `OutputDebugStringW()`. Written bytes are collected until [`flush()`][Write::flush()] is called
/// so a message reaches the debugger as a single string. The dispatcher flushes after every
/// message.
///
/// # Notes
///
/// Only valid UTF-8 text can be written to this. Invalid input is replaced with an error message.
#[derive(Debug)]
pub struct WinDbgWriter {
    /// The current message's bytes.
    pending: Vec<u8>,
    /// `pending` converted to a null terminated UTF-16 string. `OutputDebugStringA()` only accepts
    /// UTF-8 on very recent Windows versions.
    wide: Vec<u16>,
}

impl Default for WinDbgWriter {
    fn default() -> Self {
        Self {
            pending: Vec::with_capacity(crate::format::MAX_LOG_MESSAGE_SIZE),
            wide: Vec::with_capacity(crate::format::MAX_LOG_MESSAGE_SIZE),
        }
    }
}

impl Drop for WinDbgWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl Write for WinDbgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        self.wide.clear();
        match std::str::from_utf8(&self.pending) {
            Ok(text) => self.wide.extend(text.encode_utf16()),
            Err(err) => self
                .wide
                .extend(format!("ERROR: Invalid UTF-8 in log message: {err}\n").encode_utf16()),
        }
        self.pending.clear();

        // Treated as a null terminated string, interior nulls end the message early
        self.wide.push(0);
        unsafe { OutputDebugStringW(PCWSTR::from_raw(self.wide.as_ptr())) };

        Ok(())
    }
}
