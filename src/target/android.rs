//! Writing to Android's system log through `__android_log_write()`.

use std::ffi::CString;
use std::io::Write;
use std::os::raw::c_int;

use android_log_sys::{LogPriority, __android_log_write};

/// The tag every message is logged under.
const ANDROID_LOG_TAG: &str = "devlog";

/// Collects a message's bytes and writes them to the system log at `INFO` priority when flushed.
#[derive(Debug)]
pub struct SystemLogWriter {
    tag: CString,
    pending: Vec<u8>,
}

impl Default for SystemLogWriter {
    fn default() -> Self {
        Self {
            tag: to_c_string(ANDROID_LOG_TAG.as_bytes().to_vec()),
            pending: Vec::with_capacity(crate::format::MAX_LOG_MESSAGE_SIZE),
        }
    }
}

impl Drop for SystemLogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl Write for SystemLogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let text = to_c_string(std::mem::take(&mut self.pending));
        unsafe {
            __android_log_write(
                LogPriority::INFO as c_int,
                self.tag.as_ptr(),
                text.as_ptr(),
            )
        };

        Ok(())
    }
}

/// Convert to a C string, dropping any interior null bytes.
fn to_c_string(mut bytes: Vec<u8>) -> CString {
    bytes.retain(|&b| b != 0);

    CString::new(bytes).unwrap_or_default()
}
