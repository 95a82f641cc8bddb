//! The logger's output targets. This is where rendered messages end up.

use std::fmt::Debug;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::builder::OutputTarget;
use crate::format::LogBuffer;
use crate::message::LogMessageType;

#[cfg(target_os = "android")]
mod android;
#[cfg(windows)]
mod windbg;

/// The environment variable for picking an output target when none was set explicitly.
pub const DEVLOG_ENV: &str = "DEVLOG";

/// Similar to [`crate::builder::OutputTarget`], but contains the actual data needed to write to the
/// target.
pub enum OutputTargetImpl {
    /// The default target on Windows. Regular messages are written to STDOUT if the process has a
    /// console, everything else goes to the debugger through `OutputDebugStringW()`. Whether
    /// there's a console is checked once when the target is created.
    #[cfg(windows)]
    StdoutOrWinDbg {
        stdout: StandardStream,
        console: bool,
        windbg: windbg::WinDbgWriter,
    },
    /// Writes directly to STDOUT. The default target on platforms without a debug channel.
    Stdout(StandardStream),
    /// Outputs to the Windows debugger using `OutputDebugStringW()`.
    #[cfg(windows)]
    WinDbg(windbg::WinDbgWriter),
    /// Writes to Android's system log. The default target on Android.
    #[cfg(target_os = "android")]
    SystemLog(android::SystemLogWriter),
    /// Writes to an arbitrary writer.
    Writer(Box<dyn Write + Send>),
}

/// Where a single message should be written. Only STDOUT supports colors.
enum Sink<'a> {
    Color(&'a mut dyn WriteColor),
    Plain(&'a mut dyn Write),
}

impl Debug for OutputTargetImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(windows)]
            OutputTargetImpl::StdoutOrWinDbg {
                stdout,
                console,
                windbg,
            } => f
                .debug_struct("StdoutOrWinDbg")
                .field("stdout", &describe_stdout(stdout))
                .field("console", console)
                .field("windbg", windbg)
                .finish(),
            OutputTargetImpl::Stdout(stdout) => {
                f.debug_tuple("Stdout").field(&describe_stdout(stdout)).finish()
            }
            #[cfg(windows)]
            OutputTargetImpl::WinDbg(windbg) => f.debug_tuple("WinDbg").field(windbg).finish(),
            #[cfg(target_os = "android")]
            OutputTargetImpl::SystemLog(writer) => {
                f.debug_tuple("SystemLog").field(writer).finish()
            }
            OutputTargetImpl::Writer(_) => f.debug_tuple("Writer").field(&"<writer>").finish(),
        }
    }
}

fn describe_stdout(stdout: &StandardStream) -> &'static str {
    if stdout.supports_color() {
        "<stdout stream with color support>"
    } else {
        "<stdout stream>"
    }
}

impl OutputTargetImpl {
    /// The target used when nothing else was configured. This sends debug messages to the
    /// platform's debug channel if it has one.
    pub fn new_platform_default() -> Self {
        #[cfg(windows)]
        return Self::new_stdout_or_windbg();
        #[cfg(target_os = "android")]
        return Self::new_system_log();
        #[cfg(not(any(windows, target_os = "android")))]
        return Self::new_stdout();
    }

    /// Construct the dynamic Windows target. Checks once whether STDOUT is attached to a console.
    #[cfg(windows)]
    pub fn new_stdout_or_windbg() -> Self {
        OutputTargetImpl::StdoutOrWinDbg {
            stdout: StandardStream::stdout(stdout_color_support()),
            console: atty::is(atty::Stream::Stdout),
            windbg: windbg::WinDbgWriter::default(),
        }
    }

    /// Construct an [`OutputTargetImpl`] that writes to STDOUT with optional color support
    /// determined by the environment.
    pub fn new_stdout() -> Self {
        OutputTargetImpl::Stdout(StandardStream::stdout(stdout_color_support()))
    }

    /// Construct an [`OutputTargetImpl`] that writes to the Windows debugger.
    #[cfg(windows)]
    pub fn new_windbg() -> Self {
        OutputTargetImpl::WinDbg(windbg::WinDbgWriter::default())
    }

    /// Construct an [`OutputTargetImpl`] that writes to the Android system log.
    #[cfg(target_os = "android")]
    pub fn new_system_log() -> Self {
        OutputTargetImpl::SystemLog(android::SystemLogWriter::default())
    }

    pub fn from_target(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Stdout => Self::new_stdout(),
            #[cfg(windows)]
            OutputTarget::Debugger => Self::new_windbg(),
            #[cfg(target_os = "android")]
            OutputTarget::SystemLog => Self::new_system_log(),
            OutputTarget::Writer(writer) => OutputTargetImpl::Writer(writer),
        }
    }

    /// If the `DEVLOG` environment variable is set, then parse that as an [`OutputTarget`].
    /// Otherwise, or when the value can't be parsed, this falls back to the platform default. A
    /// parse failure is reported on STDERR.
    pub fn default_from_environment() -> Self {
        let devlog_env = std::env::var(DEVLOG_ENV);
        let devlog_env_str = devlog_env.as_deref().unwrap_or("");
        if !devlog_env_str.is_empty() {
            match devlog_env_str.parse::<OutputTarget>() {
                Ok(target) => return Self::from_target(target),
                // The logger doesn't exist yet, so STDERR is the only place this can go
                Err(err) => eprintln!(
                    "Ignoring {DEVLOG_ENV}='{devlog_env_str}', falling back to the default \
                     target: {err}"
                ),
            }
        }

        Self::new_platform_default()
    }

    /// Pick the writer for a message. Debug messages prefer the platform's debug channel.
    #[cfg_attr(not(windows), allow(unused_variables))]
    fn sink(&mut self, debug: bool) -> Sink<'_> {
        match self {
            #[cfg(windows)]
            OutputTargetImpl::StdoutOrWinDbg {
                stdout, console, ..
            } if prefers_stdout(*console, debug) => Sink::Color(stdout),
            #[cfg(windows)]
            OutputTargetImpl::StdoutOrWinDbg { ref mut windbg, .. } => Sink::Plain(windbg),
            OutputTargetImpl::Stdout(ref mut stdout) => Sink::Color(stdout),
            #[cfg(windows)]
            OutputTargetImpl::WinDbg(ref mut windbg) => Sink::Plain(windbg),
            #[cfg(target_os = "android")]
            OutputTargetImpl::SystemLog(ref mut writer) => Sink::Plain(writer),
            OutputTargetImpl::Writer(ref mut writer) => Sink::Plain(writer.as_mut()),
        }
    }

    /// Write a rendered message to exactly one destination and flush it. Write errors are
    /// swallowed, logging should never be able to fail.
    pub fn write_message(&mut self, message: &LogBuffer, message_type: LogMessageType) {
        let _ = match self.sink(message_type.is_debug()) {
            Sink::Color(writer) => write_colored(writer, message, message_type),
            Sink::Plain(writer) => writer
                .write_all(message.as_bytes())
                .and_then(|()| writer.flush()),
        };
    }

    pub fn flush(&mut self) {
        let _ = match self.sink(false) {
            Sink::Color(writer) => writer.flush(),
            Sink::Plain(writer) => writer.flush(),
        };
        #[cfg(windows)]
        if let OutputTargetImpl::StdoutOrWinDbg { windbg, .. } = self {
            let _ = windbg.flush();
        }
    }
}

/// Whether the dynamic target writes a message to STDOUT instead of the debug channel. Only regular
/// messages go to STDOUT, and only when there is a console to show them.
#[cfg_attr(not(windows), allow(dead_code))]
fn prefers_stdout(console: bool, debug: bool) -> bool {
    console && !debug
}

/// Write the message with a colored prefix. The color is only emitted if the stream supports it.
fn write_colored(
    writer: &mut dyn WriteColor,
    message: &LogBuffer,
    message_type: LogMessageType,
) -> std::io::Result<()> {
    if let Some(color) = prefix_color(message_type) {
        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        writer.write_all(message.prefix().as_bytes())?;
        writer.reset()?;
        writer.write_all(message.body().as_bytes())?;
    } else {
        writer.write_all(message.as_bytes())?;
    }

    writer.flush()
}

fn prefix_color(message_type: LogMessageType) -> Option<Color> {
    match message_type {
        LogMessageType::Error => Some(Color::Red),
        LogMessageType::Debug => Some(Color::Cyan),
        LogMessageType::Assert => Some(Color::Magenta),
        LogMessageType::Text | LogMessageType::DebugText => None,
    }
}

/// Whether to use colors when outputting to STDOUT. Considers the `CLICOLOR`, `CLICOLOR_FORCE`, and
/// `NO_COLOR` environment variables, and whether or not STDOUT is attached to a real TTY.
fn stdout_color_support() -> ColorChoice {
    if let Ok(value) = std::env::var("CLICOLOR_FORCE") {
        if value.trim() != "0" {
            return ColorChoice::Always;
        }
    }

    if let Ok(value) = std::env::var("NO_COLOR") {
        if value.trim() != "0" {
            return ColorChoice::Never;
        }
    }

    if let Ok(value) = std::env::var("CLICOLOR") {
        if value.trim() == "0" {
            return ColorChoice::Never;
        }
    }

    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_log;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn writer_receives_debug_and_regular_messages() {
        let capture = Capture::default();
        let mut target = OutputTargetImpl::Writer(Box::new(capture.clone()));

        let message = format_log(LogMessageType::Error, format_args!("bad {}", 1));
        target.write_message(&message, LogMessageType::Error);
        let message = format_log(LogMessageType::DebugText, format_args!("dbg"));
        target.write_message(&message, LogMessageType::DebugText);

        assert_eq!(&*capture.0.lock().unwrap(), b"Error: bad 1\ndbg");
    }

    #[test]
    fn write_failures_are_ignored() {
        let mut target = OutputTargetImpl::Writer(Box::new(BrokenPipe));
        let message = format_log(LogMessageType::Text, format_args!("lost"));
        target.write_message(&message, LogMessageType::Text);
        target.flush();
    }

    #[test]
    fn colored_prefix_keeps_text_intact() {
        let mut buffer = termcolor::Buffer::ansi();
        let message = format_log(LogMessageType::Assert, format_args!("x"));
        write_colored(&mut buffer, &message, LogMessageType::Assert).unwrap();

        let text = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(text.contains("Assert: "));
        assert!(text.ends_with("x\n"));
        assert!(text.starts_with('\x1b'));

        let mut buffer = termcolor::Buffer::no_color();
        write_colored(&mut buffer, &message, LogMessageType::Assert).unwrap();
        assert_eq!(buffer.into_inner(), b"Assert: x\n");
    }

    #[test]
    fn debug_output_is_descriptive() {
        let target = OutputTargetImpl::Writer(Box::new(std::io::sink()));
        assert_eq!(format!("{target:?}"), "Writer(\"<writer>\")");
    }

    #[test]
    fn only_regular_messages_with_a_console_prefer_stdout() {
        assert!(prefers_stdout(true, false));
        assert!(!prefers_stdout(true, true));
        assert!(!prefers_stdout(false, false));
        assert!(!prefers_stdout(false, true));
    }

    #[test]
    fn unparseable_environment_falls_back_to_the_platform_default() {
        std::env::set_var(DEVLOG_ENV, "not-a-target");
        let from_environment = format!("{:?}", OutputTargetImpl::default_from_environment());
        std::env::set_var(DEVLOG_ENV, "stdout");
        let explicit_stdout = format!("{:?}", OutputTargetImpl::default_from_environment());
        std::env::remove_var(DEVLOG_ENV);

        assert_eq!(
            from_environment,
            format!("{:?}", OutputTargetImpl::new_platform_default())
        );
        assert!(explicit_stdout.starts_with("Stdout("));
    }
}
