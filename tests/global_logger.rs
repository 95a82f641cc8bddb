use devlog::{LogMask, LogMessageType, Logger, OutputTarget};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Every test here uses the global logger.
static GLOBAL_SLOT_LOCK: Mutex<()> = Mutex::new(());

fn lock_global_slot() -> MutexGuard<'static, ()> {
    GLOBAL_SLOT_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capturing_builder() -> (devlog::LoggerBuilder, Capture) {
    let capture = Capture::default();
    let builder =
        Logger::builder().with_output_target(OutputTarget::Writer(Box::new(capture.clone())));

    (builder, capture)
}

#[test]
fn macros_write_to_the_global_logger() {
    let _guard = lock_global_slot();
    let (builder, capture) = capturing_builder();
    let logger = Arc::new(builder.build());
    devlog::set_global_logger(Some(&logger));

    let x = 5;
    devlog::log_error!("x={x}");
    devlog::log_text!("hello");
    devlog::log_debug!("");
    devlog::log_debug_text!("raw");
    devlog::log_assert!("{} > {}", 1, 2);

    let expected = if cfg!(debug_assertions) {
        "Error: x=5\nhelloDebug: \nrawAssert: 1 > 2\n"
    } else {
        "Error: x=5\nhello"
    };
    assert_eq!(capture.text(), expected);

    devlog::set_global_logger(None);
}

#[test]
fn log_message_macro_uses_the_given_logger() {
    let (builder, capture) = capturing_builder();
    let logger = builder.with_mask(LogMask::REGULAR).build();

    devlog::log_message!(logger, LogMessageType::Error, "{}-{}", "a", "b");
    devlog::log_message!(logger, LogMessageType::Debug, "masked out");

    assert_eq!(capture.text(), "Error: a-b\n");
}

#[test]
fn unregistering_silences_the_free_functions() {
    let _guard = lock_global_slot();
    let (builder, capture) = capturing_builder();
    let logger = Arc::new(builder.build());
    devlog::set_global_logger(Some(&logger));
    devlog::set_global_logger(None);

    devlog::log_text!("a");
    devlog::log_error!("b");
    devlog::log_debug!("c");
    devlog::log(LogMessageType::Assert, format_args!("d"));

    assert_eq!(capture.text(), "");
}

#[test]
fn dropped_logger_is_unregistered() {
    let _guard = lock_global_slot();
    let (builder, capture) = capturing_builder();
    let logger = Arc::new(builder.build());
    devlog::set_global_logger(Some(&logger));
    devlog::log_text!("before");

    drop(logger);
    assert!(devlog::global_logger().is_none());
    devlog::log_text!("after");

    assert_eq!(capture.text(), "before");
}

#[test]
fn build_global_routes_the_log_crate() {
    let _guard = lock_global_slot();
    let (builder, capture) = capturing_builder();
    let logger = builder.build_global().unwrap();

    log::warn!("careful");
    log::error!("broken");
    log::debug!("details");
    devlog::log_error!("direct");

    let expected = if cfg!(debug_assertions) {
        "careful\nError: broken\nDebug: details\nError: direct\n"
    } else {
        "careful\nError: broken\nError: direct\n"
    };
    assert_eq!(capture.text(), expected);

    // The facade can be installed more than once by this crate
    let (builder, _capture) = capturing_builder();
    assert!(builder.build_global().is_ok());

    drop(logger);
    devlog::set_global_logger(None);
}

#[test]
fn oversized_messages_are_truncated() {
    let (builder, capture) = capturing_builder();
    let logger = builder.build();
    let huge = "z".repeat(devlog::MAX_LOG_MESSAGE_SIZE * 4);

    devlog::log_message!(logger, LogMessageType::Error, "{huge}");

    let text = capture.text();
    assert_eq!(text.len(), devlog::MAX_LOG_MESSAGE_SIZE - 1);
    assert!(text.starts_with("Error: zzz"));
    assert!(text.ends_with("z\n"));
}

#[test]
fn default_logger_is_shared_between_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| Arc::as_ptr(devlog::default_logger()) as usize))
        .collect();

    let expected = Arc::as_ptr(devlog::default_logger()) as usize;
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn debug_macro_arguments_only_run_in_debug_builds() {
    let _guard = lock_global_slot();
    devlog::set_global_logger(None);

    let mut calls = 0;
    let mut count = || {
        calls += 1;
        calls
    };
    devlog::log_debug!("{}", count());
    devlog::log_debug_text!("{}", count());
    devlog::log_assert!("{}", count());

    assert_eq!(calls, if cfg!(debug_assertions) { 3 } else { 0 });
}
