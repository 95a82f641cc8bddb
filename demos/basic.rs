use devlog::{LogMask, LogMessageType, Logger};

fn main() {
    // Where the output goes is decided by the `DEVLOG` environment variable, or by the platform if
    // that isn't set. On Windows without a console everything ends up in the debugger.
    let logger = Logger::builder()
        .build_global()
        // Another `log` implementation was already installed, which can't happen here
        .expect("A logger has already been set up");

    devlog::log_text!("Plain text has no prefix and no newline, ");
    devlog::log_text!("so it can be written in pieces\n");
    devlog::log_error!("Something went wrong: {}", 42);
    // These only exist in debug builds and expand to nothing in release builds
    devlog::log_debug!("Only visible in debug builds");
    devlog::log_assert!("{} != {}", 1, 2);

    // The `log` crate's macros end up in the same place
    log::info!("This is a regular log message");

    // Turning off errors on the fly
    logger.set_logging_mask(LogMask::ALL.without(LogMessageType::Error));
    devlog::log_error!("This error is filtered out");

    // Once the logger is gone, the free functions don't do anything anymore
    drop(logger);
    devlog::log_error!("Nobody will see this");
}
