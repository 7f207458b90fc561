use log::Log;

/// Keeps the process logger alive for the run and flushes it when dropped
///
/// Create it right after the logger is installed and drop it before exit.
pub struct LogGuard {
    _private: (),
}

impl LogGuard {
    pub fn new() -> Self {
        log::debug!("Logger initialized");
        Self { _private: () }
    }
}

impl Default for LogGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        log::logger().flush();
    }
}
