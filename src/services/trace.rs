use std::sync::Mutex;

use log::debug;

/// Observer for decisions made inside the recovery pipeline.
///
/// The pipeline itself performs no global logging; callers inject a trace so
/// production runs go through the `log` facade while tests can capture the
/// exact order of repair attempts.
pub trait RecoveryTrace {
    fn event(&self, message: &str);
}

/// Forwards every event to `log::debug!`.
pub struct LogTrace;

impl RecoveryTrace for LogTrace {
    fn event(&self, message: &str) {
        debug!("{}", message);
    }
}

/// Discards every event.
pub struct NoopTrace;

impl RecoveryTrace for NoopTrace {
    fn event(&self, _message: &str) {}
}

/// Buffers events in memory so callers can assert on pipeline behavior.
#[derive(Default)]
pub struct CollectTrace {
    events: Mutex<Vec<String>>,
}

impl CollectTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl RecoveryTrace for CollectTrace {
    fn event(&self, message: &str) {
        self.events.lock().unwrap().push(message.to_string());
    }
}
