use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// Target attached to every event emitted by the use cases, so they can be
/// filtered with `RUST_LOG=sweet_shop=debug`.
pub const LOG_TARGET: &str = "sweet_shop";

pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: LOG_TARGET, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: LOG_TARGET, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: LOG_TARGET, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: LOG_TARGET, "{}", message);
    }
}
