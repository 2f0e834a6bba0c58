// Tracing log adapter - Structured logging using tracing crate

use async_trait::async_trait;
use tracing::{debug, error, info, trace, warn};

use crate::ports::*;

/// Tracing log adapter
///
/// Forwards to whatever subscriber `utils::logging::init_logging` installed.
pub struct TracingLogAdapter {
    min_level: LogLevel,
}

impl TracingLogAdapter {
    /// Create new tracing log adapter
    pub fn new() -> Self {
        Self::with_min_level(LogLevel::Trace)
    }

    /// Drop events below `min_level` before they reach the subscriber
    pub fn with_min_level(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn render_context(event: &LogEvent) -> String {
        event
            .context
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TracingLogAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogPort for TracingLogAdapter {
    async fn info(&self, message: &str) {
        if self.should_log(LogLevel::Info) {
            info!("{}", message);
        }
    }

    async fn warn(&self, message: &str) {
        if self.should_log(LogLevel::Warn) {
            warn!("{}", message);
        }
    }

    async fn error(&self, message: &str) {
        if self.should_log(LogLevel::Error) {
            error!("{}", message);
        }
    }

    async fn debug(&self, message: &str) {
        if self.should_log(LogLevel::Debug) {
            debug!("{}", message);
        }
    }

    async fn log_event(&self, event: &LogEvent) {
        if !self.should_log(event.level) {
            return;
        }

        let context = Self::render_context(event);
        match event.level {
            LogLevel::Error => error!(message = %event.message, context = %context),
            LogLevel::Warn => warn!(message = %event.message, context = %context),
            LogLevel::Info => info!(message = %event.message, context = %context),
            LogLevel::Debug => debug!(message = %event.message, context = %context),
            LogLevel::Trace => trace!(message = %event.message, context = %context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filtering() {
        let adapter = TracingLogAdapter::with_min_level(LogLevel::Warn);
        assert!(!adapter.should_log(LogLevel::Info));
        assert!(adapter.should_log(LogLevel::Warn));
        assert!(adapter.should_log(LogLevel::Error));
    }

    #[test]
    fn test_context_rendering_is_ordered() {
        let event = LogEvent::new(LogLevel::Info, "Scene validated")
            .with("problems", 2)
            .with("frames", 5);
        assert_eq!(TracingLogAdapter::render_context(&event), "frames=5 problems=2");
    }

    #[tokio::test]
    async fn test_log_event_without_subscriber() {
        let adapter = TracingLogAdapter::new();
        adapter
            .log_event(&LogEvent::new(LogLevel::Debug, "no subscriber installed"))
            .await;
        adapter.info("still fine").await;
    }
}
