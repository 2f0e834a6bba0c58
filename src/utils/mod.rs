//! Common utilities and helpers

use std::time::Duration;

pub mod logging;
pub mod path;

/// Utility functions for SceneValidator
pub struct Utils;

impl Utils {
    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        let milliseconds = duration.subsec_millis();

        if minutes > 0 {
            format!("{}m{:02}.{:03}s", minutes, seconds, milliseconds)
        } else {
            format!("{}.{:03}s", seconds, milliseconds)
        }
    }

    /// Render a [0, 1] value as a percentage
    pub fn format_ratio(value: f64) -> String {
        format!("{:.1}%", value * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(Utils::format_duration(Duration::from_millis(1_250)), "1.250s");
        assert_eq!(Utils::format_duration(Duration::from_millis(125_005)), "2m05.005s");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(Utils::format_ratio(0.8126), "81.3%");
        assert_eq!(Utils::format_ratio(1.0), "100.0%");
    }
}
