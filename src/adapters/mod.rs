// Adapters - External system implementations

pub mod fs_report;
pub mod json_perception;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use fs_report::FsReportAdapter;
pub use json_perception::JsonPerceptionAdapter;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::TracingLogAdapter;
