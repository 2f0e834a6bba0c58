// Ports - Interface definitions (contracts)

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::error::{PerceptionError, SceneValidatorResult};

/// Port for perception providers (object detection, color extraction, generative assessment)
#[async_trait]
pub trait PerceptionPort: Send + Sync {
    /// Analyze one frame and normalize the provider output into a record at `index`
    async fn analyze_frame(
        &self,
        index: usize,
        frame_path: &Path,
    ) -> Result<FrameAnalysisRecord, PerceptionError>;

    /// Load an already-normalized record sequence
    async fn load_records(&self, path: &Path) -> Result<Vec<FrameAnalysisRecord>, PerceptionError>;

    /// Short provider name for logs
    fn provider_name(&self) -> &str;
}

/// Port for report rendering and export
#[async_trait]
pub trait ReportPort: Send + Sync {
    /// Render a report document in the requested format
    fn render(&self, document: &ReportDocument, format: ReportFormat) -> SceneValidatorResult<String>;

    /// Write a report document to `path`
    async fn export(
        &self,
        document: &ReportDocument,
        path: &Path,
        format: ReportFormat,
        overwrite: OverwritePolicy,
    ) -> SceneValidatorResult<()>;
}

/// Port for configuration management
pub trait ConfigPort: Send + Sync {
    /// Load settings from `path`, or from the default search locations when `None`
    fn load_settings(&self, path: Option<&Path>) -> SceneValidatorResult<AppSettings>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);

    /// Log structured event
    async fn log_event(&self, event: &LogEvent);
}

/// Log event with structured data
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Serialized form of a validation run
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
    pub config: ValidationConfig,
    pub report: ValidationReport,
}

impl ReportDocument {
    pub fn new(report: ValidationReport, config: ValidationConfig) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            config,
            report,
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
    Yaml,
}

impl FromStr for ReportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            other => Err(DomainError::BadArgs(format!(
                "Invalid report format: {}. Valid formats: text, json, yaml",
                other
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Overwrite policy for exported reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Replace an existing file
    Always,
    /// Refuse to touch an existing file
    Never,
}

impl FromStr for OverwritePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(OverwritePolicy::Always),
            "never" => Ok(OverwritePolicy::Never),
            other => Err(DomainError::BadArgs(format!(
                "Invalid overwrite policy: {}. Valid values: always, never",
                other
            ))),
        }
    }
}

/// How frames are acquired from perception providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionSettings {
    /// Dominant colors kept per frame
    pub palette_size: usize,
    /// Detections below this confidence are dropped
    pub min_object_confidence: f64,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Frames analyzed in parallel
    pub max_concurrency: usize,
}

impl Default for PerceptionSettings {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            min_object_confidence: 0.0,
            timeout_secs: 30,
            max_retries: 2,
            base_delay_ms: 250,
            max_delay_ms: 4000,
            max_concurrency: num_cpus::get().max(1),
        }
    }
}

/// Where and how reports are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub format: ReportFormat,
    pub overwrite: OverwritePolicy,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            overwrite: OverwritePolicy::Never,
        }
    }
}

/// Fully resolved application settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSettings {
    pub validation: ValidationConfig,
    pub perception: PerceptionSettings,
    pub output: OutputSettings,
}
