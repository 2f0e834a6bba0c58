//! CLI module for SceneValidator
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ports::{LogLevel, OverwritePolicy};
use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

/// SceneValidator
///
/// Scores visual continuity between consecutive analyzed frames, flags problem frames,
/// and rates overall scene composition.
#[derive(Parser, Debug)]
#[command(name = "scene-validator")]
#[command(about = "SceneValidator - Continuity and composition checks for analyzed frame sequences")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true, env = "SCENE_VALIDATOR_LOG_LEVEL", value_parser = LogLevel::parse)]
    pub log_level: LogLevel,

    /// Log output format (pretty, compact, json)
    #[arg(long, default_value = "compact", global = true, env = "SCENE_VALIDATOR_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Configuration file (default: scene_validator.toml, then config/scene_validator.toml)
    #[arg(long, global = true, env = "SCENE_VALIDATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overwrite behavior for exported reports (always, never)
    #[arg(long, global = true, env = "SCENE_VALIDATOR_OVERWRITE")]
    pub overwrite: Option<OverwritePolicy>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate continuity and composition of a frame sequence
    Validate(args::ValidateArgs),
    /// Score continuity between two frames
    Compare(args::CompareArgs),
    /// Show the normalized analysis of one frame
    Inspect(args::InspectArgs),
}
