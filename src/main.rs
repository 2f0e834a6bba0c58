//! SceneValidator
//!
//! Command-line front end for the continuity and composition engine.
//!
//! # Usage
//!
//! ```bash
//! scene-validator validate --frames-dir shots/ --format json
//! scene-validator validate --records records.json --threshold 0.6 --output report.yaml --format yaml
//! scene-validator compare --from shots/010.png --to shots/011.png
//! scene-validator inspect --frame shots/010.png
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use scene_validator::cli::{commands, Cli};
use scene_validator::utils::logging::init_logging;

/// Main entry point for the SceneValidator CLI
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format);

    info!("Starting SceneValidator {}", env!("CARGO_PKG_VERSION"));
    commands::run(cli).await
}
