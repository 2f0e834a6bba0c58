//! Command-line argument definitions

use std::path::PathBuf;

use clap::{ArgGroup, Args};

use crate::domain::model::{ContinuityWeights, RepresentativeSet};
use crate::ports::ReportFormat;

/// Arguments for the validate command
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["records", "frames", "frames_dir"])
))]
pub struct ValidateArgs {
    /// JSON file holding an array of normalized frame records
    #[arg(long)]
    pub records: Option<PathBuf>,

    /// Frames in sequence order; each is read through its `.json` provider dump
    #[arg(long, num_args = 1..)]
    pub frames: Vec<PathBuf>,

    /// Directory of frames, taken in file-name order
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// Continuity below this value flags a problem frame (0-1)
    #[arg(long, env = "SCENE_VALIDATOR_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Frames feeding the composition score (first-last, all)
    #[arg(long, env = "SCENE_VALIDATOR_REPRESENTATIVE_SET")]
    pub representative_set: Option<RepresentativeSet>,

    /// Continuity weights as object,color,rating (must sum to 1)
    #[arg(long, env = "SCENE_VALIDATOR_WEIGHTS")]
    pub weights: Option<ContinuityWeights>,

    /// Report format (text, json, yaml)
    #[arg(long, env = "SCENE_VALIDATOR_FORMAT")]
    pub format: Option<ReportFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with an error when any problem frame is found
    #[arg(long)]
    pub fail_on_problems: bool,
}

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Earlier frame
    #[arg(long)]
    pub from: PathBuf,

    /// Later frame
    #[arg(long)]
    pub to: PathBuf,

    /// Continuity below this value is reported as a problem (0-1)
    #[arg(long, env = "SCENE_VALIDATOR_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Continuity weights as object,color,rating (must sum to 1)
    #[arg(long, env = "SCENE_VALIDATOR_WEIGHTS")]
    pub weights: Option<ContinuityWeights>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Frame image or provider dump
    #[arg(short, long)]
    pub frame: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
