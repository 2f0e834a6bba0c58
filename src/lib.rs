//! SceneValidator Library
//!
//! Scores visual continuity between consecutive analyzed video frames, flags problem
//! frames, rates scene composition and produces a report with recommendations.
//!
//! The scoring engine in [`domain`] is pure and synchronous. Frame acquisition,
//! configuration and report export live behind the traits in [`ports`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    ContinuityScore, ContinuityWeights, FrameAnalysisRecord, RepresentativeSet, ValidationConfig,
    ValidationReport,
};
pub use domain::usecases::{CompareFramesUseCase, ValidateSceneUseCase};
pub use error::{PerceptionError, SceneValidatorError, SceneValidatorResult};
