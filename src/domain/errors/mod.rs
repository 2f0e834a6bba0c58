// Domain errors - Error types for the scoring engine

use thiserror::Error;

/// Domain-specific error types
///
/// Every variant is a deterministic contract violation detectable before or during a
/// single validation run. None of them is retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// No frames were supplied to the orchestrator or the aggregator
    #[error("Empty frame sequence: at least one frame is required")]
    EmptyFrameSequence,

    /// Two compared records carry palettes of different sizes
    #[error(
        "Misaligned palette between frames {from_index} and {to_index}: {from_len} vs {to_len} colors"
    )]
    MisalignedPalette {
        from_index: usize,
        to_index: usize,
        from_len: usize,
        to_len: usize,
    },

    /// Continuity weights do not sum to 1.0
    #[error("Invalid continuity weights: must sum to 1.0, got {sum}")]
    InvalidWeights { sum: f64 },

    /// Problem-frame threshold outside [0, 1]
    #[error("Invalid problem frame threshold: {0} (expected a value in [0, 1])")]
    InvalidThreshold(f64),

    /// A record's overall rating is outside [0, 10] or not finite
    #[error("Invalid overall rating {rating} on frame {index} (expected a value in [0, 10])")]
    InvalidRating { index: usize, rating: f64 },

    /// Record indices are not strictly increasing and contiguous
    #[error("Non-contiguous frame index at position {position}: expected {expected}, found {found}")]
    NonContiguousIndex {
        position: usize,
        expected: usize,
        found: usize,
    },

    /// The sequence runs past the largest representable frame index
    #[error("Frame index overflow at position {position}: sequence starting at {start} exceeds the index range")]
    IndexOverflow { position: usize, start: usize },

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),
}
