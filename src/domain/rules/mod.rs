// Domain rules - Scoring policies applied to frame analysis records

pub mod classifier;
pub mod composition;
pub mod continuity;
pub mod recommendations;

pub use classifier::ProblemFrameClassifier;
pub use composition::CompositionAggregator;
pub use continuity::ContinuityComparator;
pub use recommendations::{RecommendationContext, RecommendationGenerator};
