//! Scene-level composition scoring

use crate::domain::errors::DomainError;
use crate::domain::model::{FrameAnalysisRecord, RepresentativeSet};

/// Averages provider ratings over the configured representative frames
pub struct CompositionAggregator;

impl CompositionAggregator {
    /// Arithmetic mean of `overall_rating` over the representative set, in [0, 10]
    ///
    /// With `FirstLast` a single-frame sequence counts its only frame once.
    pub fn aggregate(
        records: &[FrameAnalysisRecord],
        representative_set: RepresentativeSet,
    ) -> Result<f64, DomainError> {
        let representatives = Self::representatives(records, representative_set)?;
        for record in &representatives {
            record.validate_rating()?;
        }
        let total: f64 = representatives.iter().map(|r| r.overall_rating).sum();
        Ok(total / representatives.len() as f64)
    }

    /// Frames that feed the composition score, in sequence order
    pub fn representatives(
        records: &[FrameAnalysisRecord],
        representative_set: RepresentativeSet,
    ) -> Result<Vec<&FrameAnalysisRecord>, DomainError> {
        let (first, rest) = records.split_first().ok_or(DomainError::EmptyFrameSequence)?;
        let selected = match representative_set {
            RepresentativeSet::All => records.iter().collect(),
            RepresentativeSet::FirstLast => match rest.last() {
                Some(last) => vec![first, last],
                None => vec![first],
            },
        };
        Ok(selected)
    }
}
