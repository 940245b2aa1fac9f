//! Error types for the renaming pipeline.

use thiserror::Error;

use crate::model::FeatureId;

/// Contract violations detected while renaming.
///
/// All of these are fatal for the whole run: the computation is deterministic,
/// so the only fix is to correct the input data.
#[derive(Debug, Error)]
pub enum RenameError {
    /// The watercourse geometry is not a (multi-)line.
    #[error("Watercourse '{watercourse}' is not a line geometry (found {found})")]
    NotALine { watercourse: String, found: &'static str },

    /// An anchor in front of an open-ended segment has no leading integer,
    /// or one too large to count on from.
    #[error(
        "Malformed anchor '{anchor}' on point {point_id} of watercourse '{watercourse}': \
         expected a leading integer to count on from"
    )]
    MalformedAnchor { watercourse: String, point_id: FeatureId, anchor: String },

    /// The distance tolerance must be a positive, finite number.
    #[error("Invalid tolerance {0}; expected a positive finite number")]
    InvalidTolerance(f64),
}

/// Convenience result type for pipeline operations.
pub type RenameResult<T> = Result<T, RenameError>;
