//! Segment Namer: four naming policies selected by a segment's anchors.
//!
//! | pattern | rule for the k-th member (1-based)         |
//! |---------|--------------------------------------------|
//! | NN      | `{k}P`                                     |
//! | NY      | `{k}Pnowy`                                 |
//! | YY      | `{start anchor}{letter suffix of k}`       |
//! | YN      | `{numeric prefix of start anchor + k}P`    |

use crate::error::{RenameError, RenameResult};
use crate::model::FeatureId;
use crate::services::segment::Segment;
use crate::services::suffix::suffixes;

/// Naming policy of one segment, with the data each policy needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingState<'s> {
    /// No anchors on either side.
    Unanchored,
    /// Only an anchor after the segment.
    BeforeAnchor,
    /// Anchors on both sides; names extend the start anchor with letters.
    BetweenAnchors { prefix: &'s str },
    /// Only an anchor before the segment; numbering continues from it.
    AfterAnchor { base: u64 },
}

impl<'s> NamingState<'s> {
    /// Pick the policy for `segment`.
    ///
    /// Fails when an open-ended segment follows an anchor that has no
    /// leading integer to continue counting from, or whose number would
    /// overflow before the last member.
    pub fn resolve(segment: &'s Segment) -> RenameResult<Self> {
        match (&segment.start_anchor, &segment.end_anchor) {
            (None, None) => Ok(NamingState::Unanchored),
            (None, Some(_)) => Ok(NamingState::BeforeAnchor),
            (Some(start), Some(_)) => Ok(NamingState::BetweenAnchors { prefix: &start.name }),
            (Some(start), None) => match numeric_prefix(&start.name)
                .filter(|base| base.checked_add(segment.len() as u64).is_some())
            {
                Some(base) => Ok(NamingState::AfterAnchor { base }),
                None => Err(RenameError::MalformedAnchor {
                    watercourse: segment.watercourse.clone(),
                    point_id: start.point_id,
                    anchor: start.name.clone(),
                }),
            },
        }
    }

    /// Names for `count` consecutive members, in order.
    pub fn names(&self, count: usize) -> Vec<String> {
        let positions = 1..=count as u64;
        match self {
            NamingState::Unanchored => positions.map(|k| format!("{k}P")).collect(),
            NamingState::BeforeAnchor => positions.map(|k| format!("{k}Pnowy")).collect(),
            NamingState::BetweenAnchors { prefix } => {
                suffixes().take(count).map(|suffix| format!("{prefix}{suffix}")).collect()
            }
            NamingState::AfterAnchor { base } => positions
                .map_while(|k| base.checked_add(k))
                .map(|number| format!("{number}P"))
                .collect(),
        }
    }
}

/// Integer part of a legacy name such as `12P`.
///
/// Trailing non-digit characters are stripped, then the leading digits are
/// parsed. `None` when there are no leading digits or they overflow.
pub fn numeric_prefix(anchor: &str) -> Option<u64> {
    let trimmed = anchor.trim_end_matches(|c: char| !c.is_ascii_digit());
    let digits_end = trimmed.find(|c: char| !c.is_ascii_digit()).unwrap_or(trimmed.len());
    let digits = &trimmed[..digits_end];
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Generate new names for every member of `segment`, in arclength order.
///
/// Empty segments produce nothing, whatever their anchors.
pub fn name_segment(segment: &Segment) -> RenameResult<Vec<(FeatureId, String)>> {
    if segment.is_empty() {
        return Ok(Vec::new());
    }
    let state = NamingState::resolve(segment)?;
    let names = state.names(segment.len());
    Ok(segment.member_ids.iter().copied().zip(names).collect())
}
