//! Dissolve raw line records into one geometry per watercourse.
//!
//! Records are grouped by key (first-seen order), then parts are chained
//! wherever an endpoint of one coincides exactly with an endpoint of another.

use std::collections::HashMap;

use geo::{Coord, Geometry, LineString, MultiLineString};
use tracing::{debug, warn};

use crate::model::Watercourse;

/// One line feature as read from the source layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRecord {
    /// Value of the identifying field; records sharing it form one watercourse.
    pub key: String,
    /// A line feature may itself be multi-part.
    pub parts: Vec<LineString<f64>>,
}

impl LineRecord {
    pub fn new(key: impl Into<String>, parts: Vec<LineString<f64>>) -> Self {
        Self { key: key.into(), parts }
    }
}

/// Which end of a chain a part is being attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Head,
    Tail,
}

/// Group `records` by key and merge each group into a single line where the
/// parts connect, or a multi-line where they do not.
pub fn dissolve_lines(records: Vec<LineRecord>) -> Vec<Watercourse> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<LineString<f64>>> = HashMap::new();

    for record in records {
        let parts = groups.entry(record.key.clone()).or_insert_with(|| {
            order.push(record.key.clone());
            Vec::new()
        });
        parts.extend(record.parts.into_iter().filter(|part| part.0.len() >= 2));
    }

    order
        .into_iter()
        .filter_map(|key| {
            let parts = groups.remove(&key).unwrap_or_default();
            if parts.is_empty() {
                warn!(watercourse = %key, "watercourse has no usable line parts, skipping");
                return None;
            }
            let part_count = parts.len();
            let mut chains = merge_parts(parts);
            debug!(watercourse = %key, parts = part_count, chains = chains.len(), "dissolved");
            let geometry = if chains.len() == 1 {
                Geometry::LineString(chains.remove(0))
            } else {
                Geometry::MultiLineString(MultiLineString::new(chains))
            };
            Some(Watercourse::new(key, geometry))
        })
        .collect()
}

/// Greedily chain touching parts.
///
/// Each chain starts at the first unused part (input order) and keeps its
/// direction; attached parts are reversed when needed.
pub fn merge_parts(parts: Vec<LineString<f64>>) -> Vec<LineString<f64>> {
    let mut unused: Vec<Option<Vec<Coord<f64>>>> =
        parts.into_iter().map(|part| Some(part.0)).collect();
    let mut chains = Vec::new();

    for i in 0..unused.len() {
        let Some(mut chain) = unused[i].take() else {
            continue;
        };
        while let Some(next) = chain.last().and_then(|at| take_touching(&mut unused, *at, End::Tail))
        {
            chain.extend(next.into_iter().skip(1));
        }
        while let Some(mut prev) =
            chain.first().and_then(|at| take_touching(&mut unused, *at, End::Head))
        {
            prev.pop();
            prev.extend(chain);
            chain = prev;
        }
        chains.push(LineString::new(chain));
    }
    chains
}

/// Remove the first unused part touching `at`, oriented to continue the chain:
/// starting at `at` for the tail, ending at `at` for the head.
fn take_touching(
    unused: &mut [Option<Vec<Coord<f64>>>],
    at: Coord<f64>,
    end: End,
) -> Option<Vec<Coord<f64>>> {
    let slot = unused.iter_mut().find(|slot| {
        slot.as_ref()
            .map_or(false, |coords| coords.first() == Some(&at) || coords.last() == Some(&at))
    })?;
    let mut coords = slot.take()?;
    let aligned = match end {
        End::Tail => coords.first() == Some(&at),
        End::Head => coords.last() == Some(&at),
    };
    if !aligned {
        coords.reverse();
    }
    Some(coords)
}
