//! The renaming pipeline.
//!
//! Per watercourse: `locate` orders the points lying on the line, `segment`
//! splits that run at legacy-named anchors, and `naming` generates new names
//! for each segment. `rename` folds the results of all watercourses into one
//! mapping. `dissolve` builds the watercourse lines from raw line records.

pub mod dissolve;
pub mod locate;
pub mod naming;
pub mod rename;
pub mod segment;
pub mod suffix;
