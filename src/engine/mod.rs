//! The refresh engine
//!
//! [`LiveMeasureComputer`] recomputes the measures of a set of changed
//! components and of all their ancestors in one pass:
//!
//! 1. the ancestor chains of the input components are merged into a single
//!    bottom-up traversal;
//! 2. components of projects that were never analyzed are dropped;
//! 3. the metrics of every formula are resolved and their persisted measures
//!    loaded into a [`MeasureMatrix`](crate::measures::MeasureMatrix);
//! 4. each formula runs once per component, descendants first, and its output
//!    is written to the matrix, refreshing variations where the project has a
//!    leak period;
//! 5. the measures that changed are upserted and the session committed.
//!
//! Any failure rolls the session back, so a refresh either writes everything
//! or nothing.

mod computer;
mod summary;

pub use computer::LiveMeasureComputer;
pub use summary::RefreshSummary;
