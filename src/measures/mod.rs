//! Measures and their in-flight staging area
//!
//! A measure is the value of one metric on one component, together with its
//! variation over the leak period. During a refresh every measure the
//! formulas may touch lives in a [`MeasureMatrix`], preloaded from storage;
//! only the entries whose state actually changed are written back.

mod matrix;
mod measure;
pub mod variation;

pub use matrix::MeasureMatrix;
pub use measure::{Measure, PersistedMeasure};
