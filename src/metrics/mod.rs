//! Metric dictionary
//!
//! Measures are always bound to a metric. This module defines what a metric
//! is ([`MetricDef`]), what kind of value it holds ([`ValueKind`]), the
//! ordinal rating type used by rating metrics ([`Rating`]), and the
//! [`MetricRepository`] seam through which the engine resolves metric keys.
//!
//! # Implementation Model
//!
//! The metrics computed by the built-in formulas are statically registered in
//! `core_metrics.rs` through a small declaration macro, together with their
//! short names and value kinds. [`MetricCatalog::core`] turns that table into
//! an in-memory repository with stable numeric ids; external dictionaries can
//! be plugged in by implementing [`MetricRepository`].

mod core_metrics;
pub mod keys;
mod metric_def;
mod rating;
mod repository;
mod value_kind;

pub use core_metrics::{CORE_METRICS, CoreMetric};
pub use metric_def::{MetricDef, MetricId};
pub use rating::Rating;
pub use repository::{MetricCatalog, MetricRepository};
pub use value_kind::ValueKind;
