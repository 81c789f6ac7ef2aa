//! Issue facts consumed by formulas
//!
//! Formulas never look at raw issues. They receive an [`IssueCounter`], the
//! aggregation of every issue attached to a component or to any of its
//! descendants, grouped by rule type, severity, resolution, status, and
//! whether the issue was raised inside the project's leak period.
//!
//! # Implementation Model
//!
//! The engine pulls facts through the [`FactProvider`] trait, once per
//! component and per refresh. [`IssueStore`] is the in-memory provider: it
//! indexes every issue under its component and all of that component's
//! ancestors when it is built, so a lookup never walks the tree.

mod counter;
mod issue;
mod store;

pub use counter::{IssueCounter, IssueGroup};
pub use issue::{Issue, IssueStatus, Resolution, RuleType, Severity};
pub use store::IssueStore;

use crate::Result;
use crate::components::Component;
use chrono::{DateTime, Utc};

/// Source of the aggregated issue facts of a component.
pub trait FactProvider {
    /// Facts about `component` and all of its descendants.
    ///
    /// Issues created at or after `leak_period_start` are flagged as being
    /// in the leak period. Without a leak period start, no issue is.
    fn facts_for(&self, component: &Component, leak_period_start: Option<DateTime<Utc>>) -> Result<IssueCounter>;
}
