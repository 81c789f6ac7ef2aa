//! Formulas computing measures
//!
//! A [`Formula`] produces the measure of one metric for one component. The
//! engine runs each formula over every component of a refresh, bottom-up,
//! handing it a [`FormulaContext`] to read sibling measures of the same
//! component and to publish its result, together with the component's issue
//! facts.
//!
//! Formulas are supplied by a [`FormulaFactory`]. The built-in catalog,
//! [`IssueMetricFormulaFactory`], derives issue counts, remediation efforts,
//! the technical debt ratio and the A to E ratings from issue facts.

mod context;
mod factory;
mod formula;
mod issue_formulas;
mod rating_grid;

pub use context::FormulaContext;
pub(crate) use context::FormulaOutput;
pub use factory::{FormulaFactory, StaticFormulaFactory};
pub use formula::{ComputeFn, Formula};
pub use issue_formulas::IssueMetricFormulaFactory;
pub use rating_grid::DebtRatingGrid;
