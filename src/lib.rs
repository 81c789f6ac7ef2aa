#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for live-measures
//!
//! This library recomputes derived quality measures for a set of changed
//! components and for every ancestor of those components, merging the fresh
//! values with the previously persisted state and refreshing the variation of
//! each measure over the project's leak period.
//!
//! # Module Organization
//!
//! - [`components`]: Component tree model and the bottom-up traversal builder
//! - [`metrics`]: Metric definitions, value kinds, ratings and the metric repository
//! - [`periods`]: Analysis periods and the period lookup
//! - [`facts`]: Issue facts consumed by formulas
//! - [`measures`]: The measure matrix and the variation calculus
//! - [`formulas`]: Formula model, formula context and the built-in formula catalog
//! - [`storage`]: Persistence sessions and the JSON state file
//! - [`engine`]: The refresh engine tying everything together
//! - [`reports`]: Console and JSON rendering of a refresh
//! - [`config`]: Settings consumed by formulas
//! - [`commands`]: Command-line interface

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod components;
pub mod config;
pub mod engine;
pub mod facts;
pub mod formulas;
pub mod measures;
pub mod metrics;
pub mod periods;
pub mod reports;
pub mod storage;

pub use crate::commands::{Host, run};
