//! Incrementally refresh hierarchical code-quality measures.
//!
//! # Quick Start
//!
//! ```bash
//! live-measures init
//! live-measures refresh --state state.json --component proj:src/lib.rs
//! ```
//!
//! `refresh` recomputes the measures of the given components and of all
//! their ancestors up to the project, prints what changed, and saves the
//! state file. Use `--dry-run` to only print, and `--json PATH` to also get
//! the refreshed measures as JSON.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use live_measures::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that talks to the real process streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
