//! Measure persistence
//!
//! The engine talks to storage through a [`Session`]: it reads the persisted
//! measures it needs up front, upserts what changed, and either commits or
//! rolls back. Measures are never deleted.
//!
//! # Implementation Model
//!
//! [`MeasureDb`] is an in-memory measure table and [`InMemorySession`] a
//! transactional session over it, buffering writes until commit. The
//! command-line tool keeps the whole state of a code base (components,
//! metrics, analyses, issues, and measures) in a JSON [`StateFile`], guarded
//! by an advisory [`StateLock`] while a refresh runs.

mod lock;
mod memory;
mod session;
mod state_file;

pub use lock::{StateLock, acquire_state_lock};
pub use memory::{InMemorySession, MeasureDb};
pub use session::Session;
pub use state_file::{LoadedState, StateFile};
