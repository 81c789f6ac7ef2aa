//! Component tree model
//!
//! Components are the nodes measures are attached to: files, directories,
//! modules and projects. They are read-only inputs owned by an external tree
//! store which is abstracted behind the [`ComponentTree`] trait.
//!
//! # Implementation Model
//!
//! Each [`Component`] knows its parent and its owning project. The
//! [`ancestry`] module walks parent references from a set of changed
//! components up to their roots and merges the resulting chains into a single
//! [`Traversal`]: a deduplicated, bottom-up ordering in which every component
//! appears exactly once and always after all of its descendants.

pub mod ancestry;
mod component;
mod qualifier;
mod tree;

pub use ancestry::{Traversal, ancestor_path, build_traversal};
pub use component::{Component, ComponentId};
pub use qualifier::Qualifier;
pub use tree::{ComponentTree, InMemoryComponentTree};
