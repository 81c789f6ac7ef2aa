//! Ancestor chains and bottom-up traversal ordering.

use super::{Component, ComponentId, ComponentTree};
use crate::Result;
use ohno::bail;
use std::collections::{HashMap, HashSet};

const LOG_TARGET: &str = "  ancestry";

/// The set of components a refresh has to visit, in bottom-up order.
#[derive(Debug, Clone, Default)]
pub struct Traversal {
    paths: Vec<Vec<ComponentId>>,
    ordered: Vec<Component>,
}

impl Traversal {
    /// Components to visit, each exactly once, descendants before ancestors.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.ordered
    }

    /// The ancestor chain of every input component, leaf first.
    #[must_use]
    pub fn paths(&self) -> &[Vec<ComponentId>] {
        &self.paths
    }

    /// Distinct projects owning the components of the traversal.
    #[must_use]
    pub fn projects(&self) -> Vec<ComponentId> {
        let mut seen = HashSet::new();
        self.ordered
            .iter()
            .filter(|c| seen.insert(c.project.clone()))
            .map(|c| c.project.clone())
            .collect()
    }

    /// Drop every component whose project does not satisfy `keep`.
    pub fn retain_projects(&mut self, mut keep: impl FnMut(&ComponentId) -> bool) {
        self.ordered.retain(|c| keep(&c.project));
        let remaining: HashSet<_> = self.ordered.iter().map(|c| c.id.clone()).collect();
        self.paths.retain(|path| path.first().is_some_and(|leaf| remaining.contains(leaf)));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Walk parent references from `leaf` up to the root of its tree.
///
/// The returned chain starts with `leaf` and ends with the root.
///
/// # Errors
///
/// Returns an error if a parent cannot be found in the tree, if the parent
/// references form a cycle, or if the tree store fails.
pub fn ancestor_path<T: ComponentTree + ?Sized>(tree: &T, leaf: &Component) -> Result<Vec<Component>> {
    let mut seen = HashSet::from([leaf.id.clone()]);
    let mut path = vec![leaf.clone()];

    while let Some(parent_id) = path.last().and_then(|c| c.parent.clone()) {
        if !seen.insert(parent_id.clone()) {
            bail!("component tree is inconsistent: `{}` is its own ancestor", parent_id);
        }

        let Some(parent) = tree.component(&parent_id)? else {
            bail!(
                "component tree is inconsistent: parent `{parent_id}` of `{}` does not exist",
                path.last().map_or("", |c| c.key.as_str())
            );
        };

        path.push(parent);
    }

    Ok(path)
}

/// Merge the ancestor chains of `leaves` into a deduplicated bottom-up ordering.
///
/// Components deeper in their tree come first. Components at the same depth
/// keep the order in which they were first reached, starting from the first
/// leaf. A component shared by several chains appears only once.
///
/// # Errors
///
/// Returns an error if any ancestor chain cannot be built.
pub fn build_traversal<T: ComponentTree + ?Sized>(tree: &T, leaves: &[Component]) -> Result<Traversal> {
    let mut paths = Vec::with_capacity(leaves.len());
    let mut depth_by_id: HashMap<ComponentId, usize> = HashMap::new();
    let mut first_seen = Vec::new();

    for leaf in leaves {
        let path = ancestor_path(tree, leaf)?;
        let root_distance = path.len() - 1;

        for (index, component) in path.iter().enumerate() {
            let depth = root_distance - index;
            if let Some(&known) = depth_by_id.get(&component.id) {
                if known != depth {
                    bail!(
                        "component tree is inconsistent: `{}` was reached at depths {known} and {depth}",
                        component.key
                    );
                }
                continue;
            }

            let _ = depth_by_id.insert(component.id.clone(), depth);
            first_seen.push((depth, component.clone()));
        }

        paths.push(path.into_iter().map(|c| c.id).collect());
    }

    // stable sort keeps first-seen order within a depth
    first_seen.sort_by(|(a, _), (b, _)| b.cmp(a));
    let ordered: Vec<_> = first_seen.into_iter().map(|(_, c)| c).collect();

    log::debug!(
        target: LOG_TARGET,
        "Built traversal of {} component(s) from {} input component(s)",
        ordered.len(),
        leaves.len()
    );

    Ok(Traversal { paths, ordered })
}
