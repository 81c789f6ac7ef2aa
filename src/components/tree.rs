use super::{Component, ComponentId};
use crate::Result;
use ohno::bail;
use std::collections::HashMap;

/// Read access to the component tree store.
pub trait ComponentTree {
    /// Look up a component by id.
    ///
    /// Returns `Ok(None)` when the component does not exist.
    fn component(&self, id: &ComponentId) -> Result<Option<Component>>;
}

/// A component tree held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryComponentTree {
    components: HashMap<ComponentId, Component>,
}

impl InMemoryComponentTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component to the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if a component with the same id was already added.
    pub fn insert(&mut self, component: Component) -> Result<()> {
        if self.components.contains_key(&component.id) {
            bail!("duplicate component id `{}`", component.id);
        }

        let _ = self.components.insert(component.id.clone(), component);
        Ok(())
    }

    /// Find a component by its external key.
    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&Component> {
        self.components.values().find(|c| c.key == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }
}

impl FromIterator<Component> for InMemoryComponentTree {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }
}

impl ComponentTree for InMemoryComponentTree {
    fn component(&self, id: &ComponentId) -> Result<Option<Component>> {
        Ok(self.components.get(id).cloned())
    }
}
