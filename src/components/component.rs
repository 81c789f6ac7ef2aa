use super::Qualifier;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Unique, stable identifier of a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A node of the component tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,

    /// External key, e.g. `my-project:src/main/lib.rs`
    pub key: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub parent: Option<ComponentId>,

    /// Root of the tree this component belongs to (a project is its own project)
    pub project: ComponentId,

    pub qualifier: Qualifier,
}

impl Component {
    /// Create a root project component.
    #[must_use]
    pub fn project(id: impl Into<String>, key: impl Into<String>) -> Self {
        let id = ComponentId::new(id);
        let key = key.into();
        Self {
            project: id.clone(),
            id,
            name: key.clone(),
            key,
            parent: None,
            qualifier: Qualifier::Project,
        }
    }

    /// Create a component nested under `parent`, inheriting its project.
    #[must_use]
    pub fn child_of(parent: &Self, id: impl Into<String>, name: impl Into<String>, qualifier: Qualifier) -> Self {
        let name = name.into();
        Self {
            id: ComponentId::new(id),
            key: format!("{}:{name}", parent.project_key_prefix()),
            name,
            parent: Some(parent.id.clone()),
            project: parent.project.clone(),
            qualifier,
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    fn project_key_prefix(&self) -> &str {
        self.key.split_once(':').map_or(self.key.as_str(), |(prefix, _)| prefix)
    }
}
