use super::{FactProvider, Issue, IssueCounter};
use crate::Result;
use crate::components::{Component, ComponentId, ComponentTree, ancestor_path};
use chrono::{DateTime, Utc};
use ohno::bail;
use std::collections::HashMap;

const LOG_TARGET: &str = "     facts";

/// In-memory issue store answering fact queries for any level of the tree.
#[derive(Debug, Clone, Default)]
pub struct IssueStore {
    issues: Vec<Issue>,
    by_component: HashMap<ComponentId, Vec<usize>>,
}

impl IssueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `issues` under their component and every ancestor of it.
    ///
    /// # Errors
    ///
    /// Returns an error if an issue refers to a component missing from `tree`,
    /// or if an ancestor chain cannot be built.
    pub fn index<T: ComponentTree + ?Sized>(tree: &T, issues: Vec<Issue>) -> Result<Self> {
        let mut chains: HashMap<ComponentId, Vec<ComponentId>> = HashMap::new();
        let mut by_component: HashMap<ComponentId, Vec<usize>> = HashMap::new();

        for (index, issue) in issues.iter().enumerate() {
            if !chains.contains_key(&issue.component) {
                let Some(component) = tree.component(&issue.component)? else {
                    bail!("issue `{}` refers to unknown component `{}`", issue.key, issue.component);
                };

                let chain = ancestor_path(tree, &component)?.into_iter().map(|c| c.id).collect();
                let _ = chains.insert(issue.component.clone(), chain);
            }

            for id in &chains[&issue.component] {
                by_component.entry(id.clone()).or_default().push(index);
            }
        }

        log::debug!(
            target: LOG_TARGET,
            "Indexed {} issue(s) over {} component(s)",
            issues.len(),
            by_component.len()
        );

        Ok(Self { issues, by_component })
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl FactProvider for IssueStore {
    fn facts_for(&self, component: &Component, leak_period_start: Option<DateTime<Utc>>) -> Result<IssueCounter> {
        let issues = self
            .by_component
            .get(&component.id)
            .into_iter()
            .flatten()
            .map(|&index| &self.issues[index]);

        Ok(IssueCounter::from_issues(issues, leak_period_start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{InMemoryComponentTree, Qualifier};
    use crate::facts::{IssueStatus, RuleType, Severity};
    use chrono::TimeZone;

    fn issue(key: &str, component: &str) -> Issue {
        Issue {
            key: key.to_string(),
            component: ComponentId::from(component),
            rule_type: RuleType::CodeSmell,
            severity: Severity::Major,
            resolution: None,
            status: IssueStatus::Open,
            effort: 10,
            created_at: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
        }
    }

    fn tree() -> (InMemoryComponentTree, Component, Component, Component, Component) {
        let project = Component::project("p1", "proj");
        let dir = Component::child_of(&project, "d1", "src", Qualifier::Directory);
        let file1 = Component::child_of(&dir, "f1", "src/a.rs", Qualifier::File);
        let file2 = Component::child_of(&dir, "f2", "src/b.rs", Qualifier::File);
        let tree = [project.clone(), dir.clone(), file1.clone(), file2.clone()].into_iter().collect();
        (tree, project, dir, file1, file2)
    }

    #[test]
    fn test_facts_roll_up_to_ancestors() {
        let (tree, project, dir, file1, file2) = tree();
        let store = IssueStore::index(&tree, vec![issue("i1", "f1"), issue("i2", "f1"), issue("i3", "f2")]).unwrap();
        assert_eq!(store.len(), 3);

        let count = |c: &Component| store.facts_for(c, None).unwrap().count_unresolved(false);
        assert_eq!(count(&file1), 2);
        assert_eq!(count(&file2), 1);
        assert_eq!(count(&dir), 3);
        assert_eq!(count(&project), 3);
    }

    #[test]
    fn test_leak_flag_follows_leak_start() {
        let (tree, project, ..) = tree();
        let store = IssueStore::index(&tree, vec![issue("i1", "f1")]).unwrap();

        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(store.facts_for(&project, Some(early)).unwrap().count_unresolved(true), 1);
        assert_eq!(store.facts_for(&project, Some(late)).unwrap().count_unresolved(true), 0);
    }

    #[test]
    fn test_component_without_issues_has_empty_facts() {
        let (tree, _, _, file1, _) = tree();
        let store = IssueStore::index(&tree, Vec::new()).unwrap();
        assert!(store.is_empty());
        assert!(store.facts_for(&file1, None).unwrap().is_empty());
    }

    #[test]
    fn test_issue_on_unknown_component() {
        let (tree, ..) = tree();
        let err = IssueStore::index(&tree, vec![issue("i1", "ghost")]).unwrap_err();
        assert!(err.to_string().contains("issue `i1` refers to unknown component `ghost`"));
    }
}
