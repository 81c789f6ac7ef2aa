use super::{Issue, IssueStatus, Resolution, RuleType, Severity};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Issues sharing the same rule type, severity, resolution, status, and leak flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueGroup {
    pub rule_type: RuleType,
    pub severity: Severity,
    pub resolution: Option<Resolution>,
    pub status: IssueStatus,
    pub in_leak: bool,
    pub count: u64,

    /// Total remediation effort of the group, in minutes
    pub effort: u64,
}

impl IssueGroup {
    const fn is_unresolved(&self) -> bool {
        self.resolution.is_none()
    }

    const fn is_counted(&self, only_in_leak: bool) -> bool {
        !only_in_leak || self.in_leak
    }
}

type GroupKey = (RuleType, Severity, Option<Resolution>, IssueStatus, bool);

/// Aggregated issue facts of a component and its descendants.
///
/// Every query takes an `only_in_leak` flag restricting it to the issues
/// raised during the leak period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueCounter {
    groups: Vec<IssueGroup>,
}

impl IssueCounter {
    #[must_use]
    pub const fn new(groups: Vec<IssueGroup>) -> Self {
        Self { groups }
    }

    /// Aggregate raw issues into groups.
    #[must_use]
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a Issue>, leak_period_start: Option<DateTime<Utc>>) -> Self {
        let mut totals: BTreeMap<GroupKey, (u64, u64)> = BTreeMap::new();
        for issue in issues {
            let key = (
                issue.rule_type,
                issue.severity,
                issue.resolution,
                issue.status,
                issue.is_in_leak(leak_period_start),
            );
            let entry = totals.entry(key).or_default();
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(issue.effort);
        }

        Self {
            groups: totals
                .into_iter()
                .map(|((rule_type, severity, resolution, status, in_leak), (count, effort))| IssueGroup {
                    rule_type,
                    severity,
                    resolution,
                    status,
                    in_leak,
                    count,
                    effort,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[IssueGroup] {
        &self.groups
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn unresolved(&self, only_in_leak: bool) -> impl Iterator<Item = &IssueGroup> {
        self.groups
            .iter()
            .filter(move |g| g.is_unresolved() && g.is_counted(only_in_leak))
    }

    /// Number of unresolved issues of any type.
    #[must_use]
    pub fn count_unresolved(&self, only_in_leak: bool) -> u64 {
        self.unresolved(only_in_leak).map(|g| g.count).sum()
    }

    #[must_use]
    pub fn count_unresolved_by_type(&self, rule_type: RuleType, only_in_leak: bool) -> u64 {
        self.unresolved(only_in_leak)
            .filter(|g| g.rule_type == rule_type)
            .map(|g| g.count)
            .sum()
    }

    #[must_use]
    pub fn count_unresolved_by_severity(&self, severity: Severity, only_in_leak: bool) -> u64 {
        self.unresolved(only_in_leak)
            .filter(|g| g.severity == severity)
            .map(|g| g.count)
            .sum()
    }

    /// Number of unresolved issues in the given status.
    #[must_use]
    pub fn count_unresolved_by_status(&self, status: IssueStatus, only_in_leak: bool) -> u64 {
        self.unresolved(only_in_leak)
            .filter(|g| g.status == status)
            .map(|g| g.count)
            .sum()
    }

    #[must_use]
    pub fn count_by_resolution(&self, resolution: Resolution, only_in_leak: bool) -> u64 {
        self.groups
            .iter()
            .filter(|g| g.resolution == Some(resolution) && g.is_counted(only_in_leak))
            .map(|g| g.count)
            .sum()
    }

    /// Total remediation effort of the unresolved issues of a type, in minutes.
    #[must_use]
    pub fn effort_of_unresolved(&self, rule_type: RuleType, only_in_leak: bool) -> u64 {
        self.unresolved(only_in_leak)
            .filter(|g| g.rule_type == rule_type)
            .map(|g| g.effort)
            .fold(0, u64::saturating_add)
    }

    /// The most severe unresolved issue of a type, if there is one.
    #[must_use]
    pub fn highest_severity_of_unresolved(&self, rule_type: RuleType, only_in_leak: bool) -> Option<Severity> {
        self.unresolved(only_in_leak)
            .filter(|g| g.rule_type == rule_type && g.count > 0)
            .map(|g| g.severity)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentId;
    use chrono::TimeZone;

    fn leak_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn issue(rule_type: RuleType, severity: Severity, resolution: Option<Resolution>, effort: u64, new: bool) -> Issue {
        let created_at = if new {
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        } else {
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()
        };
        Issue {
            key: format!("{rule_type}-{severity}-{effort}"),
            component: ComponentId::from("f1"),
            rule_type,
            severity,
            resolution,
            status: if resolution.is_some() { IssueStatus::Resolved } else { IssueStatus::Open },
            effort,
            created_at,
        }
    }

    fn counter() -> IssueCounter {
        let issues = [
            issue(RuleType::CodeSmell, Severity::Major, None, 10, false),
            issue(RuleType::CodeSmell, Severity::Major, None, 20, true),
            issue(RuleType::CodeSmell, Severity::Minor, Some(Resolution::WontFix), 5, true),
            issue(RuleType::Bug, Severity::Critical, None, 30, false),
            issue(RuleType::Bug, Severity::Blocker, Some(Resolution::FalsePositive), 40, true),
            issue(RuleType::Vulnerability, Severity::Minor, None, 15, true),
        ];
        IssueCounter::from_issues(&issues, Some(leak_start()))
    }

    #[test]
    fn test_identical_issues_share_a_group() {
        let issues = [
            issue(RuleType::Bug, Severity::Major, None, 3, false),
            issue(RuleType::Bug, Severity::Major, None, 4, false),
        ];
        let counter = IssueCounter::from_issues(&issues, Some(leak_start()));
        assert_eq!(counter.groups().len(), 1);
        assert_eq!(counter.groups()[0].count, 2);
        assert_eq!(counter.groups()[0].effort, 7);
    }

    #[test]
    fn test_counts() {
        let counter = counter();
        assert_eq!(counter.count_unresolved(false), 4);
        assert_eq!(counter.count_unresolved(true), 2);
        assert_eq!(counter.count_unresolved_by_type(RuleType::CodeSmell, false), 2);
        assert_eq!(counter.count_unresolved_by_type(RuleType::CodeSmell, true), 1);
        assert_eq!(counter.count_unresolved_by_severity(Severity::Major, false), 2);
        assert_eq!(counter.count_unresolved_by_severity(Severity::Blocker, false), 0);
        assert_eq!(counter.count_unresolved_by_status(IssueStatus::Open, false), 4);
        assert_eq!(counter.count_by_resolution(Resolution::WontFix, false), 1);
        assert_eq!(counter.count_by_resolution(Resolution::FalsePositive, true), 1);
    }

    #[test]
    fn test_effort() {
        let counter = counter();
        assert_eq!(counter.effort_of_unresolved(RuleType::CodeSmell, false), 30);
        assert_eq!(counter.effort_of_unresolved(RuleType::CodeSmell, true), 20);
        assert_eq!(counter.effort_of_unresolved(RuleType::Bug, false), 30);
    }

    #[test]
    fn test_highest_severity_ignores_resolved_issues() {
        let counter = counter();
        assert_eq!(
            counter.highest_severity_of_unresolved(RuleType::Bug, false),
            Some(Severity::Critical)
        );
        assert_eq!(counter.highest_severity_of_unresolved(RuleType::Bug, true), None);
        assert_eq!(
            counter.highest_severity_of_unresolved(RuleType::Vulnerability, true),
            Some(Severity::Minor)
        );
    }

    #[test]
    fn test_without_leak_period_nothing_is_new() {
        let issues = [issue(RuleType::Bug, Severity::Major, None, 1, true)];
        let counter = IssueCounter::from_issues(&issues, None);
        assert_eq!(counter.count_unresolved(false), 1);
        assert_eq!(counter.count_unresolved(true), 0);
    }

    #[test]
    fn test_empty_counter() {
        let counter = IssueCounter::default();
        assert!(counter.is_empty());
        assert_eq!(counter.count_unresolved(false), 0);
        assert_eq!(counter.highest_severity_of_unresolved(RuleType::Bug, false), None);
    }
}
