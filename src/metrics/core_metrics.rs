use super::ValueKind;
use super::keys;

/// Static description of a metric shipped with the crate.
#[derive(Debug, Clone, Copy)]
pub struct CoreMetric {
    pub key: &'static str,
    pub short_name: &'static str,
    pub value_kind: ValueKind,
    pub decimal_scale: Option<u32>,
    pub description: &'static str,
}

macro_rules! core_metric {
    ($key:expr, $short_name:expr, $kind:ident, $description:expr) => {
        CoreMetric {
            key: $key,
            short_name: $short_name,
            value_kind: ValueKind::$kind,
            decimal_scale: None,
            description: $description,
        }
    };
    ($key:expr, $short_name:expr, $kind:ident, scale = $scale:expr, $description:expr) => {
        CoreMetric {
            key: $key,
            short_name: $short_name,
            value_kind: ValueKind::$kind,
            decimal_scale: Some($scale),
            description: $description,
        }
    };
}

/// Every metric known to the built-in formulas, in id order.
pub const CORE_METRICS: &[CoreMetric] = &[
    core_metric!(keys::NCLOC, "Lines of Code", Int, "Non commenting lines of code"),
    core_metric!(keys::CODE_SMELLS, "Code Smells", Int, "Unresolved code smells"),
    core_metric!(keys::BUGS, "Bugs", Int, "Unresolved bugs"),
    core_metric!(keys::VULNERABILITIES, "Vulnerabilities", Int, "Unresolved vulnerabilities"),
    core_metric!(keys::VIOLATIONS, "Issues", Int, "Unresolved issues of any type"),
    core_metric!(keys::BLOCKER_VIOLATIONS, "Blocker Issues", Int, "Unresolved issues of blocker severity"),
    core_metric!(keys::CRITICAL_VIOLATIONS, "Critical Issues", Int, "Unresolved issues of critical severity"),
    core_metric!(keys::MAJOR_VIOLATIONS, "Major Issues", Int, "Unresolved issues of major severity"),
    core_metric!(keys::MINOR_VIOLATIONS, "Minor Issues", Int, "Unresolved issues of minor severity"),
    core_metric!(keys::INFO_VIOLATIONS, "Info Issues", Int, "Unresolved issues of info severity"),
    core_metric!(keys::FALSE_POSITIVE_ISSUES, "False Positive Issues", Int, "Issues resolved as false positives"),
    core_metric!(keys::WONT_FIX_ISSUES, "Won't Fix Issues", Int, "Issues resolved as won't fix"),
    core_metric!(keys::OPEN_ISSUES, "Open Issues", Int, "Issues in the open status"),
    core_metric!(keys::REOPENED_ISSUES, "Reopened Issues", Int, "Issues in the reopened status"),
    core_metric!(keys::CONFIRMED_ISSUES, "Confirmed Issues", Int, "Issues in the confirmed status"),
    core_metric!(keys::TECHNICAL_DEBT, "Technical Debt", WorkDuration, "Effort to fix all code smells, in minutes"),
    core_metric!(
        keys::RELIABILITY_REMEDIATION_EFFORT,
        "Reliability Remediation Effort",
        WorkDuration,
        "Effort to fix all bugs, in minutes"
    ),
    core_metric!(
        keys::SECURITY_REMEDIATION_EFFORT,
        "Security Remediation Effort",
        WorkDuration,
        "Effort to fix all vulnerabilities, in minutes"
    ),
    core_metric!(
        keys::SQALE_DEBT_RATIO,
        "Technical Debt Ratio",
        Percent,
        scale = 1,
        "Ratio between the technical debt and the cost to develop the code"
    ),
    core_metric!(keys::SQALE_RATING, "Maintainability Rating", Rating, "Rating derived from the technical debt ratio"),
    core_metric!(keys::RELIABILITY_RATING, "Reliability Rating", Rating, "Rating derived from the worst unresolved bug"),
    core_metric!(
        keys::SECURITY_RATING,
        "Security Rating",
        Rating,
        "Rating derived from the worst unresolved vulnerability"
    ),
    core_metric!(keys::NEW_CODE_SMELLS, "New Code Smells", Int, "Code smells raised in the leak period"),
    core_metric!(keys::NEW_BUGS, "New Bugs", Int, "Bugs raised in the leak period"),
    core_metric!(keys::NEW_VULNERABILITIES, "New Vulnerabilities", Int, "Vulnerabilities raised in the leak period"),
    core_metric!(keys::NEW_VIOLATIONS, "New Issues", Int, "Issues raised in the leak period"),
    core_metric!(keys::NEW_BLOCKER_VIOLATIONS, "New Blocker Issues", Int, "Blocker issues raised in the leak period"),
    core_metric!(keys::NEW_CRITICAL_VIOLATIONS, "New Critical Issues", Int, "Critical issues raised in the leak period"),
    core_metric!(keys::NEW_MAJOR_VIOLATIONS, "New Major Issues", Int, "Major issues raised in the leak period"),
    core_metric!(keys::NEW_MINOR_VIOLATIONS, "New Minor Issues", Int, "Minor issues raised in the leak period"),
    core_metric!(keys::NEW_INFO_VIOLATIONS, "New Info Issues", Int, "Info issues raised in the leak period"),
    core_metric!(
        keys::NEW_TECHNICAL_DEBT,
        "Added Technical Debt",
        WorkDuration,
        "Effort to fix the code smells raised in the leak period"
    ),
    core_metric!(
        keys::NEW_RELIABILITY_REMEDIATION_EFFORT,
        "Reliability Remediation Effort on New Code",
        WorkDuration,
        "Effort to fix the bugs raised in the leak period"
    ),
    core_metric!(
        keys::NEW_SECURITY_REMEDIATION_EFFORT,
        "Security Remediation Effort on New Code",
        WorkDuration,
        "Effort to fix the vulnerabilities raised in the leak period"
    ),
    core_metric!(
        keys::NEW_RELIABILITY_RATING,
        "Reliability Rating on New Code",
        Rating,
        "Rating derived from the worst bug raised in the leak period"
    ),
    core_metric!(
        keys::NEW_SECURITY_RATING,
        "Security Rating on New Code",
        Rating,
        "Rating derived from the worst vulnerability raised in the leak period"
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let mut seen = HashSet::new();
        for metric in CORE_METRICS {
            assert!(seen.insert(metric.key), "duplicate metric key {}", metric.key);
        }
    }

    #[test]
    fn test_descriptions_are_not_empty() {
        for metric in CORE_METRICS {
            assert!(!metric.short_name.is_empty(), "{}", metric.key);
            assert!(!metric.description.is_empty(), "{}", metric.key);
        }
    }

    #[test]
    fn test_ratings_are_typed_as_ratings() {
        for metric in CORE_METRICS.iter().filter(|m| m.key.ends_with("_rating")) {
            assert_eq!(metric.value_kind, ValueKind::Rating, "{}", metric.key);
        }
    }
}
