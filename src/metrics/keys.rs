//! Keys of the metrics known to the built-in formulas.

pub const NCLOC: &str = "ncloc";

pub const CODE_SMELLS: &str = "code_smells";
pub const BUGS: &str = "bugs";
pub const VULNERABILITIES: &str = "vulnerabilities";

pub const VIOLATIONS: &str = "violations";
pub const BLOCKER_VIOLATIONS: &str = "blocker_violations";
pub const CRITICAL_VIOLATIONS: &str = "critical_violations";
pub const MAJOR_VIOLATIONS: &str = "major_violations";
pub const MINOR_VIOLATIONS: &str = "minor_violations";
pub const INFO_VIOLATIONS: &str = "info_violations";

pub const FALSE_POSITIVE_ISSUES: &str = "false_positive_issues";
pub const WONT_FIX_ISSUES: &str = "wont_fix_issues";
pub const OPEN_ISSUES: &str = "open_issues";
pub const REOPENED_ISSUES: &str = "reopened_issues";
pub const CONFIRMED_ISSUES: &str = "confirmed_issues";

pub const TECHNICAL_DEBT: &str = "sqale_index";
pub const RELIABILITY_REMEDIATION_EFFORT: &str = "reliability_remediation_effort";
pub const SECURITY_REMEDIATION_EFFORT: &str = "security_remediation_effort";

pub const SQALE_DEBT_RATIO: &str = "sqale_debt_ratio";
pub const SQALE_RATING: &str = "sqale_rating";
pub const RELIABILITY_RATING: &str = "reliability_rating";
pub const SECURITY_RATING: &str = "security_rating";

pub const NEW_CODE_SMELLS: &str = "new_code_smells";
pub const NEW_BUGS: &str = "new_bugs";
pub const NEW_VULNERABILITIES: &str = "new_vulnerabilities";

pub const NEW_VIOLATIONS: &str = "new_violations";
pub const NEW_BLOCKER_VIOLATIONS: &str = "new_blocker_violations";
pub const NEW_CRITICAL_VIOLATIONS: &str = "new_critical_violations";
pub const NEW_MAJOR_VIOLATIONS: &str = "new_major_violations";
pub const NEW_MINOR_VIOLATIONS: &str = "new_minor_violations";
pub const NEW_INFO_VIOLATIONS: &str = "new_info_violations";

pub const NEW_TECHNICAL_DEBT: &str = "new_technical_debt";
pub const NEW_RELIABILITY_REMEDIATION_EFFORT: &str = "new_reliability_remediation_effort";
pub const NEW_SECURITY_REMEDIATION_EFFORT: &str = "new_security_remediation_effort";

pub const NEW_RELIABILITY_RATING: &str = "new_reliability_rating";
pub const NEW_SECURITY_RATING: &str = "new_security_rating";
