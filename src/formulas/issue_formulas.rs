use super::{Formula, FormulaContext, FormulaFactory};
use crate::Result;
use crate::facts::{IssueCounter, IssueStatus, Resolution, RuleType, Severity};
use crate::metrics::{Rating, keys};

type CountFn = fn(&IssueCounter, bool) -> u64;

/// A metric counting something in the issue facts, optionally paired with
/// its leak-period counterpart.
#[derive(Debug)]
struct CountDef {
    key: &'static str,
    new_key: Option<&'static str>,
    count: CountFn,
}

macro_rules! count_def {
    ($key:expr, $new_key:expr, $count:expr) => {
        CountDef {
            key: $key,
            new_key: $new_key,
            count: $count,
        }
    };
}

const COUNTS: &[CountDef] = &[
    count_def!(keys::CODE_SMELLS, Some(keys::NEW_CODE_SMELLS), |f, leak| f
        .count_unresolved_by_type(RuleType::CodeSmell, leak)),
    count_def!(keys::BUGS, Some(keys::NEW_BUGS), |f, leak| f.count_unresolved_by_type(RuleType::Bug, leak)),
    count_def!(keys::VULNERABILITIES, Some(keys::NEW_VULNERABILITIES), |f, leak| f
        .count_unresolved_by_type(RuleType::Vulnerability, leak)),
    count_def!(keys::VIOLATIONS, Some(keys::NEW_VIOLATIONS), IssueCounter::count_unresolved),
    count_def!(keys::BLOCKER_VIOLATIONS, Some(keys::NEW_BLOCKER_VIOLATIONS), |f, leak| f
        .count_unresolved_by_severity(Severity::Blocker, leak)),
    count_def!(keys::CRITICAL_VIOLATIONS, Some(keys::NEW_CRITICAL_VIOLATIONS), |f, leak| f
        .count_unresolved_by_severity(Severity::Critical, leak)),
    count_def!(keys::MAJOR_VIOLATIONS, Some(keys::NEW_MAJOR_VIOLATIONS), |f, leak| f
        .count_unresolved_by_severity(Severity::Major, leak)),
    count_def!(keys::MINOR_VIOLATIONS, Some(keys::NEW_MINOR_VIOLATIONS), |f, leak| f
        .count_unresolved_by_severity(Severity::Minor, leak)),
    count_def!(keys::INFO_VIOLATIONS, Some(keys::NEW_INFO_VIOLATIONS), |f, leak| f
        .count_unresolved_by_severity(Severity::Info, leak)),
    count_def!(keys::FALSE_POSITIVE_ISSUES, None, |f, leak| f
        .count_by_resolution(Resolution::FalsePositive, leak)),
    count_def!(keys::WONT_FIX_ISSUES, None, |f, leak| f.count_by_resolution(Resolution::WontFix, leak)),
    count_def!(keys::OPEN_ISSUES, None, |f, leak| f.count_unresolved_by_status(IssueStatus::Open, leak)),
    count_def!(keys::REOPENED_ISSUES, None, |f, leak| f
        .count_unresolved_by_status(IssueStatus::Reopened, leak)),
    count_def!(keys::CONFIRMED_ISSUES, None, |f, leak| f
        .count_unresolved_by_status(IssueStatus::Confirmed, leak)),
    count_def!(keys::TECHNICAL_DEBT, Some(keys::NEW_TECHNICAL_DEBT), |f, leak| f
        .effort_of_unresolved(RuleType::CodeSmell, leak)),
    count_def!(
        keys::RELIABILITY_REMEDIATION_EFFORT,
        Some(keys::NEW_RELIABILITY_REMEDIATION_EFFORT),
        |f, leak| f.effort_of_unresolved(RuleType::Bug, leak)
    ),
    count_def!(
        keys::SECURITY_REMEDIATION_EFFORT,
        Some(keys::NEW_SECURITY_REMEDIATION_EFFORT),
        |f, leak| f.effort_of_unresolved(RuleType::Vulnerability, leak)
    ),
];

/// Ratings driven by the worst unresolved issue of a rule type.
const SEVERITY_RATINGS: &[(&str, &str, RuleType)] = &[
    (keys::RELIABILITY_RATING, keys::NEW_RELIABILITY_RATING, RuleType::Bug),
    (keys::SECURITY_RATING, keys::NEW_SECURITY_RATING, RuleType::Vulnerability),
];

#[expect(clippy::cast_precision_loss, reason = "issue counts and efforts stay far below 2^52")]
fn as_value(count: u64) -> f64 {
    count as f64
}

const fn rating_for_severity(severity: Option<Severity>) -> Rating {
    match severity {
        None | Some(Severity::Info) => Rating::A,
        Some(Severity::Minor) => Rating::B,
        Some(Severity::Major) => Rating::C,
        Some(Severity::Critical) => Rating::D,
        Some(Severity::Blocker) => Rating::E,
    }
}

/// Technical debt and development cost of the component, in minutes.
fn debt_and_development_cost(context: &FormulaContext<'_>) -> Result<(f64, f64)> {
    let debt = context.value(keys::TECHNICAL_DEBT)?.unwrap_or(0.0);
    let ncloc = context.value(keys::NCLOC)?.unwrap_or(0.0);
    Ok((debt, ncloc * context.config().development_cost_per_line))
}

fn debt_ratio(context: &mut FormulaContext<'_>, _facts: &IssueCounter) -> Result<()> {
    let (debt, development_cost) = debt_and_development_cost(context)?;
    let ratio = if development_cost > 0.0 { 100.0 * debt / development_cost } else { 0.0 };
    context.set_value(ratio);
    Ok(())
}

fn maintainability_rating(context: &mut FormulaContext<'_>, _facts: &IssueCounter) -> Result<()> {
    let (debt, development_cost) = debt_and_development_cost(context)?;
    let ratio = if development_cost > 0.0 { debt / development_cost } else { 0.0 };
    let rating = context.debt_rating_grid().rating_for(ratio);
    context.set_rating(rating);
    Ok(())
}

/// The built-in catalog of formulas computed from issue facts.
///
/// Absolute formulas come first, in an order where every formula runs after
/// the formulas it depends on, followed by the leak-period formulas.
#[derive(Debug)]
pub struct IssueMetricFormulaFactory {
    formulas: Vec<Formula>,
}

impl IssueMetricFormulaFactory {
    #[must_use]
    pub fn new() -> Self {
        let mut formulas = Vec::new();

        for def in COUNTS {
            let count = def.count;
            formulas.push(Formula::new(def.key, move |context, facts| {
                context.set_value(as_value(count(facts, false)));
                Ok(())
            }));
        }

        formulas.push(Formula::new(keys::SQALE_DEBT_RATIO, debt_ratio).depending_on(&[keys::TECHNICAL_DEBT, keys::NCLOC]));
        formulas.push(Formula::new(keys::SQALE_RATING, maintainability_rating).depending_on(&[keys::TECHNICAL_DEBT, keys::NCLOC]));

        for &(key, _, rule_type) in SEVERITY_RATINGS {
            formulas.push(Formula::new(key, move |context, facts| {
                context.set_rating(rating_for_severity(facts.highest_severity_of_unresolved(rule_type, false)));
                Ok(())
            }));
        }

        for def in COUNTS {
            let Some(new_key) = def.new_key else {
                continue;
            };
            let count = def.count;
            formulas.push(Formula::leak_only(new_key, move |context, facts| {
                context.set_value(as_value(count(facts, true)));
                Ok(())
            }));
        }

        for &(_, new_key, rule_type) in SEVERITY_RATINGS {
            formulas.push(Formula::leak_only(new_key, move |context, facts| {
                context.set_rating(rating_for_severity(facts.highest_severity_of_unresolved(rule_type, true)));
                Ok(())
            }));
        }

        Self { formulas }
    }
}

impl Default for IssueMetricFormulaFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaFactory for IssueMetricFormulaFactory {
    fn formulas(&self) -> &[Formula] {
        &self.formulas
    }
}
