use super::FormulaContext;
use crate::Result;
use crate::facts::IssueCounter;
use core::fmt;

/// Signature of the function computing a formula on one component.
pub type ComputeFn = dyn Fn(&mut FormulaContext<'_>, &IssueCounter) -> Result<()> + Send + Sync;

/// A recipe producing the measure of one metric.
pub struct Formula {
    metric_key: String,
    leak_only: bool,
    depends_on: Vec<String>,
    compute: Box<ComputeFn>,
}

impl Formula {
    /// A formula producing the absolute value of `metric_key`.
    pub fn new(
        metric_key: impl Into<String>,
        compute: impl Fn(&mut FormulaContext<'_>, &IssueCounter) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            metric_key: metric_key.into(),
            leak_only: false,
            depends_on: Vec::new(),
            compute: Box::new(compute),
        }
    }

    /// A formula producing only a leak-period figure for `metric_key`.
    ///
    /// It runs only on projects with a leak period, and its output is stored
    /// as the variation of the measure.
    pub fn leak_only(
        metric_key: impl Into<String>,
        compute: impl Fn(&mut FormulaContext<'_>, &IssueCounter) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            leak_only: true,
            ..Self::new(metric_key, compute)
        }
    }

    /// Declare the metrics whose measures the formula reads.
    #[must_use]
    pub fn depending_on(mut self, metric_keys: &[&str]) -> Self {
        self.depends_on.extend(metric_keys.iter().map(|k| (*k).to_string()));
        self
    }

    #[must_use]
    pub fn metric_key(&self) -> &str {
        &self.metric_key
    }

    #[must_use]
    pub const fn is_leak_only(&self) -> bool {
        self.leak_only
    }

    #[must_use]
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    /// Every metric the formula touches: its own, then its dependencies.
    pub fn involved_metrics(&self) -> impl Iterator<Item = &str> {
        core::iter::once(self.metric_key.as_str()).chain(self.depends_on.iter().map(String::as_str))
    }

    /// Run the formula on the component of `context`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the compute function returns.
    pub fn compute(&self, context: &mut FormulaContext<'_>, facts: &IssueCounter) -> Result<()> {
        (self.compute)(context, facts)
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formula")
            .field("metric_key", &self.metric_key)
            .field("leak_only", &self.leak_only)
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let formula = Formula::new("a", |_, _| Ok(())).depending_on(&["b", "c"]);
        assert_eq!(formula.metric_key(), "a");
        assert!(!formula.is_leak_only());
        assert_eq!(formula.involved_metrics().collect::<Vec<_>>(), vec!["a", "b", "c"]);

        let leak = Formula::leak_only("new_a", |_, _| Ok(()));
        assert!(leak.is_leak_only());
        assert!(leak.depends_on().is_empty());
    }

    #[test]
    fn test_debug_omits_compute() {
        let formula = Formula::new("a", |_, _| Ok(()));
        let text = format!("{formula:?}");
        assert!(text.contains("metric_key: \"a\""));
        assert!(text.contains(".."));
    }
}
