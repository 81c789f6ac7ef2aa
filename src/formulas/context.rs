use super::DebtRatingGrid;
use crate::Result;
use crate::components::Component;
use crate::config::Config;
use crate::measures::MeasureMatrix;
use crate::metrics::{MetricDef, Rating};
use chrono::{DateTime, Utc};
use ohno::bail;

/// What a formula produced for one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FormulaOutput {
    Value(f64),
    Rating(Rating),
}

/// The view a formula has while it runs on one component.
///
/// Reads are limited to the formula's own metric and to the metrics it
/// declared as dependencies. A formula publishes at most one result; a later
/// `set_*` call replaces an earlier one, and a formula that publishes nothing
/// leaves the measure untouched.
#[derive(Debug)]
pub struct FormulaContext<'a> {
    component: &'a Component,
    metric: &'a MetricDef,
    depends_on: &'a [String],
    matrix: &'a MeasureMatrix,
    leak_period_start: Option<DateTime<Utc>>,
    config: &'a Config,
    grid: &'a DebtRatingGrid,
    output: Option<FormulaOutput>,
}

impl<'a> FormulaContext<'a> {
    pub(crate) const fn new(
        component: &'a Component,
        metric: &'a MetricDef,
        depends_on: &'a [String],
        matrix: &'a MeasureMatrix,
        leak_period_start: Option<DateTime<Utc>>,
        config: &'a Config,
        grid: &'a DebtRatingGrid,
    ) -> Self {
        Self {
            component,
            metric,
            depends_on,
            matrix,
            leak_period_start,
            config,
            grid,
            output: None,
        }
    }

    #[must_use]
    pub const fn component(&self) -> &Component {
        self.component
    }

    /// The metric this formula computes.
    #[must_use]
    pub const fn metric(&self) -> &MetricDef {
        self.metric
    }

    /// Start of the leak period of the component's project, if it has one.
    #[must_use]
    pub const fn leak_period_start(&self) -> Option<DateTime<Utc>> {
        self.leak_period_start
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        self.config
    }

    #[must_use]
    pub const fn debt_rating_grid(&self) -> &DebtRatingGrid {
        self.grid
    }

    /// Current value of a measure of this component.
    ///
    /// # Errors
    ///
    /// Returns an error if `metric_key` is neither the formula's metric nor a declared dependency.
    pub fn value(&self, metric_key: &str) -> Result<Option<f64>> {
        self.check_readable(metric_key)?;
        Ok(self.matrix.value(&self.component.id, metric_key))
    }

    /// Current leak-period figure (variation) of a measure of this component.
    ///
    /// # Errors
    ///
    /// Returns an error if `metric_key` is neither the formula's metric nor a declared dependency.
    pub fn leak_value(&self, metric_key: &str) -> Result<Option<f64>> {
        self.check_readable(metric_key)?;
        Ok(self.matrix.leak_value(&self.component.id, metric_key))
    }

    pub fn set_value(&mut self, value: f64) {
        self.output = Some(FormulaOutput::Value(value));
    }

    pub fn set_rating(&mut self, rating: Rating) {
        self.output = Some(FormulaOutput::Rating(rating));
    }

    pub(crate) const fn output(&self) -> Option<FormulaOutput> {
        self.output
    }

    fn check_readable(&self, metric_key: &str) -> Result<()> {
        if metric_key != self.metric.key && !self.depends_on.iter().any(|k| k == metric_key) {
            bail!(
                "metric `{metric_key}` is read by the formula of `{}` without being declared as a dependency",
                self.metric.key
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentId;
    use crate::measures::PersistedMeasure;
    use crate::metrics::{MetricId, ValueKind};

    #[test]
    fn test_reads_are_limited_to_dependencies() {
        let project = Component::project("p1", "proj");
        let metrics = vec![
            MetricDef::new(1, "a", "A", ValueKind::Int),
            MetricDef::new(2, "b", "B", ValueKind::Int),
            MetricDef::new(3, "c", "C", ValueKind::Int),
        ];
        let persisted = vec![PersistedMeasure {
            component_id: ComponentId::from("p1"),
            project_id: ComponentId::from("p1"),
            metric_id: MetricId(2),
            value: Some(5.0),
            variation: Some(1.0),
            text_value: None,
        }];
        let matrix = MeasureMatrix::new(core::slice::from_ref(&project), &metrics, persisted, 1);
        let config = Config::default();
        let grid = DebtRatingGrid::default();
        let depends_on = vec!["b".to_string()];

        let mut context = FormulaContext::new(&project, &metrics[0], &depends_on, &matrix, None, &config, &grid);
        assert_eq!(context.value("b").unwrap(), Some(5.0));
        assert_eq!(context.leak_value("b").unwrap(), Some(1.0));
        assert_eq!(context.value("a").unwrap(), None);

        let err = context.value("c").unwrap_err();
        assert!(err.to_string().contains("without being declared as a dependency"));

        assert_eq!(context.output(), None);
        context.set_value(3.0);
        context.set_rating(Rating::B);
        assert_eq!(context.output(), Some(FormulaOutput::Rating(Rating::B)));
    }
}
