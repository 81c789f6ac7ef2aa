use super::RefreshSummary;
use crate::Result;
use crate::components::{Component, ComponentId, ComponentTree, Traversal, build_traversal};
use crate::config::Config;
use crate::facts::{FactProvider, IssueCounter};
use crate::formulas::{DebtRatingGrid, Formula, FormulaContext, FormulaFactory, FormulaOutput};
use crate::measures::MeasureMatrix;
use crate::metrics::{MetricDef, MetricId, MetricRepository};
use crate::periods::{AnalysisPeriod, PeriodLookup};
use crate::storage::Session;
use chrono::{DateTime, Utc};
use core::any::Any;
use core::panic::AssertUnwindSafe;
use ohno::{IntoAppError, app_err, bail};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::panic;

const LOG_TARGET: &str = "    engine";

/// Recomputes the measures of changed components and of their ancestors.
pub struct LiveMeasureComputer<'a> {
    tree: &'a dyn ComponentTree,
    metrics: &'a dyn MetricRepository,
    periods: &'a dyn PeriodLookup,
    facts: &'a dyn FactProvider,
    formulas: &'a dyn FormulaFactory,
    config: &'a Config,
}

impl core::fmt::Debug for LiveMeasureComputer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LiveMeasureComputer")
            .field("formulas", &self.formulas.formulas())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

/// Metrics involved in a refresh, resolved once.
struct ResolvedMetrics {
    ordered: Vec<MetricDef>,
    by_key: HashMap<String, MetricDef>,
}

impl<'a> LiveMeasureComputer<'a> {
    #[must_use]
    pub fn new(
        tree: &'a dyn ComponentTree,
        metrics: &'a dyn MetricRepository,
        periods: &'a dyn PeriodLookup,
        facts: &'a dyn FactProvider,
        formulas: &'a dyn FormulaFactory,
        config: &'a Config,
    ) -> Self {
        Self {
            tree,
            metrics,
            periods,
            facts,
            formulas,
            config,
        }
    }

    /// Refresh the measures of `components` and of all their ancestors.
    ///
    /// Components of projects that were never analyzed are ignored. The
    /// measures that changed are upserted through `session`, which is
    /// committed on success and rolled back on any failure.
    ///
    /// # Errors
    ///
    /// Returns an error if a formula refers to an unknown metric, if the
    /// component tree is inconsistent, if a collaborator fails, or if a
    /// formula fails or panics on a component. In the last case the message
    /// names the metric and the component key.
    pub fn refresh(&self, session: &mut dyn Session, components: &[Component]) -> Result<RefreshSummary> {
        if components.is_empty() {
            log::debug!(target: LOG_TARGET, "Nothing to refresh");
            return Ok(RefreshSummary::default());
        }

        let grid = DebtRatingGrid::from_config(self.config)?;
        let metrics = self.resolve_metrics()?;
        let mut traversal = build_traversal(self.tree, components)?;

        let mut periods = HashMap::new();
        let mut skipped_projects = Vec::new();
        for project in traversal.projects() {
            match self.periods.period_for(&project)? {
                Some(period) => {
                    let _ = periods.insert(project, period);
                }
                None => {
                    log::info!(target: LOG_TARGET, "Skipping project `{project}`, it has not been analyzed yet");
                    skipped_projects.push(project);
                }
            }
        }

        traversal.retain_projects(|project| periods.contains_key(project));
        if traversal.is_empty() {
            return Ok(RefreshSummary {
                skipped_projects,
                ..RefreshSummary::default()
            });
        }

        let written_measures = match self.compute_and_write(session, &traversal, &metrics, &periods, &grid) {
            Ok(written) => written,
            Err(e) => {
                if let Err(rollback_error) = session.rollback() {
                    log::warn!(target: LOG_TARGET, "Could not roll back the session: {rollback_error}");
                }
                return Err(e);
            }
        };

        log::info!(
            target: LOG_TARGET,
            "Refreshed {} component(s), wrote {written_measures} measure(s)",
            traversal.len()
        );

        Ok(RefreshSummary {
            visited_components: traversal.len(),
            skipped_projects,
            written_measures,
        })
    }

    /// Resolve the metric of every formula and of every declared dependency, once each.
    fn resolve_metrics(&self) -> Result<ResolvedMetrics> {
        let mut ordered = Vec::new();
        let mut by_key: HashMap<String, MetricDef> = HashMap::new();

        for formula in self.formulas.formulas() {
            for key in formula.involved_metrics() {
                if by_key.contains_key(key) {
                    continue;
                }

                let Some(metric) = self.metrics.metric_by_key(key)? else {
                    bail!("unknown metric `{key}` required by the formula of `{}`", formula.metric_key());
                };

                ordered.push(metric.clone());
                let _ = by_key.insert(key.to_string(), metric);
            }
        }

        log::debug!(target: LOG_TARGET, "Resolved {} metric(s)", ordered.len());
        Ok(ResolvedMetrics { ordered, by_key })
    }

    fn compute_and_write(
        &self,
        session: &mut dyn Session,
        traversal: &Traversal,
        metrics: &ResolvedMetrics,
        periods: &HashMap<ComponentId, AnalysisPeriod>,
        grid: &DebtRatingGrid,
    ) -> Result<usize> {
        let component_ids: Vec<ComponentId> = traversal.components().iter().map(|c| c.id.clone()).collect();
        let metric_ids: Vec<MetricId> = metrics.ordered.iter().map(|m| m.id).collect();
        let persisted = session.select_measures(&component_ids, &metric_ids)?;

        let mut matrix = MeasureMatrix::new(traversal.components(), &metrics.ordered, persisted, self.config.default_decimal_scale);
        let mut facts_cache: HashMap<ComponentId, IssueCounter> = HashMap::new();

        for formula in self.formulas.formulas() {
            let Some(metric) = metrics.by_key.get(formula.metric_key()) else {
                bail!("metric `{}` was not resolved", formula.metric_key());
            };

            for component in traversal.components() {
                let leak_period_start = periods.get(&component.project).and_then(|p| p.leak_period_start);
                if formula.is_leak_only() && leak_period_start.is_none() {
                    continue;
                }

                let facts = match facts_cache.entry(component.id.clone()) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => entry.insert(
                        self.facts
                            .facts_for(component, leak_period_start)
                            .into_app_err_with(|| format!("fetching the facts of component `{}`", component.key))?,
                    ),
                };

                let output = self.run_formula(formula, metric, component, &matrix, leak_period_start, grid, facts)?;
                if let Some(output) = output {
                    apply_output(&mut matrix, formula, component, output, leak_period_start)
                        .map_err(|e| compute_error(formula, component, &e))?;
                }
            }
        }

        let write_set = matrix.write_set();
        let written = write_set.len();
        for measure in write_set {
            session.upsert_measure(measure)?;
        }

        session.commit()?;
        Ok(written)
    }

    #[expect(clippy::too_many_arguments, reason = "every argument is a distinct input of one formula run")]
    fn run_formula(
        &self,
        formula: &Formula,
        metric: &MetricDef,
        component: &Component,
        matrix: &MeasureMatrix,
        leak_period_start: Option<DateTime<Utc>>,
        grid: &DebtRatingGrid,
        facts: &IssueCounter,
    ) -> Result<Option<FormulaOutput>> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut context =
                FormulaContext::new(component, metric, formula.depends_on(), matrix, leak_period_start, self.config, grid);
            formula.compute(&mut context, facts).map(|()| context.output())
        }));

        match result {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(compute_error(formula, component, &e)),
            Err(payload) => Err(compute_error(formula, component, &panic_message(payload.as_ref()))),
        }
    }
}

fn apply_output(
    matrix: &mut MeasureMatrix,
    formula: &Formula,
    component: &Component,
    output: FormulaOutput,
    leak_period_start: Option<DateTime<Utc>>,
) -> Result<()> {
    let id = &component.id;
    let key = formula.metric_key();
    let refresh_variation = leak_period_start.is_some();

    match (formula.is_leak_only(), output) {
        (true, FormulaOutput::Value(value)) => matrix.set_leak_value(id, key, value),
        (true, FormulaOutput::Rating(rating)) => matrix.set_leak_value(id, key, rating.value()),
        (false, FormulaOutput::Value(value)) => matrix.set_value(id, key, value, refresh_variation),
        (false, FormulaOutput::Rating(rating)) => matrix.set_rating(id, key, rating, refresh_variation),
    }
}

fn compute_error(formula: &Formula, component: &Component, cause: &dyn core::fmt::Display) -> ohno::AppError {
    app_err!(
        "failed to compute metric `{}` on `{}`: {cause}",
        formula.metric_key(),
        component.key
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("formula panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("formula panicked: {message}")
    } else {
        "formula panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{InMemoryComponentTree, Qualifier};
    use crate::facts::IssueStore;
    use crate::formulas::StaticFormulaFactory;
    use crate::metrics::{MetricCatalog, MetricDef, ValueKind};
    use crate::periods::InMemoryPeriods;
    use crate::storage::MeasureDb;
    use chrono::TimeZone;

    #[test]
    fn test_panic_message() {
        let text: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(text.as_ref()), "formula panicked: boom");

        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(owned.as_ref()), "formula panicked: bang");

        let other: Box<dyn Any + Send> = Box::new(7_u32);
        assert_eq!(panic_message(other.as_ref()), "formula panicked");
    }

    #[test]
    fn test_metrics_are_resolved_once() {
        let catalog: MetricCatalog = [
            MetricDef::new(1, "a", "A", ValueKind::Int),
            MetricDef::new(2, "b", "B", ValueKind::Int),
        ]
        .into_iter()
        .collect();
        let formulas = StaticFormulaFactory::new(vec![
            Formula::new("a", |_, _| Ok(())),
            Formula::new("b", |_, _| Ok(())).depending_on(&["a"]),
        ]);
        let tree = InMemoryComponentTree::new();
        let periods = InMemoryPeriods::new();
        let facts = IssueStore::new();
        let config = Config::default();

        let computer = LiveMeasureComputer::new(&tree, &catalog, &periods, &facts, &formulas, &config);
        let resolved = computer.resolve_metrics().unwrap();

        assert_eq!(resolved.ordered.iter().map(|m| m.key.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(resolved.by_key.len(), 2);
    }

    #[test]
    fn test_formula_error_names_metric_and_component() {
        let catalog: MetricCatalog = [MetricDef::new(1, "a", "A", ValueKind::Int)].into_iter().collect();
        let formulas = StaticFormulaFactory::new(vec![Formula::new("a", |_, _| Err(app_err!("no data")))]);

        let project = Component::project("p1", "proj");
        let file = Component::child_of(&project, "f1", "a.rs", Qualifier::File);
        let tree: InMemoryComponentTree = [project, file.clone()].into_iter().collect();

        let mut periods = InMemoryPeriods::new();
        periods
            .insert(AnalysisPeriod {
                project: ComponentId::from("p1"),
                analyzed_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                leak_period_start: None,
            })
            .unwrap();
        let facts = IssueStore::new();
        let config = Config::default();

        let mut db = MeasureDb::new();
        let mut session = db.session();
        let computer = LiveMeasureComputer::new(&tree, &catalog, &periods, &facts, &formulas, &config);
        let err = computer.refresh(&mut session, &[file]).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("failed to compute metric `a` on `proj:a.rs`"), "{message}");
        assert!(message.contains("no data"), "{message}");
        assert!(session.pending().is_empty());
    }
}
