use super::variation::refreshed_variation;
use super::{Measure, PersistedMeasure};
use crate::Result;
use crate::components::{Component, ComponentId};
use crate::metrics::{MetricDef, MetricId, Rating};
use ohno::{app_err, bail};
use std::collections::HashMap;

const LOG_TARGET: &str = "    matrix";

#[derive(Debug, Clone)]
struct Entry {
    project_id: ComponentId,
    metric_id: MetricId,
    snapshot: Option<Measure>,
    current: Option<Measure>,
}

impl Entry {
    fn is_changed(&self) -> bool {
        match (&self.current, &self.snapshot) {
            (None, _) => false,
            (Some(current), Some(snapshot)) => !current.same_state(snapshot),
            (Some(_), None) => true,
        }
    }
}

/// Staging map of the measures touched by one refresh.
///
/// Holds one slot per traversed component and per involved metric, seeded
/// with the persisted state. Writes are tracked against that seed so that
/// [`Self::write_set`] only yields what really differs from storage.
#[derive(Debug, Clone)]
pub struct MeasureMatrix {
    metrics: HashMap<String, MetricDef>,
    entries: HashMap<ComponentId, HashMap<String, Entry>>,
    default_scale: u32,
}

impl MeasureMatrix {
    /// Build the matrix for `components` × `metrics`, preloaded with `persisted`.
    ///
    /// Persisted measures of other components or metrics are ignored.
    #[must_use]
    pub fn new(components: &[Component], metrics: &[MetricDef], persisted: Vec<PersistedMeasure>, default_scale: u32) -> Self {
        let keys_by_id: HashMap<MetricId, &str> = metrics.iter().map(|m| (m.id, m.key.as_str())).collect();

        let mut entries: HashMap<ComponentId, HashMap<String, Entry>> = components
            .iter()
            .map(|component| {
                let row = metrics
                    .iter()
                    .map(|metric| {
                        let entry = Entry {
                            project_id: component.project.clone(),
                            metric_id: metric.id,
                            snapshot: None,
                            current: None,
                        };
                        (metric.key.clone(), entry)
                    })
                    .collect();
                (component.id.clone(), row)
            })
            .collect();

        let mut loaded = 0_usize;
        for measure in persisted {
            let Some(&key) = keys_by_id.get(&measure.metric_id) else {
                continue;
            };

            let Some(entry) = entries.get_mut(&measure.component_id).and_then(|row| row.get_mut(key)) else {
                continue;
            };

            let state = Measure {
                component_id: measure.component_id,
                metric_key: key.to_string(),
                value: measure.value,
                variation: measure.variation,
                text_value: measure.text_value,
            };
            entry.snapshot = Some(state.clone());
            entry.current = Some(state);
            loaded += 1;
        }

        log::debug!(
            target: LOG_TARGET,
            "Prepared {} component(s) x {} metric(s), {loaded} measure(s) loaded",
            components.len(),
            metrics.len()
        );

        Self {
            metrics: metrics.iter().map(|m| (m.key.clone(), m.clone())).collect(),
            entries,
            default_scale,
        }
    }

    #[must_use]
    pub fn metric(&self, metric_key: &str) -> Option<&MetricDef> {
        self.metrics.get(metric_key)
    }

    /// The current state of a measure, if it exists.
    #[must_use]
    pub fn measure(&self, component: &ComponentId, metric_key: &str) -> Option<&Measure> {
        self.entries.get(component)?.get(metric_key)?.current.as_ref()
    }

    #[must_use]
    pub fn value(&self, component: &ComponentId, metric_key: &str) -> Option<f64> {
        self.measure(component, metric_key).and_then(|m| m.value)
    }

    /// The variation of a measure, which is where leak-period figures live.
    #[must_use]
    pub fn leak_value(&self, component: &ComponentId, metric_key: &str) -> Option<f64> {
        self.measure(component, metric_key).and_then(|m| m.variation)
    }

    #[must_use]
    pub fn rating(&self, component: &ComponentId, metric_key: &str) -> Option<Rating> {
        self.value(component, metric_key).and_then(Rating::from_value)
    }

    /// Whether the measure differs from its persisted state.
    #[must_use]
    pub fn is_changed(&self, component: &ComponentId, metric_key: &str) -> bool {
        self.entries
            .get(component)
            .and_then(|row| row.get(metric_key))
            .is_some_and(Entry::is_changed)
    }

    /// Set the absolute value of a measure.
    ///
    /// The value is rounded to the metric's decimal scale. When
    /// `refresh_variation` is set and the value moves, the variation is
    /// recomputed against the previous value and rounded the same way;
    /// otherwise it is kept bit for bit. A value written to a
    /// rating metric must be a valid rating ordinal.
    ///
    /// # Errors
    ///
    /// Returns an error if the component or the metric is not part of the
    /// matrix, or if the value is not a valid rating for a rating metric.
    pub fn set_value(&mut self, component: &ComponentId, metric_key: &str, value: f64, refresh_variation: bool) -> Result<()> {
        let metric = self.metric_for(metric_key)?;
        if metric.is_rating() {
            let rating = Rating::from_value(value)
                .ok_or_else(|| app_err!("value {value} is not a valid rating for metric `{metric_key}`"))?;
            return self.set_rating(component, metric_key, rating, refresh_variation);
        }

        let metric = metric.clone();
        let default_scale = self.default_scale;
        let value = metric.scale(value, default_scale);
        self.update(component, metric_key, |measure| {
            let moved = measure.value.is_none_or(|old| old.total_cmp(&value).is_ne());
            if refresh_variation && moved {
                measure.variation =
                    refreshed_variation(measure.value, measure.variation, value).map(|v| metric.scale(v, default_scale));
            }
            measure.value = Some(value);
            measure.text_value = None;
        })
    }

    /// Set a rating measure, storing its ordinal as the value and its label as the text.
    ///
    /// # Errors
    ///
    /// Returns an error if the component or the metric is not part of the
    /// matrix, or if the metric does not hold ratings.
    pub fn set_rating(&mut self, component: &ComponentId, metric_key: &str, rating: Rating, refresh_variation: bool) -> Result<()> {
        if !self.metric_for(metric_key)?.is_rating() {
            bail!("metric `{metric_key}` does not hold ratings");
        }

        let value = rating.value();
        self.update(component, metric_key, |measure| {
            if refresh_variation {
                measure.variation = refreshed_variation(measure.value, measure.variation, value);
            }
            measure.value = Some(value);
            measure.text_value = Some(rating.label().to_string());
        })
    }

    /// Set the leak-period figure of a measure.
    ///
    /// The figure is stored as the variation and the value is cleared. For a
    /// rating metric the figure must be a valid rating ordinal.
    ///
    /// # Errors
    ///
    /// Returns an error if the component or the metric is not part of the
    /// matrix, or if the figure is not a valid rating for a rating metric.
    pub fn set_leak_value(&mut self, component: &ComponentId, metric_key: &str, value: f64) -> Result<()> {
        let metric = self.metric_for(metric_key)?;
        let value = if metric.is_rating() {
            Rating::from_value(value)
                .ok_or_else(|| app_err!("value {value} is not a valid rating for metric `{metric_key}`"))?
                .value()
        } else {
            metric.scale(value, self.default_scale)
        };

        self.update(component, metric_key, |measure| {
            measure.value = None;
            measure.variation = Some(value);
            measure.text_value = None;
        })
    }

    /// Number of measures that differ from their persisted state.
    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.entries.values().flat_map(HashMap::values).filter(|e| e.is_changed()).count()
    }

    /// The measures to persist, ordered by component id and metric id.
    #[must_use]
    pub fn write_set(&self) -> Vec<PersistedMeasure> {
        let mut changed: Vec<_> = self
            .entries
            .values()
            .flat_map(HashMap::values)
            .filter(|e| e.is_changed())
            .filter_map(|e| {
                e.current.as_ref().map(|m| PersistedMeasure {
                    component_id: m.component_id.clone(),
                    project_id: e.project_id.clone(),
                    metric_id: e.metric_id,
                    value: m.value,
                    variation: m.variation,
                    text_value: m.text_value.clone(),
                })
            })
            .collect();

        changed.sort_by(|a, b| a.component_id.cmp(&b.component_id).then(a.metric_id.cmp(&b.metric_id)));
        changed
    }

    fn metric_for(&self, metric_key: &str) -> Result<&MetricDef> {
        self.metrics
            .get(metric_key)
            .ok_or_else(|| app_err!("metric `{metric_key}` is not part of this refresh"))
    }

    fn update(&mut self, component: &ComponentId, metric_key: &str, apply: impl FnOnce(&mut Measure)) -> Result<()> {
        let Some(row) = self.entries.get_mut(component) else {
            bail!("component `{component}` is not part of this refresh");
        };

        let Some(entry) = row.get_mut(metric_key) else {
            bail!("metric `{metric_key}` is not part of this refresh");
        };

        let measure = entry
            .current
            .get_or_insert_with(|| Measure::empty(component.clone(), metric_key));
        apply(measure);
        Ok(())
    }
}
