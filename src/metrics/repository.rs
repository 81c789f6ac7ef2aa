use super::{CORE_METRICS, MetricDef, MetricId};
use crate::Result;
use ohno::bail;
use std::collections::HashMap;

/// Read access to the metric dictionary.
pub trait MetricRepository {
    /// Look up a metric by key.
    ///
    /// Returns `Ok(None)` when no metric has that key.
    fn metric_by_key(&self, key: &str) -> Result<Option<MetricDef>>;
}

/// A metric dictionary held in memory.
#[derive(Debug, Clone, Default)]
pub struct MetricCatalog {
    by_key: HashMap<String, MetricDef>,
}

impl MetricCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The dictionary of the metrics computed by the built-in formulas.
    ///
    /// Ids are assigned from 1 in declaration order, so they are stable
    /// across runs.
    #[must_use]
    pub fn core() -> Self {
        CORE_METRICS
            .iter()
            .zip(1_u32..)
            .map(|(metric, id)| MetricDef {
                id: MetricId(id),
                key: metric.key.to_string(),
                short_name: metric.short_name.to_string(),
                value_kind: metric.value_kind,
                decimal_scale: metric.decimal_scale,
            })
            .collect()
    }

    /// Add a metric to the dictionary.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or the id is already taken.
    pub fn insert(&mut self, metric: MetricDef) -> Result<()> {
        if self.by_key.contains_key(&metric.key) {
            bail!("duplicate metric key `{}`", metric.key);
        }

        if let Some(other) = self.by_key.values().find(|m| m.id == metric.id) {
            bail!("metric `{}` reuses id {} of metric `{}`", metric.key, metric.id, other.key);
        }

        let _ = self.by_key.insert(metric.key.clone(), metric);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetricDef> {
        self.by_key.get(key)
    }

    #[must_use]
    pub fn by_id(&self, id: MetricId) -> Option<&MetricDef> {
        self.by_key.values().find(|m| m.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Metrics sorted by id.
    #[must_use]
    pub fn sorted(&self) -> Vec<&MetricDef> {
        let mut metrics: Vec<_> = self.by_key.values().collect();
        metrics.sort_by_key(|m| m.id);
        metrics
    }
}

impl FromIterator<MetricDef> for MetricCatalog {
    fn from_iter<I: IntoIterator<Item = MetricDef>>(iter: I) -> Self {
        Self {
            by_key: iter.into_iter().map(|m| (m.key.clone(), m)).collect(),
        }
    }
}

impl MetricRepository for MetricCatalog {
    fn metric_by_key(&self, key: &str) -> Result<Option<MetricDef>> {
        Ok(self.by_key.get(key).cloned())
    }
}
