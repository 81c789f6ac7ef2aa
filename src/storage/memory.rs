use super::Session;
use crate::Result;
use crate::components::ComponentId;
use crate::measures::PersistedMeasure;
use crate::metrics::MetricId;
use std::collections::{BTreeMap, HashSet};

const LOG_TARGET: &str = "   storage";

/// An in-memory measure table, keyed by component and metric.
#[derive(Debug, Clone, Default)]
pub struct MeasureDb {
    measures: BTreeMap<(ComponentId, MetricId), PersistedMeasure>,
}

impl MeasureDb {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, component: &ComponentId, metric: MetricId) -> Option<&PersistedMeasure> {
        self.measures.get(&(component.clone(), metric))
    }

    pub fn upsert(&mut self, measure: PersistedMeasure) {
        let _ = self
            .measures
            .insert((measure.component_id.clone(), measure.metric_id), measure);
    }

    /// Measures ordered by component id, then metric id.
    pub fn iter(&self) -> impl Iterator<Item = &PersistedMeasure> {
        self.measures.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Open a session writing to this table.
    pub fn session(&mut self) -> InMemorySession<'_> {
        InMemorySession {
            db: self,
            pending: Vec::new(),
            committed: 0,
        }
    }
}

impl FromIterator<PersistedMeasure> for MeasureDb {
    fn from_iter<I: IntoIterator<Item = PersistedMeasure>>(iter: I) -> Self {
        let mut db = Self::new();
        for measure in iter {
            db.upsert(measure);
        }
        db
    }
}

/// A session buffering writes until they are committed to a [`MeasureDb`].
#[derive(Debug)]
pub struct InMemorySession<'a> {
    db: &'a mut MeasureDb,
    pending: Vec<PersistedMeasure>,
    committed: usize,
}

impl InMemorySession<'_> {
    /// Writes waiting for a commit.
    #[must_use]
    pub fn pending(&self) -> &[PersistedMeasure] {
        &self.pending
    }

    /// Number of writes committed so far.
    #[must_use]
    pub const fn committed(&self) -> usize {
        self.committed
    }
}

impl Session for InMemorySession<'_> {
    fn select_measures(&self, components: &[ComponentId], metrics: &[MetricId]) -> Result<Vec<PersistedMeasure>> {
        let components: HashSet<_> = components.iter().collect();
        let metrics: HashSet<_> = metrics.iter().collect();

        Ok(self
            .db
            .iter()
            .filter(|m| components.contains(&m.component_id) && metrics.contains(&m.metric_id))
            .cloned()
            .collect())
    }

    fn upsert_measure(&mut self, measure: PersistedMeasure) -> Result<()> {
        self.pending.push(measure);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let count = self.pending.len();
        for measure in self.pending.drain(..) {
            self.db.upsert(measure);
        }

        self.committed += count;
        log::debug!(target: LOG_TARGET, "Committed {count} measure(s)");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        log::debug!(target: LOG_TARGET, "Rolled back {} measure(s)", self.pending.len());
        self.pending.clear();
        Ok(())
    }
}
