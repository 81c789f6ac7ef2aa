use crate::Result;
use crate::components::ComponentId;
use crate::measures::PersistedMeasure;
use crate::metrics::MetricId;

/// A transactional unit of work against the measure store.
pub trait Session {
    /// Persisted measures of the given components for the given metrics.
    fn select_measures(&self, components: &[ComponentId], metrics: &[MetricId]) -> Result<Vec<PersistedMeasure>>;

    /// Insert a measure, or replace the one with the same component and metric.
    fn upsert_measure(&mut self, measure: PersistedMeasure) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    /// Discard every write made since the session started or last committed.
    fn rollback(&mut self) -> Result<()>;
}
