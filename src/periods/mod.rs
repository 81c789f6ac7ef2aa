//! Analysis periods
//!
//! A project that has never been analyzed has no [`AnalysisPeriod`] and is
//! ignored by refreshes. An analyzed project may additionally carry the start
//! of its leak period, the baseline against which variations are measured.

use crate::Result;
use crate::components::ComponentId;
use chrono::{DateTime, Utc};
use ohno::bail;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The last analysis of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPeriod {
    pub project: ComponentId,
    pub analyzed_at: DateTime<Utc>,

    #[serde(default)]
    pub leak_period_start: Option<DateTime<Utc>>,
}

impl AnalysisPeriod {
    #[must_use]
    pub const fn has_leak_period(&self) -> bool {
        self.leak_period_start.is_some()
    }
}

/// Read access to the analysis history of projects.
pub trait PeriodLookup {
    /// The last analysis of `project`, or `Ok(None)` if it was never analyzed.
    fn period_for(&self, project: &ComponentId) -> Result<Option<AnalysisPeriod>>;
}

/// Analysis periods held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPeriods {
    periods: HashMap<ComponentId, AnalysisPeriod>,
}

impl InMemoryPeriods {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the analysis of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the leak period starts after the analysis.
    pub fn insert(&mut self, period: AnalysisPeriod) -> Result<()> {
        if let Some(start) = period.leak_period_start
            && start > period.analyzed_at
        {
            bail!(
                "leak period of project `{}` starts after its analysis ({start} > {})",
                period.project,
                period.analyzed_at
            );
        }

        let _ = self.periods.insert(period.project.clone(), period);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisPeriod> {
        self.periods.values()
    }
}

impl PeriodLookup for InMemoryPeriods {
    fn period_for(&self, project: &ComponentId) -> Result<Option<AnalysisPeriod>> {
        Ok(self.periods.get(project).cloned())
    }
}
