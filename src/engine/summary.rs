use crate::components::ComponentId;
use serde::Serialize;

/// What a refresh did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    /// Components the formulas ran on, ancestors included
    pub visited_components: usize,

    /// Projects ignored because they were never analyzed
    pub skipped_projects: Vec<ComponentId>,

    /// Measures upserted in the committed batch
    pub written_measures: usize,
}

impl RefreshSummary {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.visited_components == 0 && self.written_measures == 0
    }
}
