use crate::components::Component;
use crate::engine::RefreshSummary;
use crate::metrics::MetricCatalog;
use crate::storage::MeasureDb;

/// One measure line of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub component: String,
    pub metric: String,
    pub value: Option<f64>,
    pub text_value: Option<String>,
    pub variation: Option<f64>,
}

/// Everything a refresh report shows.
#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub summary: RefreshSummary,
    pub rows: Vec<ReportRow>,
}

impl RefreshReport {
    /// Build a report listing the stored measures of `components`, in input
    /// order then metric id order.
    #[must_use]
    pub fn new(summary: RefreshSummary, components: &[Component], catalog: &MetricCatalog, measures: &MeasureDb) -> Self {
        let rows = components
            .iter()
            .flat_map(|component| {
                catalog.sorted().into_iter().filter_map(|metric| {
                    measures.get(&component.id, metric.id).map(|measure| ReportRow {
                        component: component.key.clone(),
                        metric: metric.key.clone(),
                        value: measure.value,
                        text_value: measure.text_value.clone(),
                        variation: measure.variation,
                    })
                })
            })
            .collect();

        Self { summary, rows }
    }
}
