use crate::components::ComponentId;
use crate::metrics::MetricId;
use serde::{Deserialize, Serialize};

/// The state of a measure while a refresh is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub component_id: ComponentId,
    pub metric_key: String,
    pub value: Option<f64>,
    pub variation: Option<f64>,

    /// Label of the rating held by rating measures
    pub text_value: Option<String>,
}

impl Measure {
    #[must_use]
    pub fn empty(component_id: ComponentId, metric_key: impl Into<String>) -> Self {
        Self {
            component_id,
            metric_key: metric_key.into(),
            value: None,
            variation: None,
            text_value: None,
        }
    }

    /// Whether `other` holds the same value, variation, and text.
    ///
    /// Numbers are compared by total order, so two NaNs are the same.
    #[must_use]
    pub fn same_state(&self, other: &Self) -> bool {
        same_number(self.value, other.value)
            && same_number(self.variation, other.variation)
            && self.text_value == other.text_value
    }
}

fn same_number(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b).is_eq(),
        (None, None) => true,
        _ => false,
    }
}

/// A measure as kept by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedMeasure {
    pub component_id: ComponentId,
    pub project_id: ComponentId,
    pub metric_id: MetricId,

    #[serde(default)]
    pub value: Option<f64>,

    #[serde(default)]
    pub variation: Option<f64>,

    #[serde(default)]
    pub text_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_state() {
        let a = Measure {
            value: Some(1.0),
            variation: Some(2.0),
            ..Measure::empty(ComponentId::from("f1"), "bugs")
        };
        let mut b = a.clone();
        assert!(a.same_state(&b));

        b.variation = None;
        assert!(!a.same_state(&b));

        b.variation = Some(2.0);
        b.text_value = Some("A".to_string());
        assert!(!a.same_state(&b));
    }

    #[test]
    fn test_nan_is_same_as_nan() {
        let a = Measure {
            value: Some(f64::NAN),
            ..Measure::empty(ComponentId::from("f1"), "bugs")
        };
        assert!(a.same_state(&a.clone()));
    }

    #[test]
    fn test_deserialize_persisted_measure() {
        let measure: PersistedMeasure =
            serde_json::from_str(r#"{"component_id":"f1","project_id":"p1","metric_id":3,"value":2.0}"#).unwrap();
        assert_eq!(measure.metric_id, MetricId(3));
        assert_eq!(measure.value, Some(2.0));
        assert_eq!(measure.variation, None);
    }
}
