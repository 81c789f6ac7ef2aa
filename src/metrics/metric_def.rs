use super::ValueKind;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Numeric identifier of a metric in the metric dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricId(pub u32);

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Definition of a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDef {
    pub id: MetricId,
    pub key: String,

    #[serde(default)]
    pub short_name: String,

    pub value_kind: ValueKind,

    /// Number of decimals kept for values of this metric
    #[serde(default)]
    pub decimal_scale: Option<u32>,
}

impl MetricDef {
    #[must_use]
    pub fn new(id: u32, key: impl Into<String>, short_name: impl Into<String>, value_kind: ValueKind) -> Self {
        Self {
            id: MetricId(id),
            key: key.into(),
            short_name: short_name.into(),
            value_kind,
            decimal_scale: None,
        }
    }

    #[must_use]
    pub const fn with_decimal_scale(mut self, decimal_scale: u32) -> Self {
        self.decimal_scale = Some(decimal_scale);
        self
    }

    #[must_use]
    pub const fn is_rating(&self) -> bool {
        matches!(self.value_kind, ValueKind::Rating)
    }

    /// Round `value` to the decimal scale of this metric.
    ///
    /// Decimal metrics without an explicit scale use `default_scale`; other
    /// metrics without an explicit scale are left untouched. Halves round away
    /// from zero.
    #[must_use]
    pub fn scale(&self, value: f64, default_scale: u32) -> f64 {
        let scale = match self.decimal_scale {
            Some(scale) => scale,
            None if self.value_kind.is_decimal() => default_scale,
            None => return value,
        };

        let factor = 10_f64.powi(i32::try_from(scale).unwrap_or(i32::MAX));
        if !factor.is_finite() {
            return value;
        }

        let scaled = (value * factor).round() / factor;
        if scaled.is_finite() { scaled } else { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_metrics_are_not_scaled() {
        let metric = MetricDef::new(1, "ncloc", "Lines", ValueKind::Int);
        assert!((metric.scale(12.345, 1) - 12.345).abs() < f64::EPSILON);
    }

    #[test]
    fn test_float_metrics_use_default_scale() {
        let metric = MetricDef::new(1, "ratio", "Ratio", ValueKind::Float);
        assert!((metric.scale(12.345, 1) - 12.3).abs() < f64::EPSILON);
        assert!((metric.scale(12.35, 1) - 12.4).abs() < 1e-9);
        assert!((metric.scale(12.345, 2) - 12.35).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_scale_wins() {
        let metric = MetricDef::new(1, "coverage", "Coverage", ValueKind::Percent).with_decimal_scale(0);
        assert!((metric.scale(66.6, 1) - 67.0).abs() < f64::EPSILON);

        let effort = MetricDef::new(2, "effort", "Effort", ValueKind::WorkDuration).with_decimal_scale(0);
        assert!((effort.scale(10.4, 1) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_values_round_away_from_zero() {
        let metric = MetricDef::new(1, "ratio", "Ratio", ValueKind::Float);
        assert!((metric.scale(-0.25, 1) - -0.3).abs() < 1e-9);
    }

    #[test]
    fn test_is_rating() {
        assert!(MetricDef::new(1, "r", "R", ValueKind::Rating).is_rating());
        assert!(!MetricDef::new(2, "i", "I", ValueKind::Int).is_rating());
    }

    #[test]
    fn test_deserialize_defaults() {
        let metric: MetricDef = serde_json::from_str(r#"{"id":7,"key":"bugs","value_kind":"INT"}"#).unwrap();
        assert_eq!(metric.id, MetricId(7));
        assert_eq!(metric.decimal_scale, None);
        assert_eq!(metric.short_name, "");
    }
}
