use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The kind of value stored by a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    /// Whole number
    Int,

    /// Decimal number
    Float,

    /// Decimal number between 0 and 100
    Percent,

    /// Effort expressed in minutes
    #[strum(serialize = "WORK_DUR")]
    #[serde(rename = "WORK_DUR")]
    WorkDuration,

    /// Ordinal rating from A to E
    Rating,
}

impl ValueKind {
    /// Whether values of this kind are rounded to a number of decimals.
    #[must_use]
    pub const fn is_decimal(self) -> bool {
        matches!(self, Self::Float | Self::Percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn test_names() {
        assert_eq!(ValueKind::Int.to_string(), "INT");
        assert_eq!(ValueKind::WorkDuration.to_string(), "WORK_DUR");
        assert_eq!(ValueKind::from_str("RATING").unwrap(), ValueKind::Rating);
        assert_eq!(serde_json::to_string(&ValueKind::Percent).unwrap(), "\"PERCENT\"");
        assert_eq!(serde_json::from_str::<ValueKind>("\"WORK_DUR\"").unwrap(), ValueKind::WorkDuration);
    }

    #[test]
    fn test_is_decimal() {
        assert!(ValueKind::Float.is_decimal());
        assert!(ValueKind::Percent.is_decimal());
        assert!(!ValueKind::Int.is_decimal());
        assert!(!ValueKind::Rating.is_decimal());
        assert!(!ValueKind::WorkDuration.is_decimal());
    }
}
