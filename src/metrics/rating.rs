use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// An ordinal rating, A being the best and E the worst.
///
/// A rating is persisted as a pair: its ordinal as the numeric value of the
/// measure and its label as the text value. Variations are computed on the
/// ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display, EnumString)]
pub enum Rating {
    A,
    B,
    C,
    D,
    E,
}

impl Rating {
    /// Zero-based position of the rating, `A` being 0.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// The canonical label of the rating.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }

    /// The rating with the given ordinal, if any.
    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::iter().find(|r| r.ordinal() == ordinal)
    }

    /// The rating whose ordinal equals `value`, if `value` is a whole, in-range ordinal.
    #[must_use]
    pub fn from_value(value: f64) -> Option<Self> {
        Self::iter().find(|r| f64::from(r.ordinal()).total_cmp(&value).is_eq())
    }

    /// The ordinal as a measure value.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.ordinal())
    }
}
