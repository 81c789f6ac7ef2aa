use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Categorical type of a component.
///
/// Variants are declared in bottom-up order: a file sits below a directory,
/// which sits below a module, which sits below a project, and so on. The
/// position of a variant in that order is its [rank](Qualifier::rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display, EnumString, Serialize, Deserialize)]
pub enum Qualifier {
    #[strum(serialize = "FIL")]
    #[serde(rename = "FIL")]
    File,

    #[strum(serialize = "UTS")]
    #[serde(rename = "UTS")]
    UnitTestFile,

    #[strum(serialize = "DIR")]
    #[serde(rename = "DIR")]
    Directory,

    #[strum(serialize = "BRC")]
    #[serde(rename = "BRC")]
    Module,

    #[strum(serialize = "TRK")]
    #[serde(rename = "TRK")]
    Project,

    #[strum(serialize = "APP")]
    #[serde(rename = "APP")]
    Application,

    #[strum(serialize = "SVW")]
    #[serde(rename = "SVW")]
    SubPortfolio,

    #[strum(serialize = "VW")]
    #[serde(rename = "VW")]
    Portfolio,
}

impl Qualifier {
    /// Position of this qualifier in the bottom-up ordering.
    #[must_use]
    pub fn rank(self) -> usize {
        Self::iter().position(|q| q == self).unwrap_or_default()
    }

    /// Whether components with this qualifier can be the root of a tree.
    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(self, Self::Project | Self::Application | Self::Portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn test_rank_follows_bottom_up_order() {
        assert_eq!(Qualifier::File.rank(), 0);
        assert_eq!(Qualifier::UnitTestFile.rank(), 1);
        assert_eq!(Qualifier::Directory.rank(), 2);
        assert_eq!(Qualifier::Module.rank(), 3);
        assert_eq!(Qualifier::Project.rank(), 4);
        assert_eq!(Qualifier::Portfolio.rank(), 7);
    }

    #[test]
    fn test_ordering_matches_rank() {
        assert!(Qualifier::File < Qualifier::Directory);
        assert!(Qualifier::Directory < Qualifier::Project);
    }

    #[test]
    fn test_display_uses_short_codes() {
        assert_eq!(Qualifier::File.to_string(), "FIL");
        assert_eq!(Qualifier::Project.to_string(), "TRK");
        assert_eq!(Qualifier::from_str("DIR").unwrap(), Qualifier::Directory);
    }

    #[test]
    fn test_serde_uses_short_codes() {
        let json = serde_json::to_string(&Qualifier::Module).unwrap();
        assert_eq!(json, "\"BRC\"");
        let parsed: Qualifier = serde_json::from_str("\"UTS\"").unwrap();
        assert_eq!(parsed, Qualifier::UnitTestFile);
    }

    #[test]
    fn test_is_root() {
        assert!(Qualifier::Project.is_root());
        assert!(!Qualifier::Directory.is_root());
        assert!(!Qualifier::File.is_root());
    }
}
