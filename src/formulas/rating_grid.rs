use crate::Result;
use crate::config::Config;
use crate::metrics::Rating;
use ohno::bail;

/// Maps a technical debt ratio to a maintainability rating.
///
/// Each bound is the highest ratio still given the matching rating: a ratio
/// up to the first bound is rated A, up to the second B, and so on. Ratios
/// above the last bound are rated E.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtRatingGrid {
    bounds: [f64; 4],
}

impl DebtRatingGrid {
    /// # Errors
    ///
    /// Returns an error if the bounds are negative or not strictly ascending.
    pub fn new(bounds: [f64; 4]) -> Result<Self> {
        if bounds.iter().any(|b| !b.is_finite() || *b < 0.0) || bounds.windows(2).any(|w| w[0] >= w[1]) {
            bail!("invalid rating grid {bounds:?}: bounds must be non-negative and strictly ascending");
        }

        Ok(Self { bounds })
    }

    /// # Errors
    ///
    /// Returns an error if the configured grid is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.rating_grid)
    }

    /// The rating of a debt ratio, expressed as a fraction (0.05 is 5%).
    #[must_use]
    pub fn rating_for(&self, debt_ratio: f64) -> Rating {
        let [a, b, c, d] = self.bounds;
        match debt_ratio {
            r if r <= a => Rating::A,
            r if r <= b => Rating::B,
            r if r <= c => Rating::C,
            r if r <= d => Rating::D,
            _ => Rating::E,
        }
    }
}

impl Default for DebtRatingGrid {
    fn default() -> Self {
        Self {
            bounds: [0.05, 0.1, 0.2, 0.5],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_for() {
        let grid = DebtRatingGrid::default();
        assert_eq!(grid.rating_for(0.0), Rating::A);
        assert_eq!(grid.rating_for(0.05), Rating::A);
        assert_eq!(grid.rating_for(0.051), Rating::B);
        assert_eq!(grid.rating_for(0.15), Rating::C);
        assert_eq!(grid.rating_for(0.5), Rating::D);
        assert_eq!(grid.rating_for(3.0), Rating::E);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            rating_grid: [0.1, 0.2, 0.3, 0.4],
            ..Config::default()
        };
        let grid = DebtRatingGrid::from_config(&config).unwrap();
        assert_eq!(grid.rating_for(0.1), Rating::A);
        assert_eq!(grid.rating_for(0.35), Rating::D);

        assert_eq!(DebtRatingGrid::from_config(&Config::default()).unwrap(), DebtRatingGrid::default());
    }

    #[test]
    fn test_invalid_grid() {
        let err = DebtRatingGrid::new([0.2, 0.1, 0.3, 0.4]).unwrap_err();
        assert!(err.to_string().contains("strictly ascending"));
        let err = DebtRatingGrid::new([-1.0, 0.1, 0.3, 0.4]).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_zero_bound_is_accepted() {
        let grid = DebtRatingGrid::new([0.0, 0.1, 0.3, 0.4]).unwrap();
        assert_eq!(grid.rating_for(0.0), Rating::A);
        assert_eq!(grid.rating_for(0.01), Rating::B);
    }
}
