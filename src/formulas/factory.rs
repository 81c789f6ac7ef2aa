use super::Formula;

/// Supplies the formulas a refresh runs, in execution order.
pub trait FormulaFactory {
    fn formulas(&self) -> &[Formula];
}

/// A factory serving a fixed list of formulas.
#[derive(Debug, Default)]
pub struct StaticFormulaFactory {
    formulas: Vec<Formula>,
}

impl StaticFormulaFactory {
    #[must_use]
    pub const fn new(formulas: Vec<Formula>) -> Self {
        Self { formulas }
    }
}

impl FromIterator<Formula> for StaticFormulaFactory {
    fn from_iter<I: IntoIterator<Item = Formula>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FormulaFactory for StaticFormulaFactory {
    fn formulas(&self) -> &[Formula] {
        &self.formulas
    }
}
