use catalog::Category;

/// Total mass of a probability vector.
pub const TOTAL: f64 = 100.0;

/// Maximum allowed deviation of the vector sum from [`TOTAL`].
pub const SUM_TOLERANCE: f64 = 0.01;

/// Six category weights in `[0, 100]`, indexed in [`Category::ALL`] order.
///
/// Invariants (checked by [`CategoryProbabilities::check`]):
/// - the sum is `100 ± 0.01`
/// - for every opposite pair at most one member is strictly positive
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CategoryProbabilities {
    values: [f64; Category::COUNT],
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    NonFinite { category: Category },
    OutOfRange { category: Category, value: f64 },
    Sum { sum: f64 },
    OppositesActive { a: Category, b: Category },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvariantViolation::NonFinite { category } => {
                write!(f, "weight of {category} is not finite")
            }
            InvariantViolation::OutOfRange { category, value } => {
                write!(f, "weight of {category} is {value}, outside [0, 100]")
            }
            InvariantViolation::Sum { sum } => {
                write!(f, "weights sum to {sum}, expected 100 ± {SUM_TOLERANCE}")
            }
            InvariantViolation::OppositesActive { a, b } => {
                write!(f, "opposite categories {a} and {b} are both active")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl CategoryProbabilities {
    /// `category` at 100, everything else at 0.
    pub fn sole(category: Category) -> Self {
        let mut values = [0.0; Category::COUNT];
        values[category.index()] = TOTAL;
        Self { values }
    }

    /// Builds a vector from explicit values, rejecting anything that breaks an invariant.
    pub fn from_values(values: [f64; Category::COUNT]) -> Result<Self, InvariantViolation> {
        let p = Self { values };
        p.check()?;
        Ok(p)
    }

    /// Unchecked constructor for transition code that finalizes its own output.
    pub(crate) fn from_raw(values: [f64; Category::COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, category: Category) -> f64 {
        self.values[category.index()]
    }

    /// Weight of `category` as a probability in `[0, 1]`.
    pub fn probability(&self, category: Category) -> f64 {
        (self.get(category) / TOTAL).clamp(0.0, 1.0)
    }

    pub fn values(&self) -> [f64; Category::COUNT] {
        self.values
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.get(category) > 0.0
    }

    /// Categories with a strictly positive weight, in canonical order.
    pub fn active(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.is_active(*c))
    }

    pub fn check(&self) -> Result<(), InvariantViolation> {
        for category in Category::ALL {
            let value = self.get(category);
            if !value.is_finite() {
                return Err(InvariantViolation::NonFinite { category });
            }
            if !(0.0..=TOTAL).contains(&value) {
                return Err(InvariantViolation::OutOfRange { category, value });
            }
        }

        let sum = self.sum();
        if (sum - TOTAL).abs() > SUM_TOLERANCE {
            return Err(InvariantViolation::Sum { sum });
        }

        for a in [Category::Wise, Category::Beautiful, Category::Funny] {
            let b = a.opposite();
            if self.is_active(a) && self.is_active(b) {
                return Err(InvariantViolation::OppositesActive { a, b });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for CategoryProbabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for c in Category::ALL {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{c}={:.2}", self.get(c))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryProbabilities, InvariantViolation};
    use catalog::Category;

    #[test]
    fn sole_vector_satisfies_invariants() {
        for c in Category::ALL {
            let p = CategoryProbabilities::sole(c);
            assert_eq!(p.get(c), 100.0);
            assert_eq!(p.sum(), 100.0);
            assert_eq!(p.active().collect::<Vec<_>>(), vec![c]);
            assert!(p.check().is_ok());
        }
    }

    #[test]
    fn probability_is_fraction_of_total() {
        let p = CategoryProbabilities::from_values([50.0, 0.0, 50.0, 0.0, 0.0, 0.0]).expect("valid");
        assert_eq!(p.probability(Category::Wise), 0.5);
        assert_eq!(p.probability(Category::Funny), 0.0);
    }

    #[test]
    fn rejects_active_opposites() {
        let err = CategoryProbabilities::from_values([50.0, 50.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            err,
            Err(InvariantViolation::OppositesActive {
                a: Category::Wise,
                b: Category::Stupid
            })
        );
    }

    #[test]
    fn rejects_bad_sums_and_values() {
        assert!(matches!(
            CategoryProbabilities::from_values([50.0, 0.0, 49.0, 0.0, 0.0, 0.0]),
            Err(InvariantViolation::Sum { .. })
        ));
        assert!(matches!(
            CategoryProbabilities::from_values([f64::NAN, 0.0, 0.0, 0.0, 100.0, 0.0]),
            Err(InvariantViolation::NonFinite { .. })
        ));
        assert!(matches!(
            CategoryProbabilities::from_values([-5.0, 0.0, 105.0, 0.0, 0.0, 0.0]),
            Err(InvariantViolation::OutOfRange { .. })
        ));
    }

    #[test]
    fn display_lists_every_category() {
        let p = CategoryProbabilities::sole(Category::Funny);
        assert_eq!(
            p.to_string(),
            "wise=0.00 stupid=0.00 beautiful=0.00 repulsive=0.00 funny=100.00 unfunny=0.00"
        );
    }
}
