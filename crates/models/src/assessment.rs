use serde::{Deserialize, Serialize};

/// How a module's grade is split between assessment methods, in percent.
///
/// The three weights must add up to 100. Comparisons allow a small tolerance
/// so that splits like 33.33 / 33.33 / 33.34 entered as floats still pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentWeights {
    pub exam: f64,
    pub coursework: f64,
    pub practical: f64,
}

impl AssessmentWeights {
    pub const TOTAL: f64 = 100.0;
    pub const TOLERANCE: f64 = 0.01;

    pub fn new(exam: f64, coursework: f64, practical: f64) -> Self {
        Self {
            exam,
            coursework,
            practical,
        }
    }

    pub fn total(&self) -> f64 {
        self.exam + self.coursework + self.practical
    }

    /// Whether the weights sum to 100 within tolerance.
    pub fn is_balanced(&self) -> bool {
        (self.total() - Self::TOTAL).abs() <= Self::TOLERANCE
    }

    /// Whether every individual weight is a sane percentage.
    pub fn in_range(&self) -> bool {
        [self.exam, self.coursework, self.practical]
            .iter()
            .all(|w| (0.0..=Self::TOTAL).contains(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_balanced(exam: f64, coursework: f64, practical: f64) {
        let weights = AssessmentWeights::new(exam, coursework, practical);
        assert!(
            weights.is_balanced(),
            "expected {exam}/{coursework}/{practical} to balance, total {}",
            weights.total()
        );
    }

    #[test]
    fn exact_splits_balance() {
        assert_balanced(50.0, 30.0, 20.0);
        assert_balanced(100.0, 0.0, 0.0);
        assert_balanced(0.0, 0.0, 100.0);
    }

    #[test]
    fn thirds_balance_within_tolerance() {
        assert_balanced(33.33, 33.33, 33.34);
        // just inside the tolerance boundary
        assert_balanced(33.33, 33.33, 33.345);
    }

    #[test]
    fn off_by_more_than_tolerance_fails() {
        let short = AssessmentWeights::new(50.0, 30.0, 19.98);
        assert!(!short.is_balanced());

        let over = AssessmentWeights::new(50.0, 30.0, 20.02);
        assert!(!over.is_balanced());
    }

    #[test]
    fn range_check_rejects_negatives_and_overweights() {
        assert!(AssessmentWeights::new(50.0, 30.0, 20.0).in_range());
        assert!(!AssessmentWeights::new(-10.0, 60.0, 50.0).in_range());
        assert!(!AssessmentWeights::new(110.0, -5.0, -5.0).in_range());
    }
}
