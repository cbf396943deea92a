//! Weighted multi-objective fitness.
//!
//! Each objective carries a weight whose sign says whether it is maximized
//! (positive) or minimized (negative). Raw values are stored multiplied by
//! their weight, so "greater is better" holds for every objective and
//! comparisons never need to look at the weights again.

use std::cmp::Ordering;
use std::fmt;

use crate::error::FitnessError;

/// Weighted objective values of one individual.
#[derive(Debug, Clone, PartialEq)]
pub struct Fitness {
    weights: Vec<f64>,
    wvalues: Vec<f64>,
}

impl Fitness {
    /// Create an invalid fitness with one weight per objective.
    ///
    /// # Errors
    ///
    /// [`FitnessError::EmptyWeights`] if `weights` is empty.
    pub fn new(weights: impl Into<Vec<f64>>) -> Result<Self, FitnessError> {
        let weights = weights.into();
        if weights.is_empty() {
            return Err(FitnessError::EmptyWeights);
        }
        Ok(Self {
            weights,
            wvalues: Vec::new(),
        })
    }

    /// Store `raw[i] * weights[i]` for every objective, replacing any
    /// previous values.
    ///
    /// # Errors
    ///
    /// [`FitnessError::ShapeMismatch`] if `raw` and the weights differ in
    /// length; the fitness is left unchanged.
    pub fn set_values(&mut self, raw: &[f64]) -> Result<(), FitnessError> {
        if raw.len() != self.weights.len() {
            return Err(FitnessError::ShapeMismatch {
                expected: self.weights.len(),
                got: raw.len(),
            });
        }
        self.wvalues.clear();
        self.wvalues.extend(raw.iter().zip(&self.weights).map(|(v, w)| v * w));
        Ok(())
    }

    /// Raw objective values (weighted values divided by their weights).
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.wvalues.iter().zip(&self.weights).map(|(v, w)| v / w).collect()
    }

    /// Weighted objective values; empty while invalid.
    #[must_use]
    pub fn weighted_values(&self) -> &[f64] {
        &self.wvalues
    }

    /// Objective weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Clear the values, keeping the weights.
    pub fn invalidate(&mut self) {
        self.wvalues.clear();
    }

    /// Whether values have been set since the last invalidation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.wvalues.is_empty()
    }

    /// Same weights, no values.
    #[must_use]
    pub(crate) fn cleared(&self) -> Self {
        Self {
            weights: self.weights.clone(),
            wvalues: Vec::new(),
        }
    }

    /// Pareto dominance over the shared objectives: nowhere worse and
    /// somewhere strictly better.
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        let mut better = false;
        for (a, b) in self.wvalues.iter().zip(&other.wvalues) {
            if a > b {
                better = true;
            } else if a < b {
                return false;
            }
        }
        better
    }

    /// Strictly lesser lexicographically.
    #[must_use]
    pub fn less_than(&self, other: &Self) -> bool {
        self.max_cmp(other) == Ordering::Less
    }

    /// Lesser or equal lexicographically.
    #[must_use]
    pub fn less_or_equal(&self, other: &Self) -> bool {
        self.max_cmp(other) != Ordering::Greater
    }

    /// Strictly greater lexicographically.
    #[must_use]
    pub fn greater_than(&self, other: &Self) -> bool {
        self.max_cmp(other) == Ordering::Greater
    }

    /// Greater or equal lexicographically.
    #[must_use]
    pub fn greater_or_equal(&self, other: &Self) -> bool {
        self.max_cmp(other) != Ordering::Less
    }

    /// Same length and the same weighted values.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.max_cmp(other) == Ordering::Equal
    }

    /// Ordering used to pick the fittest individual.
    ///
    /// Weighted values are compared position by position up to the shorter
    /// length; the first difference decides. When every shared position
    /// ties, the shorter vector is lesser, so an invalid fitness ranks below
    /// any valid one. NaN ranks below every number and ties with NaN.
    #[must_use]
    pub fn max_cmp(&self, other: &Self) -> Ordering {
        self.wvalues
            .iter()
            .zip(&other.wvalues)
            .map(|(a, b)| compare_objective(*a, *b))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| self.wvalues.len().cmp(&other.wvalues.len()))
    }
}

fn compare_objective(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.wvalues.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v:.2}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(weights: &[f64], values: &[f64]) -> Fitness {
        let mut f = Fitness::new(weights).unwrap();
        f.set_values(values).unwrap();
        f
    }

    #[test]
    fn test_weighted_values() {
        let f = fit(&[2.0], &[4.0]);
        assert_eq!(f.weighted_values(), [8.0]);
        assert_eq!(f.values(), [4.0]);
        assert_eq!(f.weights(), [2.0]);
        assert!(f.is_valid());
    }

    #[test]
    fn test_new_and_set_errors() {
        assert_eq!(Fitness::new(Vec::<f64>::new()), Err(FitnessError::EmptyWeights));

        let mut f = fit(&[1.0, -1.0], &[1.0, 2.0]);
        assert_eq!(
            f.set_values(&[1.0]),
            Err(FitnessError::ShapeMismatch { expected: 2, got: 1 })
        );
        // unchanged on error
        assert_eq!(f.weighted_values(), [1.0, -2.0]);
    }

    #[test]
    fn test_invalidate() {
        let mut f = fit(&[1.0], &[3.0]);
        f.invalidate();
        assert!(!f.is_valid());
        assert!(f.weighted_values().is_empty());
        assert_eq!(f.weights(), [1.0]);
    }

    #[test]
    fn test_invalid_ranks_below_valid() {
        let invalid = Fitness::new([1.0]).unwrap();
        let low = fit(&[1.0], &[-100.0]);
        assert!(invalid.less_than(&low));
        assert!(low.greater_than(&invalid));
        assert_eq!(invalid.max_cmp(&low), Ordering::Less);
    }

    #[test]
    fn test_nan_ranks_lowest() {
        let nan = fit(&[1.0], &[f64::NAN]);
        let low = fit(&[1.0], &[-1e9]);
        assert!(nan.less_than(&low));
        assert!(!nan.equals(&low));
        assert!(low.greater_than(&nan));
        assert!(nan.equals(&fit(&[1.0], &[f64::NAN])));

        // a later NaN only matters once earlier objectives tie
        let a = fit(&[1.0, 1.0], &[2.0, f64::NAN]);
        let b = fit(&[1.0, 1.0], &[1.0, 0.0]);
        assert!(a.greater_than(&b));
        assert!(a.less_than(&fit(&[1.0, 1.0], &[2.0, 0.0])));
    }

    #[test]
    fn test_shorter_is_lesser_on_tie() {
        let short = fit(&[1.0], &[1.0]);
        let long = fit(&[1.0, 1.0], &[1.0, 0.0]);
        assert!(short.less_than(&long));
        assert!(short.less_or_equal(&long));
        assert!(!short.equals(&long));
        assert!(long.greater_or_equal(&short));
    }

    #[test]
    fn test_lexicographic_order() {
        let a = fit(&[1.0, 1.0], &[2.0, 0.0]);
        let b = fit(&[1.0, 1.0], &[1.0, 9.0]);
        assert!(b.less_than(&a));
        assert!(a.greater_than(&b));
        assert!(a.equals(&a.clone()));
        assert!(a.less_or_equal(&a.clone()));
        assert!(!a.less_than(&a.clone()));
    }

    #[test]
    fn test_negative_weight_minimizes() {
        let small = fit(&[-1.0], &[1.0]);
        let large = fit(&[-1.0], &[5.0]);
        assert!(small.greater_than(&large));
    }

    #[test]
    fn test_dominates() {
        let a = fit(&[1.0, 1.0], &[2.0, 2.0]);
        let b = fit(&[1.0, 1.0], &[2.0, 1.0]);
        let c = fit(&[1.0, 1.0], &[1.0, 3.0]);
        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
        assert!(!a.dominates(&a.clone()));
    }

    #[test]
    fn test_display() {
        assert_eq!(fit(&[1.0, 0.5], &[1.23456, 3.0]).to_string(), "[1.23, 1.50]");
        assert_eq!(Fitness::new([1.0]).unwrap().to_string(), "[]");
    }
}
