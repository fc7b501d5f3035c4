//! Elicited priors and the (prompt pair, feature, {mean, std}) array.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ElicitError, Result};

/// A normal prior `N(mean, std^2)` over one logistic regression coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prior {
    pub mean: f64,
    pub std: f64,
}

impl Prior {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Raise `std` to at least `floor`.
    pub fn clip_std(self, floor: f64) -> Self {
        Self {
            mean: self.mean,
            std: self.std.max(floor),
        }
    }
}

/// Priors for every feature under every prompt pair.
///
/// Shape is `(n_pairs, n_features, 2)`: the last axis holds `[mean, std]`,
/// features follow `feature_names` order, prompt pairs follow the order in
/// which they were elicited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorArray {
    feature_names: Vec<String>,
    pairs: Vec<Vec<Prior>>,
}

impl PriorArray {
    /// An array with no prompt pairs yet.
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            pairs: Vec::new(),
        }
    }

    /// Append the priors of one prompt pair, in feature order.
    pub fn push_pair(&mut self, priors: Vec<Prior>) -> Result<()> {
        if priors.len() != self.feature_names.len() {
            return Err(ElicitError::Config(format!(
                "expected {} priors, got {}",
                self.feature_names.len(),
                priors.len()
            )));
        }
        self.pairs.push(priors);
        Ok(())
    }

    /// `(n_pairs, n_features, 2)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.pairs.len(), self.feature_names.len(), 2)
    }

    pub fn n_pairs(&self) -> usize {
        self.pairs.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, pair: usize, feature: usize) -> Option<Prior> {
        self.pairs.get(pair).and_then(|p| p.get(feature)).copied()
    }

    /// All priors from one prompt pair.
    pub fn pair(&self, pair: usize) -> Option<&[Prior]> {
        self.pairs.get(pair).map(|p| p.as_slice())
    }

    /// One feature's prior under every prompt pair.
    pub fn feature(&self, feature: usize) -> Vec<Prior> {
        self.pairs.iter().filter_map(|p| p.get(feature).copied()).collect()
    }

    /// Look up a feature's priors by name.
    pub fn feature_by_name(&self, name: &str) -> Option<Vec<Prior>> {
        let index = self.feature_names.iter().position(|n| n == name)?;
        Some(self.feature(index))
    }

    /// Nested `[pair][feature][mean, std]` values.
    pub fn to_nested(&self) -> Vec<Vec<[f64; 2]>> {
        self.pairs
            .iter()
            .map(|p| p.iter().map(|prior| [prior.mean, prior.std]).collect())
            .collect()
    }

    /// Row-major flat values, `[mean, std]` per feature per pair.
    pub fn to_flat(&self) -> Vec<f64> {
        self.pairs
            .iter()
            .flatten()
            .flat_map(|prior| [prior.mean, prior.std])
            .collect()
    }

    /// Per feature, the single normal matching the first two moments of the
    /// equal-weight mixture of that feature's priors.
    ///
    /// Returns an empty vector when no pairs have been elicited.
    pub fn mixture(&self) -> Vec<Prior> {
        if self.pairs.is_empty() {
            return Vec::new();
        }
        let n = self.pairs.len() as f64;

        (0..self.n_features())
            .map(|j| {
                let (sum_mean, sum_second) = self.pairs.iter().fold((0.0, 0.0), |(m, s), p| {
                    let prior = p[j];
                    (m + prior.mean, s + prior.std.powi(2) + prior.mean.powi(2))
                });
                let mean = sum_mean / n;
                let var = (sum_second / n - mean.powi(2)).max(0.0);
                Prior::new(mean, var.sqrt())
            })
            .collect()
    }
}

impl fmt::Display for PriorArray {
    /// Nested bracket layout, one `[mean std]` row per feature and a blank
    /// line between prompt pairs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n ")?;
            }
            write!(f, "[")?;
            for (j, prior) in pair.iter().enumerate() {
                if j > 0 {
                    write!(f, "\n  ")?;
                }
                write!(f, "[{:>9.4} {:>9.4}]", prior.mean, prior.std)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array() -> PriorArray {
        let mut a = PriorArray::new(vec!["x".to_string(), "y".to_string()]);
        a.push_pair(vec![Prior::new(1.0, 0.5), Prior::new(-1.0, 1.0)]).unwrap();
        a.push_pair(vec![Prior::new(3.0, 0.5), Prior::new(-1.0, 2.0)]).unwrap();
        a
    }

    #[test]
    fn test_shape_and_access() {
        let a = array();
        assert_eq!(a.shape(), (2, 2, 2));
        assert_eq!(a.get(1, 0), Some(Prior::new(3.0, 0.5)));
        assert_eq!(a.get(2, 0), None);
        assert_eq!(a.feature_by_name("y").unwrap().len(), 2);
        assert_eq!(a.to_flat(), vec![1.0, 0.5, -1.0, 1.0, 3.0, 0.5, -1.0, 2.0]);
    }

    #[test]
    fn test_push_wrong_width_rejected() {
        let mut a = PriorArray::new(vec!["x".to_string()]);
        assert!(a.push_pair(vec![]).is_err());
        assert!(a.is_empty());
    }

    #[test]
    fn test_mixture_moments() {
        let mix = array().mixture();
        // x: means 1 and 3, std 0.5 each -> var = 0.25 + 1
        assert!((mix[0].mean - 2.0).abs() < 1e-12);
        assert!((mix[0].std - 1.25f64.sqrt()).abs() < 1e-12);
        // y: same mean, stds 1 and 2 -> var = (1 + 4) / 2
        assert!((mix[1].mean + 1.0).abs() < 1e-12);
        assert!((mix[1].std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_clip_std() {
        assert_eq!(Prior::new(0.0, 1e-6).clip_std(1e-3).std, 1e-3);
        assert_eq!(Prior::new(0.0, 0.7).clip_std(1e-3).std, 0.7);
    }

    #[test]
    fn test_display_layout() {
        let text = array().to_string();
        assert!(text.starts_with("[[["));
        assert!(text.ends_with("]]]"));
        assert_eq!(text.matches("\n\n").count(), 1);
        assert!(text.contains("   1.0000    0.5000"));
    }
}
