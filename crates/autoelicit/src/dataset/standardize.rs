//! Z-score standardization of feature columns.

use serde::{Deserialize, Serialize};

/// Per-column mean and standard deviation learned from a feature matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standardizer {
    pub means: Vec<f64>,
    /// Population standard deviations (divisor `n`).
    pub stds: Vec<f64>,
}

impl Standardizer {
    /// Learn column statistics from row-major data.
    pub fn fit(data: &[Vec<f64>]) -> Self {
        let n_cols = data.first().map(|r| r.len()).unwrap_or(0);
        let n = data.len() as f64;

        let mut means = vec![0.0; n_cols];
        let mut stds = vec![0.0; n_cols];
        if data.is_empty() {
            return Self { means, stds };
        }

        for row in data {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        for row in data {
            for ((s, v), m) in stds.iter_mut().zip(row).zip(&means) {
                *s += (v - m).powi(2);
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt();
        }

        Self { means, stds }
    }

    /// Apply `(x - mean) / std` to every cell.
    ///
    /// Zero-variance columns are only centred.
    pub fn transform(&self, data: &[Vec<f64>]) -> Vec<Vec<f64>> {
        data.iter()
            .map(|row| {
                row.iter()
                    .zip(self.means.iter().zip(&self.stds))
                    .map(|(v, (m, s))| {
                        let scale = if *s > 0.0 { *s } else { 1.0 };
                        (v - m) / scale
                    })
                    .collect()
            })
            .collect()
    }
}
