//! Ordinary least squares regression
//!
//! Fits `y = intercept + Σ coefficient_j * x_j` by solving the centered normal
//! equations with Gauss-Jordan elimination. A feature that is a linear
//! combination of the others (or constant) receives a zero coefficient, so a
//! collinear design still yields a usable fit instead of an error.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Pivots smaller than this fraction of the largest diagonal entry are treated as zero
const RANK_TOLERANCE: f64 = 1e-12;

/// Fitted ordinary least squares model with an intercept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinaryLeastSquares {
    coefficients: Vec<f64>,
    intercept: f64,
    n_samples: usize,
}

impl OrdinaryLeastSquares {
    /// Number of parameters estimated for a model with `n_features` features
    pub fn parameter_count(n_features: usize) -> usize {
        n_features + 1
    }

    /// Fit the model on a row-major design matrix and a target vector
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(MathError::InvalidInput(format!(
                "Design matrix has {} rows but target has {} values",
                x.len(),
                y.len()
            )));
        }

        let n_features = x.first().map(|row| row.len()).unwrap_or(0);
        let required = Self::parameter_count(n_features);
        if y.len() < required {
            return Err(MathError::InsufficientData(format!(
                "Need at least {} observations to estimate {} parameters, have {}",
                required,
                required,
                y.len()
            )));
        }

        if x.iter().any(|row| row.len() != n_features) {
            return Err(MathError::InvalidInput(
                "All rows of the design matrix must have the same length".to_string(),
            ));
        }

        if y.iter().any(|v| !v.is_finite()) || x.iter().flatten().any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Regression inputs must be finite".to_string(),
            ));
        }

        let y_mean = y.iter().mean();
        let x_means: Vec<f64> = (0..n_features)
            .map(|j| x.iter().map(|row| row[j]).mean())
            .collect();

        // Centered cross products: A = Xc'Xc, b = Xc'yc
        let mut a = vec![vec![0.0; n_features]; n_features];
        let mut b = vec![0.0; n_features];
        for (row, &target) in x.iter().zip(y) {
            let centered: Vec<f64> = row.iter().zip(&x_means).map(|(v, m)| v - m).collect();
            for j in 0..n_features {
                b[j] += centered[j] * (target - y_mean);
                for k in j..n_features {
                    a[j][k] += centered[j] * centered[k];
                }
            }
        }
        for j in 0..n_features {
            for k in 0..j {
                a[j][k] = a[k][j];
            }
        }

        let coefficients = solve_normal_equations(a, b);
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_means)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(MathError::CalculationError(
                "Least squares solution is not finite".to_string(),
            ));
        }

        Ok(Self {
            coefficients,
            intercept,
            n_samples: y.len(),
        })
    }

    /// Predict the target for a single feature vector
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(MathError::InvalidInput(format!(
                "Expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, v)| c * v)
                .sum::<f64>())
    }

    /// Coefficient of determination on the given data
    pub fn r_squared(&self, x: &[Vec<f64>], y: &[f64]) -> Result<f64> {
        if x.len() != y.len() || y.is_empty() {
            return Err(MathError::InvalidInput(
                "R-squared needs matching, non-empty inputs".to_string(),
            ));
        }

        let y_mean = y.iter().mean();
        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for (row, &target) in x.iter().zip(y) {
            let predicted = self.predict(row)?;
            ss_total += (target - y_mean).powi(2);
            ss_residual += (target - predicted).powi(2);
        }

        if ss_total.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate R-squared: total sum of squares is too small".to_string(),
            ));
        }

        Ok(1.0 - ss_residual / ss_total)
    }

    /// Estimated feature coefficients, in input order
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Estimated intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of features the model expects
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Number of observations the model was fitted on
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }
}

/// Gauss-Jordan elimination with partial pivoting; columns without a usable
/// pivot are left free and set to zero.
fn solve_normal_equations(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Vec<f64> {
    let p = b.len();
    let scale = (0..p).map(|i| a[i][i].abs()).fold(0.0, f64::max);
    let tolerance = scale * RANK_TOLERANCE;

    let mut pivot_row_of = vec![None; p];
    let mut next_row = 0;

    for col in 0..p {
        if next_row == p {
            break;
        }

        let mut best = next_row;
        for r in next_row + 1..p {
            if a[r][col].abs() > a[best][col].abs() {
                best = r;
            }
        }
        if a[best][col].abs() <= tolerance {
            continue;
        }

        a.swap(next_row, best);
        b.swap(next_row, best);

        let pivot_row = a[next_row].clone();
        let pivot_rhs = b[next_row];
        let pivot = pivot_row[col];
        for r in 0..p {
            if r == next_row {
                continue;
            }
            let factor = a[r][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for c in col..p {
                a[r][c] -= factor * pivot_row[c];
            }
            b[r] -= factor * pivot_rhs;
        }

        pivot_row_of[col] = Some(next_row);
        next_row += 1;
    }

    pivot_row_of
        .iter()
        .enumerate()
        .map(|(col, row)| match row {
            Some(r) => b[*r] / a[*r][col],
            None => 0.0,
        })
        .collect()
}
