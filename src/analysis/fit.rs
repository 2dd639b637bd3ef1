/// Least-squares degree-2 polynomial fit.
///
/// Builds the normal equations (AᵀA)β = Aᵀy from the resampled curve and
/// solves the 3×3 system by Gaussian elimination with partial pivoting.
/// Coefficients come back highest degree first, matching the reporting
/// convention `a·x² + b·x + c`.

use crate::model::{AnalysisError, FittedCurve};

/// Fits `y ≈ a·x² + b·x + c` in the least-squares sense.
///
/// Requires at least three points; a singular system (e.g. all query
/// positions identical) is reported as a fit failure.
pub fn fit_quadratic(xs: &[f64], ys: &[f64]) -> Result<FittedCurve, AnalysisError> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::FitFailed(format!(
            "mismatched inputs: {} x-values vs {} y-values",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 3 {
        return Err(AnalysisError::FitFailed(format!(
            "need at least 3 points, got {}",
            xs.len()
        )));
    }

    // Accumulate power sums for the normal equations. a[row][col] ends up
    // holding Σ x^(row+col) and b[row] holds Σ y·x^row.
    let mut a = [[0.0_f64; 3]; 3];
    let mut b = [0.0_f64; 3];
    for (&x, &y) in xs.iter().zip(ys) {
        let powers = [1.0, x, x * x, x * x * x, x * x * x * x];
        for row in 0..3 {
            b[row] += y * powers[row];
            for col in 0..3 {
                a[row][col] += powers[row + col];
            }
        }
    }

    let beta = solve_3x3(a, b)
        .ok_or_else(|| AnalysisError::FitFailed("normal equations are singular".to_string()))?;

    // beta is in ascending power order [c, b, a]; report highest first.
    Ok(FittedCurve {
        coefficients: [beta[2], beta[1], beta[0]],
    })
}

/// Gaussian elimination with partial pivoting on a 3×3 system.
fn solve_3x3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Option<[f64; 3]> {
    let n = 3;
    for pivot in 0..n {
        let mut best_row = pivot;
        let mut best_abs = a[pivot][pivot].abs();
        for row in (pivot + 1)..n {
            let cand = a[row][pivot].abs();
            if cand > best_abs {
                best_abs = cand;
                best_row = row;
            }
        }
        if !best_abs.is_finite() || best_abs <= f64::EPSILON {
            return None;
        }
        if best_row != pivot {
            a.swap(pivot, best_row);
            b.swap(pivot, best_row);
        }

        let pivot_val = a[pivot][pivot];
        for col in pivot..n {
            a[pivot][col] /= pivot_val;
        }
        b[pivot] /= pivot_val;

        for row in 0..n {
            if row == pivot {
                continue;
            }
            let factor = a[row][pivot];
            if factor == 0.0 {
                continue;
            }
            for col in pivot..n {
                a[row][col] -= factor * a[pivot][col];
            }
            b[row] -= factor * b[pivot];
        }
    }
    Some(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ranking::linspace;

    #[test]
    fn test_fit_recovers_linear_curve() {
        let xs = linspace(100);
        let ys: Vec<f64> = xs.clone();
        let fit = fit_quadratic(&xs, &ys).unwrap();
        let [a, b, c] = fit.coefficients;
        assert!(a.abs() < 1e-9, "quadratic term should vanish, got {}", a);
        assert!((b - 1.0).abs() < 1e-9, "linear term should be 1, got {}", b);
        assert!(c.abs() < 1e-9, "constant term should vanish, got {}", c);
    }

    #[test]
    fn test_fit_recovers_pure_quadratic() {
        let xs = linspace(100);
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        let fit = fit_quadratic(&xs, &ys).unwrap();
        let [a, b, c] = fit.coefficients;
        assert!((a - 1.0).abs() < 1e-9);
        assert!(b.abs() < 1e-9);
        assert!(c.abs() < 1e-9);
    }

    #[test]
    fn test_fit_recovers_full_polynomial() {
        let xs = linspace(50);
        let ys: Vec<f64> = xs.iter().map(|x| -0.5 * x * x + 2.0 * x + 0.25).collect();
        let fit = fit_quadratic(&xs, &ys).unwrap();
        let [a, b, c] = fit.coefficients;
        assert!((a + 0.5).abs() < 1e-9);
        assert!((b - 2.0).abs() < 1e-9);
        assert!((c - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_fit_constant_curve() {
        let xs = linspace(10);
        let ys = vec![3.0; 10];
        let fit = fit_quadratic(&xs, &ys).unwrap();
        let [a, b, c] = fit.coefficients;
        assert!(a.abs() < 1e-9);
        assert!(b.abs() < 1e-9);
        assert!((c - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rejects_too_few_points() {
        let result = fit_quadratic(&[0.0, 1.0], &[0.0, 1.0]);
        assert!(matches!(result, Err(AnalysisError::FitFailed(_))));
    }

    #[test]
    fn test_fit_rejects_mismatched_lengths() {
        let result = fit_quadratic(&[0.0, 0.5, 1.0], &[0.0, 1.0]);
        assert!(matches!(result, Err(AnalysisError::FitFailed(_))));
    }

    #[test]
    fn test_fit_singular_system_is_an_error() {
        // All query positions identical: the design matrix has rank 1.
        let xs = vec![0.5; 10];
        let ys = vec![1.0; 10];
        let result = fit_quadratic(&xs, &ys);
        assert!(matches!(result, Err(AnalysisError::FitFailed(_))));
    }
}
