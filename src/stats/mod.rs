//! Inference helpers for accuracy statistics
//!
//! Confidence intervals and p-values for the accuracy implied by a confusion
//! matrix, using pure-Rust normal-distribution approximations.

use crate::error::{Error, Result};
use crate::ml::confusion::ConfusionMatrix;

/// Compute the CDF of the standard normal distribution
fn normal_cdf(z: f64) -> f64 {
    // Abramowitz and Stegun approximation of the error function
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if z < 0.0 { -1.0 } else { 1.0 };
    let x = z.abs() / (2.0_f64).sqrt();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    0.5 * (1.0 + sign * y)
}

/// Compute the quantile (inverse CDF) of the standard normal distribution
fn normal_quantile(p: f64) -> f64 {
    // Acklam's rational approximation, relative error below 1.15e-9
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// Two-sided confidence interval for the accuracy implied by a confusion
/// matrix, via the normal approximation to the binomial and clamped to
/// [0, 1].
///
/// # Example
/// ```rust
/// use mltoolz::ConfusionMatrix;
/// use mltoolz::stats::accuracy_confidence_interval;
///
/// let grid = vec![vec![45u64, 5], vec![5, 45]];
/// let cm = ConfusionMatrix::from_counts(&grid, &["a", "b"]).unwrap();
/// let (low, high) = accuracy_confidence_interval(&cm, 0.9).unwrap();
/// assert!(low < 0.9 && 0.9 < high);
/// ```
pub fn accuracy_confidence_interval(cm: &ConfusionMatrix, confidence: f64) -> Result<(f64, f64)> {
    if confidence <= 0.0 || confidence >= 1.0 {
        return Err(Error::InvalidInput(format!(
            "confidence level must be in (0, 1), got {}",
            confidence
        )));
    }

    let n = cm.total();
    if n == 0 {
        return Err(Error::EmptyData(
            "confusion matrix contains no counted predictions".to_string(),
        ));
    }

    let p = cm.accuracy();
    let z = normal_quantile(0.5 + confidence / 2.0);
    let se = (p * (1.0 - p) / n as f64).sqrt();

    Ok(((p - z * se).max(0.0), (p + z * se).min(1.0)))
}

/// One-sided p-value for the observed accuracy against the no-information
/// rate (the share of the most frequent true class).
///
/// Small values mean the classifier is unlikely to be merely guessing the
/// majority class.
pub fn accuracy_p_value(cm: &ConfusionMatrix) -> Result<f64> {
    let n = cm.total();
    if n == 0 {
        return Err(Error::EmptyData(
            "confusion matrix contains no counted predictions".to_string(),
        ));
    }

    let p = cm.accuracy();
    let baseline = cm
        .row_sums()
        .into_iter()
        .max()
        .unwrap_or(0) as f64
        / n as f64;

    let se = (baseline * (1.0 - baseline) / n as f64).sqrt();
    if se == 0.0 {
        // degenerate baseline of exactly 0 or 1
        return Ok(if p > baseline { 0.0 } else { 1.0 });
    }

    let z = (p - baseline) / se;
    Ok(1.0 - normal_cdf(z))
}
