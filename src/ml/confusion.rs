//! Confusion matrix construction and derived quantities

use std::collections::HashMap;

use num_traits::ToPrimitive;
use serde::Serialize;

use crate::error::{Error, Result};

/// Square grid of prediction counts, rows indexed by true class and columns
/// by predicted class, both in the order of the label list.
///
/// # Example
/// ```rust
/// use mltoolz::ConfusionMatrix;
///
/// let y_true = ["cat", "dog", "cat", "bird"];
/// let y_pred = ["cat", "cat", "cat", "bird"];
/// let labels = ["cat", "dog", "bird"];
/// let cm = ConfusionMatrix::from_predictions(&y_true, &y_pred, &labels).unwrap();
/// assert_eq!(cm.counts()[0][0], 2); // cat predicted as cat
/// assert_eq!(cm.counts()[1][0], 1); // dog predicted as cat
/// assert_eq!(cm.accuracy(), 0.75);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    /// Count prediction outcomes into a matrix ordered by `labels`.
    ///
    /// Pairs whose true or predicted label does not appear in `labels` are
    /// skipped rather than rejected, so a report can be restricted to a
    /// subset of classes.
    pub fn from_predictions<S, T, L>(y_true: &[S], y_pred: &[T], labels: &[L]) -> Result<Self>
    where
        S: AsRef<str>,
        T: AsRef<str>,
        L: AsRef<str>,
    {
        if y_true.len() != y_pred.len() {
            return Err(Error::DimensionMismatch(format!(
                "true and predicted label lengths differ: {} vs {}",
                y_true.len(),
                y_pred.len()
            )));
        }
        if y_true.is_empty() {
            return Err(Error::EmptyData(
                "cannot build a confusion matrix from no predictions".to_string(),
            ));
        }

        let labels = unique_labels(labels)?;
        let index: HashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), i))
            .collect();

        let n = labels.len();
        let mut counts = vec![vec![0u64; n]; n];
        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            if let (Some(&i), Some(&j)) = (index.get(t.as_ref()), index.get(p.as_ref())) {
                counts[i][j] += 1;
            }
        }

        Ok(ConfusionMatrix { labels, counts })
    }

    /// Adopt an externally computed grid.
    ///
    /// Fails fast on a non-square grid or a label/grid dimension mismatch
    /// instead of rendering misaligned rows later.
    pub fn from_counts<T, L>(grid: &[Vec<T>], labels: &[L]) -> Result<Self>
    where
        T: ToPrimitive,
        L: AsRef<str>,
    {
        let labels = unique_labels(labels)?;
        let n = labels.len();
        if grid.len() != n {
            return Err(Error::DimensionMismatch(format!(
                "matrix has {} rows but {} labels were given",
                grid.len(),
                n
            )));
        }

        let mut counts = Vec::with_capacity(n);
        for (i, row) in grid.iter().enumerate() {
            if row.len() != n {
                return Err(Error::DimensionMismatch(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            let mut out = Vec::with_capacity(n);
            for (j, cell) in row.iter().enumerate() {
                let v = cell.to_u64().ok_or_else(|| {
                    Error::InvalidValue(format!(
                        "cell ({}, {}) is not representable as a non-negative count",
                        i, j
                    ))
                })?;
                out.push(v);
            }
            counts.push(out);
        }

        Ok(ConfusionMatrix { labels, counts })
    }

    /// Class labels in row/column order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Raw count grid, row = true class, column = predicted class
    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// Number of classes (matrix is n_classes x n_classes)
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Total number of counted predictions
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Number of correct predictions (matrix trace)
    pub fn correct(&self) -> u64 {
        self.counts.iter().enumerate().map(|(i, row)| row[i]).sum()
    }

    /// Per-row totals, one per true class
    pub fn row_sums(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Overall accuracy implied by the matrix, 0 when the matrix is empty
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct() as f64 / total as f64
    }

    /// Row-normalized copy: each row divided by its sum, zero rows stay zero.
    /// The matrix itself is never mutated.
    pub fn normalized(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let sum: u64 = row.iter().sum();
                if sum == 0 {
                    vec![0.0; row.len()]
                } else {
                    row.iter().map(|&v| v as f64 / sum as f64).collect()
                }
            })
            .collect()
    }
}

fn unique_labels<L: AsRef<str>>(labels: &[L]) -> Result<Vec<String>> {
    if labels.is_empty() {
        return Err(Error::EmptyData("label list is empty".to_string()));
    }
    let mut seen = HashMap::new();
    for (i, label) in labels.iter().enumerate() {
        if let Some(first) = seen.insert(label.as_ref().to_string(), i) {
            return Err(Error::InvalidInput(format!(
                "duplicate label '{}' at positions {} and {}",
                label.as_ref(),
                first,
                i
            )));
        }
    }
    Ok(labels.iter().map(|l| l.as_ref().to_string()).collect())
}
