//! Metrics for classification model evaluation

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::ml::confusion::ConfusionMatrix;

/// Compute accuracy
///
/// # Arguments
/// * `y_true` - True labels
/// * `y_pred` - Predicted labels
///
/// # Returns
/// * `Result<f64>` - Accuracy (0 to 1)
pub fn accuracy_score<T: PartialEq>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(Error::DimensionMismatch(format!(
            "true and predicted label lengths differ: {} vs {}",
            y_true.len(),
            y_pred.len()
        )));
    }

    if y_true.is_empty() {
        return Err(Error::EmptyData(
            "cannot compute accuracy over no samples".to_string(),
        ));
    }

    let correct_count = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();

    Ok(correct_count as f64 / y_true.len() as f64)
}

/// Fraction of samples whose true label is among the k classes with the
/// highest predicted probability.
///
/// `proba` holds one probability row per sample, one column per entry of
/// `labels`, in label order. Samples whose true label is not in `labels`
/// count as misses.
pub fn precision_at_k<S, L>(
    y_true: &[S],
    proba: &[Vec<f64>],
    labels: &[L],
    k: usize,
) -> Result<f64>
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    if k == 0 {
        return Err(Error::InvalidInput("k must be at least 1".to_string()));
    }
    if y_true.len() != proba.len() {
        return Err(Error::DimensionMismatch(format!(
            "{} true labels but {} probability rows",
            y_true.len(),
            proba.len()
        )));
    }
    if y_true.is_empty() {
        return Err(Error::EmptyData(
            "cannot compute precision@k over no samples".to_string(),
        ));
    }

    let n_classes = labels.len();
    let mut hits = 0usize;
    for (i, (truth, row)) in y_true.iter().zip(proba.iter()).enumerate() {
        if row.len() != n_classes {
            return Err(Error::DimensionMismatch(format!(
                "probability row {} has {} entries, expected {}",
                i,
                row.len(),
                n_classes
            )));
        }

        let mut ranked: Vec<usize> = (0..n_classes).collect();
        ranked.sort_by(|&a, &b| {
            row[b].partial_cmp(&row[a]).unwrap_or(Ordering::Equal)
        });

        let truth = truth.as_ref();
        if ranked
            .iter()
            .take(k)
            .any(|&idx| labels[idx].as_ref() == truth)
        {
            hits += 1;
        }
    }

    Ok(hits as f64 / y_true.len() as f64)
}

/// Per-class precision, recall, F1 and support
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassMetrics {
    /// Fraction of predictions for this class that were correct
    pub precision: f64,
    /// Fraction of true members of this class that were found
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Number of true samples of this class
    pub support: u64,
}

/// Per-class and aggregate scores for a set of predictions, printable as a
/// fixed-width table.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    classes: Vec<(String, ClassMetrics)>,
    accuracy: f64,
    macro_avg: ClassMetrics,
    weighted_avg: ClassMetrics,
    total_support: u64,
}

impl ClassificationReport {
    /// Build a report by counting predictions against `labels`
    pub fn from_predictions<S, T, L>(y_true: &[S], y_pred: &[T], labels: &[L]) -> Result<Self>
    where
        S: AsRef<str>,
        T: AsRef<str>,
        L: AsRef<str>,
    {
        let cm = ConfusionMatrix::from_predictions(y_true, y_pred, labels)?;
        Self::from_confusion_matrix(&cm)
    }

    /// Derive all scores from an existing confusion matrix
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Result<Self> {
        let n = cm.n_classes();
        let counts = cm.counts();
        let row_sums = cm.row_sums();
        let col_sums: Vec<u64> = (0..n).map(|j| counts.iter().map(|row| row[j]).sum()).collect();

        let mut classes = Vec::with_capacity(n);
        for (i, label) in cm.labels().iter().enumerate() {
            let tp = counts[i][i] as f64;
            let precision = ratio_or_zero(tp, col_sums[i] as f64);
            let recall = ratio_or_zero(tp, row_sums[i] as f64);
            let f1 = harmonic_mean(precision, recall);
            classes.push((
                label.clone(),
                ClassMetrics {
                    precision,
                    recall,
                    f1,
                    support: row_sums[i],
                },
            ));
        }

        let total_support = cm.total();
        if total_support == 0 {
            return Err(Error::EmptyData(
                "confusion matrix contains no counted predictions".to_string(),
            ));
        }

        let k = n as f64;
        let macro_avg = ClassMetrics {
            precision: classes.iter().map(|(_, m)| m.precision).sum::<f64>() / k,
            recall: classes.iter().map(|(_, m)| m.recall).sum::<f64>() / k,
            f1: classes.iter().map(|(_, m)| m.f1).sum::<f64>() / k,
            support: total_support,
        };

        let total = total_support as f64;
        let weighted_avg = ClassMetrics {
            precision: classes
                .iter()
                .map(|(_, m)| m.precision * m.support as f64)
                .sum::<f64>()
                / total,
            recall: classes
                .iter()
                .map(|(_, m)| m.recall * m.support as f64)
                .sum::<f64>()
                / total,
            f1: classes.iter().map(|(_, m)| m.f1 * m.support as f64).sum::<f64>() / total,
            support: total_support,
        };

        Ok(ClassificationReport {
            classes,
            accuracy: cm.accuracy(),
            macro_avg,
            weighted_avg,
            total_support,
        })
    }

    /// Per-class metrics in label order
    pub fn classes(&self) -> &[(String, ClassMetrics)] {
        &self.classes
    }

    /// Metrics for one class by label
    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.classes
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, m)| m)
    }

    /// Overall accuracy
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Unweighted mean of the per-class metrics
    pub fn macro_avg(&self) -> &ClassMetrics {
        &self.macro_avg
    }

    /// Support-weighted mean of the per-class metrics
    pub fn weighted_avg(&self) -> &ClassMetrics {
        &self.weighted_avg
    }

    /// Number of counted samples
    pub fn total_support(&self) -> u64 {
        self.total_support
    }

    /// Serialize the report to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|(l, _)| l.len())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(12);

        writeln!(
            f,
            "{:>width$}  {:>9}  {:>6}  {:>8}  {:>7}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (label, m) in &self.classes {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>6.2}  {:>8.2}  {:>7}",
                label, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9}  {:>6}  {:>8.2}  {:>7}",
            "accuracy", "", "", self.accuracy, self.total_support
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>6.2}  {:>8.2}  {:>7}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_score() {
        let true_labels = vec![true, false, true, true, false, false];
        let pred_labels = vec![true, false, false, true, true, false];

        let accuracy = accuracy_score(&true_labels, &pred_labels).unwrap();
        assert!((accuracy - 0.6666666).abs() < 1e-6); // 4/6
    }

    #[test]
    fn test_accuracy_score_empty_input() {
        let empty: Vec<bool> = vec![];
        assert!(accuracy_score(&empty, &empty).is_err());
    }

    #[test]
    fn test_accuracy_score_different_length() {
        let true_labels = vec![true, false, true];
        let pred_labels = vec![true, false];
        assert!(accuracy_score(&true_labels, &pred_labels).is_err());
    }

    #[test]
    fn test_precision_at_k() {
        let labels = ["a", "b", "c"];
        let y_true = ["a", "b", "c"];
        let proba = vec![
            vec![0.7, 0.2, 0.1], // "a" ranked first
            vec![0.5, 0.4, 0.1], // "b" ranked second
            vec![0.5, 0.3, 0.2], // "c" ranked third
        ];

        let p1 = precision_at_k(&y_true, &proba, &labels, 1).unwrap();
        let p2 = precision_at_k(&y_true, &proba, &labels, 2).unwrap();
        let p3 = precision_at_k(&y_true, &proba, &labels, 3).unwrap();

        assert!((p1 - 1.0 / 3.0).abs() < 1e-12);
        assert!((p2 - 2.0 / 3.0).abs() < 1e-12);
        assert!((p3 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_precision_at_k_large_k_is_capped_by_class_count() {
        let labels = ["a", "b"];
        let y_true = ["a", "b"];
        let proba = vec![vec![0.9, 0.1], vec![0.9, 0.1]];

        let p = precision_at_k(&y_true, &proba, &labels, 10).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_precision_at_k_validation() {
        let labels = ["a", "b"];
        assert!(precision_at_k(&["a"], &[vec![1.0, 0.0]], &labels, 0).is_err());
        assert!(precision_at_k(&["a", "b"], &[vec![1.0, 0.0]], &labels, 1).is_err());
        assert!(precision_at_k(&["a"], &[vec![1.0]], &labels, 1).is_err());
    }

    #[test]
    fn test_report_from_confusion_matrix() {
        // true a: 5 right; true b: 2 wrong as a, 3 right
        let grid = vec![vec![5u64, 0], vec![2, 3]];
        let cm = ConfusionMatrix::from_counts(&grid, &["a", "b"]).unwrap();
        let report = ClassificationReport::from_confusion_matrix(&cm).unwrap();

        let a = report.class("a").unwrap();
        assert!((a.precision - 5.0 / 7.0).abs() < 1e-12);
        assert!((a.recall - 1.0).abs() < 1e-12);
        assert_eq!(a.support, 5);

        let b = report.class("b").unwrap();
        assert!((b.precision - 1.0).abs() < 1e-12);
        assert!((b.recall - 0.6).abs() < 1e-12);
        assert_eq!(b.support, 5);

        assert!((report.accuracy() - 0.8).abs() < 1e-12);
        assert_eq!(report.total_support(), 10);
        assert!(
            (report.weighted_avg().recall - 0.8).abs() < 1e-12,
            "weighted recall equals accuracy when every sample is counted"
        );
    }

    #[test]
    fn test_report_display_has_all_rows() {
        let grid = vec![vec![5u64, 0], vec![2, 3]];
        let cm = ConfusionMatrix::from_counts(&grid, &["a", "b"]).unwrap();
        let report = ClassificationReport::from_confusion_matrix(&cm).unwrap();
        let text = report.to_string();

        assert!(text.contains("precision"));
        assert!(text.contains("accuracy"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("weighted avg"));
    }

    #[test]
    fn test_report_json_roundtrips_keys() {
        let grid = vec![vec![1u64, 0], vec![0, 1]];
        let cm = ConfusionMatrix::from_counts(&grid, &["a", "b"]).unwrap();
        let report = ClassificationReport::from_confusion_matrix(&cm).unwrap();
        let json = report.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("accuracy").is_some());
        assert!(value.get("macro_avg").is_some());
    }
}
