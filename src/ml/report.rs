//! Aggregate score reporting for a fitted classification pipeline
//!
//! Orchestrates prediction, confusion-matrix construction, accuracy
//! inference and per-class reporting into one text summary on an injected
//! sink.

use std::io::Write;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::ml::confusion::ConfusionMatrix;
use crate::ml::metrics::{accuracy_score, precision_at_k, ClassificationReport};
use crate::ml::pipeline::Classifier;
use crate::stats::{accuracy_confidence_interval, accuracy_p_value};
use crate::vis::text::{write_confusion_matrix, MatrixFormat};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("static pattern");
}

/// Switches and knobs for the score report
#[derive(Debug, Clone)]
pub struct ScoreReportOptions {
    /// Print a one-line description of the pipeline before the scores
    pub show_pipeline: bool,
    /// Print precision@k lines and the per-class classification report
    pub show_topk: bool,
    /// Print the confusion matrix as a text grid
    pub show_cm: bool,
    /// Print a classification report over the training data as well;
    /// requires training data to be supplied
    pub show_trainscores: bool,
    /// Two-sided confidence level for the accuracy interval
    pub confidence: f64,
    /// k values for the precision@k lines
    pub topk: Vec<usize>,
    /// Formatting of the confusion-matrix block
    pub matrix_format: MatrixFormat,
}

impl Default for ScoreReportOptions {
    fn default() -> Self {
        Self {
            show_pipeline: false,
            show_topk: false,
            show_cm: true,
            show_trainscores: false,
            confidence: 0.90,
            topk: vec![3, 5],
            matrix_format: MatrixFormat::default(),
        }
    }
}

/// Evaluate `pipeline` on the test set and write a formatted score summary
/// to `out`.
///
/// `train` supplies the training samples and labels; it is only consulted
/// (and only required) when `show_trainscores` is set.
pub fn write_classification_scores<W, C>(
    out: &mut W,
    pipeline: &C,
    x_test: &[C::Sample],
    y_test: &[String],
    train: Option<(&[C::Sample], &[String])>,
    options: &ScoreReportOptions,
) -> Result<()>
where
    W: Write,
    C: Classifier,
{
    if options.show_trainscores && train.is_none() {
        return Err(Error::InvalidOperation(
            "training scores requested but no training data was supplied".to_string(),
        ));
    }

    if options.show_pipeline {
        writeln!(out, "{} ", WHITESPACE.replace_all(&pipeline.describe(), " "))?;
        writeln!(out)?;
    }

    let labels = pipeline.classes();

    log::debug!("predicting {} test samples", x_test.len());
    let p_test = pipeline.predict(x_test)?;
    let cm = ConfusionMatrix::from_predictions(y_test, &p_test, &labels)?;

    writeln!(out, "=== Test results ===")?;
    writeln!(
        out,
        "Accuracy: {:.2}%",
        accuracy_score(y_test, &p_test)? * 100.0
    )?;
    writeln!(out)?;
    let (low, high) = accuracy_confidence_interval(&cm, options.confidence)?;
    writeln!(
        out,
        "True Accuracy is between: {:.2} and {:.2} with {:.0}% probability",
        low,
        high,
        options.confidence * 100.0
    )?;
    writeln!(out, "Accuracy p value: {:.4}", accuracy_p_value(&cm)?)?;

    if options.show_topk {
        log::debug!("computing class probabilities for {} test samples", x_test.len());
        let proba = pipeline.predict_proba(x_test)?;
        for &k in &options.topk {
            writeln!(
                out,
                "Precision@{}: {:.2}%",
                k,
                precision_at_k(y_test, &proba, &labels, k)? * 100.0
            )?;
        }
        let report = ClassificationReport::from_predictions(y_test, &p_test, &labels)?;
        write!(out, "{}", report)?;
    }

    if options.show_cm {
        write_confusion_matrix(out, &cm, &options.matrix_format)?;
    }

    if options.show_trainscores {
        // checked non-None above
        let (x_train, y_train) = train.ok_or_else(|| {
            Error::InvalidOperation(
                "training scores requested but no training data was supplied".to_string(),
            )
        })?;
        log::debug!("predicting {} training samples", x_train.len());
        let p_train = pipeline.predict(x_train)?;
        let report = ClassificationReport::from_predictions(y_train, &p_train, &labels)?;
        writeln!(out, "=== Train results ===")?;
        write!(out, "{}", report)?;
    }

    Ok(())
}

/// Convenience wrapper writing the score summary to stdout
pub fn print_classification_scores<C>(
    pipeline: &C,
    x_test: &[C::Sample],
    y_test: &[String],
    train: Option<(&[C::Sample], &[String])>,
    options: &ScoreReportOptions,
) -> Result<()>
where
    C: Classifier,
{
    write_classification_scores(&mut std::io::stdout(), pipeline, x_test, y_test, train, options)
}
