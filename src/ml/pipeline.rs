//! Fitted prediction pipeline seam
//!
//! The reporting functions never train anything; they consume an
//! already-fitted pipeline through this trait so they can be exercised with
//! fabricated predictions in tests.

use crate::error::Result;

/// A fitted classification pipeline.
///
/// `Sample` is whatever the pipeline consumes per observation (a feature
/// vector, a document, a row handle). `classes` must return the labels in
/// the same order as the columns of `predict_proba`.
pub trait Classifier {
    /// Per-observation input type
    type Sample;

    /// Class labels discovered during fitting, in probability-column order
    fn classes(&self) -> Vec<String>;

    /// Predict one label per sample
    fn predict(&self, samples: &[Self::Sample]) -> Result<Vec<String>>;

    /// Predict per-class probabilities, one row per sample in class order
    fn predict_proba(&self, samples: &[Self::Sample]) -> Result<Vec<Vec<f64>>>;

    /// Human-readable description of the pipeline, used by the score report
    /// when asked to show the pipeline
    fn describe(&self) -> String
    where
        Self: Sized,
    {
        std::any::type_name::<Self>().to_string()
    }
}
