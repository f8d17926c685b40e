//! mltoolz: reporting helpers for classification model evaluation
//!
//! Renders confusion matrices as aligned text grids (with per-cell
//! suppression switches), prints aggregate score summaries (accuracy,
//! confidence interval, p-value, precision@k, per-class report) for a
//! fitted prediction pipeline, and — behind the `visualization` feature —
//! draws confusion-matrix heatmaps with plotters.
//!
//! ```rust
//! use mltoolz::{ConfusionMatrix, MatrixFormat};
//!
//! let y_true = ["A", "A", "B", "B", "B"];
//! let y_pred = ["A", "A", "A", "B", "B"];
//! let cm = ConfusionMatrix::from_predictions(&y_true, &y_pred, &["A", "B"]).unwrap();
//!
//! let format = MatrixFormat {
//!     hide_zeroes: true,
//!     ..MatrixFormat::default()
//! };
//! println!("{}", cm.to_text(&format));
//! ```

pub mod error;
pub mod ml;
pub mod stats;
pub mod vis;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ml::confusion::ConfusionMatrix;
pub use ml::metrics::{accuracy_score, precision_at_k, ClassMetrics, ClassificationReport};
pub use ml::pipeline::Classifier;
pub use ml::report::{print_classification_scores, write_classification_scores, ScoreReportOptions};
pub use vis::{print_confusion_matrix, render_confusion_matrix, write_confusion_matrix, MatrixFormat};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
