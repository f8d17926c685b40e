//! Classification evaluation building blocks
//!
//! Confusion matrices, score metrics, the fitted-pipeline seam, and the
//! aggregate score report.

pub mod confusion;
pub mod metrics;
pub mod pipeline;
pub mod report;
