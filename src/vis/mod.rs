//! Module providing confusion-matrix visualization
//!
//! Text rendering works everywhere; graphical heatmaps (plotters) are
//! available behind the `visualization` feature.

pub mod text;

#[cfg(feature = "visualization")]
pub mod plotters_ext;

pub use self::text::{
    print_confusion_matrix, render_confusion_matrix, write_confusion_matrix, MatrixFormat,
};

#[cfg(feature = "visualization")]
pub use self::plotters_ext::{plot_confusion_matrix, HeatmapOutput, HeatmapSettings};
