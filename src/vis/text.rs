//! Fixed-width console rendering of confusion matrices

use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::ml::confusion::ConfusionMatrix;

/// Cell-suppression switches for text rendering.
///
/// The switches are independent; a cell renders as blank padding when ANY
/// active policy matches it.
#[derive(Debug, Clone)]
pub struct MatrixFormat {
    /// Blank cells whose value is exactly zero
    pub hide_zeroes: bool,
    /// Blank diagonal cells regardless of value
    pub hide_diagonal: bool,
    /// Blank cells at or below this value; a cell is shown only when it is
    /// strictly greater than the threshold
    pub hide_threshold: Option<f64>,
    /// Minimum column width in characters; actual width is the larger of
    /// this and the longest label
    pub min_value_width: usize,
}

impl Default for MatrixFormat {
    fn default() -> Self {
        Self {
            hide_zeroes: false,
            hide_diagonal: false,
            hide_threshold: None,
            min_value_width: 5,
        }
    }
}

impl MatrixFormat {
    fn suppresses(&self, row: usize, col: usize, value: u64) -> bool {
        if self.hide_zeroes && value == 0 {
            return true;
        }
        if self.hide_diagonal && row == col {
            return true;
        }
        if let Some(threshold) = self.hide_threshold {
            if value as f64 <= threshold {
                return true;
            }
        }
        false
    }
}

/// Render a confusion matrix as an aligned text grid.
///
/// One header line of right-justified column labels preceded by a blank
/// row-label cell, then one line per true class. Every field is followed by
/// a single space so suppressed cells keep the columns aligned.
pub fn render_confusion_matrix(cm: &ConfusionMatrix, format: &MatrixFormat) -> String {
    let labels = cm.labels();
    let width = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(format.min_value_width);
    let empty_cell = " ".repeat(width);

    let mut out = String::new();
    let _ = write!(out, "    {} ", empty_cell);
    for label in labels {
        let _ = write!(out, "{:>width$} ", label);
    }
    out.push('\n');

    for (i, label) in labels.iter().enumerate() {
        let _ = write!(out, "    {:>width$} ", label);
        for (j, &value) in cm.counts()[i].iter().enumerate() {
            if format.suppresses(i, j, value) {
                let _ = write!(out, "{} ", empty_cell);
            } else {
                let _ = write!(out, "{:>width$} ", value);
            }
        }
        out.push('\n');
    }

    out
}

/// Write the rendered matrix to an arbitrary sink
pub fn write_confusion_matrix<W: Write>(
    out: &mut W,
    cm: &ConfusionMatrix,
    format: &MatrixFormat,
) -> Result<()> {
    out.write_all(render_confusion_matrix(cm, format).as_bytes())?;
    Ok(())
}

/// Write the rendered matrix to stdout
pub fn print_confusion_matrix(cm: &ConfusionMatrix, format: &MatrixFormat) -> Result<()> {
    write_confusion_matrix(&mut std::io::stdout(), cm, format)
}

impl ConfusionMatrix {
    /// Render this matrix as an aligned text grid
    pub fn to_text(&self, format: &MatrixFormat) -> String {
        render_confusion_matrix(self, format)
    }
}
