//! Graphical confusion-matrix heatmaps via plotters
//!
//! Only compiled with the `visualization` feature.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::Result;
use crate::ml::confusion::ConfusionMatrix;

/// Heatmap output format
#[derive(Debug, Clone, Copy)]
pub enum HeatmapOutput {
    /// PNG image
    Png,
    /// SVG document
    Svg,
}

/// Heatmap plot settings
#[derive(Debug, Clone)]
pub struct HeatmapSettings {
    /// Title drawn above the plot
    pub title: String,
    /// X-axis label
    pub x_label: String,
    /// Y-axis label
    pub y_label: String,
    /// Plot width in pixels
    pub width: u32,
    /// Plot height in pixels
    pub height: u32,
    /// Row-normalize a local copy of the matrix before rendering
    pub normalize: bool,
    /// Draw the cell value inside each cell
    pub annotate: bool,
    /// Output format
    pub output_type: HeatmapOutput,
    /// Base color for fully saturated cells
    pub base_color: (u8, u8, u8),
}

impl Default for HeatmapSettings {
    fn default() -> Self {
        HeatmapSettings {
            title: "Confusion matrix".to_string(),
            x_label: "Predicted label".to_string(),
            y_label: "True label".to_string(),
            width: 800,
            height: 600,
            normalize: false,
            annotate: true,
            output_type: HeatmapOutput::Png,
            base_color: (0, 123, 255),
        }
    }
}

/// Draw a confusion-matrix heatmap to `path`.
///
/// Cells are shaded relative to the matrix maximum; annotations switch to
/// white lettering once a cell value exceeds half of that maximum, so the
/// text stays readable on dark cells. Row 0 (the first true class) is drawn
/// at the top.
///
/// # Example
/// ```no_run
/// use mltoolz::ConfusionMatrix;
/// use mltoolz::vis::plotters_ext::{plot_confusion_matrix, HeatmapSettings};
///
/// let grid = vec![vec![5u64, 0], vec![2, 3]];
/// let cm = ConfusionMatrix::from_counts(&grid, &["A", "B"]).unwrap();
/// let settings = HeatmapSettings {
///     normalize: true,
///     ..HeatmapSettings::default()
/// };
/// plot_confusion_matrix(&cm, "confusion.png", &settings).unwrap();
/// ```
pub fn plot_confusion_matrix<P: AsRef<Path>>(
    cm: &ConfusionMatrix,
    path: P,
    settings: &HeatmapSettings,
) -> Result<()> {
    if settings.normalize {
        log::debug!("rendering row-normalized confusion matrix");
    } else {
        log::debug!("rendering confusion matrix without normalization");
    }

    match settings.output_type {
        HeatmapOutput::Png => {
            let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
                .into_drawing_area();
            draw_heatmap(&root, cm, settings)?;
            root.present()?;
        }
        HeatmapOutput::Svg => {
            let root = SVGBackend::new(path.as_ref(), (settings.width, settings.height))
                .into_drawing_area();
            draw_heatmap(&root, cm, settings)?;
            root.present()?;
        }
    }

    Ok(())
}

fn draw_heatmap<DB>(
    root: &DrawingArea<DB, Shift>,
    cm: &ConfusionMatrix,
    settings: &HeatmapSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = cm.n_classes();
    let labels = cm.labels().to_vec();

    let values: Vec<Vec<f64>> = if settings.normalize {
        cm.normalized()
    } else {
        cm.counts()
            .iter()
            .map(|row| row.iter().map(|&v| v as f64).collect())
            .collect()
    };
    let max = values
        .iter()
        .flatten()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max)
        .max(0.0);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&settings.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..n as f64, 0f64..n as f64)?;

    let x_labels = labels.clone();
    let y_labels = labels.clone();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&move |v| {
            x_labels
                .get((*v).floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_label_formatter(&move |v| {
            // row 0 sits at the top of the y range
            let idx = n.saturating_sub(1 + (*v).floor() as usize);
            y_labels.get(idx).cloned().unwrap_or_default()
        })
        .x_desc(&settings.x_label)
        .y_desc(&settings.y_label)
        .draw()?;

    let (r, g, b) = settings.base_color;
    let base = RGBColor(r, g, b);
    let mut cells = Vec::with_capacity(n * n);
    for (i, row) in values.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            let intensity = if max > 0.0 { v / max } else { 0.0 };
            let y0 = (n - 1 - i) as f64;
            cells.push(Rectangle::new(
                [(j as f64, y0), (j as f64 + 1.0, y0 + 1.0)],
                base.mix(intensity).filled(),
            ));
        }
    }
    chart.draw_series(cells)?;

    if settings.annotate {
        let anchor = Pos::new(HPos::Center, VPos::Center);
        let threshold = max / 2.0;
        let mut annotations = Vec::with_capacity(n * n);
        for (i, row) in values.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                let color = if v > threshold { &WHITE } else { &BLACK };
                let style = ("sans-serif", 15).into_font().color(color).pos(anchor);
                let text = if settings.normalize {
                    format!("{:.2}", v)
                } else {
                    format!("{}", cm.counts()[i][j])
                };
                let center = (j as f64 + 0.5, (n - 1 - i) as f64 + 0.5);
                annotations.push(Text::new(text, center, style));
            }
        }
        chart.draw_series(annotations)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = HeatmapSettings::default();
        assert_eq!(settings.x_label, "Predicted label");
        assert_eq!(settings.y_label, "True label");
        assert!(settings.annotate);
        assert!(!settings.normalize);
    }

    #[test]
    fn test_svg_heatmap_is_written() {
        let grid = vec![vec![5u64, 0], vec![2, 3]];
        let cm = ConfusionMatrix::from_counts(&grid, &["A", "B"]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cm.svg");

        let settings = HeatmapSettings {
            output_type: HeatmapOutput::Svg,
            ..HeatmapSettings::default()
        };
        plot_confusion_matrix(&cm, &path, &settings).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }
}
