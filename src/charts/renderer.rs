//! Static Histogram Renderer
//! Writes one histogram image per tracked question using plotters.

use plotters::element::DashedPathElement;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render {path}: {message}")]
    Render { path: String, message: String },
    #[error("No values to plot for {0}")]
    EmptyColumn(String),
}

const CHART_SIZE: (u32, u32) = (800, 600);

/// One question's numeric column, ready to plot.
#[derive(Debug, Clone)]
pub struct QuestionSeries {
    pub question: String,
    pub title: String,
    pub values: Vec<f64>,
}

pub struct HistogramRenderer;

impl HistogramRenderer {
    /// Unit-width bin edges at half-integer offsets spanning
    /// [min - 0.5, max + 1.5), so every whole score between the observed
    /// extremes gets its own bin.
    fn bin_edges(values: &[f64]) -> Vec<f64> {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let count = (max + 1.5 - min).ceil() as usize;
        (0..count).map(|i| min - 0.5 + i as f64).collect()
    }

    /// Histogram counts over the unit bins; the final bin absorbs its upper
    /// edge so no in-range value is dropped.
    fn bin_counts(values: &[f64], edges: &[f64]) -> Vec<usize> {
        let bins = edges.len() - 1;
        let mut counts = vec![0usize; bins];
        for &value in values {
            let index = ((value - edges[0]).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }
        counts
    }

    /// Render a single question's histogram: unit bins, a dashed vertical
    /// line at the mean, and the question text as caption.
    pub fn render_histogram(series: &QuestionSeries, path: &Path) -> Result<(), ChartError> {
        if series.values.is_empty() {
            return Err(ChartError::EmptyColumn(series.question.clone()));
        }

        let edges = Self::bin_edges(&series.values);
        let counts = Self::bin_counts(&series.values, &edges);
        let mean = series.values.iter().sum::<f64>() / series.values.len() as f64;

        let render_err = |message: String| ChartError::Render {
            path: path.display().to_string(),
            message,
        };

        let x_min = edges[0];
        let x_max = *edges.last().expect("at least two edges");
        let y_max = counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.05;

        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| render_err(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&series.title, ("sans-serif", 18))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(|e| render_err(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc("Score")
            .y_desc("Responses")
            .draw()
            .map_err(|e| render_err(e.to_string()))?;

        chart
            .draw_series(counts.iter().enumerate().map(|(bin, &count)| {
                Rectangle::new(
                    [(edges[bin], 0.0), (edges[bin + 1], count as f64)],
                    BLUE.mix(0.5).filled(),
                )
            }))
            .map_err(|e| render_err(e.to_string()))?;

        chart
            .draw_series(std::iter::once(DashedPathElement::new(
                vec![(mean, 0.0), (mean, y_max)],
                5,
                3,
                BLACK.stroke_width(1),
            )))
            .map_err(|e| render_err(e.to_string()))?;

        root.present().map_err(|e| render_err(e.to_string()))?;
        Ok(())
    }

    /// Render every tracked question of a dataset into `out_dir`, one
    /// `<question_id>.png` per question. The directory must already exist.
    pub fn render_series(series: &[QuestionSeries], out_dir: &Path) -> Result<(), ChartError> {
        for entry in series {
            let path = out_dir.join(format!("{}.png", entry.question));
            Self::render_histogram(entry, &path)?;
            debug!("wrote {}", path.display());
        }
        Ok(())
    }
}
