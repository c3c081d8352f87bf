use std::path::Path;

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::{Sentiment, SentimentCounts};

/// Pixel size of a 6x4 inch figure at 150 DPI
const CATEGORY_CHART_SIZE: (u32, u32) = (900, 600);
/// Pixel size of an 8x4 inch figure at 150 DPI
const HISTOGRAM_CHART_SIZE: (u32, u32) = (1200, 600);
/// Number of points the density curve is evaluated at
const KDE_POINTS: usize = 200;
/// Upper limit for the number of histogram bins
const MAX_BINS: usize = 1_000;

const FONT: &str = "sans-serif";

/// Possible errors to occur while rendering a chart
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
    where E: std::error::Error + Send + Sync
{
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(error.to_string())
    }
}

/// One histogram bin covering `[start, end)`, the last bin also includes `end`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Bar chart of the number of rows per sentiment label
pub fn sentiment_distribution(path: &Path, counts: &SentimentCounts) -> Result<(), ChartError> {
    let values = Sentiment::ALL.map(|sentiment| counts.get(sentiment) as f64);
    category_bars(path, "Sentiment Distribution", "count", values)
}

/// Bar chart of the percentage share of each sentiment label
pub fn sentiment_percentage(path: &Path, counts: &SentimentCounts) -> Result<(), ChartError> {
    category_bars(path, "Sentiment Percentage", "Percentage (%)", counts.percentages())
}

fn category_bars(path: &Path, title: &str, y_desc: &str, values: [f64; 3]) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, CATEGORY_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = values.iter().copied().fold(0.0, f64::max).max(1.0) * 1.1;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..Sentiment::ALL.len()).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Sentiment")
        .y_desc(y_desc)
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(i) => Sentiment::ALL
                .get(*i)
                .map(Sentiment::to_string)
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.7).filled())
            .margin(30)
            .data(values.iter().copied().enumerate()),
    )?;

    root.present()?;
    Ok(())
}

/// Histogram of the polarity scores with an overlaid density curve
pub fn polarity_histogram(path: &Path, polarities: &[f64]) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, HISTOGRAM_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let bins = histogram_bins(polarities);
    let bin_width = bins.first().map_or(0.0, |bin| bin.end - bin.start);
    let density = gaussian_kde(polarities, KDE_POINTS)
        .into_iter()
        .flatten()
        .map(|(x, density)| (x, density * polarities.len() as f64 * bin_width))
        .collect::<Vec<_>>();

    let (x_min, x_max) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.start, last.end),
        _ => (-1.0, 1.0),
    };
    let y_max = bins
        .iter()
        .map(|bin| bin.count as f64)
        .chain(density.iter().map(|&(_, y)| y))
        .fold(0.0, f64::max)
        .max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Polarity (Compound) Score Distribution", (FONT, 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Compound Polarity Score")
        .y_desc("Count")
        .draw()?;

    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], BLUE.mix(0.5).filled())
    }))?;
    chart.draw_series(LineSeries::new(density, BLUE.stroke_width(2)))?;

    root.present()?;
    Ok(())
}

/// Splits `values` into equally wide bins
///
/// The bin width is the smaller of the Sturges and Freedman-Diaconis
/// estimates, falling back to Sturges when the interquartile range is zero.
/// A single distinct value gets one bin of width one centered on it.
pub fn histogram_bins(values: &[f64]) -> Vec<Bin> {
    if values.is_empty() {
        return Vec::new();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let range = max - min;

    let sturges = range / (n.log2() + 1.0);
    let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
    let freedman_diaconis = 2.0 * iqr * n.powf(-1.0 / 3.0);
    let width = if freedman_diaconis > 0.0 {
        freedman_diaconis.min(sturges)
    } else {
        sturges
    };

    let (first, last) = match range > 0.0 {
        true => (min, max),
        false => (min - 0.5, max + 0.5),
    };
    let bin_count = match width > 0.0 {
        true => (((last - first) / width).ceil() as usize).clamp(1, MAX_BINS),
        false => 1,
    };
    let step = (last - first) / bin_count as f64;

    let mut bins = (0..bin_count)
        .map(|i| Bin {
            start: first + step * i as f64,
            end: first + step * (i + 1) as f64,
            count: 0,
        })
        .collect::<Vec<_>>();
    for value in sorted {
        let index = (((value - first) / step) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}

/// Linear interpolation between the closest ranks of a sorted slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Gaussian kernel density estimate over the range of `values`
///
/// Uses Scott's rule for the bandwidth. Returns `None` when the data has no
/// spread, since no bandwidth can be derived then.
pub fn gaussian_kde(values: &[f64], points: usize) -> Option<Vec<(f64, f64)>> {
    if values.len() < 2 || points < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let bandwidth = variance.sqrt() * n.powf(-1.0 / 5.0);
    if !(bandwidth > 0.0) {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (max - min) / (points - 1) as f64;
    let norm = n * bandwidth * (2.0 * std::f64::consts::PI).sqrt();

    let curve = (0..points)
        .map(|i| {
            let x = min + step * i as f64;
            let sum = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>();
            (x, sum / norm)
        })
        .collect();

    Some(curve)
}
