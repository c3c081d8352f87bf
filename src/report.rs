use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{chart, ChartError, ScoredRecord, ScoredTable, Sentiment, TableError, TextColumn};

/// File name of the enriched CSV
pub const SUMMARY_CSV: &str = "sentiment_summary.csv";
/// File name of the label count chart
pub const DISTRIBUTION_CHART: &str = "sentiment_dist.png";
/// File name of the polarity histogram
pub const HISTOGRAM_CHART: &str = "polarity_hist.png";
/// File name of the label percentage chart
pub const PERCENTAGE_CHART: &str = "sentiment_percentage.png";

/// How many rows are listed per end of the polarity ranking
const SAMPLE_SIZE: usize = 5;

/// Possible errors to occur while writing the report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to create the output directory: {0}")]
    OutputDirectory(#[from] io::Error),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// The number of rows per sentiment label
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SentimentCounts([usize; 3]);

impl SentimentCounts {
    pub fn from_records(records: &[ScoredRecord]) -> Self {
        let mut counts = [0; 3];
        for record in records {
            counts[record.sentiment().index()] += 1;
        }

        Self(counts)
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        self.0[sentiment.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// The share of each label in percent, in the order of [`Sentiment::ALL`]
    ///
    /// All shares are zero for an empty table.
    pub fn percentages(&self) -> [f64; 3] {
        let total = self.total();
        if total == 0 {
            return [0.0; 3];
        }

        self.0.map(|count| count as f64 / total as f64 * 100.0)
    }
}

/// The files written for one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub distribution: PathBuf,
    pub histogram: PathBuf,
    pub percentage: PathBuf,
}

impl ReportPaths {
    pub fn in_dir(outdir: &Path) -> Self {
        Self {
            csv: outdir.join(SUMMARY_CSV),
            distribution: outdir.join(DISTRIBUTION_CHART),
            histogram: outdir.join(HISTOGRAM_CHART),
            percentage: outdir.join(PERCENTAGE_CHART),
        }
    }
}

/// Writes the enriched CSV and the three charts into `outdir`
///
/// The directory is created if it doesn't exist. Files are written one after
/// another; if a later step fails, the earlier files stay on disk.
pub fn write_outputs(table: &ScoredTable, outdir: &Path) -> Result<ReportPaths, ReportError> {
    fs::create_dir_all(outdir)?;
    let paths = ReportPaths::in_dir(outdir);

    let mut written = Vec::new();
    let result = write_each(table, &paths, &mut written);
    if let Err(error) = &result {
        if !written.is_empty() {
            tracing::warn!(
                files = ?written,
                "Writing the report failed ({error}), earlier outputs were left in place"
            );
        }
    }

    result.map(|()| paths)
}

fn write_each<'p>(
    table: &ScoredTable,
    paths: &'p ReportPaths,
    written: &mut Vec<&'p Path>,
) -> Result<(), ReportError> {
    table.save(&paths.csv)?;
    tracing::info!("Saved enriched CSV: {}", paths.csv.display());
    written.push(&paths.csv);

    let counts = SentimentCounts::from_records(table.records());
    let polarities = table.records()
        .iter()
        .map(ScoredRecord::polarity)
        .collect::<Vec<_>>();

    chart::sentiment_distribution(&paths.distribution, &counts)?;
    tracing::info!("Saved: {}", paths.distribution.display());
    written.push(&paths.distribution);

    chart::polarity_histogram(&paths.histogram, &polarities)?;
    tracing::info!("Saved: {}", paths.histogram.display());
    written.push(&paths.histogram);

    chart::sentiment_percentage(&paths.percentage, &counts)?;
    tracing::info!("Saved: {}", paths.percentage.display());
    written.push(&paths.percentage);

    Ok(())
}

/// One row as listed in the console summary
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub text: String,
    pub polarity: f64,
    pub sentiment: Sentiment,
}

/// Label counts plus the most positive and most negative rows
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    column: String,
    counts: SentimentCounts,
    most_positive: Vec<Sample>,
    most_negative: Vec<Sample>,
}

impl Summary {
    /// Summarizes a scored table
    ///
    /// Rows with equal polarity keep their order from the table.
    pub fn new(table: &ScoredTable, column: &TextColumn) -> Self {
        let mut ranked = table.records().iter().collect::<Vec<_>>();
        let sample = |records: &[&ScoredRecord]| {
            records
                .iter()
                .take(SAMPLE_SIZE)
                .map(|record| Sample {
                    text: record.text(column.index()).to_owned(),
                    polarity: record.polarity(),
                    sentiment: record.sentiment(),
                })
                .collect::<Vec<_>>()
        };

        ranked.sort_by(|a, b| b.polarity().total_cmp(&a.polarity()));
        let most_positive = sample(ranked.as_slice());

        let mut ranked = table.records().iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| a.polarity().total_cmp(&b.polarity()));
        let most_negative = sample(ranked.as_slice());

        Self {
            column: column.name().to_owned(),
            counts: SentimentCounts::from_records(table.records()),
            most_positive,
            most_negative,
        }
    }

    pub fn counts(&self) -> &SentimentCounts {
        &self.counts
    }

    /// Up to five rows with the highest polarity, highest first
    pub fn most_positive(&self) -> &[Sample] {
        &self.most_positive
    }

    /// Up to five rows with the lowest polarity, lowest first
    pub fn most_negative(&self) -> &[Sample] {
        &self.most_negative
    }

    fn fmt_samples(&self, f: &mut fmt::Formatter<'_>, samples: &[Sample]) -> fmt::Result {
        let rows = samples
            .iter()
            .map(|sample| [sample.text.clone(), format!("{:.4}", sample.polarity), sample.sentiment.to_string()])
            .collect::<Vec<_>>();
        let header = [self.column.clone(), "Polarity".to_owned(), "Sentiment".to_owned()];

        let mut widths = header.clone().map(|cell| cell.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for row in std::iter::once(&header).chain(&rows) {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:>width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sentiment counts:")?;
        for sentiment in Sentiment::ALL {
            writeln!(f, "{:<9} {}", sentiment, self.counts.get(sentiment))?;
        }

        writeln!(f)?;
        writeln!(f, "Top {SAMPLE_SIZE} positive samples (by polarity):")?;
        self.fmt_samples(f, &self.most_positive)?;

        writeln!(f)?;
        writeln!(f, "Top {SAMPLE_SIZE} negative samples (by polarity):")?;
        self.fmt_samples(f, &self.most_negative)
    }
}
