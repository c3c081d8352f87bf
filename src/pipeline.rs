use std::path::PathBuf;

use crate::{
    report, resolve_text_column, score_table, ColumnError, Lexicon, PolarityScorer, ReportError,
    ReportPaths, ScoreError, Summary, Table, TableError, TextColumn, VaderScorer,
};

/// Possible errors to occur during a run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Column(#[from] ColumnError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Where to read the dataset from and where to put the results
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// The input CSV file
    pub input: PathBuf,
    /// The directory for the enriched CSV and the charts
    pub outdir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input: PathBuf::from("dataset.csv"),
            outdir: PathBuf::from("outputs"),
        }
    }
}

/// The outcome of a successful run
#[derive(Debug)]
pub struct RunReport {
    text_column: TextColumn,
    paths: ReportPaths,
    summary: Summary,
}

impl RunReport {
    /// The column that was scored
    pub fn text_column(&self) -> &TextColumn {
        &self.text_column
    }

    /// The files that were written
    pub fn paths(&self) -> &ReportPaths {
        &self.paths
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Runs load, resolve, score and report, in that order
///
/// Every stage runs exactly once per call. Nothing is written before the
/// input has been loaded and a text column has been found.
pub struct Pipeline<S> {
    scorer: S,
}

impl Pipeline<VaderScorer> {
    /// Creates a pipeline scoring with VADER, preparing the lexicon first
    pub fn vader() -> Result<Self, PipelineError> {
        let lexicon = Lexicon::prepare()?;
        Ok(Self::with_scorer(VaderScorer::new(lexicon)))
    }
}

impl<S: PolarityScorer> Pipeline<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn run(&self, options: &Options) -> Result<RunReport, PipelineError> {
        if !options.input.exists() {
            return Err(PipelineError::InputNotFound(options.input.clone()));
        }

        tracing::info!("Loading dataset: {}", options.input.display());
        let table = Table::load(&options.input)?;
        tracing::info!("Dataset shape: ({}, {})", table.len(), table.headers().len());
        tracing::info!("Columns: {:?}", table.headers().iter().collect::<Vec<_>>());

        let text_column = resolve_text_column(&table)?;
        tracing::info!("Using text column: {}", text_column.name());

        let scored = score_table(table, &text_column, &self.scorer);
        tracing::debug!(rows = scored.len(), "Scored dataset");

        let paths = report::write_outputs(&scored, &options.outdir)?;
        let summary = Summary::new(&scored, &text_column);

        Ok(RunReport {
            text_column,
            paths,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::Sentiment;

    fn fixed_scorer(text: &str) -> f64 {
        match text {
            "good" => 0.7,
            "bad" => -0.7,
            _ => 0.0,
        }
    }

    fn options(dir: &tempfile::TempDir, csv: &str) -> Options {
        let input = dir.path().join("input.csv");
        fs::write(&input, csv).unwrap();

        Options {
            input,
            outdir: dir.path().join("out"),
        }
    }

    #[test]
    fn default_options() {
        let options = Options::default();
        assert_eq!(options.input, PathBuf::from("dataset.csv"));
        assert_eq!(options.outdir, PathBuf::from("outputs"));
    }

    #[test]
    fn missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let options = Options {
            input: dir.path().join("missing.csv"),
            outdir: dir.path().join("out"),
        };

        let error = Pipeline::with_scorer(fixed_scorer).run(&options).unwrap_err();
        assert!(matches!(&error, PipelineError::InputNotFound(path) if path == &options.input));
        assert!(error.to_string().contains("missing.csv"));
        assert!(!options.outdir.exists());
    }

    #[test]
    fn numeric_only_input() {
        let dir = tempfile::tempdir().unwrap();
        let options = options(&dir, "id,score\n1,0.5\n2,0.25\n");

        let error = Pipeline::with_scorer(fixed_scorer).run(&options).unwrap_err();
        assert!(matches!(error, PipelineError::Column(ColumnError::NoTextColumnFound)));
        assert!(!options.outdir.exists());
    }

    #[test]
    fn scores_with_custom_scorer() {
        let dir = tempfile::tempdir().unwrap();
        let options = options(&dir, "id,review\n1,good\n2,bad\n3,meh\n");

        let report = Pipeline::with_scorer(fixed_scorer).run(&options).unwrap();
        assert_eq!(report.text_column().name(), "review");

        let counts = report.summary().counts();
        for sentiment in Sentiment::ALL {
            assert_eq!(counts.get(sentiment), 1);
        }
        assert_eq!(
            fs::read_to_string(&report.paths().csv).unwrap(),
            "id,review,Polarity,Sentiment\n1,good,0.7,Positive\n2,bad,-0.7,Negative\n3,meh,0.0,Neutral\n",
        );
    }
}
