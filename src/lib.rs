pub use self::{
    chart::ChartError,
    column::{resolve_text_column, ColumnError, TextColumn, TEXT_COLUMN_CANDIDATES},
    pipeline::{Options, Pipeline, PipelineError, RunReport},
    report::{write_outputs, ReportError, ReportPaths, Sample, SentimentCounts, Summary},
    scorer::{score_table, Lexicon, PolarityScorer, ScoreError, VaderScorer},
    sentiment::{Sentiment, UnknownSentiment, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD},
    table::{
        cell_is_missing, ColumnKind, ScoredRecord, ScoredTable, Table, TableError, POLARITY_COLUMN,
        SENTIMENT_COLUMN,
    },
};

pub mod chart;
pub mod logging;
pub mod report;

mod column;
mod pipeline;
mod scorer;
mod sentiment;
mod table;
