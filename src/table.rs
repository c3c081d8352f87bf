use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;

use crate::Sentiment;

/// Name of the derived compound score column
pub const POLARITY_COLUMN: &str = "Polarity";
/// Name of the derived label column
pub const SENTIMENT_COLUMN: &str = "Sentiment";

/// Cell values that are read as missing
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Possible errors to occur while reading or writing tables
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("Line {line} has {found} fields, but the header has {expected}")]
    TooManyFields { line: u64, expected: usize, found: usize },
}

/// Whether a raw cell counts as a missing value
///
/// Cells must match a token exactly, so whitespace is not missing.
pub fn cell_is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell)
}

/// The inferred type of a column
///
/// Kinds only ever widen while cells are inspected:
/// `Empty` -> `Integer` -> `Float`, and anything mixed ends up as `Text`.
/// Booleans can't hold missing values, so a boolean column with gaps is `Text`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Rows exist, but every cell is missing
    Empty,
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnKind {
    fn of_cell(cell: &str) -> Option<Self> {
        if cell_is_missing(cell) {
            return None;
        }

        let cell = cell.trim();
        if cell.parse::<i64>().is_ok() {
            Some(ColumnKind::Integer)
        } else if cell.parse::<f64>().is_ok() {
            Some(ColumnKind::Float)
        } else if matches!(cell, "True" | "TRUE" | "true" | "False" | "FALSE" | "false") {
            Some(ColumnKind::Boolean)
        } else {
            Some(ColumnKind::Text)
        }
    }

    fn widen(self, other: Self) -> Self {
        use ColumnKind::*;

        match (self, other) {
            (Empty, kind) | (kind, Empty) => kind,
            (a, b) if a == b => a,
            (Integer, Float) | (Float, Integer) => Float,
            _ => Text,
        }
    }
}

/// A loaded CSV table with arbitrary columns
///
/// Rows are kept exactly as read, so that they can be passed through
/// to the enriched output unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Reads a table with a header row from a CSV file
    pub fn load(path: &Path) -> Result<Self, TableError> {
        Self::from_reader(File::open(path)?)
    }

    /// Reads a table with a header row from any CSV source
    ///
    /// Rows shorter than the header are accepted, their trailing cells read as
    /// missing. Rows longer than the header are rejected.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for row in reader.records() {
            let row = row?;
            if row.len() > headers.len() {
                return Err(TableError::TooManyFields {
                    line: row.position().map_or(0, |position| position.line()),
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// The number of rows, excluding the header
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The index of the first column with the given name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Infers the kind of the column at `index`
    ///
    /// A table without any rows reports every column as [`ColumnKind::Text`],
    /// since there is nothing that would make it numeric.
    pub fn column_kind(&self, index: usize) -> ColumnKind {
        if self.rows.is_empty() {
            return ColumnKind::Text;
        }

        let mut has_missing = false;
        let kind = self.rows
            .iter()
            .filter_map(|row| {
                let kind = ColumnKind::of_cell(row.get(index).unwrap_or(""));
                has_missing |= kind.is_none();
                kind
            })
            .fold(ColumnKind::Empty, ColumnKind::widen);

        match kind {
            ColumnKind::Boolean if has_missing => ColumnKind::Text,
            kind => kind,
        }
    }

    fn into_rows(self) -> (StringRecord, Vec<StringRecord>) {
        (self.headers, self.rows)
    }
}

/// One input row together with its derived sentiment fields
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRecord {
    row: StringRecord,
    polarity: f64,
    sentiment: Sentiment,
}

impl ScoredRecord {
    pub fn new(row: StringRecord, polarity: f64) -> Self {
        Self {
            row,
            polarity,
            sentiment: Sentiment::from_polarity(polarity),
        }
    }

    /// The original cells of the row
    pub fn row(&self) -> &StringRecord {
        &self.row
    }

    /// The cell at `index`, with missing values read as an empty string
    pub fn text(&self, index: usize) -> &str {
        match self.row.get(index) {
            Some(cell) if !cell_is_missing(cell) => cell,
            _ => "",
        }
    }

    /// The compound polarity score in `[-1.0, 1.0]`
    pub fn polarity(&self) -> f64 {
        self.polarity
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }
}

#[derive(Debug, serde::Deserialize)]
struct DerivedFields {
    #[serde(rename = "Polarity")]
    polarity: f64,
    #[serde(rename = "Sentiment")]
    sentiment: Sentiment,
}

/// A table enriched with `Polarity` and `Sentiment` for every row
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredTable {
    headers: StringRecord,
    records: Vec<ScoredRecord>,
}

impl ScoredTable {
    /// Scores every row of `table` with `score`, preserving the row order
    pub fn from_table<F>(table: Table, mut score: F) -> Self
        where F: FnMut(&StringRecord) -> f64
    {
        let (headers, rows) = table.into_rows();
        let records = rows
            .into_iter()
            .map(|row| {
                let polarity = score(&row);
                ScoredRecord::new(row, polarity)
            })
            .collect();

        Self { headers, records }
    }

    /// The headers of the passthrough columns
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The headers of the enriched output
    ///
    /// Existing `Polarity` and `Sentiment` columns are reused in place,
    /// otherwise the derived columns are appended.
    fn output_layout(&self) -> (StringRecord, usize, usize) {
        let mut headers = self.headers.clone();
        let polarity = position_or_push(&mut headers, POLARITY_COLUMN);
        let sentiment = position_or_push(&mut headers, SENTIMENT_COLUMN);

        (headers, polarity, sentiment)
    }

    /// Writes the enriched table as CSV, header included
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), TableError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        let (headers, polarity, sentiment) = self.output_layout();
        writer.write_record(&headers)?;

        for record in &self.records {
            let mut fields = record.row
                .iter()
                .map(str::to_owned)
                .collect::<Vec<_>>();
            fields.resize(headers.len(), String::new());
            fields[polarity] = format_polarity(record.polarity);
            fields[sentiment] = record.sentiment.to_string();
            writer.write_record(&fields)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes the enriched table to a CSV file, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        self.write_csv(File::create(path)?)
    }

    /// Reads an enriched table, as written by [`ScoredTable::write_csv`], back in
    ///
    /// The derived columns are parsed into typed fields, all other columns are
    /// kept as passthrough columns.
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let all_headers = reader.headers()?.clone();
        let passthrough = |i: &usize| {
            let name = &all_headers[*i];
            name != POLARITY_COLUMN && name != SENTIMENT_COLUMN
        };
        let kept = (0..all_headers.len()).filter(passthrough).collect::<Vec<_>>();
        let headers = kept.iter().map(|&i| &all_headers[i]).collect::<StringRecord>();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let derived: DerivedFields = row.deserialize(Some(&all_headers))?;
            records.push(ScoredRecord {
                row: kept.iter().map(|&i| &row[i]).collect(),
                polarity: derived.polarity,
                sentiment: derived.sentiment,
            });
        }

        Ok(Self { headers, records })
    }
}

fn position_or_push(headers: &mut StringRecord, name: &str) -> usize {
    match headers.iter().position(|header| header == name) {
        Some(index) => index,
        None => {
            headers.push_field(name);
            headers.len() - 1
        }
    }
}

fn format_polarity(polarity: f64) -> String {
    // `+ 0.0` turns a negative zero into a positive one
    format!("{:?}", polarity + 0.0)
}
