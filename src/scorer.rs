use vader_sentiment::SentimentIntensityAnalyzer;

use crate::{ScoredTable, Table, TextColumn};

/// A word the lexicon must rate as positive to be considered usable
const CHECK_WORD: &str = "good";

/// Possible errors to occur while setting up a scorer
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("The sentiment lexicon is not available: {0}")]
    LexiconUnavailable(String),
}

/// Anything that maps a piece of text to a compound polarity score
///
/// Implementations must return a value in `[-1.0, 1.0]`.
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}

impl<F> PolarityScorer for F
    where F: Fn(&str) -> f64
{
    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

/// The loaded VADER lexicon
///
/// The lexicon is bundled with the `vader_sentiment` crate and parsed on
/// first use. [`Lexicon::prepare`] forces that parse once, before any row is
/// scored, and checks that the result is usable. Calling it again is cheap.
pub struct Lexicon {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Lexicon {
    pub fn prepare() -> Result<Self, ScoreError> {
        tracing::debug!("Loading VADER lexicon");
        let lexicon = Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        };
        let score = lexicon
            .compound(CHECK_WORD)
            .ok_or_else(|| ScoreError::LexiconUnavailable("no compound score produced".to_owned()))?;

        if score <= 0.0 {
            return Err(ScoreError::LexiconUnavailable(format!(
                "check word `{CHECK_WORD}` scored {score}"
            )));
        }

        Ok(lexicon)
    }

    /// The raw compound score of `text`
    fn compound(&self, text: &str) -> Option<f64> {
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
    }
}

/// Lexicon and rule based scorer built on VADER
pub struct VaderScorer {
    lexicon: Lexicon,
}

impl VaderScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl PolarityScorer for VaderScorer {
    /// The compound score, rounded to four decimals
    fn polarity(&self, text: &str) -> f64 {
        bound(self.lexicon.compound(text).unwrap_or(0.0))
    }
}

fn bound(compound: f64) -> f64 {
    if compound.is_nan() {
        return 0.0;
    }

    ((compound * 10_000.0).round() / 10_000.0).clamp(-1.0, 1.0)
}

/// Scores the text column of every row
///
/// Row order and all original columns are preserved; missing cells are scored
/// as empty text.
pub fn score_table<S>(table: Table, column: &TextColumn, scorer: &S) -> ScoredTable
    where S: PolarityScorer + ?Sized
{
    let index = column.index();
    ScoredTable::from_table(table, |row| {
        let text = match row.get(index) {
            Some(cell) if !crate::cell_is_missing(cell) => cell,
            _ => "",
        };
        scorer.polarity(text)
    })
}
