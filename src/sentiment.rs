use std::fmt;
use std::str::FromStr;

/// Compound scores at or above this value are classified as [`Sentiment::Positive`]
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this value are classified as [`Sentiment::Negative`]
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Error returned when parsing an unknown sentiment label
#[derive(Debug, thiserror::Error)]
#[error("Unknown sentiment label `{0}`")]
pub struct UnknownSentiment(String);

/// The three-way sentiment label derived from a compound polarity score
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All labels in reporting order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Classifies a compound polarity score
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if polarity <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    /// The position of the label in [`Sentiment::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Neutral => 1,
            Sentiment::Negative => 2,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str() == s)
            .ok_or_else(|| UnknownSentiment(s.to_owned()))
    }
}
