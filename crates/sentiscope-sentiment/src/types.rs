use std::fmt;

use serde::Serialize;

/// Compound scores at or above this value are labelled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this value are labelled negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Identifier of one input document.
///
/// Raw text and `.txt` input use the 1-based line position; tabular input
/// carries whatever key the caller selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum DocId {
    Position(usize),
    Key(String),
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocId::Position(n) => write!(f, "{n}"),
            DocId::Key(k) => write!(f, "{k}"),
        }
    }
}

impl From<usize> for DocId {
    fn from(n: usize) -> Self {
        DocId::Position(n)
    }
}

impl From<String> for DocId {
    fn from(k: String) -> Self {
        DocId::Key(k)
    }
}

impl From<&str> for DocId {
    fn from(k: &str) -> Self {
        DocId::Key(k.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Classify a compound (or aggregate) score.
    ///
    /// Both thresholds are inclusive; anything strictly between them is neutral.
    #[must_use]
    pub fn from_compound(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four scores produced for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl PolarityScores {
    pub const ZERO: Self = Self {
        neg: 0.0,
        neu: 0.0,
        pos: 0.0,
        compound: 0.0,
    };

    /// Round every component to `places` decimals.
    #[must_use]
    pub fn rounded(self, places: usize) -> Self {
        Self {
            neg: round_to(self.neg, places),
            neu: round_to(self.neu, places),
            pos: round_to(self.pos, places),
            compound: round_to(self.compound, places),
        }
    }
}

/// One scored sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceRow {
    #[serde(rename = "doc_ID")]
    pub doc_id: DocId,
    /// 1-based position in the segmenter output, including skipped blanks.
    #[serde(rename = "sent_ID")]
    pub sent_id: usize,
    pub sentence: String,
    pub compound: f64,
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub sentiment_label: SentimentLabel,
}

/// Aggregate sentiment for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRow {
    #[serde(rename = "doc_ID")]
    pub doc_id: DocId,
    pub doc_senti_score: f64,
    pub doc_sentiment_label: SentimentLabel,
}

/// Sentence-level and document-level tables for one corpus run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusAnalysis {
    pub sentences: Vec<SentenceRow>,
    pub documents: Vec<DocumentRow>,
}

impl CorpusAnalysis {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Round to `places` decimals, ties to even on the exact binary value.
///
/// Goes through the shortest correctly rounded decimal rendering, so
/// `round_to(0.125, 2) == 0.12` and `round_to(2.675, 2) == 2.67`.
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded: f64 = format!("{value:.places$}").parse().unwrap_or(value);
    // Normalize -0.0 so serialized output never shows "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
