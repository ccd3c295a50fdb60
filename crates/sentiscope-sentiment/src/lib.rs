//! Sentence- and document-level sentiment scoring.
//!
//! Documents are split into sentences, each sentence is scored with a
//! VADER-style lexicon scorer, and sentence compounds are summed into a
//! per-document score. Every score is labelled Positive, Neutral or Negative.

pub mod bootstrap;
pub mod corpus;
pub mod error;
pub mod lexicon;
mod punkt;
pub mod scorer;
pub mod segmenter;
pub mod types;

pub use bootstrap::{analyze_lines, shared_analyzer};
pub use corpus::CorpusAnalyzer;
pub use error::SentimentError;
pub use scorer::{PolarityScorer, VaderScorer};
pub use segmenter::{PunktSegmenter, SentenceSegmenter};
pub use types::{
    round_to, CorpusAnalysis, DocId, DocumentRow, PolarityScores, SentenceRow, SentimentLabel,
};
