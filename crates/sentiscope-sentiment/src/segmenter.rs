//! Sentence boundary detection.
//!
//! [`PunktSegmenter`] splits text with the Punkt algorithm and its bundled
//! English model. Callers may register extra abbreviations on top of the
//! trained ones.

use std::collections::HashSet;

use crate::error::SentimentError;
use crate::punkt::{sentence_spans, PunktParameters};

/// Splits a document into an ordered list of sentences.
pub trait SentenceSegmenter {
    /// # Errors
    ///
    /// Returns [`SentimentError::Segmentation`] if the text cannot be split.
    fn segment(&self, text: &str) -> Result<Vec<String>, SentimentError>;
}

#[derive(Debug, Clone, Default)]
pub struct PunktSegmenter {
    extra_abbreviations: HashSet<String>,
}

impl PunktSegmenter {
    /// Segmenter with the trained English model only.
    #[must_use]
    pub fn english() -> Self {
        Self::default()
    }

    /// Add abbreviations (without the trailing period, case-insensitive).
    #[must_use]
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_abbreviations.extend(
            abbreviations
                .into_iter()
                .map(|a| a.as_ref().trim_end_matches('.').to_lowercase()),
        );
        self
    }
}

impl SentenceSegmenter for PunktSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, SentimentError> {
        let params = PunktParameters::english()
            .map_err(|e| SentimentError::Segmentation(e.to_string()))?;
        let text = text.trim();
        Ok(sentence_spans(params, &self.extra_abbreviations, text)
            .into_iter()
            .map(|(start, end)| text[start..end].to_string())
            .collect())
    }
}

/// Number of abbreviations in the English model; zero if it failed to load.
#[must_use]
pub fn abbreviation_count() -> usize {
    PunktParameters::english().map_or(0, PunktParameters::abbreviation_count)
}
