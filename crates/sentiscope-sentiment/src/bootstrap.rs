//! Process-wide sentiment resources.
//!
//! The lexicon and emoji tables and the Punkt model are built lazily and at
//! most once; the shared analyzer wraps them for callers that do not
//! need custom lexicon overrides.

use std::sync::LazyLock;

use crate::corpus::CorpusAnalyzer;
use crate::error::SentimentError;
use crate::lexicon::{emoji_len, lexicon_len};
use crate::scorer::VaderScorer;
use crate::segmenter::{abbreviation_count, PunktSegmenter};
use crate::types::CorpusAnalysis;

static SHARED_ANALYZER: LazyLock<CorpusAnalyzer> = LazyLock::new(|| {
    let analyzer = CorpusAnalyzer::new(PunktSegmenter::english(), VaderScorer::new());
    tracing::info!(
        lexicon_words = lexicon_len(),
        emoji = emoji_len(),
        abbreviations = abbreviation_count(),
        "sentiment resources initialized"
    );
    analyzer
});

/// The process-wide default analyzer. Safe to call any number of times.
#[must_use]
pub fn shared_analyzer() -> &'static CorpusAnalyzer {
    &SHARED_ANALYZER
}

/// Score raw lines with the shared analyzer, ids by 1-based line position.
///
/// # Errors
///
/// See [`CorpusAnalyzer::process_corpus`].
pub fn analyze_lines<T: AsRef<str>>(lines: &[T]) -> Result<CorpusAnalysis, SentimentError> {
    shared_analyzer().process_corpus(lines)
}
