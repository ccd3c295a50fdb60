//! Corpus-to-scores pipeline.

use crate::error::SentimentError;
use crate::scorer::{PolarityScorer, VaderScorer};
use crate::segmenter::{PunktSegmenter, SentenceSegmenter};
use crate::types::{round_to, CorpusAnalysis, DocId, DocumentRow, SentenceRow, SentimentLabel};

/// Decimal places kept for every emitted score.
pub const SCORE_PLACES: usize = 3;

/// Segments documents, scores each sentence and aggregates per document.
#[derive(Debug, Clone, Default)]
pub struct CorpusAnalyzer<S = PunktSegmenter, P = VaderScorer> {
    segmenter: S,
    scorer: P,
}

impl<S, P> CorpusAnalyzer<S, P>
where
    S: SentenceSegmenter,
    P: PolarityScorer,
{
    #[must_use]
    pub fn new(segmenter: S, scorer: P) -> Self {
        Self { segmenter, scorer }
    }

    /// Process documents with ids taken from their 1-based input position.
    ///
    /// Blank documents are skipped but still consume a position.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Document`] for the first document whose
    /// segmentation or scoring fails; no partial tables are returned.
    pub fn process_corpus<T: AsRef<str>>(
        &self,
        corpus: &[T],
    ) -> Result<CorpusAnalysis, SentimentError> {
        self.process(
            corpus
                .iter()
                .enumerate()
                .map(|(idx, doc)| (DocId::Position(idx + 1), doc.as_ref())),
        )
    }

    /// Process documents paired positionally with externally supplied ids.
    ///
    /// If the two slices differ in length, the surplus of the longer one is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`CorpusAnalyzer::process_corpus`].
    pub fn process_corpus_with_ids<T, K>(
        &self,
        corpus: &[T],
        doc_ids: &[K],
    ) -> Result<CorpusAnalysis, SentimentError>
    where
        T: AsRef<str>,
        K: Clone + Into<DocId>,
    {
        if corpus.len() != doc_ids.len() {
            tracing::warn!(
                documents = corpus.len(),
                ids = doc_ids.len(),
                "document and id counts differ; extra entries ignored"
            );
        }
        self.process(
            doc_ids
                .iter()
                .zip(corpus)
                .map(|(id, doc)| (id.clone().into(), doc.as_ref())),
        )
    }

    /// Process an ordered sequence of `(id, text)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`CorpusAnalyzer::process_corpus`].
    pub fn process<'a, I>(&self, documents: I) -> Result<CorpusAnalysis, SentimentError>
    where
        I: IntoIterator<Item = (DocId, &'a str)>,
    {
        let mut analysis = CorpusAnalysis::default();
        let mut skipped = 0_usize;

        for (doc_id, text) in documents {
            let text = text.trim();
            if text.is_empty() {
                skipped += 1;
                continue;
            }
            self.process_document(&doc_id, text, &mut analysis)
                .map_err(|e| e.in_document(doc_id.clone()))?;
        }

        tracing::info!(
            documents = analysis.documents.len(),
            sentences = analysis.sentences.len(),
            skipped,
            "corpus processed"
        );
        Ok(analysis)
    }

    fn process_document(
        &self,
        doc_id: &DocId,
        text: &str,
        analysis: &mut CorpusAnalysis,
    ) -> Result<(), SentimentError> {
        let sentences = self.segmenter.segment(text)?;
        let mut doc_compound = 0.0_f64;
        let mut scored = 0_usize;

        for (idx, sentence) in sentences.into_iter().enumerate() {
            if sentence.trim().is_empty() {
                continue;
            }
            let scores = self
                .scorer
                .polarity_scores(&sentence)?
                .rounded(SCORE_PLACES);

            doc_compound += scores.compound;
            scored += 1;
            analysis.sentences.push(SentenceRow {
                doc_id: doc_id.clone(),
                sent_id: idx + 1,
                sentence,
                compound: scores.compound,
                neg: scores.neg,
                neu: scores.neu,
                pos: scores.pos,
                sentiment_label: SentimentLabel::from_compound(scores.compound),
            });
        }

        // A document whose sentences were all blank produces no rows.
        if scored == 0 {
            return Ok(());
        }

        let doc_senti_score = round_to(doc_compound, SCORE_PLACES);
        tracing::debug!(
            doc_id = %doc_id,
            sentences = scored,
            score = doc_senti_score,
            "document scored"
        );
        analysis.documents.push(DocumentRow {
            doc_id: doc_id.clone(),
            doc_senti_score,
            doc_sentiment_label: SentimentLabel::from_compound(doc_senti_score),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "corpus_test.rs"]
mod tests;
