use thiserror::Error;

use crate::types::DocId;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("sentence segmentation failed: {0}")]
    Segmentation(String),

    #[error("polarity scoring failed: {0}")]
    Scoring(String),

    #[error("Error processing document {doc_id}: {source}")]
    Document {
        doc_id: DocId,
        #[source]
        source: Box<SentimentError>,
    },
}

impl SentimentError {
    /// Attach the offending document id to a segmentation or scoring failure.
    #[must_use]
    pub fn in_document(self, doc_id: DocId) -> Self {
        SentimentError::Document {
            doc_id,
            source: Box::new(self),
        }
    }
}
