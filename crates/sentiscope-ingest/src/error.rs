use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file type. Please upload a .txt or .csv file.")]
    UnsupportedFileType { extension: Option<String> },

    #[error("Select both a document id column and a text column for CSV input.")]
    MissingColumnSelection,

    #[error("Selected columns '{id_column}' or '{text_column}' not found in CSV.")]
    ColumnNotFound {
        id_column: String,
        text_column: String,
    },

    #[error("Error processing file: failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error processing file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error processing file: CSV has no header row")]
    MissingHeader,
}
