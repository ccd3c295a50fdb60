//! File-type dispatch for `.txt` and `.csv` inputs.

use std::path::Path;

use crate::error::IngestError;
use crate::table::{self, ColumnSelection, KeyedDocuments, TablePreview};
use crate::text::{self, decode_text, DecodedText, TextEncoding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Csv,
}

impl InputKind {
    /// Classify a path by its (case-insensitive) extension.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFileType`] for anything but `.txt` or `.csv`.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("txt") => Ok(InputKind::Text),
            Some("csv") => Ok(InputKind::Csv),
            _ => Err(IngestError::UnsupportedFileType { extension }),
        }
    }
}

/// Documents loaded from a file, ready for the corpus processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    /// One document per line; ids are line positions.
    Lines(Vec<String>),
    /// Documents keyed by a selected CSV column.
    Keyed(KeyedDocuments),
}

impl Corpus {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Corpus::Lines(lines) => lines.len(),
            Corpus::Keyed(docs) => docs.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A loaded file together with the encoding it was decoded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedInput {
    pub corpus: Corpus,
    pub encoding: TextEncoding,
}

/// First rows or lines of a file, with suggested CSV columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Table {
        table: TablePreview,
        suggested: Option<ColumnSelection>,
    },
    Lines(Vec<String>),
}

fn read_decoded(path: &Path) -> Result<DecodedText, IngestError> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(decode_text(&bytes))
}

/// Load `path` as a corpus.
///
/// `.txt` files yield one document per line. `.csv` files require a column
/// selection, checked before the file is read.
///
/// # Errors
///
/// Returns [`IngestError`] for unsupported extensions, a missing or unknown
/// column selection, unreadable files, or malformed CSV.
pub fn load_input(
    path: &Path,
    selection: Option<&ColumnSelection>,
) -> Result<LoadedInput, IngestError> {
    let kind = InputKind::from_path(path)?;
    let selection = match kind {
        InputKind::Csv => Some(selection.ok_or(IngestError::MissingColumnSelection)?),
        InputKind::Text => None,
    };

    let decoded = read_decoded(path)?;
    let corpus = match selection {
        Some(selection) => Corpus::Keyed(table::read_keyed_documents(&decoded.text, selection)?),
        None => Corpus::Lines(text::documents_from_text(&decoded.text)),
    };

    tracing::info!(
        path = %path.display(),
        kind = ?kind,
        encoding = %decoded.encoding,
        documents = corpus.len(),
        "input loaded"
    );
    Ok(LoadedInput {
        corpus,
        encoding: decoded.encoding,
    })
}

/// Preview the first `rows` rows (CSV) or lines (TXT) of `path`.
///
/// # Errors
///
/// Returns [`IngestError`] for unsupported extensions, unreadable files, or
/// malformed CSV.
pub fn preview_input(path: &Path, rows: usize) -> Result<Preview, IngestError> {
    let kind = InputKind::from_path(path)?;
    let decoded = read_decoded(path)?;
    match kind {
        InputKind::Csv => {
            let table = table::preview_csv(&decoded.text, rows)?;
            let suggested = ColumnSelection::suggest(&table.columns);
            Ok(Preview::Table { table, suggested })
        }
        InputKind::Text => Ok(Preview::Lines(
            text::split_lines(&decoded.text)
                .into_iter()
                .take(rows)
                .map(str::to_string)
                .collect(),
        )),
    }
}
