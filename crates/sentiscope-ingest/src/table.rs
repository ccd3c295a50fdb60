//! CSV input with caller-selected id and text columns.

use crate::error::IngestError;

/// Which CSV columns hold document ids and document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    pub id_column: String,
    pub text_column: String,
}

impl ColumnSelection {
    #[must_use]
    pub fn new(id_column: impl Into<String>, text_column: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
            text_column: text_column.into(),
        }
    }

    /// Default pick for a header: first column for ids, second (or first) for text.
    #[must_use]
    pub fn suggest(columns: &[String]) -> Option<Self> {
        let id = columns.first()?;
        let text = columns.get(1).unwrap_or(id);
        Some(Self::new(id.clone(), text.clone()))
    }
}

/// Documents read from a CSV file, ids and texts in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedDocuments {
    pub ids: Vec<String>,
    pub texts: Vec<String>,
}

impl KeyedDocuments {
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Header plus the first rows of a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes())
}

fn headers(rdr: &mut csv::Reader<&[u8]>) -> Result<Vec<String>, IngestError> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(IngestError::MissingHeader);
    }
    Ok(headers)
}

/// Column names of a CSV document.
///
/// # Errors
///
/// Returns [`IngestError`] if the CSV is malformed or has no header row.
pub fn csv_columns(text: &str) -> Result<Vec<String>, IngestError> {
    headers(&mut reader(text))
}

/// Read the id and text columns named by `selection`. Every other column is ignored.
///
/// Rows shorter than the header yield empty cells, which become blank documents.
///
/// # Errors
///
/// Returns [`IngestError::ColumnNotFound`] if either column is missing, or a
/// CSV error if the file cannot be parsed.
pub fn read_keyed_documents(
    text: &str,
    selection: &ColumnSelection,
) -> Result<KeyedDocuments, IngestError> {
    let mut rdr = reader(text);
    let columns = headers(&mut rdr)?;

    let position = |name: &str| columns.iter().position(|c| c == name);
    let (Some(id_idx), Some(text_idx)) = (
        position(&selection.id_column),
        position(&selection.text_column),
    ) else {
        return Err(IngestError::ColumnNotFound {
            id_column: selection.id_column.clone(),
            text_column: selection.text_column.clone(),
        });
    };

    let mut docs = KeyedDocuments::default();
    for record in rdr.records() {
        let record = record?;
        docs.ids
            .push(record.get(id_idx).unwrap_or_default().to_string());
        docs.texts
            .push(record.get(text_idx).unwrap_or_default().to_string());
    }

    tracing::debug!(
        rows = docs.len(),
        id_column = %selection.id_column,
        text_column = %selection.text_column,
        "csv documents read"
    );
    Ok(docs)
}

/// Header and up to `rows` data rows.
///
/// # Errors
///
/// Returns [`IngestError`] if the CSV is malformed or has no header row.
pub fn preview_csv(text: &str, rows: usize) -> Result<TablePreview, IngestError> {
    let mut rdr = reader(text);
    let columns = headers(&mut rdr)?;
    let rows = rdr
        .records()
        .take(rows)
        .map(|r| r.map(|rec| rec.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
    Ok(TablePreview { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "id,text,extra\nA,Great!,x\nB,Terrible.,y\n";

    #[test]
    fn reads_selected_columns_in_file_order() {
        let docs = read_keyed_documents(SAMPLE, &ColumnSelection::new("id", "text")).unwrap();
        assert_eq!(docs.ids, vec!["A", "B"]);
        assert_eq!(docs.texts, vec!["Great!", "Terrible."]);
    }

    #[test]
    fn quoted_text_with_commas_and_newlines() {
        let csv = "key,body\n7,\"Hello, world. Bye\nnow.\"\n";
        let docs = read_keyed_documents(csv, &ColumnSelection::new("key", "body")).unwrap();
        assert_eq!(docs.ids, vec!["7"]);
        assert_eq!(docs.texts, vec!["Hello, world. Bye\nnow."]);
    }

    #[test]
    fn unknown_column_is_reported_with_both_names() {
        let err = read_keyed_documents(SAMPLE, &ColumnSelection::new("id", "body")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Selected columns 'id' or 'body' not found in CSV."
        );
    }

    #[test]
    fn short_rows_produce_empty_cells() {
        let csv = "id,text\nA\nB,fine\n";
        let docs = read_keyed_documents(csv, &ColumnSelection::new("id", "text")).unwrap();
        assert_eq!(docs.texts, vec!["", "fine"]);
    }

    #[test]
    fn same_column_may_serve_as_id_and_text() {
        let csv = "text\nhello\n";
        let docs = read_keyed_documents(csv, &ColumnSelection::new("text", "text")).unwrap();
        assert_eq!(docs.ids, vec!["hello"]);
        assert_eq!(docs.texts, vec!["hello"]);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(csv_columns(""), Err(IngestError::MissingHeader)));
    }

    #[test]
    fn suggest_uses_first_and_second_columns() {
        let cols = vec!["id".to_string(), "text".to_string(), "extra".to_string()];
        assert_eq!(
            ColumnSelection::suggest(&cols),
            Some(ColumnSelection::new("id", "text"))
        );
    }

    #[test]
    fn suggest_with_single_column_reuses_it() {
        let cols = vec!["only".to_string()];
        assert_eq!(
            ColumnSelection::suggest(&cols),
            Some(ColumnSelection::new("only", "only"))
        );
        assert_eq!(ColumnSelection::suggest(&[]), None);
    }

    #[test]
    fn preview_limits_rows() {
        let preview = preview_csv(SAMPLE, 1).unwrap();
        assert_eq!(preview.columns, vec!["id", "text", "extra"]);
        assert_eq!(preview.rows, vec![vec!["A", "Great!", "x"]]);
    }
}
