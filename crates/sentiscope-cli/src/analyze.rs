//! Command handlers: load input, run the corpus processor, emit results.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use sentiscope_core::AppConfig;
use sentiscope_ingest::{ColumnSelection, Corpus, Preview};
use sentiscope_sentiment::{
    shared_analyzer, CorpusAnalysis, CorpusAnalyzer, PunktSegmenter, VaderScorer,
};

use crate::output::{self, OutputArgs};

/// The shared analyzer, or a dedicated one when lexicon overrides are configured.
///
/// # Errors
///
/// Returns an error if the configured lexicon file cannot be loaded.
pub(crate) fn build_analyzer(config: &AppConfig) -> anyhow::Result<Cow<'static, CorpusAnalyzer>> {
    let Some(path) = &config.lexicon_path else {
        return Ok(Cow::Borrowed(shared_analyzer()));
    };
    let overrides = sentiscope_core::load_lexicon_overrides(path)?;
    tracing::info!(
        path = %path.display(),
        words = overrides.len(),
        "lexicon overrides loaded"
    );
    Ok(Cow::Owned(CorpusAnalyzer::new(
        PunktSegmenter::english(),
        VaderScorer::with_overrides(&overrides),
    )))
}

/// Both columns must be named for a selection to exist.
pub(crate) fn column_selection(
    id_column: Option<String>,
    text_column: Option<String>,
) -> Option<ColumnSelection> {
    match (id_column, text_column) {
        (Some(id), Some(text)) => Some(ColumnSelection::new(id, text)),
        _ => None,
    }
}

/// Score typed text, one document per line.
///
/// # Errors
///
/// Returns an error if stdin cannot be read, a document fails to process, or
/// output cannot be written.
pub(crate) fn run_text(
    analyzer: &CorpusAnalyzer,
    text: Option<String>,
    args: &OutputArgs,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            buf
        }
    };

    let documents = sentiscope_ingest::documents_from_text(&text);
    let analysis = analyzer.process_corpus(&documents)?;
    output::emit(&analysis, args, config, "typed input")
}

/// Score a `.txt` or `.csv` file.
///
/// # Errors
///
/// Returns an error for unsupported or unreadable input, a missing column
/// selection, a failing document, or unwritable output.
pub(crate) fn run_file(
    analyzer: &CorpusAnalyzer,
    path: &Path,
    selection: Option<&ColumnSelection>,
    args: &OutputArgs,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let loaded = sentiscope_ingest::load_input(path, selection)?;
    let analysis = analyze_corpus(analyzer, &loaded.corpus)?;
    output::emit(&analysis, args, config, &path.display().to_string())
}

pub(crate) fn analyze_corpus(
    analyzer: &CorpusAnalyzer,
    corpus: &Corpus,
) -> Result<CorpusAnalysis, sentiscope_sentiment::SentimentError> {
    match corpus {
        Corpus::Lines(lines) => analyzer.process_corpus(lines),
        Corpus::Keyed(docs) => analyzer.process_corpus_with_ids(&docs.texts, &docs.ids),
    }
}

/// Print the first rows of a file.
///
/// # Errors
///
/// Returns an error for unsupported or unreadable input.
pub(crate) fn run_preview(path: &Path, rows: usize) -> anyhow::Result<()> {
    match sentiscope_ingest::preview_input(path, rows)? {
        Preview::Table { table, suggested } => {
            println!("columns: {}", table.columns.join(", "));
            if let Some(s) = suggested {
                println!(
                    "suggested: --id-column {} --text-column {}",
                    s.id_column, s.text_column
                );
            }
            println!();
            print!(
                "{}",
                output::render_grid(&table.columns, &table.rows, output::MAX_CELL_WIDTH)
            );
        }
        Preview::Lines(lines) => {
            for (idx, line) in lines.iter().enumerate() {
                println!("{:>4}  {line}", idx + 1);
            }
        }
    }
    Ok(())
}
