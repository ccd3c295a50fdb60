//! Rendering and persisting corpus results.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Args, ValueEnum};
use sentiscope_core::AppConfig;
use sentiscope_sentiment::{CorpusAnalysis, DocumentRow, SentenceRow};
use serde::Serialize;

use crate::chart;

/// Widest cell printed in aligned tables before truncation.
pub(crate) const MAX_CELL_WIDTH: usize = 60;

const SENTENCE_HEADERS: [&str; 8] = [
    "doc_ID",
    "sent_ID",
    "sentence",
    "compound",
    "neg",
    "neu",
    "pos",
    "sentiment_label",
];
const DOCUMENT_HEADERS: [&str; 3] = ["doc_ID", "doc_senti_score", "doc_sentiment_label"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
    Markdown,
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct OutputArgs {
    /// Stdout format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub(crate) format: OutputFormat,

    /// Directory to write sentences.csv and documents.csv into
    #[arg(long, global = true)]
    pub(crate) out_dir: Option<PathBuf>,

    /// Path of an SVG chart of document scores
    #[arg(long, global = true)]
    pub(crate) chart: Option<PathBuf>,
}

/// Print `analysis` and write any requested files.
///
/// # Errors
///
/// Returns an error if rendering fails or an output file cannot be written.
pub(crate) fn emit(
    analysis: &CorpusAnalysis,
    args: &OutputArgs,
    config: &AppConfig,
    source: &str,
) -> anyhow::Result<()> {
    print!("{}", render(analysis, args.format, source)?);

    if let Some(dir) = &args.out_dir {
        write_tables(analysis, dir)?;
    }

    if let Some(path) = &args.chart {
        let svg =
            chart::render_svg(&analysis.documents, config.chart_width, config.chart_height)?;
        match svg {
            Some(svg) => {
                std::fs::write(path, svg)
                    .with_context(|| format!("failed to write chart {}", path.display()))?;
                tracing::info!(path = %path.display(), "chart written");
            }
            None => tracing::warn!("no document scores to chart; skipping chart"),
        }
    }

    Ok(())
}

/// Render `analysis` for stdout in the requested format.
///
/// # Errors
///
/// Returns an error if CSV or JSON serialization fails.
pub(crate) fn render(
    analysis: &CorpusAnalysis,
    format: OutputFormat,
    source: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_tables(analysis)),
        OutputFormat::Csv => {
            let mut out = to_csv(&analysis.sentences, &SENTENCE_HEADERS)?;
            out.push('\n');
            out.push_str(&to_csv(&analysis.documents, &DOCUMENT_HEADERS)?);
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(analysis)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Markdown => Ok(render_markdown(analysis, source)?),
    }
}

/// Write `sentences.csv` and `documents.csv` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory or either file cannot be written.
pub(crate) fn write_tables(analysis: &CorpusAnalysis, dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let sentences = dir.join("sentences.csv");
    std::fs::write(&sentences, to_csv(&analysis.sentences, &SENTENCE_HEADERS)?)
        .with_context(|| format!("failed to write {}", sentences.display()))?;

    let documents = dir.join("documents.csv");
    std::fs::write(&documents, to_csv(&analysis.documents, &DOCUMENT_HEADERS)?)
        .with_context(|| format!("failed to write {}", documents.display()))?;

    tracing::info!(
        dir = %dir.display(),
        sentences = analysis.sentences.len(),
        documents = analysis.documents.len(),
        "tables written"
    );
    Ok(())
}

/// Serialize rows as CSV. The header is written even when there are no rows.
fn to_csv<R: Serialize>(rows: &[R], headers: &[&str]) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}

fn sentence_cells(row: &SentenceRow) -> Vec<String> {
    vec![
        row.doc_id.to_string(),
        row.sent_id.to_string(),
        row.sentence.clone(),
        row.compound.to_string(),
        row.neg.to_string(),
        row.neu.to_string(),
        row.pos.to_string(),
        row.sentiment_label.to_string(),
    ]
}

fn document_cells(row: &DocumentRow) -> Vec<String> {
    vec![
        row.doc_id.to_string(),
        row.doc_senti_score.to_string(),
        row.doc_sentiment_label.to_string(),
    ]
}

fn render_tables(analysis: &CorpusAnalysis) -> String {
    if analysis.is_empty() {
        return "no documents with scorable text\n".to_string();
    }

    let headers = |h: &[&str]| h.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
    let sentences: Vec<Vec<String>> = analysis.sentences.iter().map(sentence_cells).collect();
    let documents: Vec<Vec<String>> = analysis.documents.iter().map(document_cells).collect();

    let mut out = String::from("SENTENCES\n");
    out.push_str(&render_grid(&headers(&SENTENCE_HEADERS), &sentences, MAX_CELL_WIDTH));
    out.push_str("\nDOCUMENTS\n");
    out.push_str(&render_grid(&headers(&DOCUMENT_HEADERS), &documents, MAX_CELL_WIDTH));
    out
}

fn truncate(cell: &str, max_width: usize) -> String {
    if cell.chars().count() <= max_width {
        return cell.to_string();
    }
    let kept: String = cell.chars().take(max_width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Left-aligned columns separated by two spaces. Newlines inside cells are flattened.
pub(crate) fn render_grid(headers: &[String], rows: &[Vec<String>], max_width: usize) -> String {
    let clean = |cell: &str| truncate(&cell.replace(['\r', '\n'], " "), max_width);
    let header_cells: Vec<String> = headers.iter().map(|h| clean(h)).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| clean(c)).collect())
        .collect();

    let columns = body
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header_cells.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&header_cells).chain(body.iter()) {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header_cells).chain(body.iter()) {
        let line = row
            .iter()
            .enumerate()
            .map(|(idx, cell)| format!("{cell:<width$}", width = widths[idx]))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn md_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn render_markdown(
    analysis: &CorpusAnalysis,
    source: &str,
) -> Result<String, fmt::Error> {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");
    let mut out = String::new();

    writeln!(out, "# Sentiment Report")?;
    writeln!(out)?;
    writeln!(out, "**Generated**: {now}")?;
    writeln!(out, "**Source**: {}", md_cell(source))?;
    writeln!(out, "**Documents**: {}", analysis.documents.len())?;
    writeln!(out, "**Sentences**: {}", analysis.sentences.len())?;
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;

    if analysis.is_empty() {
        writeln!(out, "No documents with scorable text.")?;
        return Ok(out);
    }

    writeln!(out, "## Documents")?;
    writeln!(out)?;
    writeln!(out, "| Document | Score | Label |")?;
    writeln!(out, "|----------|-------|-------|")?;
    for doc in &analysis.documents {
        writeln!(
            out,
            "| {} | {} | {} |",
            md_cell(&doc.doc_id.to_string()),
            doc.doc_senti_score,
            doc.doc_sentiment_label
        )?;
    }

    writeln!(out)?;
    writeln!(out, "## Sentences")?;
    writeln!(out)?;
    writeln!(
        out,
        "| Document | Sentence # | Sentence | Compound | Neg | Neu | Pos | Label |"
    )?;
    writeln!(
        out,
        "|----------|------------|----------|----------|-----|-----|-----|-------|"
    )?;
    for s in &analysis.sentences {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            md_cell(&s.doc_id.to_string()),
            s.sent_id,
            md_cell(&s.sentence),
            s.compound,
            s.neg,
            s.neu,
            s.pos,
            s.sentiment_label
        )?;
    }
    Ok(out)
}
