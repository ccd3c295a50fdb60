//! SVG line chart of document-level scores.

use std::fmt::{self, Write as _};

use sentiscope_sentiment::DocumentRow;

const TITLE: &str = "Document-Level Sentiment Scores";
const X_LABEL: &str = "Document ID";
const Y_LABEL: &str = "Sentiment Score";

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// Tick labels beyond this count are thinned out along the x axis.
const MAX_X_LABELS: usize = 20;
const Y_TICKS: usize = 5;

const LINE_COLOR: &str = "#1f77b4";
const ZERO_COLOR: &str = "#d62728";

/// Plot area in pixel space plus the score range it maps.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn new(width: u32, height: u32, scores: &[f64]) -> Self {
        let (y_min, y_max) = score_range(scores);
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (f64::from(width) - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (f64::from(height) - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            y_min,
            y_max,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn x(&self, idx: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.left + self.width / 2.0;
        }
        self.left + self.width * idx as f64 / (count - 1) as f64
    }

    fn y(&self, score: f64) -> f64 {
        self.top + (self.y_max - score) / (self.y_max - self.y_min) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Score range always containing zero, padded by a tenth; flat data gets `[-1, 1]`.
fn score_range(scores: &[f64]) -> (f64, f64) {
    let lo = scores.iter().copied().fold(0.0_f64, f64::min);
    let hi = scores.iter().copied().fold(0.0_f64, f64::max);
    if hi - lo < f64::EPSILON {
        return (-1.0, 1.0);
    }
    let pad = (hi - lo) * 0.1;
    (lo - pad, hi + pad)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render document scores in input order as an SVG line chart.
///
/// Returns `None` when there is nothing to plot.
///
/// # Errors
///
/// Propagates a formatting error from writing the markup.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn render_svg(
    documents: &[DocumentRow],
    width: u32,
    height: u32,
) -> Result<Option<String>, fmt::Error> {
    if documents.is_empty() {
        return Ok(None);
    }

    let scores: Vec<f64> = documents.iter().map(|d| d.doc_senti_score).collect();
    let frame = Frame::new(width, height, &scores);
    let count = documents.len();
    let mut svg = String::new();

    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif" font-size="12">"#
    )?;
    writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="16">{TITLE}</text>"#,
        f64::from(width) / 2.0,
        MARGIN_TOP / 2.0
    )?;

    // Axes.
    writeln!(
        svg,
        r#"<line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="black"/>"#,
        l = frame.left,
        r = frame.right(),
        b = frame.bottom()
    )?;
    writeln!(
        svg,
        r#"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="black"/>"#,
        l = frame.left,
        t = frame.top,
        b = frame.bottom()
    )?;

    for tick in 0..=Y_TICKS {
        let value = frame.y_min + (frame.y_max - frame.y_min) * tick as f64 / Y_TICKS as f64;
        let y = frame.y(value);
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle">{value:.2}</text>"#,
            frame.left - 8.0,
            y
        )?;
    }

    let step = count.div_ceil(MAX_X_LABELS);
    for (idx, doc) in documents.iter().enumerate().step_by(step) {
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            frame.x(idx, count),
            frame.bottom() + 18.0,
            escape_xml(&doc.doc_id.to_string())
        )?;
    }

    let zero = frame.y(0.0);
    writeln!(
        svg,
        r#"<line x1="{l:.1}" y1="{zero:.1}" x2="{r:.1}" y2="{zero:.1}" stroke="{ZERO_COLOR}" stroke-dasharray="6 4"/>"#,
        l = frame.left,
        r = frame.right()
    )?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" fill="{ZERO_COLOR}">Neutral</text>"#,
        frame.right() - 4.0,
        zero - 6.0
    )?;

    let points = scores
        .iter()
        .enumerate()
        .map(|(idx, score)| format!("{:.1},{:.1}", frame.x(idx, count), frame.y(*score)))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(
        svg,
        r#"<polyline points="{points}" fill="none" stroke="{LINE_COLOR}" stroke-width="2"/>"#
    )?;

    for (idx, doc) in documents.iter().enumerate() {
        writeln!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{LINE_COLOR}"><title>{}: {}</title></circle>"#,
            frame.x(idx, count),
            frame.y(doc.doc_senti_score),
            escape_xml(&doc.doc_id.to_string()),
            doc.doc_senti_score
        )?;
    }

    writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{X_LABEL}</text>"#,
        frame.left + frame.width / 2.0,
        f64::from(height) - 15.0
    )?;
    writeln!(
        svg,
        r#"<text x="18" y="{y:.1}" text-anchor="middle" transform="rotate(-90 18 {y:.1})">{Y_LABEL}</text>"#,
        y = frame.top + frame.height / 2.0
    )?;
    svg.push_str("</svg>\n");

    tracing::debug!(documents = count, width, height, "chart rendered");
    Ok(Some(svg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiscope_sentiment::{DocId, SentimentLabel};

    fn doc(id: impl Into<DocId>, score: f64) -> DocumentRow {
        DocumentRow {
            doc_id: id.into(),
            doc_senti_score: score,
            doc_sentiment_label: SentimentLabel::from_compound(score),
        }
    }

    #[test]
    fn no_documents_no_chart() {
        assert!(render_svg(&[], 800, 450).unwrap().is_none());
    }

    #[test]
    fn chart_has_title_axes_and_zero_marker() {
        let svg = render_svg(&[doc(1_usize, 0.44), doc(3_usize, -0.542)], 800, 450)
            .unwrap()
            .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(TITLE));
        assert!(svg.contains(X_LABEL));
        assert!(svg.contains(Y_LABEL));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains(">Neutral</text>"));
    }

    #[test]
    fn one_marker_per_document() {
        let docs = vec![doc("A", 0.5), doc("B", -0.2), doc("C", 0.0)];
        let svg = render_svg(&docs, 800, 450).unwrap().unwrap();
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("<title>B: -0.2</title>"));
    }

    #[test]
    fn ids_are_escaped() {
        let svg = render_svg(&[doc("Q&A <1>", 0.1)], 800, 450).unwrap().unwrap();
        assert!(svg.contains("Q&amp;A &lt;1&gt;"));
        assert!(!svg.contains("Q&A"));
    }

    #[test]
    fn range_includes_zero() {
        let (lo, hi) = score_range(&[0.3, 0.6]);
        assert!(lo < 0.0);
        assert!(hi > 0.6);
        let (lo, hi) = score_range(&[-0.4]);
        assert!(lo < -0.4);
        assert!(hi > 0.0);
    }

    #[test]
    fn flat_scores_use_unit_range() {
        assert_eq!(score_range(&[0.0, 0.0]), (-1.0, 1.0));
    }

    #[test]
    fn zero_line_sits_mid_plot_for_flat_scores() {
        let frame = Frame::new(800, 450, &[0.0]);
        let mid = frame.top + frame.height / 2.0;
        assert!((frame.y(0.0) - mid).abs() < 1e-9);
    }

    #[test]
    fn single_document_is_centered() {
        let frame = Frame::new(800, 450, &[0.5]);
        assert!((frame.x(0, 1) - (frame.left + frame.width / 2.0)).abs() < 1e-9);
    }
}
