//! End-to-end corpus properties with the built-in segmenter and scorer.

use sentiscope_sentiment::{
    analyze_lines, CorpusAnalyzer, DocId, PunktSegmenter, SentimentLabel, VaderScorer,
};

fn analyzer() -> CorpusAnalyzer {
    CorpusAnalyzer::new(PunktSegmenter::english(), VaderScorer::new())
}

fn decimals(value: f64) -> usize {
    let s = value.to_string();
    s.split_once('.').map_or(0, |(_, frac)| frac.len())
}

#[test]
fn single_sentence_aggregate_equals_sentence_compound() {
    for doc in ["Good day.", "Terrible.", "The food is not good.", "Great!"] {
        let analysis = analyzer().process_corpus(&[doc]).unwrap();
        assert_eq!(analysis.sentences.len(), 1, "doc {doc:?}");
        assert_eq!(
            analysis.documents[0].doc_senti_score, analysis.sentences[0].compound,
            "doc {doc:?}"
        );
    }
}

#[test]
fn whitespace_documents_produce_no_rows() {
    let analysis = analyzer().process_corpus(&["", "   ", "\t \t"]).unwrap();
    assert!(analysis.sentences.is_empty());
    assert!(analysis.documents.is_empty());
}

#[test]
fn every_score_has_at_most_three_decimals() {
    let docs = [
        "I love this phone. The battery is terrible!",
        "Not bad at all, but the screen is VERY dim.",
        "The service was slow?? Food was amazing though.",
    ];
    let analysis = analyzer().process_corpus(&docs).unwrap();
    for row in &analysis.sentences {
        for v in [row.compound, row.neg, row.neu, row.pos] {
            assert!(decimals(v) <= 3, "{v} in {:?}", row.sentence);
        }
    }
    for row in &analysis.documents {
        assert!(decimals(row.doc_senti_score) <= 3);
    }
}

#[test]
fn empty_document_is_skipped_but_keeps_its_position() {
    let analysis = analyzer()
        .process_corpus(&["Good day.", "", "Bad day."])
        .unwrap();
    let ids: Vec<&DocId> = analysis.documents.iter().map(|d| &d.doc_id).collect();
    assert_eq!(ids, vec![&DocId::Position(1), &DocId::Position(3)]);
    assert_eq!(analysis.documents[0].doc_senti_score, 0.44);
    assert_eq!(
        analysis.documents[0].doc_sentiment_label,
        SentimentLabel::Positive
    );
    assert_eq!(analysis.documents[1].doc_senti_score, -0.542);
    assert_eq!(
        analysis.documents[1].doc_sentiment_label,
        SentimentLabel::Negative
    );
}

#[test]
fn keyed_documents_keep_file_order_and_sign_labels() {
    let analysis = analyzer()
        .process_corpus_with_ids(&["Great!", "Terrible."], &["A", "B"])
        .unwrap();
    assert_eq!(analysis.documents.len(), 2);

    let a = &analysis.documents[0];
    assert_eq!(a.doc_id, DocId::from("A"));
    assert!(a.doc_senti_score > 0.0);
    assert_eq!(a.doc_sentiment_label, SentimentLabel::Positive);

    let b = &analysis.documents[1];
    assert_eq!(b.doc_id, DocId::from("B"));
    assert_eq!(b.doc_senti_score, -0.477);
    assert_eq!(b.doc_sentiment_label, SentimentLabel::Negative);
}

#[test]
fn multi_sentence_document_sums_sentence_scores() {
    let analysis = analyzer()
        .process_corpus(&["Good day. Bad day."])
        .unwrap();
    assert_eq!(analysis.sentences.len(), 2);
    assert_eq!(analysis.sentences[0].sent_id, 1);
    assert_eq!(analysis.sentences[1].sent_id, 2);
    assert_eq!(analysis.sentences[0].sentence, "Good day.");
    assert_eq!(analysis.sentences[1].sentence, "Bad day.");
    // 0.44 + -0.542
    assert_eq!(analysis.documents[0].doc_senti_score, -0.102);
    assert_eq!(
        analysis.documents[0].doc_sentiment_label,
        SentimentLabel::Negative
    );
}

#[test]
fn neutral_text_is_labelled_neutral() {
    let analysis = analyzer()
        .process_corpus(&["The meeting is on Tuesday."])
        .unwrap();
    assert_eq!(analysis.documents[0].doc_senti_score, 0.0);
    assert_eq!(
        analysis.documents[0].doc_sentiment_label,
        SentimentLabel::Neutral
    );
}

#[test]
fn repeated_runs_serialize_identically() {
    let docs = [
        "I love this phone. The battery is terrible!",
        "",
        "Mr. Smith was not happy... but he stayed.",
    ];
    let first = serde_json::to_string(&analyzer().process_corpus(&docs).unwrap()).unwrap();
    let second = serde_json::to_string(&analyzer().process_corpus(&docs).unwrap()).unwrap();
    let shared = serde_json::to_string(&analyze_lines(&docs).unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, shared);
}

#[test]
fn sentence_ending_in_single_letter_word_is_scored_separately() {
    let analysis = analyzer()
        .process_corpus(&["So did I. It was great."])
        .unwrap();
    let sentences: Vec<&str> = analysis
        .sentences
        .iter()
        .map(|s| s.sentence.as_str())
        .collect();
    assert_eq!(sentences, vec!["So did I.", "It was great."]);
    assert_eq!(analysis.sentences[0].compound, 0.0);
    assert_eq!(analysis.sentences[1].compound, 0.625);
    assert_eq!(analysis.documents[0].doc_senti_score, 0.625);
}

#[test]
fn everyday_sentence_matches_reference_score() {
    let analysis = analyze_lines(&["I want to help my friend."]).unwrap();
    let row = &analysis.sentences[0];
    assert_eq!(
        (row.neg, row.neu, row.pos, row.compound),
        (0.0, 0.294, 0.706, 0.735)
    );
    assert_eq!(analysis.documents[0].doc_senti_score, 0.735);
    assert_eq!(
        analysis.documents[0].doc_sentiment_label,
        SentimentLabel::Positive
    );
}
