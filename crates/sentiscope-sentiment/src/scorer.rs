//! Rule-based polarity scorer using VADER valence heuristics.

use std::collections::HashMap;

use sentiscope_core::LexiconOverrides;

use crate::error::SentimentError;
use crate::lexicon::{
    BOOSTER_TABLE, C_INCR, EMOJI_TABLE, LEXICON_TABLE, NEGATION_TABLE, N_SCALAR,
    SPECIAL_CASE_TABLE,
};
use crate::types::{round_to, PolarityScores};

/// Normalization constant approximating the max expected summed valence.
const ALPHA: f64 = 15.0;

/// Produces the four polarity scores for one sentence.
pub trait PolarityScorer {
    /// Score a single sentence.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Scoring`] if the scorer cannot evaluate the text.
    fn polarity_scores(&self, sentence: &str) -> Result<PolarityScores, SentimentError>;
}

/// VADER-style scorer over the built-in lexicon plus optional per-instance overrides.
#[derive(Debug, Clone, Default)]
pub struct VaderScorer {
    overrides: HashMap<String, f64>,
}

impl VaderScorer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scorer whose lexicon is extended (or shadowed) by `overrides`.
    #[must_use]
    pub fn with_overrides(overrides: &LexiconOverrides) -> Self {
        Self {
            overrides: overrides
                .words
                .iter()
                .map(|(w, v)| (w.clone(), *v))
                .collect(),
        }
    }

    fn valence(&self, word_lower: &str) -> Option<f64> {
        self.overrides
            .get(word_lower)
            .or_else(|| LEXICON_TABLE.get(word_lower))
            .copied()
    }

    fn in_lexicon(&self, word_lower: &str) -> bool {
        self.valence(word_lower).is_some()
    }

    /// Score `text`, returning `neg`/`neu`/`pos` rounded to 3 places and
    /// `compound` rounded to 4.
    #[must_use]
    pub fn score(&self, text: &str) -> PolarityScores {
        let text = translate_emoji(text);
        let text = text.trim();
        let st = SentiText::new(text);
        let mut sentiments = Vec::with_capacity(st.words.len());

        for i in 0..st.words.len() {
            let lower = st.lower[i].as_str();
            if BOOSTER_TABLE.contains_key(lower) {
                sentiments.push(0.0);
                continue;
            }
            if i + 1 < st.words.len() && lower == "kind" && st.lower[i + 1] == "of" {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.sentiment_valence(&st, i));
        }

        but_check(&st.lower, &mut sentiments);
        score_valence(&sentiments, text)
    }

    fn sentiment_valence(&self, st: &SentiText, i: usize) -> f64 {
        let lower = &st.lower;
        let Some(base) = self.valence(&lower[i]) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before another sentiment word is a negator, not a sentiment.
        if lower[i] == "no" && i + 1 < lower.len() && self.in_lexicon(&lower[i + 1]) {
            valence = 0.0;
        }
        if (i > 0 && lower[i - 1] == "no")
            || (i > 1 && lower[i - 2] == "no")
            || (i > 2 && lower[i - 3] == "no" && matches!(lower[i - 1].as_str(), "or" | "nor"))
        {
            valence = base * N_SCALAR;
        }

        if is_upper(&st.words[i]) && st.is_cap_diff {
            if valence > 0.0 {
                valence += C_INCR;
            } else {
                valence -= C_INCR;
            }
        }

        for start_i in 0..3 {
            if i > start_i && !self.in_lexicon(&lower[i - (start_i + 1)]) {
                let mut s = scalar_inc_dec(&st.words[i - (start_i + 1)], valence, st.is_cap_diff);
                if start_i == 1 && s != 0.0 {
                    s *= 0.95;
                }
                if start_i == 2 && s != 0.0 {
                    s *= 0.9;
                }
                valence += s;
                valence = negation_check(valence, lower, start_i, i);
                if start_i == 2 {
                    valence = special_idioms_check(valence, lower, i);
                }
            }
        }

        self.least_check(valence, lower, i)
    }

    fn least_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        if i > 1 && !self.in_lexicon(&lower[i - 1]) && lower[i - 1] == "least" {
            if lower[i - 2] != "at" && lower[i - 2] != "very" {
                return valence * N_SCALAR;
            }
        } else if i > 0 && !self.in_lexicon(&lower[i - 1]) && lower[i - 1] == "least" {
            return valence * N_SCALAR;
        }
        valence
    }
}

impl PolarityScorer for VaderScorer {
    fn polarity_scores(&self, sentence: &str) -> Result<PolarityScores, SentimentError> {
        let scores = self.score(sentence);
        if [scores.neg, scores.neu, scores.pos, scores.compound]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(SentimentError::Scoring(format!(
                "non-finite score for sentence {sentence:?}"
            )));
        }
        Ok(scores)
    }
}

/// Replace each emoji code point with its description.
///
/// A description is separated from preceding text by one space unless a
/// space already precedes it; nothing is inserted after it.
fn translate_emoji(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = true;
    for c in text.chars() {
        if let Some(description) = EMOJI_TABLE.get(&c) {
            if !prev_space {
                out.push(' ');
            }
            out.push_str(description);
            prev_space = false;
        } else {
            out.push(c);
            prev_space = c == ' ';
        }
    }
    out
}

/// Tokenized view of one piece of text.
struct SentiText {
    words: Vec<String>,
    lower: Vec<String>,
    is_cap_diff: bool,
}

impl SentiText {
    fn new(text: &str) -> Self {
        let words: Vec<String> = text.split_whitespace().map(strip_punc_if_word).collect();
        let lower = words.iter().map(|w| w.to_lowercase()).collect();
        let is_cap_diff = allcap_differential(&words);
        Self {
            words,
            lower,
            is_cap_diff,
        }
    }
}

/// Strip surrounding ASCII punctuation unless that leaves two chars or fewer,
/// which keeps emoticons such as `:)` intact.
fn strip_punc_if_word(token: &str) -> String {
    let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 2 {
        token.to_string()
    } else {
        stripped.to_string()
    }
}

/// True when the token has cased characters and all of them are uppercase.
fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// True when some, but not all, tokens are ALL CAPS.
fn allcap_differential(words: &[String]) -> bool {
    let allcap_words = words.iter().filter(|w| is_upper(w)).count();
    allcap_words > 0 && allcap_words < words.len()
}

fn scalar_inc_dec(word: &str, valence: f64, is_cap_diff: bool) -> f64 {
    let Some(&booster) = BOOSTER_TABLE.get(word.to_lowercase().as_str()) else {
        return 0.0;
    };
    let mut scalar = booster;
    if valence < 0.0 {
        scalar *= -1.0;
    }
    if is_upper(word) && is_cap_diff {
        if valence > 0.0 {
            scalar += C_INCR;
        } else {
            scalar -= C_INCR;
        }
    }
    scalar
}

fn negated(word: &str) -> bool {
    NEGATION_TABLE.contains(word) || word.contains("n't")
}

fn negation_check(valence: f64, lower: &[String], start_i: usize, i: usize) -> f64 {
    let w = |offset: usize| lower[i - offset].as_str();
    match start_i {
        0 => {
            if negated(w(1)) {
                return valence * N_SCALAR;
            }
        }
        1 => {
            if w(2) == "never" && matches!(w(1), "so" | "this") {
                return valence * 1.25;
            } else if w(2) == "without" && w(1) == "doubt" {
                return valence;
            } else if negated(w(2)) {
                return valence * N_SCALAR;
            }
        }
        2 => {
            if (w(3) == "never" && matches!(w(2), "so" | "this")) || matches!(w(1), "so" | "this") {
                return valence * 1.25;
            } else if w(3) == "without" && (w(2) == "doubt" || w(1) == "doubt") {
                return valence;
            } else if negated(w(3)) {
                return valence * N_SCALAR;
            }
        }
        _ => {}
    }
    valence
}

fn special_idioms_check(mut valence: f64, lower: &[String], i: usize) -> f64 {
    let onezero = format!("{} {}", lower[i - 1], lower[i]);
    let twoonezero = format!("{} {} {}", lower[i - 2], lower[i - 1], lower[i]);
    let twoone = format!("{} {}", lower[i - 2], lower[i - 1]);
    let threetwoone = format!("{} {} {}", lower[i - 3], lower[i - 2], lower[i - 1]);
    let threetwo = format!("{} {}", lower[i - 3], lower[i - 2]);

    for seq in [&onezero, &twoonezero, &twoone, &threetwoone, &threetwo] {
        if let Some(&v) = SPECIAL_CASE_TABLE.get(seq.as_str()) {
            valence = v;
            break;
        }
    }
    if lower.len() > i + 1 {
        let zeroone = format!("{} {}", lower[i], lower[i + 1]);
        if let Some(&v) = SPECIAL_CASE_TABLE.get(zeroone.as_str()) {
            valence = v;
        }
    }
    if lower.len() > i + 2 {
        let zeroonetwo = format!("{} {} {}", lower[i], lower[i + 1], lower[i + 2]);
        if let Some(&v) = SPECIAL_CASE_TABLE.get(zeroonetwo.as_str()) {
            valence = v;
        }
    }

    // Multi-word dampeners such as "kind of" or "sort of".
    for ngram in [&threetwoone, &threetwo, &twoone] {
        if let Some(&b) = BOOSTER_TABLE.get(ngram.as_str()) {
            valence += b;
        }
    }
    valence
}

/// Halve sentiment before the first "but" and boost it by half after.
///
/// Each step rescales the first slot holding the visited value, not the
/// visited slot itself, so repeated values can be rescaled twice or skipped.
#[allow(clippy::float_cmp)]
fn but_check(lower: &[String], sentiments: &mut [f64]) {
    let Some(bi) = lower.iter().position(|w| w == "but") else {
        return;
    };
    for k in 0..sentiments.len() {
        let value = sentiments[k];
        let si = sentiments.iter().position(|s| *s == value).unwrap_or(k);
        if si < bi {
            sentiments[si] = value * 0.5;
        } else if si > bi {
            sentiments[si] = value * 1.5;
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn amplify_ep(text: &str) -> f64 {
    let ep_count = text.matches('!').count().min(4);
    ep_count as f64 * 0.292
}

#[allow(clippy::cast_precision_loss)]
fn amplify_qm(text: &str) -> f64 {
    let qm_count = text.matches('?').count();
    match qm_count {
        0 | 1 => 0.0,
        2 | 3 => qm_count as f64 * 0.18,
        _ => 0.96,
    }
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::ZERO;
    }

    let punct_emph = amplify_ep(text) + amplify_qm(text);
    let mut sum_s: f64 = sentiments.iter().sum();
    if sum_s > 0.0 {
        sum_s += punct_emph;
    } else if sum_s < 0.0 {
        sum_s -= punct_emph;
    }
    let compound = normalize(sum_s);

    // Sentiment words count one extra unit so neutral words weigh as one each.
    let mut pos_sum = 0.0_f64;
    let mut neg_sum = 0.0_f64;
    let mut neu_count = 0.0_f64;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        }
        if s < 0.0 {
            neg_sum += s - 1.0;
        }
        if s == 0.0 {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += punct_emph;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= punct_emph;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    PolarityScores {
        neg: round_to((neg_sum / total).abs(), 3),
        neu: round_to((neu_count / total).abs(), 3),
        pos: round_to((pos_sum / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn compound(text: &str) -> f64 {
        VaderScorer::new().score(text).compound
    }

    #[test]
    fn empty_string_scores_zero() {
        assert_eq!(VaderScorer::new().score(""), PolarityScores::ZERO);
    }

    #[test]
    fn whitespace_only_scores_zero() {
        assert_eq!(VaderScorer::new().score("   \t "), PolarityScores::ZERO);
    }

    #[test]
    fn unknown_words_are_fully_neutral() {
        let scores = VaderScorer::new().score("the quick brown fox");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neu, 1.0);
        assert_eq!(scores.pos, 0.0);
        assert_eq!(scores.neg, 0.0);
    }

    #[test]
    fn single_positive_word_matches_normalized_valence() {
        let scores = VaderScorer::new().score("Good day.");
        assert_eq!(scores.compound, 0.4404);
        assert_eq!(scores.pos, 0.744);
        assert_eq!(scores.neu, 0.256);
        assert_eq!(scores.neg, 0.0);
    }

    #[test]
    fn single_negative_word_matches_normalized_valence() {
        assert_eq!(compound("Bad day."), -0.5423);
        assert_eq!(compound("Terrible."), -0.4767);
    }

    fn scores(neg: f64, neu: f64, pos: f64, compound: f64) -> PolarityScores {
        PolarityScores {
            neg,
            neu,
            pos,
            compound,
        }
    }

    #[test]
    fn matches_reference_scores_for_everyday_text() {
        let scorer = VaderScorer::new();
        let cases = [
            ("I want to help my friend.", scores(0.0, 0.294, 0.706, 0.7351)),
            ("The book was good.", scores(0.0, 0.508, 0.492, 0.4404)),
            ("The book was only kind of good.", scores(0.0, 0.697, 0.303, 0.3832)),
            ("At least it isn't a horrible book.", scores(0.0, 0.678, 0.322, 0.431)),
            ("Not bad at all", scores(0.0, 0.513, 0.487, 0.431)),
            ("Today SUX!", scores(0.779, 0.221, 0.0, -0.5461)),
            ("Make sure you :) or :D today!", scores(0.0, 0.294, 0.706, 0.8633)),
            ("Great!", scores(0.0, 0.0, 1.0, 0.6588)),
            ("Terrible.", scores(1.0, 0.0, 0.0, -0.4767)),
        ];
        for (text, expected) in cases {
            assert_eq!(scorer.score(text), expected, "{text}");
        }
    }

    #[test]
    fn matches_reference_scores_for_emphasis() {
        let scorer = VaderScorer::new();
        let cases = [
            ("VADER is smart, handsome, and funny.", scores(0.0, 0.254, 0.746, 0.8316)),
            ("VADER is smart, handsome, and funny!", scores(0.0, 0.248, 0.752, 0.8439)),
            ("VADER is very smart, handsome, and funny.", scores(0.0, 0.299, 0.701, 0.8545)),
            ("VADER is VERY SMART, handsome, and FUNNY.", scores(0.0, 0.246, 0.754, 0.9227)),
            ("VADER is VERY SMART, handsome, and FUNNY!!!", scores(0.0, 0.233, 0.767, 0.9342)),
            (
                "VADER is VERY SMART, uber handsome, and FRIGGIN FUNNY!!!",
                scores(0.0, 0.294, 0.706, 0.9469),
            ),
            ("VADER is not smart, handsome, nor funny.", scores(0.646, 0.354, 0.0, -0.7424)),
        ];
        for (text, expected) in cases {
            assert_eq!(scorer.score(text), expected, "{text}");
        }
    }

    #[test]
    fn matches_reference_scores_around_but() {
        let scorer = VaderScorer::new();
        let cases = [
            (
                "The plot was good, but the characters are uncompelling and the dialog is not great.",
                scores(0.327, 0.579, 0.094, -0.7042),
            ),
            (
                "The food was good, but the service was terrible.",
                scores(0.317, 0.534, 0.149, -0.4939),
            ),
            (
                "Today only kinda sux! But I'll get by, lol",
                scores(0.127, 0.556, 0.317, 0.5249),
            ),
            ("Not great but not bad either.", scores(0.216, 0.403, 0.38, 0.3875)),
            ("The room was okay but the staff was nice.", scores(0.0, 0.576, 0.424, 0.631)),
        ];
        for (text, expected) in cases {
            assert_eq!(scorer.score(text), expected, "{text}");
        }
    }

    #[test]
    fn but_rescales_first_matching_value() {
        // "nice" (1.8) halves to 0.9, the valence of "okay"; visiting "okay"
        // then halves the "nice" slot again and leaves "okay" unboosted.
        let actual = VaderScorer::new().score("The staff was nice but the room was okay.");
        assert_eq!(actual, scores(0.0, 0.676, 0.324, 0.3291));
    }

    #[test]
    fn but_check_rescales_in_place() {
        let lower: Vec<String> = ["nice", "but", "okay"].iter().map(|w| (*w).to_string()).collect();
        let mut sentiments = vec![1.8, 0.0, 0.9];
        but_check(&lower, &mut sentiments);
        assert_eq!(sentiments, vec![0.45, 0.0, 0.9]);

        let lower: Vec<String> = ["good", "but", "bad"].iter().map(|w| (*w).to_string()).collect();
        let mut sentiments = vec![1.9, 0.0, -2.5];
        but_check(&lower, &mut sentiments);
        assert_eq!(sentiments, vec![0.95, 0.0, -3.75]);
    }

    #[test]
    fn emoji_are_scored_through_their_descriptions() {
        let scorer = VaderScorer::new();
        assert_eq!(scorer.score("😀"), scores(0.0, 0.286, 0.714, 0.3612));
        assert_eq!(scorer.score("I love you 😀"), scores(0.0, 0.309, 0.691, 0.7717));
        assert_eq!(scorer.score("I love you😀"), scores(0.0, 0.309, 0.691, 0.7717));
        assert_eq!(scorer.score("I'm sad 😢"), scores(0.756, 0.244, 0.0, -0.7351));
        assert_eq!(
            scorer.score("heyyyy 😀 what're you up to???"),
            scores(0.0, 0.664, 0.336, 0.466)
        );
    }

    #[test]
    fn translate_emoji_spaces_only_before_descriptions() {
        assert_eq!(translate_emoji("hey😀there"), "hey grinning facethere");
        assert_eq!(translate_emoji("😀😀"), "grinning face grinning face");
        assert_eq!(translate_emoji("no emoji"), "no emoji");
    }

    #[test]
    fn exclamation_amplifies_positive() {
        assert!(compound("Great!") > compound("Great"));
        assert!(compound("Great!!!") > compound("Great!"));
    }

    #[test]
    fn exclamation_amplifier_caps_at_four() {
        assert_eq!(compound("Great!!!!"), compound("Great!!!!!!!!"));
    }

    #[test]
    fn question_marks_amplify_magnitude() {
        assert!(compound("Is it bad??") < compound("Is it bad"));
    }

    #[test]
    fn negation_flips_polarity() {
        let plain = compound("The food is good.");
        let negated = compound("The food is not good.");
        assert!(plain > 0.0);
        assert!(negated < 0.0, "expected negative, got {negated}");
    }

    #[test]
    fn contraction_negation_flips_polarity() {
        assert!(compound("The food isn't good.") < 0.0);
    }

    #[test]
    fn booster_intensifies() {
        assert!(compound("The food is very good.") > compound("The food is good."));
    }

    #[test]
    fn dampener_reduces() {
        assert!(compound("The food is slightly good.") < compound("The food is good."));
    }

    #[test]
    fn kind_of_dampens_instead_of_scoring_kind() {
        let damped = compound("It was kind of good");
        assert!(damped > 0.0);
        assert!(damped < compound("It was good"));
    }

    #[test]
    fn all_caps_word_in_mixed_text_is_emphasized() {
        assert!(compound("The food is GOOD.") > compound("The food is good."));
    }

    #[test]
    fn all_caps_everywhere_is_not_emphasized() {
        assert_eq!(compound("GOOD DAY"), compound("good day"));
    }

    #[test]
    fn but_shifts_weight_to_second_clause() {
        assert!(compound("The food is good, but the service is bad.") < 0.0);
        assert!(compound("The food is bad, but the service is good.") > 0.0);
    }

    #[test]
    fn least_negates() {
        assert!(compound("This is the least helpful answer") < 0.0);
    }

    #[test]
    fn no_before_sentiment_word_negates() {
        assert!(compound("There is no good option") < 0.0);
    }

    #[test]
    fn special_idiom_overrides_valence() {
        // "broken heart" scores as a fixed idiom rather than "broken" alone.
        let scores = VaderScorer::new().score("I woke up with a broken heart");
        assert!(scores.compound < 0.0);
    }

    #[test]
    fn emoticons_survive_punctuation_stripping() {
        assert!(compound("see you soon :)") > 0.0);
        assert!(compound("see you soon :(") < 0.0);
    }

    #[test]
    fn overrides_extend_lexicon() {
        let mut words = BTreeMap::new();
        words.insert("groovy".to_string(), 2.5);
        let scorer = VaderScorer::with_overrides(&LexiconOverrides { words });
        assert!(scorer.score("that was groovy").compound > 0.0);
        assert_eq!(compound("that was groovy"), 0.0);
    }

    #[test]
    fn overrides_shadow_builtin_words() {
        let mut words = BTreeMap::new();
        words.insert("sick".to_string(), 2.0);
        let scorer = VaderScorer::with_overrides(&LexiconOverrides { words });
        assert!(scorer.score("that trick was sick").compound > 0.0);
    }

    #[test]
    fn proportions_sum_to_one() {
        let s = VaderScorer::new().score("I love this phone but the battery is terrible");
        let total = s.neg + s.neu + s.pos;
        assert!((total - 1.0).abs() <= 0.002, "proportions summed to {total}");
    }

    #[test]
    fn compound_stays_within_unit_interval() {
        let text = "love love love love love love love love best best best!!!!";
        let c = compound(text);
        assert!(c <= 1.0 && c > 0.9, "got {c}");
    }

    #[test]
    fn polarity_scores_trait_wraps_score() {
        let scorer = VaderScorer::new();
        let via_trait = scorer.polarity_scores("Good day.").unwrap();
        assert_eq!(via_trait, scorer.score("Good day."));
    }
}
