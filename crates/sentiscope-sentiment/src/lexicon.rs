//! Valence tables for the VADER scorer.
//!
//! The word and emoji lexicons are the VADER resource files (MIT licence, see
//! `resources/LICENSE-VADER.txt`), embedded at compile time and parsed into
//! hash maps once per process. Word valences sit on the `[-4.0, 4.0]` scale and
//! are looked up by lowercased token; keys with uppercase letters, such as
//! `:D`, therefore never match.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Scalar added by an intensifying booster word.
pub(crate) const B_INCR: f64 = 0.293;
/// Scalar added by a dampening booster word.
pub(crate) const B_DECR: f64 = -0.293;
/// Emphasis added to an ALL-CAPS sentiment word in mixed-case text.
pub(crate) const C_INCR: f64 = 0.733;
/// Multiplier applied to negated valences.
pub(crate) const N_SCALAR: f64 = -0.74;

/// VADER word valences: `token<TAB>mean<TAB>std-dev<TAB>ratings`, one per line.
const VADER_LEXICON: &str = include_str!("resources/vader_lexicon.txt");
/// Emoji descriptions: `emoji<TAB>description`, one per line.
const EMOJI_LEXICON: &str = include_str!("resources/emoji_utf8_lexicon.txt");

/// Words that scale the valence of a following lexicon word.
pub(crate) const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("amazingly", B_INCR),
    ("awfully", B_INCR),
    ("completely", B_INCR),
    ("considerable", B_INCR),
    ("considerably", B_INCR),
    ("decidedly", B_INCR),
    ("deeply", B_INCR),
    ("effing", B_INCR),
    ("enormous", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptional", B_INCR),
    ("exceptionally", B_INCR),
    ("extreme", B_INCR),
    ("extremely", B_INCR),
    ("fabulously", B_INCR),
    ("flipping", B_INCR),
    ("flippin", B_INCR),
    ("frackin", B_INCR),
    ("fracking", B_INCR),
    ("fricking", B_INCR),
    ("frickin", B_INCR),
    ("frigging", B_INCR),
    ("friggin", B_INCR),
    ("fully", B_INCR),
    ("fuckin", B_INCR),
    ("fucking", B_INCR),
    ("fuggin", B_INCR),
    ("fugging", B_INCR),
    ("greatly", B_INCR),
    ("hella", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredible", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("major", B_INCR),
    ("majorly", B_INCR),
    ("more", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("purely", B_INCR),
    ("quite", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("so", B_INCR),
    ("substantially", B_INCR),
    ("thoroughly", B_INCR),
    ("total", B_INCR),
    ("totally", B_INCR),
    ("tremendous", B_INCR),
    ("tremendously", B_INCR),
    ("uber", B_INCR),
    ("unbelievably", B_INCR),
    ("unusually", B_INCR),
    ("utter", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("just enough", B_DECR),
    ("kind of", B_DECR),
    ("kinda", B_DECR),
    ("kindof", B_DECR),
    ("kind-of", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginal", B_DECR),
    ("marginally", B_DECR),
    ("occasional", B_DECR),
    ("occasionally", B_DECR),
    ("partly", B_DECR),
    ("scarce", B_DECR),
    ("scarcely", B_DECR),
    ("slight", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
    ("sort of", B_DECR),
    ("sorta", B_DECR),
    ("sortof", B_DECR),
    ("sort-of", B_DECR),
];

pub(crate) const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

/// Multi-word phrases whose valence replaces the computed one.
pub(crate) const SPECIAL_CASES: &[(&str, f64)] = &[
    ("the shit", 3.0),
    ("the bomb", 3.0),
    ("bad ass", 1.5),
    ("badass", 1.5),
    ("bus stop", 0.0),
    ("yeah right", -2.0),
    ("kiss of death", -1.5),
    ("to die for", 3.0),
    ("beating heart", 3.1),
    ("broken heart", -2.9),
];

/// Parse tab-separated `token<TAB>valence...` rows. Later duplicates win.
fn parse_valences(data: &'static str) -> HashMap<&'static str, f64> {
    data.lines()
        .filter_map(|line| {
            let mut fields = line.trim().split('\t');
            let word = fields.next()?;
            let valence = fields.next()?.parse().ok()?;
            Some((word, valence))
        })
        .collect()
}

/// Parse `emoji<TAB>description` rows, keeping single-code-point emoji only.
///
/// Text is translated one code point at a time, so multi-code-point sequences
/// (skin tones, ZWJ families) can never match.
fn parse_emoji(data: &'static str) -> HashMap<char, &'static str> {
    data.lines()
        .filter_map(|line| {
            let mut fields = line.trim().split('\t');
            let mut chars = fields.next()?.chars();
            let emoji = chars.next()?;
            let description = fields.next()?;
            chars.next().is_none().then_some((emoji, description))
        })
        .collect()
}

pub(crate) static LEXICON_TABLE: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| parse_valences(VADER_LEXICON));

pub(crate) static EMOJI_TABLE: LazyLock<HashMap<char, &'static str>> =
    LazyLock::new(|| parse_emoji(EMOJI_LEXICON));

pub(crate) static BOOSTER_TABLE: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| BOOSTERS.iter().copied().collect());

pub(crate) static NEGATION_TABLE: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATIONS.iter().copied().collect());

pub(crate) static SPECIAL_CASE_TABLE: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| SPECIAL_CASES.iter().copied().collect());

/// Number of entries in the built-in word lexicon.
#[must_use]
pub fn lexicon_len() -> usize {
    LEXICON_TABLE.len()
}

/// Number of single-code-point emoji with a textual description.
#[must_use]
pub fn emoji_len() -> usize {
    EMOJI_TABLE.len()
}
