//! Punkt sentence boundary detection (Kiss & Strunk, 2006).
//!
//! Runs the unsupervised Punkt decision procedure against pre-trained English
//! parameters (`resources/punkt_english.json`, MIT licence, see
//! `resources/LICENSE-PUNKT.txt`): abbreviation types, collocations, frequent
//! sentence starters and the orthographic context of each word type.
//!
//! Only `.`, `?` and `!` can end a sentence. A period ends one unless the
//! token before it is a known abbreviation, an initial or an ordinal that the
//! orthographic evidence about the following word says runs on.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

const ENGLISH_PARAMETERS: &str = include_str!("resources/punkt_english.json");

const ORTHO_BEG_UC: u8 = 1 << 1;
const ORTHO_MID_UC: u8 = 1 << 2;
const ORTHO_UNK_UC: u8 = 1 << 3;
const ORTHO_BEG_LC: u8 = 1 << 4;
const ORTHO_MID_LC: u8 = 1 << 5;
const ORTHO_UNK_LC: u8 = 1 << 6;
const ORTHO_UC: u8 = ORTHO_BEG_UC | ORTHO_MID_UC | ORTHO_UNK_UC;
const ORTHO_LC: u8 = ORTHO_BEG_LC | ORTHO_MID_LC | ORTHO_UNK_LC;

const NUMBER_TYPE: &str = "##number##";

static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[.,]?\d[\d,.\-]*\.?$").expect("numeric pattern is valid")
});

static INITIAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\W\d]\.$").expect("initial pattern is valid"));

static ENGLISH: LazyLock<Result<PunktParameters, String>> = LazyLock::new(|| {
    serde_json::from_str(ENGLISH_PARAMETERS).map_err(|e| format!("punkt parameters: {e}"))
});

/// Trained Punkt model. Word types are lowercased; numbers collapse to `##number##`.
#[derive(Debug, Deserialize)]
pub(crate) struct PunktParameters {
    abbrev_types: HashSet<String>,
    collocations: HashSet<(String, String)>,
    sentence_starters: HashSet<String>,
    ortho_context: HashMap<String, u8>,
}

impl PunktParameters {
    /// The bundled English model, parsed on first use.
    pub(crate) fn english() -> Result<&'static Self, &'static str> {
        ENGLISH.as_ref().map_err(String::as_str)
    }

    pub(crate) fn abbreviation_count(&self) -> usize {
        self.abbrev_types.len()
    }

    fn ortho(&self, typ: &str) -> u8 {
        self.ortho_context.get(typ).copied().unwrap_or(0)
    }
}

/// Orthographic verdict on whether a word starts a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ortho {
    Starter,
    NotStarter,
    Unknown,
}

#[derive(Debug)]
struct Token {
    tok: String,
    typ: String,
    period_final: bool,
    sentbreak: bool,
    abbr: bool,
    ellipsis: bool,
}

impl Token {
    fn new(tok: &str) -> Self {
        let lower = tok.to_lowercase();
        let typ = if NUMERIC_REGEX.is_match(&lower) {
            NUMBER_TYPE.to_string()
        } else {
            lower
        };
        Self {
            tok: tok.to_string(),
            typ,
            period_final: tok.ends_with('.'),
            sentbreak: false,
            abbr: false,
            ellipsis: false,
        }
    }

    fn type_no_period(&self) -> &str {
        if self.typ.len() > 1 {
            self.typ.strip_suffix('.').unwrap_or(&self.typ)
        } else {
            &self.typ
        }
    }

    fn type_no_sentperiod(&self) -> &str {
        if self.sentbreak {
            self.type_no_period()
        } else {
            &self.typ
        }
    }

    fn first_upper(&self) -> bool {
        self.tok.chars().next().is_some_and(char::is_uppercase)
    }

    fn first_lower(&self) -> bool {
        self.tok.chars().next().is_some_and(char::is_lowercase)
    }

    fn is_ellipsis(&self) -> bool {
        self.tok.len() > 1 && self.tok.chars().all(|c| c == '.')
    }

    fn is_initial(&self) -> bool {
        INITIAL_REGEX.is_match(&self.tok)
    }
}

/// Sentence spans (byte ranges) of `text` under the given model.
pub(crate) fn sentence_spans(
    params: &PunktParameters,
    extra_abbreviations: &HashSet<String>,
    text: &str,
) -> Vec<(usize, usize)> {
    let annotator = Annotator {
        params,
        extra_abbreviations,
    };
    let mut slices = Vec::new();
    let mut last_break = 0;
    for (period, context_start) in potential_ends(text) {
        if annotator.contains_sentbreak(&text[context_start..period.after_end]) {
            slices.push((last_break, period.end));
            last_break = period.next_token.unwrap_or(period.end);
        }
    }
    slices.push((last_break, text.trim_end().len()));
    realign_boundaries(text, &slices)
}

struct Annotator<'a> {
    params: &'a PunktParameters,
    extra_abbreviations: &'a HashSet<String>,
}

impl Annotator<'_> {
    fn is_abbreviation(&self, typ: &str) -> bool {
        self.params.abbrev_types.contains(typ) || self.extra_abbreviations.contains(typ)
    }

    /// A break is found on any token except the last.
    fn contains_sentbreak(&self, context: &str) -> bool {
        let mut tokens: Vec<Token> = context
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .flat_map(word_tokens)
            .map(|tok| Token::new(&tok))
            .collect();
        for token in &mut tokens {
            self.first_pass(token);
        }
        for idx in 1..tokens.len() {
            let (head, tail) = tokens.split_at_mut(idx);
            self.second_pass(&mut head[idx - 1], &tail[0]);
        }
        tokens
            .split_last()
            .is_some_and(|(_, rest)| rest.iter().any(|t| t.sentbreak))
    }

    fn first_pass(&self, token: &mut Token) {
        let tok = token.tok.as_str();
        if matches!(tok, "." | "?" | "!") {
            token.sentbreak = true;
        } else if token.is_ellipsis() {
            token.ellipsis = true;
        } else if token.period_final && !tok.ends_with("..") {
            let stem = tok[..tok.len() - 1].to_lowercase();
            let last_part = stem.rsplit('-').next().unwrap_or(&stem);
            if self.is_abbreviation(&stem) || self.is_abbreviation(last_part) {
                token.abbr = true;
            } else {
                token.sentbreak = true;
            }
        }
    }

    fn second_pass(&self, token: &mut Token, next: &Token) {
        if !token.period_final {
            return;
        }
        let typ = token.type_no_period().to_string();
        let next_typ = next.type_no_sentperiod();
        let is_initial = token.is_initial();

        if self
            .params
            .collocations
            .contains(&(typ.clone(), next_typ.to_string()))
        {
            token.sentbreak = false;
            token.abbr = true;
            return;
        }

        if (token.abbr || token.ellipsis) && !is_initial {
            if self.ortho_heuristic(next) == Ortho::Starter {
                token.sentbreak = true;
                return;
            }
            if next.first_upper() && self.params.sentence_starters.contains(next_typ) {
                token.sentbreak = true;
                return;
            }
        }

        if is_initial || typ == NUMBER_TYPE {
            let verdict = self.ortho_heuristic(next);
            if verdict == Ortho::NotStarter {
                token.sentbreak = false;
                token.abbr = true;
                return;
            }
            // "J. Bach": an initial before a word never seen lowercase.
            if verdict == Ortho::Unknown
                && is_initial
                && next.first_upper()
                && self.params.ortho(next_typ) & ORTHO_LC == 0
            {
                token.sentbreak = false;
                token.abbr = true;
            }
        }
    }

    fn ortho_heuristic(&self, token: &Token) -> Ortho {
        if ";:,.!?".contains(token.tok.as_str()) {
            return Ortho::NotStarter;
        }
        let context = self.params.ortho(token.type_no_sentperiod());
        if token.first_upper() && context & ORTHO_LC != 0 && context & ORTHO_MID_UC == 0 {
            return Ortho::Starter;
        }
        if token.first_lower() && (context & ORTHO_UC != 0 || context & ORTHO_BEG_LC == 0) {
            return Ortho::NotStarter;
        }
        Ortho::Unknown
    }
}

fn is_non_word(c: char) -> bool {
    matches!(
        c,
        ')' | '"' | ';' | '}' | ']' | '*' | ':' | '@' | '\'' | '(' | '{' | '[' | '!' | '?'
    )
}

fn is_word_start(c: char) -> bool {
    !matches!(
        c,
        '(' | '"' | '`' | '{' | '[' | ':' | ';' | '&' | '#' | '*' | '@' | ')' | '}' | ']' | '-'
            | ','
    )
}

/// Length of a `--`, `..` or `. . .` run starting at `at`.
fn multi_char_len(chars: &[char], at: usize) -> Option<usize> {
    let run = |c: char| chars[at..].iter().take_while(|&&x| x == c).count();
    match (chars.get(at), chars.get(at + 1)) {
        (Some('-'), Some('-')) => Some(run('-')),
        (Some('.'), Some('.')) => Some(run('.')),
        (Some('.'), Some(_)) => {
            let pairs = chars[at..]
                .chunks(2)
                .take_while(|pair| matches!(pair, ['.', ws] if ws.is_whitespace()))
                .count();
            if pairs >= 2 && chars.get(at + 2 * pairs) == Some(&'.') {
                Some(2 * pairs + 1)
            } else if pairs >= 3 {
                Some(2 * pairs - 1)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn ends_word(chars: &[char], at: usize) -> bool {
    let Some(&c) = chars.get(at) else {
        return true;
    };
    if c.is_whitespace() || is_non_word(c) || multi_char_len(chars, at).is_some() {
        return true;
    }
    c == ','
        && match chars.get(at + 1) {
            None => true,
            Some(&n) => {
                n.is_whitespace() || is_non_word(n) || multi_char_len(chars, at + 1).is_some()
            }
        }
}

/// Split one line into Punkt word tokens; trailing periods stay attached.
fn word_tokens(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut at = 0;
    while at < chars.len() {
        if chars[at].is_whitespace() {
            at += 1;
            continue;
        }
        let end = if let Some(len) = multi_char_len(&chars, at) {
            at + len
        } else if is_word_start(chars[at]) {
            let mut end = at + 1;
            while !ends_word(&chars, end) {
                end += 1;
            }
            end
        } else {
            at + 1
        };
        tokens.push(chars[at..end].iter().collect());
        at = end;
    }
    tokens
}

/// A `.`, `?` or `!` followed by punctuation or by whitespace and another token.
#[derive(Debug, Clone, Copy)]
struct PeriodContext {
    start: usize,
    end: usize,
    after_end: usize,
    next_token: Option<usize>,
}

fn period_contexts(text: &str) -> Vec<PeriodContext> {
    let mut found = Vec::new();
    for (start, c) in text.char_indices() {
        if !matches!(c, '.' | '?' | '!') {
            continue;
        }
        let end = start + 1;
        let rest = &text[end..];
        let Some(next) = rest.chars().next() else {
            continue;
        };
        if is_non_word(next) {
            found.push(PeriodContext {
                start,
                end,
                after_end: end + next.len_utf8(),
                next_token: None,
            });
        } else if next.is_whitespace() {
            let token_start = end + (rest.len() - rest.trim_start().len());
            let token = &text[token_start..];
            let token_len = token.find(char::is_whitespace).unwrap_or(token.len());
            if token_len > 0 {
                found.push(PeriodContext {
                    start,
                    end,
                    after_end: token_start + token_len,
                    next_token: Some(token_start),
                });
            }
        }
    }
    found
}

/// Candidate ends paired with the start of the word they close.
///
/// A candidate whose word overlaps the next candidate's word is dropped, so a
/// run like `!!` is judged once on its last mark.
fn potential_ends(text: &str) -> Vec<(PeriodContext, usize)> {
    let mut ends = Vec::new();
    let mut previous: Option<(PeriodContext, usize, usize)> = None;
    let (mut slice_start, mut slice_stop) = (0, 0);
    for period in period_contexts(text) {
        let before = &text[slice_stop..period.start];
        let word_start = match before.bytes().rposition(|b| b.is_ascii_whitespace() || b == 0x0b) {
            Some(idx) if idx > 0 => slice_stop + idx + 1,
            _ => slice_start,
        };
        if let Some((prev, prev_start, prev_stop)) = previous {
            if prev_stop <= word_start {
                ends.push((prev, prev_start));
            }
        }
        previous = Some((period, word_start, period.start));
        slice_start = word_start;
        slice_stop = period.start;
    }
    if let Some((prev, prev_start, _)) = previous {
        ends.push((prev, prev_start));
    }
    ends
}

/// Move closing quotes and brackets that open a span onto the end of the previous one.
fn realign_boundaries(text: &str, slices: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut shift = 0;
    for (idx, &(start, stop)) in slices.iter().enumerate() {
        let start = start + shift;
        let Some(&(next_start, next_stop)) = slices.get(idx + 1) else {
            if start < stop {
                spans.push((start, stop));
            }
            continue;
        };
        let next = text.get(next_start..next_stop).unwrap_or("");
        if let Some((closing, consumed)) = leading_closers(next) {
            spans.push((start, next_start + closing));
            shift = consumed;
        } else {
            shift = 0;
            if start < stop {
                spans.push((start, stop));
            }
        }
    }
    spans
}

/// Closing run at the head of `span` when followed by whitespace, `--` or the end.
fn leading_closers(span: &str) -> Option<(usize, usize)> {
    let closing = span
        .bytes()
        .take_while(|b| matches!(b, b'"' | b'\'' | b')' | b']' | b'}'))
        .count();
    if closing == 0 {
        return None;
    }
    let rest = &span[closing..];
    if rest.is_empty() || rest.starts_with("--") {
        return Some((closing, closing));
    }
    let trimmed = rest.trim_start();
    (trimmed.len() < rest.len()).then(|| (closing, span.len() - trimmed.len()))
}
