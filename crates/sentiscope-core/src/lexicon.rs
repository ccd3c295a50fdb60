use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Valence bounds of the built-in lexicon scale.
pub const MIN_VALENCE: f64 = -4.0;
pub const MAX_VALENCE: f64 = 4.0;

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    words: BTreeMap<String, f64>,
}

/// Extra word valences merged over the scorer's built-in lexicon.
///
/// Keys are stored lowercased and trimmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexiconOverrides {
    pub words: BTreeMap<String, f64>,
}

impl LexiconOverrides {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Load and validate lexicon overrides from a YAML file.
///
/// ```yaml
/// words:
///   stellar: 2.8
///   meh: -0.6
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_lexicon_overrides(path: &Path) -> Result<LexiconOverrides, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LexiconFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_lexicon_overrides(&content)
}

/// Parse and validate lexicon overrides from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_lexicon_overrides(content: &str) -> Result<LexiconOverrides, ConfigError> {
    let file: LexiconFile = serde_yaml::from_str(content).map_err(ConfigError::LexiconFileParse)?;
    validate_lexicon(file)
}

fn validate_lexicon(file: LexiconFile) -> Result<LexiconOverrides, ConfigError> {
    let mut seen = HashSet::new();
    let mut words = BTreeMap::new();

    for (raw_word, valence) in file.words {
        let word = raw_word.trim().to_lowercase();
        if word.is_empty() {
            return Err(ConfigError::Validation(
                "lexicon word must be non-empty".to_string(),
            ));
        }

        if word.split_whitespace().count() > 1 {
            return Err(ConfigError::Validation(format!(
                "lexicon word '{raw_word}' must be a single token"
            )));
        }

        if !valence.is_finite() || !(MIN_VALENCE..=MAX_VALENCE).contains(&valence) {
            return Err(ConfigError::Validation(format!(
                "lexicon word '{word}' has valence {valence}; must be within [{MIN_VALENCE}, {MAX_VALENCE}]"
            )));
        }

        if !seen.insert(word.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate lexicon word: '{word}'"
            )));
        }

        words.insert(word, valence);
    }

    Ok(LexiconOverrides { words })
}
