use indexmap::IndexMap;
use regex::{NoExpand, Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Keyword document as supplied on disk. Every field is required.
///
/// `abbreviation_map` keeps declaration order because expansions are applied
/// cumulatively: a later pattern sees the output of every earlier one.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordTables {
    pub youth_keywords: Vec<String>,
    pub mens_keywords: Vec<String>,
    pub ladies_keywords: Vec<String>,
    pub color_keywords: Vec<String>,
    pub disability_keywords: Vec<String>,
    pub abbreviation_map: IndexMap<String, String>,
    pub club_suffixes: Vec<String>,
}

impl KeywordTables {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, KeywordError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| KeywordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, KeywordError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Builds the matchers used by the grouping engine.
    pub fn compile(&self) -> Result<KeywordRules, KeywordError> {
        let abbreviations = self
            .abbreviation_map
            .iter()
            .map(|(pattern, expansion)| Abbreviation::new(pattern, expansion))
            .collect::<Result<Vec<_>, _>>()?;

        let stop_words = self
            .youth_keywords
            .iter()
            .chain(&self.mens_keywords)
            .chain(&self.ladies_keywords)
            .chain(&self.color_keywords)
            .chain(&self.disability_keywords);

        Ok(KeywordRules {
            abbreviations,
            youth: KeywordMatcher::new(&self.youth_keywords)?,
            ladies: KeywordMatcher::new(&self.ladies_keywords)?,
            mens: KeywordMatcher::new(&self.mens_keywords)?,
            disability: KeywordMatcher::new(&self.disability_keywords)?,
            youth_stop_words: TokenSet::new(&self.youth_keywords),
            all_stop_words: TokenSet::new(stop_words),
            club_suffixes: TokenSet::new(&self.club_suffixes),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeywordError {
    #[error("failed to read keyword tables from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid keyword document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("abbreviation pattern '{pattern}' does not compile: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Compiled, read-only form of [`KeywordTables`].
///
/// Shared by reference across any number of concurrent grouping runs.
#[derive(Debug, Clone)]
pub struct KeywordRules {
    abbreviations: Vec<Abbreviation>,
    youth: KeywordMatcher,
    ladies: KeywordMatcher,
    mens: KeywordMatcher,
    disability: KeywordMatcher,
    youth_stop_words: TokenSet,
    all_stop_words: TokenSet,
    club_suffixes: TokenSet,
}

impl KeywordRules {
    pub(crate) fn expand_abbreviations(&self, name: &str) -> String {
        self.abbreviations
            .iter()
            .fold(name.to_string(), |current, abbreviation| {
                abbreviation.apply(&current)
            })
    }

    pub(crate) fn youth(&self) -> &KeywordMatcher {
        &self.youth
    }

    pub(crate) fn ladies(&self) -> &KeywordMatcher {
        &self.ladies
    }

    pub(crate) fn mens(&self) -> &KeywordMatcher {
        &self.mens
    }

    pub(crate) fn disability(&self) -> &KeywordMatcher {
        &self.disability
    }

    pub fn youth_stop_words(&self) -> &TokenSet {
        &self.youth_stop_words
    }

    /// Union of every keyword category, colors included.
    pub fn all_stop_words(&self) -> &TokenSet {
        &self.all_stop_words
    }

    pub fn club_suffixes(&self) -> &TokenSet {
        &self.club_suffixes
    }
}

#[derive(Debug, Clone)]
struct Abbreviation {
    pattern: Regex,
    expansion: String,
}

impl Abbreviation {
    fn new(pattern: &str, expansion: &str) -> Result<Self, KeywordError> {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| KeywordError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: compiled,
            expansion: expansion.to_string(),
        })
    }

    fn apply(&self, name: &str) -> String {
        self.pattern
            .replace_all(name, NoExpand(&self.expansion))
            .into_owned()
    }
}

/// Whole-word, case-insensitive existence test over one keyword category.
#[derive(Debug, Clone)]
pub(crate) struct KeywordMatcher {
    // An empty category never matches.
    pattern: Option<Regex>,
}

impl KeywordMatcher {
    fn new(keywords: &[String]) -> Result<Self, KeywordError> {
        let alternatives = keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let source = format!(r"\b(?:{})\b", alternatives.join("|"));
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|source_err| KeywordError::InvalidPattern {
                pattern: source.clone(),
                source: source_err,
            })?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub(crate) fn is_match(&self, haystack: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(haystack))
    }
}

/// Case-insensitive membership set for single tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    tokens: HashSet<String>,
}

impl TokenSet {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|token| token.as_ref().trim().to_lowercase())
                .filter(|token| !token.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "youth_keywords": ["Youth", "Juniors"],
        "mens_keywords": ["Mens", "Vets"],
        "ladies_keywords": ["Ladies", "Women"],
        "color_keywords": ["Red", "Blue"],
        "disability_keywords": ["Disability"],
        "abbreviation_map": { "\\bUtd\\b": "United", "\\bUnited Res\\b": "United Reserves" },
        "club_suffixes": ["United", "Town"]
    }"#;

    #[test]
    fn parses_document_and_keeps_abbreviation_order() {
        let tables = KeywordTables::from_json_str(DOCUMENT).expect("document parses");
        let patterns: Vec<_> = tables.abbreviation_map.keys().cloned().collect();
        assert_eq!(patterns, vec![r"\bUtd\b", r"\bUnited Res\b"]);
    }

    #[test]
    fn missing_field_is_rejected() {
        let error = KeywordTables::from_json_str(
            r#"{ "youth_keywords": [], "mens_keywords": [], "ladies_keywords": [],
                 "color_keywords": [], "disability_keywords": [], "abbreviation_map": {} }"#,
        )
        .expect_err("club_suffixes is required");
        assert!(error.to_string().contains("club_suffixes"));
    }

    #[test]
    fn invalid_abbreviation_pattern_fails_compilation() {
        let mut tables = KeywordTables::from_json_str(DOCUMENT).expect("document parses");
        tables
            .abbreviation_map
            .insert("(unclosed".to_string(), "x".to_string());
        let error = tables.compile().expect_err("bad regex rejected");
        assert!(matches!(error, KeywordError::InvalidPattern { .. }));
    }

    #[test]
    fn expansions_are_cumulative_and_case_insensitive() {
        let rules = KeywordTables::from_json_str(DOCUMENT)
            .expect("document parses")
            .compile()
            .expect("rules compile");
        assert_eq!(
            rules.expand_abbreviations("Ashby UTD res"),
            "Ashby United Reserves"
        );
    }

    #[test]
    fn expansion_text_is_literal() {
        let mut tables = KeywordTables::from_json_str(DOCUMENT).expect("document parses");
        tables.abbreviation_map.clear();
        tables
            .abbreviation_map
            .insert(r"\bAth\b".to_string(), "$1 Athletic".to_string());
        let rules = tables.compile().expect("rules compile");
        assert_eq!(rules.expand_abbreviations("Ashby Ath"), "Ashby $1 Athletic");
    }

    #[test]
    fn keyword_matcher_is_whole_word_and_case_insensitive() {
        let matcher =
            KeywordMatcher::new(&["Ladies".to_string(), "Women".to_string()]).expect("compiles");
        assert!(matcher.is_match("ashby LADIES"));
        assert!(!matcher.is_match("Ashby Womenswear"));
        assert!(!KeywordMatcher::new(&[]).expect("compiles").is_match("anything"));
    }

    #[test]
    fn stop_word_union_covers_every_category() {
        let rules = KeywordTables::from_json_str(DOCUMENT)
            .expect("document parses")
            .compile()
            .expect("rules compile");
        assert!(rules.all_stop_words().contains("red"));
        assert!(rules.all_stop_words().contains("DISABILITY"));
        assert!(!rules.youth_stop_words().contains("Ladies"));
        assert_eq!(rules.all_stop_words().len(), 9);
    }
}
